//! Specimen Viewer Settings
//!
//! This crate provides the configuration for the specimen viewer:
//!
//! - [`LabelSettings`] - distance fade rule for screen-space labels
//! - [`DocumentSettings`] - description segmentation threshold
//! - [`CameraSettings`] - framing defaults
//!
//! Settings are plain serde structs loaded from TOML. Every field has a
//! default, so partial files are fine.
//!
//! # Example
//!
//! ```rust
//! use specimen_settings::ViewerSettings;
//!
//! let settings = ViewerSettings::from_toml_str("[labels]\nfade_distance = 8.0").unwrap();
//! assert_eq!(settings.labels.opacity_for(9.0), 0.3);
//! ```

mod error;
mod viewer;

pub use error::{SettingError, SettingResult};
pub use viewer::{CameraSettings, DocumentSettings, LabelSettings, ViewerSettings};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::{
        CameraSettings, DocumentSettings, LabelSettings, SettingError, ViewerSettings,
    };
}
