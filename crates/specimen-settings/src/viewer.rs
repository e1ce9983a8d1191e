//! Viewer settings and their defaults

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SettingError, SettingResult};

/// Distance-based fading of screen-space labels
///
/// A label farther than `fade_distance` world units from the camera is drawn
/// with `faded_opacity`; anything at or inside the threshold uses
/// `full_opacity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Camera distance above which a label is faded
    pub fade_distance: f32,
    /// Opacity of labels beyond `fade_distance`
    pub faded_opacity: f32,
    /// Opacity of labels within `fade_distance`
    pub full_opacity: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            fade_distance: 10.0,
            faded_opacity: 0.3,
            full_opacity: 1.0,
        }
    }
}

impl LabelSettings {
    /// Opacity for a label at `distance` from the camera
    ///
    /// A distance exactly equal to the threshold keeps full opacity.
    pub fn opacity_for(&self, distance: f32) -> f32 {
        if distance > self.fade_distance {
            self.faded_opacity
        } else {
            self.full_opacity
        }
    }
}

/// Description document handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Documents shorter than this (in bytes, trimmed) are shown verbatim
    pub min_length: usize,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self { min_length: 100 }
    }
}

/// Camera defaults applied when a specimen is framed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view (degrees)
    pub fov: f32,
    /// Closest the camera is placed when framing a specimen
    pub min_distance: f32,
    /// Multiplier applied to the fitted distance
    pub fit_padding: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 45.0,
            min_distance: 5.0,
            fit_padding: 1.2,
        }
    }
}

/// All viewer settings
///
/// Every section falls back to its defaults when omitted, so an empty TOML
/// document yields `ViewerSettings::default()`.
///
/// ```toml
/// [labels]
/// fade_distance = 12.0
///
/// [document]
/// min_length = 80
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub labels: LabelSettings,
    pub document: DocumentSettings,
    pub camera: CameraSettings,
}

impl ViewerSettings {
    /// Parse and validate settings from a TOML string
    pub fn from_toml_str(text: &str) -> SettingResult<Self> {
        let settings: ViewerSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> SettingResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges
    pub fn validate(&self) -> SettingResult<()> {
        let labels = &self.labels;
        if !(labels.fade_distance.is_finite() && labels.fade_distance >= 0.0) {
            return Err(SettingError::invalid(
                "labels.fade_distance",
                "must be a non-negative number",
            ));
        }
        for (name, value) in [
            ("labels.faded_opacity", labels.faded_opacity),
            ("labels.full_opacity", labels.full_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingError::invalid(name, "must be within [0, 1]"));
            }
        }

        let camera = &self.camera;
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(SettingError::invalid(
                "camera.fov",
                "must be between 0 and 180 degrees",
            ));
        }
        if !(camera.min_distance > 0.0) {
            return Err(SettingError::invalid("camera.min_distance", "must be positive"));
        }
        if !(camera.fit_padding >= 1.0) {
            return Err(SettingError::invalid("camera.fit_padding", "must be at least 1.0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = ViewerSettings::default();
        assert_eq!(settings.labels.fade_distance, 10.0);
        assert_eq!(settings.labels.faded_opacity, 0.3);
        assert_eq!(settings.labels.full_opacity, 1.0);
        assert_eq!(settings.document.min_length, 100);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_opacity_rule() {
        let labels = LabelSettings::default();
        assert_eq!(labels.opacity_for(15.0), 0.3);
        assert_eq!(labels.opacity_for(5.0), 1.0);
        // Boundary is "not exceeding"
        assert_eq!(labels.opacity_for(10.0), 1.0);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings = ViewerSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ViewerSettings::default());
    }

    #[test]
    fn test_partial_toml() {
        let settings = ViewerSettings::from_toml_str(
            "[labels]\nfade_distance = 12.5\n\n[document]\nmin_length = 40\n",
        )
        .unwrap();
        assert_eq!(settings.labels.fade_distance, 12.5);
        assert_eq!(settings.labels.faded_opacity, 0.3);
        assert_eq!(settings.document.min_length, 40);
        assert_eq!(settings.camera, CameraSettings::default());
    }

    #[test]
    fn test_invalid_opacity_rejected() {
        let err = ViewerSettings::from_toml_str("[labels]\nfaded_opacity = 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            SettingError::InvalidValue { ref name, .. } if name == "labels.faded_opacity"
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let err = ViewerSettings::from_toml_str("[labels\nfade_distance = ").unwrap_err();
        assert!(matches!(err, SettingError::Deserialization(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[camera]\nfov = 30.0").unwrap();

        let settings = ViewerSettings::load(file.path()).unwrap();
        assert_eq!(settings.camera.fov, 30.0);
        assert_eq!(settings.camera.min_distance, 5.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ViewerSettings::load(Path::new("/nonexistent/viewer.toml")).unwrap_err();
        assert!(matches!(err, SettingError::Io(_)));
    }
}
