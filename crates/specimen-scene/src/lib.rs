//! Specimen Scene Management
//!
//! This crate assembles specimens into a scene and keeps their annotations
//! in step with it:
//!
//! - [`SceneGraph`] - Node arena with explicit mesh/group/label tags
//! - [`Overlay`] - Screen-space elements drawn over the 3D view
//! - [`Camera`] - Orbit camera with a home view
//! - [`ComponentRegistry`] - Toggle-able parts of the loaded specimen
//! - [`LabelManager`] - Labels anchored to 3D points, faded by distance
//! - [`visibility::toggle`] - Show/hide a component together with its labels
//! - [`SpecimenFactory`] and [`SpecimenCatalog`] - Specimen blueprints
//! - [`Viewer`] - Orchestrates specimen swaps and per-frame updates
//!
//! # Architecture
//!
//! All mutable state lives in one [`ViewerState`] owned by the [`Viewer`].
//! A specimen swap tears down every label of the previous specimen before
//! the next one is built, inside a single call, so a frame never sees a
//! half-built label set.
//!
//! # Example
//!
//! ```rust
//! use lin_alg::f32::Vec3;
//! use specimen_scene::{
//!     MeshData, NodeSpec, Primitive, SpecimenCatalog, SpecimenFactory, SpecimenModel, Viewer,
//! };
//!
//! struct Pebble;
//!
//! impl SpecimenFactory for Pebble {
//!     fn key(&self) -> &str { "pebble" }
//!     fn display_name(&self) -> &str { "Pebble" }
//!     fn build(&self) -> SpecimenModel {
//!         let stone = MeshData::new(Primitive::Sphere { radius: 1.0 }, [0.5, 0.5, 0.5, 1.0]);
//!         SpecimenModel::new(NodeSpec::mesh("stone", stone))
//!             .component("stone", "Stone", "stone")
//!             .label("stone", "Surface", Vec3::new(0.0, 1.0, 0.0))
//!     }
//! }
//!
//! let mut catalog = SpecimenCatalog::new();
//! catalog.register(Pebble);
//!
//! let mut viewer = Viewer::with_catalog(catalog);
//! viewer.load_specimen("pebble").unwrap();
//! viewer.toggle_component("stone", false).unwrap();
//! viewer.frame([800.0, 600.0]);
//! assert!(viewer.orphan_check().is_balanced());
//! ```

mod camera;
mod component;
mod cross_section;
mod diagnostics;
mod error;
mod factory;
mod graph;
mod label;
mod overlay;
mod state;
mod transform;
mod viewer;
mod viewer_trait;
pub mod visibility;

// Re-export main types
pub use camera::{Camera, CameraView};
pub use component::{Component, ComponentRegistry, Subtree};
pub use cross_section::{ClipPlane, CrossSection};
pub use diagnostics::OrphanReport;
pub use error::{SceneError, SceneResult};
pub use factory::{
    ComponentSpec, LabelSpec, NodeSpec, NodeSpecKind, SpecimenCatalog, SpecimenFactory,
    SpecimenModel,
};
pub use graph::{MeshData, NodeId, NodeKind, Primitive, SceneGraph, SceneNode};
pub use label::{Label, LabelId, LabelManager, LabelSet, LabelUpdateReport};
pub use overlay::{Display, ElementId, Overlay, OverlayElement};
pub use state::{DirtyFlags, LoadedSpecimen, ViewerState};
pub use transform::{Quat, Transform};
pub use viewer::{FrameReport, Viewer};
pub use viewer_trait::ViewerLike;

// Re-export types from dependencies that are part of the public API
pub use lin_alg::f32::Vec3;
pub use specimen_doc::RenderedDescription;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::component::Component;
    pub use crate::error::{SceneError, SceneResult};
    pub use crate::factory::{NodeSpec, SpecimenCatalog, SpecimenFactory, SpecimenModel};
    pub use crate::graph::{MeshData, Primitive};
    pub use crate::viewer::Viewer;
    pub use crate::viewer_trait::ViewerLike;
}
