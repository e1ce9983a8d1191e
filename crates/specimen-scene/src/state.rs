//! Viewer state
//!
//! [`ViewerState`] owns every piece of mutable scene state. It is passed to
//! the operations that need it instead of living in globals.

use bitflags::bitflags;
use specimen_doc::RenderedDescription;
use specimen_settings::ViewerSettings;

use crate::camera::Camera;
use crate::component::ComponentRegistry;
use crate::cross_section::CrossSection;
use crate::graph::{NodeId, SceneGraph};
use crate::label::LabelManager;
use crate::overlay::Overlay;

bitflags! {
    /// What changed since the last frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u32 {
        /// Nodes added, removed or shown/hidden
        const SCENE = 0x01;
        /// Labels created, removed or restyled
        const LABELS = 0x02;
        /// Camera moved
        const CAMERA = 0x04;
        /// Description rendered or tab switched
        const DESCRIPTION = 0x08;
        const ALL = 0x0F;
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        DirtyFlags::empty()
    }
}

/// The specimen currently on display
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSpecimen {
    /// Catalog key
    pub key: String,
    pub title: String,
    /// Root of the specimen's subtree in the scene graph
    pub root: NodeId,
}

/// All mutable viewer state
#[derive(Debug)]
pub struct ViewerState {
    pub graph: SceneGraph,
    pub overlay: Overlay,
    pub components: ComponentRegistry,
    pub labels: LabelManager,
    pub camera: Camera,
    pub cross_section: CrossSection,
    pub specimen: Option<LoadedSpecimen>,
    pub description: Option<RenderedDescription>,
    pub dirty: DirtyFlags,
}

impl ViewerState {
    pub fn new(settings: &ViewerSettings) -> Self {
        Self {
            graph: SceneGraph::new(),
            overlay: Overlay::new(),
            components: ComponentRegistry::new(),
            labels: LabelManager::new(settings.labels.clone()),
            camera: Camera::with_settings(&settings.camera),
            cross_section: CrossSection::default(),
            specimen: None,
            description: None,
            dirty: DirtyFlags::empty(),
        }
    }

    pub fn mark(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Take and clear the dirty flags
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(&ViewerSettings::default())
    }
}
