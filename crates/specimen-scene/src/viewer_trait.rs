//! Viewer abstraction trait
//!
//! This module defines the `ViewerLike` trait that abstracts the viewer interface,
//! allowing commands to work with different viewer implementations (e.g. the
//! [`Viewer`](crate::Viewer) itself or a UI adapter wrapping it).

use specimen_doc::RenderedDescription;

use crate::component::Component;
use crate::diagnostics::OrphanReport;
use crate::error::SceneResult;
use crate::factory::SpecimenCatalog;
use crate::label::LabelManager;
use crate::state::LoadedSpecimen;
use crate::viewer::{FrameReport, Viewer};

/// Trait for types that can serve as a viewer backend for command execution
pub trait ViewerLike {
    // =========================================================================
    // Queries
    // =========================================================================

    /// Registered specimen factories
    fn catalog(&self) -> &SpecimenCatalog;

    /// The specimen on display, if any
    fn specimen(&self) -> Option<&LoadedSpecimen>;

    /// Components of the loaded specimen in factory order
    fn components(&self) -> &[Component];

    /// Active labels
    fn labels(&self) -> &LabelManager;

    /// The rendered description, if any
    fn description(&self) -> Option<&RenderedDescription>;

    /// Label counts for leak detection
    fn orphan_check(&self) -> OrphanReport;

    // =========================================================================
    // Operations
    // =========================================================================

    /// Replace the displayed specimen
    fn load_specimen(&mut self, key: &str) -> SceneResult<&[Component]>;

    /// Tear down the displayed specimen
    fn unload(&mut self) -> usize;

    /// Show or hide a component with its labels
    fn toggle_component(&mut self, name: &str, visible: bool) -> SceneResult<()>;

    /// Return to the home view
    fn reset_camera(&mut self);

    /// Flip the cross-section, returning the new state
    fn toggle_cross_section(&mut self) -> bool;

    /// Render a description into the info panel
    fn render_description(&mut self, document: &str) -> &RenderedDescription;

    /// Switch description tabs
    fn select_tab(&mut self, id: &str) -> SceneResult<()>;

    /// Run one frame
    fn frame(&mut self, viewport: [f32; 2]) -> FrameReport;

    /// Whether a component is currently shown
    fn is_component_visible(&self, name: &str) -> Option<bool> {
        self.components()
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.visible)
    }
}

// ============================================================================
// ViewerLike implementation
// ============================================================================

impl ViewerLike for Viewer {
    fn catalog(&self) -> &SpecimenCatalog {
        Viewer::catalog(self)
    }

    fn specimen(&self) -> Option<&LoadedSpecimen> {
        Viewer::specimen(self)
    }

    fn components(&self) -> &[Component] {
        Viewer::components(self)
    }

    fn labels(&self) -> &LabelManager {
        Viewer::labels(self)
    }

    fn description(&self) -> Option<&RenderedDescription> {
        Viewer::description(self)
    }

    fn orphan_check(&self) -> OrphanReport {
        Viewer::orphan_check(self)
    }

    fn load_specimen(&mut self, key: &str) -> SceneResult<&[Component]> {
        Viewer::load_specimen(self, key)
    }

    fn unload(&mut self) -> usize {
        Viewer::unload(self)
    }

    fn toggle_component(&mut self, name: &str, visible: bool) -> SceneResult<()> {
        Viewer::toggle_component(self, name, visible)
    }

    fn reset_camera(&mut self) {
        Viewer::reset_camera(self)
    }

    fn toggle_cross_section(&mut self) -> bool {
        Viewer::toggle_cross_section(self)
    }

    fn render_description(&mut self, document: &str) -> &RenderedDescription {
        Viewer::render_description(self, document)
    }

    fn select_tab(&mut self, id: &str) -> SceneResult<()> {
        Viewer::select_tab(self, id)
    }

    fn frame(&mut self, viewport: [f32; 2]) -> FrameReport {
        Viewer::frame(self, viewport)
    }
}
