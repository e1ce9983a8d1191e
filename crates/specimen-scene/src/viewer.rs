//! Specimen viewer
//!
//! The [`Viewer`] is the entry point for the UI layer. It owns the
//! [`ViewerState`], the factory catalog and the settings, and performs
//! specimen swaps as one synchronous sequence:
//!
//! 1. look up the factory (unknown keys change nothing)
//! 2. build and validate the model (invalid models change nothing)
//! 3. tear down the previous specimen
//! 4. instantiate nodes, register components, create labels
//! 5. fit the camera and render the description

use ahash::AHashMap;
use specimen_doc::{render_description, RenderedDescription};
use specimen_settings::ViewerSettings;

use crate::camera::Camera;
use crate::component::{Component, Subtree};
use crate::cross_section::CrossSection;
use crate::diagnostics::OrphanReport;
use crate::error::{SceneError, SceneResult};
use crate::factory::{NodeSpec, NodeSpecKind, SpecimenCatalog, SpecimenModel};
use crate::graph::{NodeId, NodeKind, SceneGraph};
use crate::label::LabelManager;
use crate::state::{DirtyFlags, LoadedSpecimen, ViewerState};
use crate::visibility;

/// Outcome of one frame
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Labels whose opacity was updated
    pub updated: usize,
    /// Labels given a screen position
    pub positioned: usize,
    /// Labels skipped this frame
    pub skipped: Vec<SceneError>,
    /// Changes since the previous frame
    pub dirty: DirtyFlags,
}

/// Specimen viewer
#[derive(Debug)]
pub struct Viewer {
    state: ViewerState,
    catalog: SpecimenCatalog,
    settings: ViewerSettings,
}

impl Viewer {
    pub fn new(catalog: SpecimenCatalog, settings: ViewerSettings) -> Self {
        Self {
            state: ViewerState::new(&settings),
            catalog,
            settings,
        }
    }

    /// Viewer with default settings
    pub fn with_catalog(catalog: SpecimenCatalog) -> Self {
        Self::new(catalog, ViewerSettings::default())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn catalog(&self) -> &SpecimenCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Components of the loaded specimen in factory order
    pub fn components(&self) -> &[Component] {
        self.state.components.list()
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.state.components.get(name)
    }

    pub fn labels(&self) -> &LabelManager {
        &self.state.labels
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.state.graph
    }

    pub fn specimen(&self) -> Option<&LoadedSpecimen> {
        self.state.specimen.as_ref()
    }

    pub fn description(&self) -> Option<&RenderedDescription> {
        self.state.description.as_ref()
    }

    pub fn cross_section(&self) -> &CrossSection {
        &self.state.cross_section
    }

    pub fn camera(&self) -> &Camera {
        &self.state.camera
    }

    /// Mutable camera access; marks the camera dirty
    pub fn camera_mut(&mut self) -> &mut Camera {
        self.state.mark(DirtyFlags::CAMERA);
        &mut self.state.camera
    }

    // =========================================================================
    // Specimen lifecycle
    // =========================================================================

    /// Replace the displayed specimen
    ///
    /// Unknown keys and invalid models are rejected before anything is torn
    /// down, leaving the current specimen intact.
    pub fn load_specimen(&mut self, key: &str) -> SceneResult<&[Component]> {
        let factory = self
            .catalog
            .get(key)
            .cloned()
            .ok_or_else(|| SceneError::UnknownSpecimen(key.to_string()))?;

        let model = factory.build();
        model.validate()?;

        self.unload();

        if let Err(e) = self.instantiate(key, factory.display_name(), &model) {
            log::warn!("Failed to build specimen '{}': {}", key, e);
            self.unload();
            return Err(e);
        }

        log::info!(
            "Loaded specimen '{}' ({} components, {} labels)",
            key,
            self.state.components.len(),
            self.state.labels.len()
        );
        Ok(self.state.components.list())
    }

    /// Tear down the current specimen
    ///
    /// Removes every label, the specimen's nodes and its components. Calling
    /// this with nothing loaded is a no-op. Returns the number of labels
    /// removed from the specimen subtree.
    pub fn unload(&mut self) -> usize {
        let owner = self
            .state
            .specimen
            .as_ref()
            .map(|s| s.root)
            .unwrap_or_else(|| self.state.graph.root());

        let removed = self
            .state
            .labels
            .remove_all(&mut self.state.graph, &mut self.state.overlay, owner);

        if let Some(specimen) = self.state.specimen.take() {
            if self.state.graph.contains(specimen.root) {
                if let Err(e) = self.state.graph.remove_subtree(specimen.root) {
                    log::warn!("Could not remove specimen '{}': {}", specimen.key, e);
                }
            }
            self.state.description = None;
            self.state.mark(DirtyFlags::ALL);
            log::info!("Unloaded specimen '{}'", specimen.key);
        }
        self.state.components.clear();

        removed
    }

    fn instantiate(
        &mut self,
        key: &str,
        display_name: &str,
        model: &SpecimenModel,
    ) -> SceneResult<()> {
        let scene_root = self.state.graph.root();
        let mut names = AHashMap::new();
        let root = add_spec(&mut self.state.graph, scene_root, &model.root, &mut names)?;

        self.state.specimen = Some(LoadedSpecimen {
            key: key.to_string(),
            title: display_name.to_string(),
            root,
        });

        for spec in &model.components {
            let node = *names.get(spec.node.as_str()).ok_or_else(|| SceneError::UnknownNode {
                component: spec.name.clone(),
                node: spec.node.clone(),
            })?;
            let subtree = Subtree::of(&self.state.graph, node)?;
            subtree.set_visible(&mut self.state.graph, spec.visible)?;
            self.state.components.register(
                Component::new(spec.name.clone(), spec.display_name.clone(), subtree)
                    .with_visible(spec.visible),
            )?;
        }

        for spec in &model.labels {
            let component = self
                .state
                .components
                .get_mut(&spec.component)
                .ok_or_else(|| SceneError::ComponentNotFound(spec.component.clone()))?;
            self.state.labels.create(
                &mut self.state.graph,
                &mut self.state.overlay,
                component,
                &spec.text,
                spec.anchor,
            )?;
        }

        self.state.cross_section.reset();
        self.fit_camera(root);

        if let Some(document) = &model.description {
            let rendered = render_description(document, &self.settings.document);
            if let Some(view) = rendered.tab_view() {
                if let Some(specimen) = self.state.specimen.as_mut() {
                    specimen.title = view.title().to_string();
                }
            }
            self.state.description = Some(rendered);
        }

        self.state.mark(DirtyFlags::ALL);
        Ok(())
    }

    fn fit_camera(&mut self, root: NodeId) {
        let camera = &mut self.state.camera;
        match self.state.graph.subtree_extent(root) {
            Some((min, max)) => camera.fit_to(min, max, &self.settings.camera),
            None => *camera = Camera::with_settings(&self.settings.camera),
        }
        camera.set_home();
    }

    // =========================================================================
    // UI operations
    // =========================================================================

    /// Show or hide a component together with its labels
    pub fn toggle_component(&mut self, name: &str, visible: bool) -> SceneResult<()> {
        let component = self
            .state
            .components
            .get_mut(name)
            .ok_or_else(|| SceneError::ComponentNotFound(name.to_string()))?;

        visibility::toggle(
            component,
            visible,
            &mut self.state.graph,
            &mut self.state.overlay,
            self.state.labels.labels(),
        )?;
        self.state.mark(DirtyFlags::SCENE | DirtyFlags::LABELS);
        log::info!("{} component '{}'", if visible { "Showing" } else { "Hiding" }, name);
        Ok(())
    }

    /// Return the camera to the view recorded at load time
    pub fn reset_camera(&mut self) {
        self.state.camera.reset_view();
        self.state.mark(DirtyFlags::CAMERA);
    }

    /// Flip the cross-section cut, returning whether it is now enabled
    pub fn toggle_cross_section(&mut self) -> bool {
        let enabled = self.state.cross_section.toggle();
        self.state.mark(DirtyFlags::SCENE);
        log::info!("Cross-section {}", if enabled { "enabled" } else { "disabled" });
        enabled
    }

    /// Render a description document into the info panel
    pub fn render_description(&mut self, document: &str) -> &RenderedDescription {
        let rendered = render_description(document, &self.settings.document);
        self.state.mark(DirtyFlags::DESCRIPTION);
        self.state.description.insert(rendered)
    }

    /// Switch the active description tab
    pub fn select_tab(&mut self, id: &str) -> SceneResult<()> {
        self.state
            .description
            .as_mut()
            .ok_or(SceneError::NoDescription)?
            .select_tab(id)?;
        self.state.mark(DirtyFlags::DESCRIPTION);
        Ok(())
    }

    /// Per-frame update: fade labels, lay them out and clear dirty flags
    pub fn frame(&mut self, viewport: [f32; 2]) -> FrameReport {
        let state = &mut self.state;
        let camera_position = state.camera.world_position();

        let fade = state
            .labels
            .update_all(&state.graph, &mut state.overlay, camera_position);
        let layout = state
            .labels
            .layout(&state.graph, &mut state.overlay, &state.camera, viewport);

        FrameReport {
            updated: fade.updated,
            positioned: layout.updated,
            skipped: fade.skipped,
            dirty: state.take_dirty(),
        }
    }

    /// Count labels in the scene, the overlay and the label set
    pub fn orphan_check(&self) -> OrphanReport {
        OrphanReport::collect(&self.state)
    }
}

/// Add a blueprint tree under `parent`, recording node ids by name
fn add_spec<'a>(
    graph: &mut SceneGraph,
    parent: NodeId,
    spec: &'a NodeSpec,
    names: &mut AHashMap<&'a str, NodeId>,
) -> SceneResult<NodeId> {
    let kind = match &spec.kind {
        NodeSpecKind::Mesh(mesh) => NodeKind::Mesh(*mesh),
        NodeSpecKind::Group => NodeKind::Group,
    };
    let id = graph.add_node(parent, spec.name.clone(), kind, spec.transform)?;
    if !spec.visible {
        graph.set_visible(id, false)?;
    }
    names.insert(spec.name.as_str(), id);

    for child in &spec.children {
        add_spec(graph, id, child, names)?;
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::SpecimenFactory;
    use crate::graph::{MeshData, Primitive};
    use crate::overlay::Display;
    use lin_alg::f32::Vec3;

    const DESCRIPTION: &str = "# Test Shell\n\n\
        A small coiled shell used to exercise the viewer. It has enough text to be segmented.\n\n\
        ## Key Features\n\n- Coiled\n- Ribbed\n\n\
        ## Taxonomy & Classification\n\nMollusca\n";

    struct Shell;

    impl SpecimenFactory for Shell {
        fn key(&self) -> &str {
            "shell"
        }

        fn display_name(&self) -> &str {
            "Shell"
        }

        fn build(&self) -> SpecimenModel {
            let mesh = MeshData::new(
                Primitive::Torus {
                    radius: 2.0,
                    tube: 0.5,
                },
                [0.8, 0.6, 0.4, 1.0],
            );
            SpecimenModel::new(
                NodeSpec::group("shell_root")
                    .with_child(NodeSpec::mesh("coil", mesh))
                    .with_child(
                        NodeSpec::group("chambers")
                            .with_child(NodeSpec::mesh("chamber_1", mesh).scaled(0.5)),
                    ),
            )
            .component("coil", "Coil", "coil")
            .hidden_component("chambers", "Chambers", "chambers")
            .label("coil", "Aperture", Vec3::new(2.5, 0.0, 0.0))
            .label("coil", "Umbilicus", Vec3::new(0.0, 0.0, 0.0))
            .label("chambers", "Septum", Vec3::new(1.0, 0.0, 0.0))
            .description(DESCRIPTION)
        }
    }

    struct Pebble;

    impl SpecimenFactory for Pebble {
        fn key(&self) -> &str {
            "pebble"
        }

        fn display_name(&self) -> &str {
            "Pebble"
        }

        fn build(&self) -> SpecimenModel {
            SpecimenModel::new(NodeSpec::mesh(
                "stone",
                MeshData::new(Primitive::Sphere { radius: 1.0 }, [0.5, 0.5, 0.5, 1.0]),
            ))
            .component("stone", "Stone", "stone")
            .label("stone", "Surface", Vec3::new(0.0, 1.0, 0.0))
        }
    }

    struct Broken;

    impl SpecimenFactory for Broken {
        fn key(&self) -> &str {
            "broken"
        }

        fn display_name(&self) -> &str {
            "Broken"
        }

        fn build(&self) -> SpecimenModel {
            Pebble.build().component("stone", "Stone again", "stone")
        }
    }

    /// Two components claiming the same node
    struct Twinned;

    impl SpecimenFactory for Twinned {
        fn key(&self) -> &str {
            "twinned"
        }

        fn display_name(&self) -> &str {
            "Twinned"
        }

        fn build(&self) -> SpecimenModel {
            Pebble.build().component("outer", "Outer", "stone")
        }
    }

    fn viewer() -> Viewer {
        let mut catalog = SpecimenCatalog::new();
        catalog.register(Shell);
        catalog.register(Pebble);
        catalog.register(Broken);
        catalog.register(Twinned);
        Viewer::with_catalog(catalog)
    }

    fn assert_consistent(viewer: &Viewer) {
        let state = viewer.state();
        for component in viewer.components() {
            assert!(visibility::is_consistent(
                component,
                &state.graph,
                &state.overlay,
                state.labels.labels()
            ));
        }
    }

    #[test]
    fn test_load_specimen() {
        let mut viewer = viewer();
        let names: Vec<String> = viewer
            .load_specimen("shell")
            .unwrap()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, vec!["coil", "chambers"]);

        assert_eq!(viewer.labels().len(), 3);
        assert_eq!(viewer.specimen().unwrap().title, "Test Shell");
        assert!(!viewer.component("chambers").unwrap().visible);
        assert!(viewer.description().unwrap().is_tabbed());
        assert_consistent(&viewer);

        let report = viewer.orphan_check();
        assert_eq!(report.scene_labels, 3);
        assert!(report.is_balanced());
    }

    #[test]
    fn test_swap_does_not_accumulate() {
        let mut viewer = viewer();
        for key in ["shell", "pebble", "shell", "shell", "pebble"] {
            viewer.load_specimen(key).unwrap();
            let expected = viewer.catalog().get(key).unwrap().build().label_count();
            let report = viewer.orphan_check();
            assert_eq!(report.registered_labels, expected);
            assert!(report.is_balanced());
        }
    }

    #[test]
    fn test_unload_twice() {
        let mut viewer = viewer();
        viewer.load_specimen("shell").unwrap();

        assert_eq!(viewer.unload(), 3);
        let nodes = viewer.graph().len();
        assert!(viewer.orphan_check().is_clean());

        assert_eq!(viewer.unload(), 0);
        assert_eq!(viewer.graph().len(), nodes);
        assert!(viewer.graph().is_empty());
        assert!(viewer.components().is_empty());
    }

    #[test]
    fn test_unknown_specimen_keeps_state() {
        let mut viewer = viewer();
        viewer.load_specimen("shell").unwrap();
        let before = viewer.orphan_check();

        let err = viewer.load_specimen("dodo").unwrap_err();
        assert!(matches!(err, SceneError::UnknownSpecimen(ref k) if k == "dodo"));
        assert_eq!(viewer.specimen().unwrap().key, "shell");
        assert_eq!(viewer.orphan_check(), before);
        assert_eq!(viewer.components().len(), 2);
    }

    #[test]
    fn test_invalid_model_keeps_state() {
        let mut viewer = viewer();
        viewer.load_specimen("pebble").unwrap();

        let err = viewer.load_specimen("broken").unwrap_err();
        assert!(matches!(err, SceneError::DuplicateComponentName(_)));
        assert_eq!(viewer.specimen().unwrap().key, "pebble");
        assert_eq!(viewer.labels().len(), 1);
    }

    #[test]
    fn test_overlapping_components_keep_state() {
        let mut viewer = viewer();
        viewer.load_specimen("shell").unwrap();
        let before = viewer.orphan_check();

        let err = viewer.load_specimen("twinned").unwrap_err();
        assert!(matches!(
            err,
            SceneError::OverlappingComponents { ref first, ref second }
                if first == "stone" && second == "outer"
        ));
        assert_eq!(viewer.specimen().unwrap().key, "shell");
        assert_eq!(viewer.components().len(), 2);
        assert_eq!(viewer.orphan_check(), before);
        assert_consistent(&viewer);
    }

    #[test]
    fn test_toggle_component() {
        let mut viewer = viewer();
        viewer.load_specimen("shell").unwrap();

        viewer.toggle_component("coil", false).unwrap();
        let coil = viewer.component("coil").unwrap();
        assert!(!coil.visible);
        for id in coil.labels() {
            let element = viewer.labels().get(*id).unwrap().element;
            assert_eq!(viewer.state().overlay.get(element).unwrap().display, Display::Hidden);
        }
        assert_consistent(&viewer);

        viewer.toggle_component("chambers", true).unwrap();
        assert_consistent(&viewer);

        assert!(matches!(
            viewer.toggle_component("spine", true),
            Err(SceneError::ComponentNotFound(_))
        ));
    }

    #[test]
    fn test_reset_camera() {
        let mut viewer = viewer();
        viewer.load_specimen("pebble").unwrap();
        let home = viewer.camera().world_position();

        viewer.camera_mut().orbit(1.2, 0.4);
        viewer.camera_mut().zoom(2.0);
        viewer.reset_camera();

        let pos = viewer.camera().world_position();
        assert!((pos - home).magnitude() < 1e-4);
    }

    #[test]
    fn test_cross_section_resets_on_load() {
        let mut viewer = viewer();
        viewer.load_specimen("pebble").unwrap();
        assert!(viewer.toggle_cross_section());
        viewer.load_specimen("shell").unwrap();
        assert!(!viewer.cross_section().enabled);
    }

    #[test]
    fn test_select_tab() {
        let mut viewer = viewer();
        assert!(matches!(viewer.select_tab("features"), Err(SceneError::NoDescription)));

        viewer.load_specimen("shell").unwrap();
        viewer.select_tab("features").unwrap();
        let view = viewer.description().unwrap().tab_view().unwrap();
        assert_eq!(view.active_id(), Some("features"));

        assert!(matches!(viewer.select_tab("nope"), Err(SceneError::Document(_))));
        let view = viewer.description().unwrap().tab_view().unwrap();
        assert_eq!(view.active_id(), Some("features"));
    }

    #[test]
    fn test_render_description_verbatim() {
        let mut viewer = viewer();
        let rendered = viewer.render_description("Coming soon.");
        assert!(!rendered.is_tabbed());
        assert_eq!(rendered.to_html(), "Coming soon.");
    }

    #[test]
    fn test_frame_clears_dirty() {
        let mut viewer = viewer();
        viewer.load_specimen("shell").unwrap();

        let report = viewer.frame([800.0, 600.0]);
        assert_eq!(report.updated, 3);
        assert!(report.skipped.is_empty());
        assert!(report.dirty.contains(DirtyFlags::SCENE));

        let report = viewer.frame([800.0, 600.0]);
        assert!(report.dirty.is_empty());
    }
}
