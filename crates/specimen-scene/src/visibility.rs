//! Component visibility
//!
//! A component's `visible` flag drives both its scene subtree and the overlay
//! elements of its labels. [`toggle`] applies all three together.

use crate::component::Component;
use crate::error::{SceneError, SceneResult};
use crate::graph::SceneGraph;
use crate::label::LabelSet;
use crate::overlay::{Display, Overlay};

/// Show or hide a component with its labels
///
/// The subtree root is checked before anything is written, so a failed call
/// leaves every flag untouched.
pub fn toggle(
    component: &mut Component,
    visible: bool,
    graph: &mut SceneGraph,
    overlay: &mut Overlay,
    labels: &LabelSet,
) -> SceneResult<()> {
    let root = component.subtree.root();
    if !graph.contains(root) {
        return Err(SceneError::NodeNotFound(root));
    }

    component.visible = visible;
    component.subtree.set_visible(graph, visible)?;

    let display = Display::from_visible(visible);
    for id in component.labels() {
        let Some(label) = labels.get(*id) else {
            continue;
        };
        if let Some(element) = overlay.get_mut(label.element) {
            element.display = display;
        }
    }

    log::debug!(
        "Component '{}' {}",
        component.name,
        if visible { "shown" } else { "hidden" }
    );
    Ok(())
}

/// Whether the subtree and every bound label agree with the component flag
pub fn is_consistent(
    component: &Component,
    graph: &SceneGraph,
    overlay: &Overlay,
    labels: &LabelSet,
) -> bool {
    if component.subtree.is_visible(graph) != Some(component.visible) {
        return false;
    }

    let expected = Display::from_visible(component.visible);
    component.labels().iter().all(|id| {
        labels
            .get(*id)
            .and_then(|label| overlay.get(label.element))
            .is_some_and(|element| element.display == expected)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Subtree;
    use crate::graph::{MeshData, NodeKind, Primitive};
    use crate::label::LabelManager;
    use crate::transform::Transform;
    use lin_alg::f32::Vec3;
    use specimen_settings::LabelSettings;

    fn setup() -> (SceneGraph, Overlay, LabelManager, Component) {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let mesh = graph
            .add_node(
                root,
                "crystal",
                NodeKind::Mesh(MeshData::new(
                    Primitive::Cone {
                        radius: 0.5,
                        height: 2.0,
                    },
                    [0.6, 0.3, 0.8, 1.0],
                )),
                Transform::identity(),
            )
            .unwrap();
        let mut overlay = Overlay::new();
        let mut manager = LabelManager::new(LabelSettings::default());
        let subtree = Subtree::of(&graph, mesh).unwrap();
        let mut component = Component::new("crystal", "Crystals", subtree);
        for text in ["Apex", "Prism face"] {
            manager
                .create(&mut graph, &mut overlay, &mut component, text, Vec3::new(0.0, 1.0, 0.0))
                .unwrap();
        }
        (graph, overlay, manager, component)
    }

    fn displays(overlay: &Overlay) -> Vec<Display> {
        overlay.iter().map(|(_, e)| e.display).collect()
    }

    #[test]
    fn test_hide_applies_everywhere() {
        let (mut graph, mut overlay, manager, mut component) = setup();
        toggle(&mut component, false, &mut graph, &mut overlay, manager.labels()).unwrap();

        assert!(!component.visible);
        assert_eq!(component.subtree.is_visible(&graph), Some(false));
        assert_eq!(displays(&overlay), vec![Display::Hidden, Display::Hidden]);
        assert!(is_consistent(&component, &graph, &overlay, manager.labels()));
    }

    #[test]
    fn test_round_trip_restores_state() {
        let (mut graph, mut overlay, manager, mut component) = setup();
        let before = (component.visible, component.subtree.is_visible(&graph), displays(&overlay));

        toggle(&mut component, false, &mut graph, &mut overlay, manager.labels()).unwrap();
        toggle(&mut component, true, &mut graph, &mut overlay, manager.labels()).unwrap();

        let after = (component.visible, component.subtree.is_visible(&graph), displays(&overlay));
        assert_eq!(before, after);
    }

    #[test]
    fn test_missing_subtree_changes_nothing() {
        let (mut graph, mut overlay, manager, mut component) = setup();
        graph.remove_subtree(component.subtree.root()).unwrap();

        let err = toggle(&mut component, false, &mut graph, &mut overlay, manager.labels());
        assert!(matches!(err, Err(SceneError::NodeNotFound(_))));
        assert!(component.visible);
        assert_eq!(displays(&overlay), vec![Display::Shown, Display::Shown]);
    }

    #[test]
    fn test_inconsistency_detected() {
        let (mut graph, overlay, manager, component) = setup();
        assert!(is_consistent(&component, &graph, &overlay, manager.labels()));

        graph.set_visible(component.subtree.root(), false).unwrap();
        assert!(!is_consistent(&component, &graph, &overlay, manager.labels()));
    }
}
