//! Screen-space labels anchored to 3D points
//!
//! Each label is two things at once:
//! - a [`NodeKind::Label`] node in the scene graph, parented into its
//!   component's subtree so it inherits that subtree's transform
//! - an [`Overlay`] element that shows the text on screen
//!
//! The [`LabelManager`] owns the set of active labels. Components only keep
//! label ids for lookup; removal always goes through
//! [`LabelManager::remove_all`].

use std::fmt;

use ahash::{AHashMap, AHashSet};
use lin_alg::f32::Vec3;
use specimen_settings::LabelSettings;

use crate::camera::Camera;
use crate::component::Component;
use crate::error::{SceneError, SceneResult};
use crate::graph::{NodeId, NodeKind, SceneGraph};
use crate::overlay::{Display, ElementId, Overlay};
use crate::transform::Transform;

/// Handle to a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(u32);

impl LabelId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "label#{}", self.0)
    }
}

/// An active label
#[derive(Debug, Clone)]
pub struct Label {
    pub id: LabelId,
    pub text: String,
    /// Anchor in the owning component's local space
    pub anchor: Vec3,
    /// Scene node carrying the anchor
    pub node: NodeId,
    /// Overlay element showing the text
    pub element: ElementId,
    /// Name of the owning component (lookup only)
    pub owner: String,
}

/// Active labels keyed by id, in creation order
#[derive(Debug, Default)]
pub struct LabelSet {
    labels: AHashMap<LabelId, Label>,
    order: Vec<LabelId>,
}

impl LabelSet {
    pub fn get(&self, id: LabelId) -> Option<&Label> {
        self.labels.get(&id)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.order.iter().filter_map(|id| self.labels.get(id))
    }

    fn insert(&mut self, label: Label) {
        self.order.push(label.id);
        self.labels.insert(label.id, label);
    }

    /// Remove and return every label
    fn drain(&mut self) -> Vec<Label> {
        let order = std::mem::take(&mut self.order);
        let mut labels = std::mem::take(&mut self.labels);
        order.into_iter().filter_map(|id| labels.remove(&id)).collect()
    }
}

/// Outcome of a per-frame label pass
#[derive(Debug, Default)]
pub struct LabelUpdateReport {
    /// Labels updated successfully
    pub updated: usize,
    /// Per-label failures; the other labels were still processed
    pub skipped: Vec<SceneError>,
}

/// Creates, updates and removes labels
#[derive(Debug, Default)]
pub struct LabelManager {
    labels: LabelSet,
    settings: LabelSettings,
    /// Counter for generating label ids
    next_id: u32,
}

impl LabelManager {
    pub fn new(settings: LabelSettings) -> Self {
        Self {
            labels: LabelSet::default(),
            settings,
            next_id: 0,
        }
    }

    /// Active labels
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn get(&self, id: LabelId) -> Option<&Label> {
        self.labels.get(id)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn settings(&self) -> &LabelSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: LabelSettings) {
        self.settings = settings;
    }

    /// Create a label anchored in `component`'s local space
    ///
    /// The anchor node is parented to the component's subtree root and the
    /// overlay element starts in the component's display state.
    pub fn create(
        &mut self,
        graph: &mut SceneGraph,
        overlay: &mut Overlay,
        component: &mut Component,
        text: &str,
        anchor: Vec3,
    ) -> SceneResult<LabelId> {
        let id = LabelId(self.next_id);
        let node = graph.add_node(
            component.subtree.root(),
            format!("label:{}", text),
            NodeKind::Label(id),
            Transform::from_translation(anchor),
        )?;
        self.next_id += 1;

        let element = overlay.create(text, Display::from_visible(component.visible));
        self.labels.insert(Label {
            id,
            text: text.to_string(),
            anchor,
            node,
            element,
            owner: component.name.clone(),
        });
        component.bind_label(id);

        Ok(id)
    }

    /// Current world position of a label's anchor
    pub fn resolve(&self, graph: &SceneGraph, label: &Label) -> SceneResult<Vec3> {
        let position = graph
            .world_point(label.node, Vec3::new(0.0, 0.0, 0.0))
            .ok_or_else(|| SceneError::UnresolvableAnchor {
                label: label.id,
                reason: format!("{} is not attached to the scene", label.node),
            })?;

        if !(position.x.is_finite() && position.y.is_finite() && position.z.is_finite()) {
            return Err(SceneError::UnresolvableAnchor {
                label: label.id,
                reason: "non-finite world position".to_string(),
            });
        }
        Ok(position)
    }

    /// Fade labels by their distance to the camera
    ///
    /// Runs every frame. A label that cannot be resolved is skipped; the
    /// remaining labels are still updated.
    pub fn update_all(
        &self,
        graph: &SceneGraph,
        overlay: &mut Overlay,
        camera_position: Vec3,
    ) -> LabelUpdateReport {
        let mut report = LabelUpdateReport::default();

        for label in self.labels.iter() {
            let position = match self.resolve(graph, label) {
                Ok(p) => p,
                Err(e) => {
                    log::debug!("Skipping label '{}': {}", label.text, e);
                    report.skipped.push(e);
                    continue;
                }
            };

            let Some(element) = overlay.get_mut(label.element) else {
                report.skipped.push(SceneError::UnresolvableAnchor {
                    label: label.id,
                    reason: format!("{} is detached", label.element),
                });
                continue;
            };

            let distance = (position - camera_position).magnitude();
            element.opacity = self.settings.opacity_for(distance);
            report.updated += 1;
        }

        report
    }

    /// Write projected screen positions to the overlay elements
    ///
    /// Labels behind the camera get no position.
    pub fn layout(
        &self,
        graph: &SceneGraph,
        overlay: &mut Overlay,
        camera: &Camera,
        viewport: [f32; 2],
    ) -> LabelUpdateReport {
        let mut report = LabelUpdateReport::default();

        for label in self.labels.iter() {
            let position = match self.resolve(graph, label) {
                Ok(p) => p,
                Err(e) => {
                    report.skipped.push(e);
                    continue;
                }
            };

            if let Some(element) = overlay.get_mut(label.element) {
                element.position = camera.project(position, viewport);
                report.updated += 1;
            }
        }

        report
    }

    /// Remove every label within `owner`'s subtree and reset the label set
    ///
    /// Labels are found by a full traversal of the subtree, so labels nested
    /// at any depth are removed. Each is taken out of the scene graph and its
    /// overlay element detached. Registry entries that were not found under
    /// `owner` are detached as well, leaving the set empty. Calling this
    /// again is a no-op.
    ///
    /// Returns the number of label nodes removed from the subtree.
    pub fn remove_all(
        &mut self,
        graph: &mut SceneGraph,
        overlay: &mut Overlay,
        owner: NodeId,
    ) -> usize {
        let found = graph.labels_in_subtree(owner);
        let removed = found.len();

        let mut in_subtree = AHashSet::with_capacity(removed);
        for (node, label_id) in found {
            // An enclosing label node may already have taken this one with it
            if graph.contains(node) {
                remove_label_node(graph, node);
            }
            in_subtree.insert(label_id);
        }

        let mut stragglers = 0;
        let mut elements = Vec::with_capacity(self.labels.len());
        for label in self.labels.drain() {
            if !in_subtree.contains(&label.id) {
                stragglers += 1;
                if graph.contains(label.node) {
                    remove_label_node(graph, label.node);
                }
            }
            elements.push(label.element);
        }
        if stragglers > 0 {
            log::warn!(
                "{} registered label(s) were outside the torn-down subtree",
                stragglers
            );
        }
        overlay.detach_all(elements);

        if removed > 0 {
            log::debug!("Removed {} label(s)", removed);
        }
        removed
    }
}

fn remove_label_node(graph: &mut SceneGraph, node: NodeId) {
    if let Err(e) = graph.remove_subtree(node) {
        log::warn!("Could not remove label node {}: {}", node, e);
    }
}
