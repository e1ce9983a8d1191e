//! Label leak diagnostics

use std::fmt;

use crate::state::ViewerState;

/// Label counts seen from the three places a label lives
///
/// After a specimen load all three equal the number of labels the specimen
/// declares; after teardown all three are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrphanReport {
    /// Label nodes attached anywhere in the scene graph
    pub scene_labels: usize,
    /// Elements attached to the overlay
    pub overlay_elements: usize,
    /// Entries in the active label set
    pub registered_labels: usize,
}

impl OrphanReport {
    /// Count labels in a viewer state
    pub fn collect(state: &ViewerState) -> Self {
        let root = state.graph.root();
        Self {
            scene_labels: state.graph.labels_in_subtree(root).len(),
            overlay_elements: state.overlay.len(),
            registered_labels: state.labels.len(),
        }
    }

    /// All three counts agree
    pub fn is_balanced(&self) -> bool {
        self.scene_labels == self.overlay_elements
            && self.overlay_elements == self.registered_labels
    }

    /// Nothing left anywhere
    pub fn is_clean(&self) -> bool {
        self.scene_labels == 0 && self.overlay_elements == 0 && self.registered_labels == 0
    }
}

impl fmt::Display for OrphanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scene labels: {}, overlay elements: {}, registered labels: {}",
            self.scene_labels, self.overlay_elements, self.registered_labels
        )
    }
}
