//! Toggle-able specimen components
//!
//! A component is a named part of the loaded specimen backed by one subtree
//! of the scene graph. The registry holds the components of the current
//! specimen in factory order.

use ahash::AHashMap;

use crate::error::{SceneError, SceneResult};
use crate::graph::{NodeId, NodeKind, SceneGraph};
use crate::label::LabelId;

/// Scene subtree exclusively owned by a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtree {
    /// A single mesh node
    Node(NodeId),
    /// A group and everything below it
    Group(NodeId),
}

impl Subtree {
    /// Classify an existing node
    pub fn of(graph: &SceneGraph, id: NodeId) -> SceneResult<Self> {
        let node = graph.get(id).ok_or(SceneError::NodeNotFound(id))?;
        match node.kind {
            NodeKind::Group => Ok(Subtree::Group(id)),
            NodeKind::Mesh(_) => Ok(Subtree::Node(id)),
            NodeKind::Label(_) => Err(SceneError::InvalidComponentNode(node.name.clone())),
        }
    }

    /// Root node of the subtree
    pub fn root(&self) -> NodeId {
        match *self {
            Subtree::Node(id) | Subtree::Group(id) => id,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Subtree::Group(_))
    }

    /// Set the visible flag on the subtree root
    ///
    /// Descendants inherit it through the graph's hierarchical visibility.
    pub fn set_visible(&self, graph: &mut SceneGraph, visible: bool) -> SceneResult<()> {
        graph.set_visible(self.root(), visible)
    }

    /// Current visible flag of the subtree root
    pub fn is_visible(&self, graph: &SceneGraph) -> Option<bool> {
        graph.get(self.root()).map(|n| n.visible)
    }
}

/// A named, independently toggle-able part of a specimen
#[derive(Debug, Clone)]
pub struct Component {
    /// Stable key, unique within a specimen
    pub name: String,
    /// Human-readable label for toggle controls
    pub display_name: String,
    /// Source of truth for the subtree and label display state
    pub visible: bool,
    pub subtree: Subtree,
    /// Labels bound to this component
    labels: Vec<LabelId>,
}

impl Component {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, subtree: Subtree) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            visible: true,
            subtree,
            labels: Vec::new(),
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Labels bound to this component, in creation order
    pub fn labels(&self) -> &[LabelId] {
        &self.labels
    }

    pub(crate) fn bind_label(&mut self, label: LabelId) {
        self.labels.push(label);
    }
}

/// Components of the currently loaded specimen
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    /// Registration order
    components: Vec<Component>,
    /// Name -> position in `components`
    index: AHashMap<String, usize>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component; names must be unique within the specimen
    pub fn register(&mut self, component: Component) -> SceneResult<()> {
        if self.index.contains_key(&component.name) {
            return Err(SceneError::DuplicateComponentName(component.name));
        }
        self.index
            .insert(component.name.clone(), self.components.len());
        self.components.push(component);
        Ok(())
    }

    /// Components in registration order
    pub fn list(&self) -> &[Component] {
        &self.components
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.index.get(name).map(|&i| &self.components[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Component> {
        match self.index.get(name) {
            Some(&i) => self.components.get_mut(i),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Remove every component
    pub fn clear(&mut self) {
        self.components.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name.as_str())
    }
}
