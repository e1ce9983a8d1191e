//! Specimen factories
//!
//! A [`SpecimenFactory`] produces a [`SpecimenModel`]: a plain blueprint of
//! the node tree, its components, its labels and an optional description.
//! Nothing touches the live scene until the viewer instantiates a model, so a
//! model can be checked with [`SpecimenModel::validate`] before the previous
//! specimen is torn down.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use lin_alg::f32::Vec3;

use crate::error::{SceneError, SceneResult};
use crate::graph::MeshData;
use crate::transform::{Quat, Transform};

// ============================================================================
// Node blueprints
// ============================================================================

/// What a blueprint node becomes
#[derive(Debug, Clone, PartialEq)]
pub enum NodeSpecKind {
    Mesh(MeshData),
    Group,
}

/// Blueprint for one scene node and its children
#[derive(Debug, Clone)]
pub struct NodeSpec {
    /// Node name, unique within the model
    pub name: String,
    pub kind: NodeSpecKind,
    pub transform: Transform,
    pub visible: bool,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    fn new(name: impl Into<String>, kind: NodeSpecKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::identity(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// An empty group
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeSpecKind::Group)
    }

    /// A mesh leaf
    pub fn mesh(name: impl Into<String>, mesh: MeshData) -> Self {
        Self::new(name, NodeSpecKind::Mesh(mesh))
    }

    pub fn with_child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }

    /// Place the node at `translation` relative to its parent
    pub fn at(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Find a node by name in this tree
    pub fn find(&self, name: &str) -> Option<&NodeSpec> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Visit every node in pre-order
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a NodeSpec)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}

// ============================================================================
// Model
// ============================================================================

/// A toggle-able component of the model
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub name: String,
    pub display_name: String,
    /// Name of the node whose subtree the component owns
    pub node: String,
    /// Initial visibility
    pub visible: bool,
}

/// A label attached to a component
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    /// Name of the owning component
    pub component: String,
    pub text: String,
    /// Anchor in the component's local space
    pub anchor: Vec3,
}

/// Everything a factory produces for one specimen
#[derive(Debug, Clone)]
pub struct SpecimenModel {
    pub root: NodeSpec,
    pub components: Vec<ComponentSpec>,
    pub labels: Vec<LabelSpec>,
    /// Markdown description
    pub description: Option<String>,
}

impl SpecimenModel {
    pub fn new(root: NodeSpec) -> Self {
        Self {
            root,
            components: Vec::new(),
            labels: Vec::new(),
            description: None,
        }
    }

    pub fn component(
        mut self,
        name: impl Into<String>,
        display_name: impl Into<String>,
        node: impl Into<String>,
    ) -> Self {
        self.components.push(ComponentSpec {
            name: name.into(),
            display_name: display_name.into(),
            node: node.into(),
            visible: true,
        });
        self
    }

    /// Add a component that starts hidden
    pub fn hidden_component(
        mut self,
        name: impl Into<String>,
        display_name: impl Into<String>,
        node: impl Into<String>,
    ) -> Self {
        self.components.push(ComponentSpec {
            name: name.into(),
            display_name: display_name.into(),
            node: node.into(),
            visible: false,
        });
        self
    }

    pub fn label(
        mut self,
        component: impl Into<String>,
        text: impl Into<String>,
        anchor: Vec3,
    ) -> Self {
        self.labels.push(LabelSpec {
            component: component.into(),
            text: text.into(),
            anchor,
        });
        self
    }

    pub fn description(mut self, markdown: impl Into<String>) -> Self {
        self.description = Some(markdown.into());
        self
    }

    /// Check that the model can be instantiated
    ///
    /// Node names and component names must be unique, every component must
    /// name a node of the tree, no two component subtrees may share or nest
    /// inside each other and every label must name a declared component.
    pub fn validate(&self) -> SceneResult<()> {
        let mut nodes = AHashSet::new();
        let mut duplicate = None;
        self.root.walk(&mut |n| {
            if !nodes.insert(n.name.as_str()) && duplicate.is_none() {
                duplicate = Some(n.name.clone());
            }
        });
        if let Some(name) = duplicate {
            return Err(SceneError::DuplicateNodeName(name));
        }

        let mut seen = AHashSet::new();
        for component in &self.components {
            if !seen.insert(component.name.as_str()) {
                return Err(SceneError::DuplicateComponentName(component.name.clone()));
            }
            if !nodes.contains(component.node.as_str()) {
                return Err(SceneError::UnknownNode {
                    component: component.name.clone(),
                    node: component.node.clone(),
                });
            }
        }

        for (i, first) in self.components.iter().enumerate() {
            for second in &self.components[i + 1..] {
                if self.subtrees_overlap(&first.node, &second.node) {
                    return Err(SceneError::OverlappingComponents {
                        first: first.name.clone(),
                        second: second.name.clone(),
                    });
                }
            }
        }

        for label in &self.labels {
            if !seen.contains(label.component.as_str()) {
                return Err(SceneError::UnknownLabelComponent {
                    text: label.text.clone(),
                    component: label.component.clone(),
                });
            }
        }

        Ok(())
    }

    /// True if one node is the other or sits inside its subtree
    fn subtrees_overlap(&self, a: &str, b: &str) -> bool {
        let contains = |outer: &str, inner: &str| {
            self.root
                .find(outer)
                .is_some_and(|node| node.find(inner).is_some())
        };
        contains(a, b) || contains(b, a)
    }

    /// Number of labels the model declares
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }
}

// ============================================================================
// Factories and catalog
// ============================================================================

/// Produces the model of one specimen type
pub trait SpecimenFactory: Send + Sync {
    /// Stable key used to select the specimen
    fn key(&self) -> &str;

    /// Human-readable name
    fn display_name(&self) -> &str;

    /// Build a fresh model
    fn build(&self) -> SpecimenModel;
}

/// Registered factories in registration order
#[derive(Default, Clone)]
pub struct SpecimenCatalog {
    factories: AHashMap<String, Arc<dyn SpecimenFactory>>,
    order: Vec<String>,
}

impl std::fmt::Debug for SpecimenCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecimenCatalog")
            .field("keys", &self.order)
            .finish()
    }
}

impl SpecimenCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any factory with the same key
    pub fn register<F: SpecimenFactory + 'static>(&mut self, factory: F) {
        let key = factory.key().to_string();
        if self.factories.insert(key.clone(), Arc::new(factory)).is_none() {
            self.order.push(key);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Arc<dyn SpecimenFactory>> {
        self.factories.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// Keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|k| k.as_str())
    }

    /// Factories in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn SpecimenFactory>> {
        self.order.iter().filter_map(|k| self.factories.get(k))
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
