//! Scene graph
//!
//! This module provides:
//! - [`NodeId`] handles into the graph arena
//! - [`NodeKind`], an explicit tag separating meshes, groups and labels
//! - [`SceneGraph`], the node arena with parent/child links
//!
//! Visibility is hierarchical: a node is drawn only if it and every ancestor
//! are visible.

use std::fmt;

use ahash::AHashMap;
use lin_alg::f32::Vec3;

use crate::error::{SceneError, SceneResult};
use crate::label::LabelId;
use crate::transform::Transform;

/// Handle to a node in a [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Geometric primitive of a mesh node, centered on the local origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere { radius: f32 },
    Cuboid { size: [f32; 3] },
    /// Axis along local y
    Cylinder { radius: f32, height: f32 },
    /// Axis along local y, apex up
    Cone { radius: f32, height: f32 },
    /// Ring in the local xz plane
    Torus { radius: f32, tube: f32 },
}

impl Primitive {
    /// Local bounding box (min, max)
    pub fn extent(&self) -> (Vec3, Vec3) {
        let half = match *self {
            Primitive::Sphere { radius } => Vec3::new(radius, radius, radius),
            Primitive::Cuboid { size } => Vec3::new(size[0] * 0.5, size[1] * 0.5, size[2] * 0.5),
            Primitive::Cylinder { radius, height } | Primitive::Cone { radius, height } => {
                Vec3::new(radius, height * 0.5, radius)
            }
            Primitive::Torus { radius, tube } => Vec3::new(radius + tube, tube, radius + tube),
        };
        (half * -1.0, half)
    }
}

/// Mesh payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshData {
    pub primitive: Primitive,
    /// Base color (RGBA)
    pub color: [f32; 4],
}

impl MeshData {
    pub fn new(primitive: Primitive, color: [f32; 4]) -> Self {
        Self { primitive, color }
    }
}

/// What a node is
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Mesh(MeshData),
    Group,
    /// Anchor node of a screen-space label
    Label(LabelId),
}

impl NodeKind {
    pub fn is_label(&self) -> bool {
        matches!(self, NodeKind::Label(_))
    }

    pub fn label_id(&self) -> Option<LabelId> {
        match self {
            NodeKind::Label(id) => Some(*id),
            _ => None,
        }
    }
}

/// A node in the scene graph
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Own visibility flag (ancestors may still hide the node)
    pub visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Node arena with a permanent root group
#[derive(Debug)]
pub struct SceneGraph {
    nodes: AHashMap<NodeId, SceneNode>,
    root: NodeId,
    /// Counter for generating node ids
    next_id: u32,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph containing only the root group
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = AHashMap::new();
        nodes.insert(
            root,
            SceneNode {
                name: "scene".to_string(),
                kind: NodeKind::Group,
                transform: Transform::identity(),
                visible: true,
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root remains
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    /// Add a node under `parent`
    pub fn add_node(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
        transform: Transform,
    ) -> SceneResult<NodeId> {
        let id = NodeId(self.next_id);
        self.nodes
            .get_mut(&parent)
            .ok_or(SceneError::NodeNotFound(parent))?
            .children
            .push(id);
        self.next_id += 1;

        self.nodes.insert(
            id,
            SceneNode {
                name: name.into(),
                kind,
                transform,
                visible: true,
                parent: Some(parent),
                children: Vec::new(),
            },
        );
        Ok(id)
    }

    /// Detach a node from its parent and delete it with all descendants
    ///
    /// Returns the number of nodes removed.
    pub fn remove_subtree(&mut self, id: NodeId) -> SceneResult<usize> {
        if id == self.root {
            return Err(SceneError::CannotRemoveRoot);
        }
        let parent = self.nodes.get(&id).ok_or(SceneError::NodeNotFound(id))?.parent;

        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }

        let doomed = self.descendants(id);
        for node in &doomed {
            self.nodes.remove(node);
        }
        Ok(doomed.len())
    }

    /// All nodes of a subtree in pre-order, starting with `id`
    ///
    /// Empty if `id` is not in the graph.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Every label node anywhere within a subtree
    pub fn labels_in_subtree(&self, id: NodeId) -> Vec<(NodeId, LabelId)> {
        self.descendants(id)
            .into_iter()
            .filter_map(|node| {
                let label = self.nodes.get(&node)?.kind.label_id()?;
                Some((node, label))
            })
            .collect()
    }

    /// Find the first node named `name` within a subtree
    pub fn find_by_name(&self, under: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(under)
            .into_iter()
            .find(|id| self.nodes.get(id).is_some_and(|n| n.name == name))
    }

    /// Whether the node is connected to the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.ancestry(id).is_some()
    }

    /// Path from the root down to `id`, or `None` if detached or missing
    fn ancestry(&self, id: NodeId) -> Option<Vec<NodeId>> {
        let mut chain = vec![id];
        let mut current = self.nodes.get(&id)?;
        while let Some(parent) = current.parent {
            chain.push(parent);
            current = self.nodes.get(&parent)?;
        }
        if chain.last() != Some(&self.root) {
            return None;
        }
        chain.reverse();
        Some(chain)
    }

    /// Composed transform from the node's local space to world space
    pub fn world_transform(&self, id: NodeId) -> Option<Transform> {
        let chain = self.ancestry(id)?;
        let mut world = Transform::identity();
        for node in chain {
            world = world.then(&self.nodes.get(&node)?.transform);
        }
        Some(world)
    }

    /// World position of a point given in the node's local space
    pub fn world_point(&self, id: NodeId, local: Vec3) -> Option<Vec3> {
        self.world_transform(id).map(|t| t.apply(local))
    }

    /// Set a node's own visibility flag
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> SceneResult<()> {
        self.nodes
            .get_mut(&id)
            .ok_or(SceneError::NodeNotFound(id))?
            .visible = visible;
        Ok(())
    }

    /// Whether the node and all its ancestors are visible
    pub fn effectively_visible(&self, id: NodeId) -> bool {
        self.ancestry(id).is_some_and(|chain| {
            chain
                .iter()
                .all(|n| self.nodes.get(n).is_some_and(|node| node.visible))
        })
    }

    /// World-space bounding box of all meshes in a subtree
    pub fn subtree_extent(&self, id: NodeId) -> Option<(Vec3, Vec3)> {
        let mut min = Vec3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Vec3::new(f32::MIN, f32::MIN, f32::MIN);
        let mut has_extent = false;

        for node_id in self.descendants(id) {
            let Some(NodeKind::Mesh(mesh)) = self.nodes.get(&node_id).map(|n| &n.kind) else {
                continue;
            };
            let Some(world) = self.world_transform(node_id) else {
                continue;
            };

            let (lo, hi) = mesh.primitive.extent();
            for corner in 0..8 {
                let local = Vec3::new(
                    if corner & 1 == 0 { lo.x } else { hi.x },
                    if corner & 2 == 0 { lo.y } else { hi.y },
                    if corner & 4 == 0 { lo.z } else { hi.z },
                );
                let p = world.apply(local);
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                min.z = min.z.min(p.z);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
                max.z = max.z.max(p.z);
                has_extent = true;
            }
        }

        if has_extent {
            Some((min, max))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sphere() -> NodeKind {
        NodeKind::Mesh(MeshData::new(Primitive::Sphere { radius: 1.0 }, [1.0; 4]))
    }

    #[test]
    fn test_new_graph_has_root() {
        let graph = SceneGraph::new();
        assert_eq!(graph.len(), 1);
        assert!(graph.is_empty());
        assert!(graph.is_attached(graph.root()));
    }

    #[test]
    fn test_add_and_descendants_preorder() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph.add_node(root, "a", NodeKind::Group, Transform::identity()).unwrap();
        let b = graph.add_node(a, "b", sphere(), Transform::identity()).unwrap();
        let c = graph.add_node(a, "c", sphere(), Transform::identity()).unwrap();
        let d = graph.add_node(root, "d", sphere(), Transform::identity()).unwrap();

        assert_eq!(graph.descendants(root), vec![root, a, b, c, d]);
        assert_eq!(graph.get(a).unwrap().children(), &[b, c]);
        assert_eq!(graph.find_by_name(root, "c"), Some(c));
    }

    #[test]
    fn test_add_under_missing_parent() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph.add_node(root, "a", NodeKind::Group, Transform::identity()).unwrap();
        graph.remove_subtree(a).unwrap();

        let err = graph.add_node(a, "b", NodeKind::Group, Transform::identity()).unwrap_err();
        assert!(matches!(err, SceneError::NodeNotFound(id) if id == a));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_remove_subtree() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph.add_node(root, "a", NodeKind::Group, Transform::identity()).unwrap();
        let b = graph.add_node(a, "b", NodeKind::Group, Transform::identity()).unwrap();
        graph.add_node(b, "c", sphere(), Transform::identity()).unwrap();

        assert_eq!(graph.remove_subtree(a).unwrap(), 3);
        assert!(graph.is_empty());
        assert!(graph.get(root).unwrap().children().is_empty());
        assert!(matches!(graph.remove_subtree(a), Err(SceneError::NodeNotFound(_))));
        assert!(matches!(graph.remove_subtree(root), Err(SceneError::CannotRemoveRoot)));
    }

    #[test]
    fn test_nested_labels_found() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph.add_node(root, "a", NodeKind::Group, Transform::identity()).unwrap();
        let b = graph.add_node(a, "b", NodeKind::Group, Transform::identity()).unwrap();
        let deep = graph
            .add_node(b, "deep", NodeKind::Label(LabelId::new(7)), Transform::identity())
            .unwrap();
        let shallow = graph
            .add_node(a, "shallow", NodeKind::Label(LabelId::new(3)), Transform::identity())
            .unwrap();

        let found = graph.labels_in_subtree(a);
        assert_eq!(found, vec![(deep, LabelId::new(7)), (shallow, LabelId::new(3))]);
        assert_eq!(graph.labels_in_subtree(b).len(), 1);
    }

    #[test]
    fn test_world_point_composes_parents() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph
            .add_node(
                root,
                "a",
                NodeKind::Group,
                Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)).with_scale(2.0),
            )
            .unwrap();
        let b = graph
            .add_node(
                a,
                "b",
                NodeKind::Group,
                Transform::from_translation(Vec3::new(0.0, 1.0, 0.0)),
            )
            .unwrap();

        let p = graph.world_point(b, Vec3::new(0.0, 0.0, 1.0)).unwrap();
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 2.0);
    }

    #[test]
    fn test_effective_visibility() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph.add_node(root, "a", NodeKind::Group, Transform::identity()).unwrap();
        let b = graph.add_node(a, "b", sphere(), Transform::identity()).unwrap();

        assert!(graph.effectively_visible(b));
        graph.set_visible(a, false).unwrap();
        assert!(!graph.effectively_visible(b));
        assert!(graph.get(b).unwrap().visible);
    }

    #[test]
    fn test_subtree_extent() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph
            .add_node(root, "s", sphere(), Transform::from_translation(Vec3::new(5.0, 0.0, 0.0)))
            .unwrap();
        graph
            .add_node(root, "label", NodeKind::Label(LabelId::new(0)), Transform::identity())
            .unwrap();

        let (min, max) = graph.subtree_extent(root).unwrap();
        assert_relative_eq!(min.x, 4.0);
        assert_relative_eq!(max.x, 6.0);
        assert_relative_eq!(max.y, 1.0);
    }
}
