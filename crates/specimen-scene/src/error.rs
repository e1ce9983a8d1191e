//! Error types for the scene crate

use specimen_doc::DocumentError;
use thiserror::Error;

use crate::graph::NodeId;
use crate::label::LabelId;

/// Scene-related errors
#[derive(Debug, Error)]
pub enum SceneError {
    /// Component name already registered for the current specimen
    #[error("Duplicate component name: {0}")]
    DuplicateComponentName(String),

    /// Component not found in registry
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// Label anchor could not be resolved to a world position this frame
    #[error("Unresolvable anchor for label {label}: {reason}")]
    UnresolvableAnchor { label: LabelId, reason: String },

    /// No factory registered under this key
    #[error("Unknown specimen: {0}")]
    UnknownSpecimen(String),

    /// Node id not present in the scene graph
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// The scene root cannot be removed
    #[error("Cannot remove the scene root")]
    CannotRemoveRoot,

    /// Component refers to a node the model does not contain
    #[error("Component '{component}' refers to unknown node '{node}'")]
    UnknownNode { component: String, node: String },

    /// Label bound to a component the model does not declare
    #[error("Label '{text}' is bound to unknown component '{component}'")]
    UnknownLabelComponent { text: String, component: String },

    /// Two nodes of a model share a name
    #[error("Duplicate node name: {0}")]
    DuplicateNodeName(String),

    /// Two components claim the same node or one claims a node inside the other
    #[error("Components '{first}' and '{second}' have overlapping subtrees")]
    OverlappingComponents { first: String, second: String },

    /// Labels cannot own components
    #[error("Node '{0}' is a label and cannot be a component subtree")]
    InvalidComponentNode(String),

    /// No description is loaded
    #[error("No description loaded")]
    NoDescription,

    /// Description document error
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;
