//! The signal backend seam.
//!
//! The patch never processes audio itself. Every module owns a node in an
//! external signal graph, and every cable mirrors one edge in that graph.

use crate::graph::ModuleKind;

/// Index of a port among the inputs (or outputs) of a backend node.
pub type PortIndex = usize;

/// Opaque identifier of a node in the signal backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub u64);

/// A specific input or output of a backend node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortHandle {
    /// The node this port belongs to.
    pub node: NodeHandle,
    /// Port index within the node's inputs or outputs.
    pub index: PortIndex,
}

impl PortHandle {
    /// Creates a new port handle.
    pub fn new(node: NodeHandle, index: PortIndex) -> Self {
        Self { node, index }
    }
}

/// Errors reported by a signal backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendError {
    /// The node does not exist in the backend.
    UnknownNode(NodeHandle),
    /// The node exists but has no such port.
    UnknownPort(PortHandle),
    /// The edge already exists.
    DuplicateEdge,
    /// The edge to disconnect does not exist.
    MissingEdge,
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::UnknownNode(node) => write!(f, "unknown node {}", node.0),
            BackendError::UnknownPort(port) => {
                write!(f, "node {} has no port {}", port.node.0, port.index)
            }
            BackendError::DuplicateEdge => write!(f, "edge already exists"),
            BackendError::MissingEdge => write!(f, "edge does not exist"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The operations the patch needs from a signal-processing graph.
pub trait SignalBackend {
    /// Creates the processing node for a new module.
    fn create_node(&mut self, kind: ModuleKind) -> NodeHandle;

    /// Destroys a module's processing node.
    fn remove_node(&mut self, node: NodeHandle);

    /// Links an output to an input.
    fn connect(&mut self, output: PortHandle, input: PortHandle) -> Result<(), BackendError>;

    /// Removes a link. Fails only when the edge does not exist.
    fn disconnect(&mut self, output: PortHandle, input: PortHandle) -> Result<(), BackendError>;

    /// Writes a parameter value on a node.
    fn set_parameter(
        &mut self,
        node: NodeHandle,
        param_index: usize,
        value: f32,
    ) -> Result<(), BackendError>;
}
