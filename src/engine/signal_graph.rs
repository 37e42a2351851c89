//! In-memory signal backend.
//!
//! `SignalGraph` keeps the node table and edge list that a real audio
//! backend would hold. It enforces the same contract: links need existing
//! nodes and ports, and disconnecting an edge that is not there fails.

use std::collections::HashMap;

use super::backend::{BackendError, NodeHandle, PortHandle, SignalBackend};
use crate::graph::{ModuleKind, PortDirection};

/// An edge in the signal graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Edge {
    output: PortHandle,
    input: PortHandle,
}

/// Stored node data.
#[derive(Clone, Debug)]
struct NodeData {
    kind: ModuleKind,
    /// Current parameter values.
    parameters: Vec<f32>,
}

impl NodeData {
    fn new(kind: ModuleKind) -> Self {
        let parameters = kind.spec().parameters.iter().map(|p| p.default).collect();
        Self { kind, parameters }
    }

    fn port_count(&self, direction: PortDirection) -> usize {
        self.kind.ports(direction).count()
    }
}

/// Node table plus edge list.
#[derive(Debug, Default)]
pub struct SignalGraph {
    /// Nodes indexed by handle.
    nodes: HashMap<NodeHandle, NodeData>,
    /// All edges, in connection order.
    edges: Vec<Edge>,
    /// Last handle handed out.
    last_node: u64,
}

impl SignalGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Checks if a node exists.
    pub fn contains_node(&self, node: NodeHandle) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Checks if an edge exists.
    pub fn contains_edge(&self, output: PortHandle, input: PortHandle) -> bool {
        self.edges.contains(&Edge { output, input })
    }

    /// Reads back a parameter value.
    pub fn parameter(&self, node: NodeHandle, index: usize) -> Option<f32> {
        self.nodes.get(&node)?.parameters.get(index).copied()
    }

    fn check_port(&self, port: PortHandle, direction: PortDirection) -> Result<(), BackendError> {
        let data = self
            .nodes
            .get(&port.node)
            .ok_or(BackendError::UnknownNode(port.node))?;
        if port.index >= data.port_count(direction) {
            return Err(BackendError::UnknownPort(port));
        }
        Ok(())
    }
}

impl SignalBackend for SignalGraph {
    fn create_node(&mut self, kind: ModuleKind) -> NodeHandle {
        self.last_node += 1;
        let handle = NodeHandle(self.last_node);
        self.nodes.insert(handle, NodeData::new(kind));
        handle
    }

    fn remove_node(&mut self, node: NodeHandle) {
        if self.nodes.remove(&node).is_some() {
            // Remove all edges involving this node
            self.edges
                .retain(|e| e.output.node != node && e.input.node != node);
        }
    }

    fn connect(&mut self, output: PortHandle, input: PortHandle) -> Result<(), BackendError> {
        self.check_port(output, PortDirection::Output)?;
        self.check_port(input, PortDirection::Input)?;

        let edge = Edge { output, input };
        if self.edges.contains(&edge) {
            return Err(BackendError::DuplicateEdge);
        }
        self.edges.push(edge);
        Ok(())
    }

    fn disconnect(&mut self, output: PortHandle, input: PortHandle) -> Result<(), BackendError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.output == output && e.input == input)
            .ok_or(BackendError::MissingEdge)?;
        self.edges.remove(index);
        Ok(())
    }

    fn set_parameter(
        &mut self,
        node: NodeHandle,
        param_index: usize,
        value: f32,
    ) -> Result<(), BackendError> {
        let data = self
            .nodes
            .get_mut(&node)
            .ok_or(BackendError::UnknownNode(node))?;
        match data.parameters.get_mut(param_index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(BackendError::UnknownPort(PortHandle::new(node, param_index))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_creation() {
        let graph = SignalGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_connect_nodes() {
        let mut graph = SignalGraph::new();
        let osc = graph.create_node(ModuleKind::Vco);
        let out = graph.create_node(ModuleKind::Output);

        let output = PortHandle::new(osc, 0);
        let input = PortHandle::new(out, 0);
        assert!(graph.connect(output, input).is_ok());
        assert!(graph.contains_edge(output, input));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_connect_nonexistent_fails() {
        let mut graph = SignalGraph::new();
        let osc = graph.create_node(ModuleKind::Vco);
        let result = graph.connect(PortHandle::new(osc, 0), PortHandle::new(NodeHandle(99), 0));
        assert_eq!(result, Err(BackendError::UnknownNode(NodeHandle(99))));
    }

    #[test]
    fn test_connect_wrong_direction_fails() {
        let mut graph = SignalGraph::new();
        let osc = graph.create_node(ModuleKind::Vco);
        let out = graph.create_node(ModuleKind::Output);

        // Output modules have no outputs, oscillators have no inputs
        assert!(matches!(
            graph.connect(PortHandle::new(out, 0), PortHandle::new(osc, 0)),
            Err(BackendError::UnknownPort(_))
        ));
    }

    #[test]
    fn test_duplicate_connection_fails() {
        let mut graph = SignalGraph::new();
        let osc = graph.create_node(ModuleKind::Vco);
        let out = graph.create_node(ModuleKind::Output);
        let (o, i) = (PortHandle::new(osc, 0), PortHandle::new(out, 0));

        assert!(graph.connect(o, i).is_ok());
        assert_eq!(graph.connect(o, i), Err(BackendError::DuplicateEdge));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_disconnect() {
        let mut graph = SignalGraph::new();
        let osc = graph.create_node(ModuleKind::Vco);
        let out = graph.create_node(ModuleKind::Output);
        let (o, i) = (PortHandle::new(osc, 0), PortHandle::new(out, 0));
        graph.connect(o, i).unwrap();

        assert!(graph.disconnect(o, i).is_ok());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.disconnect(o, i), Err(BackendError::MissingEdge));
    }

    #[test]
    fn test_remove_node_removes_edges() {
        let mut graph = SignalGraph::new();
        let osc = graph.create_node(ModuleKind::Vco);
        let vca = graph.create_node(ModuleKind::Vca);
        let out = graph.create_node(ModuleKind::Output);
        graph.connect(PortHandle::new(osc, 0), PortHandle::new(vca, 0)).unwrap();
        graph.connect(PortHandle::new(vca, 0), PortHandle::new(out, 0)).unwrap();

        graph.remove_node(vca);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_set_parameter() {
        let mut graph = SignalGraph::new();
        let osc = graph.create_node(ModuleKind::Vco);
        assert_eq!(graph.parameter(osc, 0), Some(440.0));

        assert!(graph.set_parameter(osc, 0, 880.0).is_ok());
        assert_eq!(graph.parameter(osc, 0), Some(880.0));
        assert!(graph.set_parameter(osc, 5, 1.0).is_err());
        assert!(graph.set_parameter(NodeHandle(42), 0, 1.0).is_err());
    }
}
