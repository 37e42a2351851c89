//! Engine module
//!
//! The signal backend seam, an in-memory backend, and the connection manager
//! that keeps the backend in step with the patch graph.

pub mod backend;
pub mod connection;
pub mod signal_graph;

pub use backend::{BackendError, NodeHandle, PortHandle, PortIndex, SignalBackend};
pub use connection::{connect, disconnect_all_into, disconnect_module};
pub use signal_graph::SignalGraph;
