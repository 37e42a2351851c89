//! Graph module
//!
//! The abstract patch: modules, their ports and controls, the cables between
//! them, and the rules a new cable must satisfy.

mod cable;
mod module;
mod parameter;
mod port;
mod store;
mod validation;

pub use cable::{Cable, CableEnds};
pub use module::{Module, ModuleId, ModuleKind, ModuleRole, ModuleSpec, WAVEFORMS};
pub use parameter::{ParameterDefinition, ParameterDisplay};
pub use port::{PortDefinition, PortDirection};
pub use store::PatchGraph;
pub use validation::{validate_connection, ConnectionPlan, InputPolicy};
