//! Interaction module
//!
//! Pointer gestures on the rack: dragging modules by their header, pulling
//! cables from output ports onto input ports, and double-clicking an input
//! to unplug it. Mouse and touch input share one event shape.

mod adapter;
mod controller;
mod gesture;
mod listeners;

pub use adapter::{translate, HostEvent};
pub use controller::{DropOutcome, InteractionController, ModuleDrag, PendingCable};
pub use gesture::{EventResponse, PointerEvent, PointerPhase, PointerSource};
pub use listeners::{DragKind, Listener, ListenerEvent, ListenerRegistry};
