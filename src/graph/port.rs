//! Port definitions for rack modules.
//!
//! Ports are the named sockets on a module where cables plug in.

/// Direction of a port on a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// An input socket that accepts a cable end.
    Input,
    /// An output socket that cables are dragged from.
    Output,
}

/// Definition of a port on a module kind.
///
/// The `id` is the port name used throughout the patch ("in", "out").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortDefinition {
    /// Port name, unique within the module.
    pub id: &'static str,
    /// Label shown next to the socket.
    pub name: &'static str,
    /// Whether this is an input or output port.
    pub direction: PortDirection,
}

impl PortDefinition {
    /// Creates a new input port definition.
    pub const fn input(id: &'static str, name: &'static str) -> Self {
        Self {
            id,
            name,
            direction: PortDirection::Input,
        }
    }

    /// Creates a new output port definition.
    pub const fn output(id: &'static str, name: &'static str) -> Self {
        Self {
            id,
            name,
            direction: PortDirection::Output,
        }
    }
}
