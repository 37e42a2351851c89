//! Cables between module ports.

use super::ModuleId;
use crate::geometry::CurveHandle;

/// The four endpoints identifying a cable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CableEnds {
    /// Source module.
    pub from: ModuleId,
    /// Output port name on the source module.
    pub from_port: &'static str,
    /// Destination module.
    pub to: ModuleId,
    /// Input port name on the destination module.
    pub to_port: &'static str,
}

impl CableEnds {
    /// Creates a new set of cable endpoints.
    pub fn new(
        from: ModuleId,
        from_port: &'static str,
        to: ModuleId,
        to_port: &'static str,
    ) -> Self {
        Self {
            from,
            from_port,
            to,
            to_port,
        }
    }

    /// Returns true if either end is on the given module.
    pub fn touches(&self, module: ModuleId) -> bool {
        self.from == module || self.to == module
    }

    /// Returns true if the cable plugs into the given input.
    pub fn terminates_at(&self, module: ModuleId, port: &str) -> bool {
        self.to == module && self.to_port == port
    }
}

/// A committed cable and its rendered curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cable {
    /// Cable endpoints.
    pub ends: CableEnds,
    /// The persistent curve drawn for this cable.
    pub curve: CurveHandle,
}
