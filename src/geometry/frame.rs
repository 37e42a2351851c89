//! Module face layout.
//!
//! Computes where the header, controls and port sockets sit inside a module
//! box, relative to the module's top-left corner.

use egui::{Pos2, Rect, Vec2};

use crate::graph::{ModuleKind, PortDirection};

/// Width of a module box.
pub const MODULE_WIDTH: f32 = 180.0;
/// Height of the draggable header strip.
pub const HEADER_HEIGHT: f32 = 28.0;
/// Height of one control row.
pub const CONTROL_ROW_HEIGHT: f32 = 40.0;
/// Height of the port row at the bottom of the box.
pub const PORT_ROW_HEIGHT: f32 = 36.0;
/// Side length of a port socket.
pub const PORT_SIZE: f32 = 16.0;
/// Horizontal inset of the sockets from the box edges.
const PORT_INSET: f32 = 14.0;

/// Layout of one module kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModuleFrame {
    kind: ModuleKind,
}

impl ModuleFrame {
    /// Layout for a module kind.
    pub fn new(kind: ModuleKind) -> Self {
        Self { kind }
    }

    /// Size of the whole box.
    pub fn size(&self) -> Vec2 {
        let controls = self.kind.spec().parameters.len() as f32;
        Vec2::new(
            MODULE_WIDTH,
            HEADER_HEIGHT + controls * CONTROL_ROW_HEIGHT + PORT_ROW_HEIGHT,
        )
    }

    /// Box rect for a module whose top-left is at `origin`.
    pub fn body(&self, origin: Pos2) -> Rect {
        Rect::from_min_size(origin, self.size())
    }

    /// Header strip rect.
    pub fn header(&self, origin: Pos2) -> Rect {
        Rect::from_min_size(origin, Vec2::new(MODULE_WIDTH, HEADER_HEIGHT))
    }

    /// Rect of the control row at `index`.
    pub fn control(&self, origin: Pos2, index: usize) -> Rect {
        let top = origin.y + HEADER_HEIGHT + index as f32 * CONTROL_ROW_HEIGHT;
        Rect::from_min_size(
            Pos2::new(origin.x, top),
            Vec2::new(MODULE_WIDTH, CONTROL_ROW_HEIGHT),
        )
    }

    /// Socket rect of a named port, or `None` if the kind has no such port.
    ///
    /// Inputs line up from the left edge, outputs from the right edge.
    pub fn port(&self, origin: Pos2, name: &str) -> Option<Rect> {
        let port = self.kind.port(name)?;
        let slot = self
            .kind
            .ports(port.direction)
            .position(|p| p.id == name)
            .unwrap_or(0) as f32;
        let row_top = origin.y + self.size().y - PORT_ROW_HEIGHT;
        let y = row_top + (PORT_ROW_HEIGHT - PORT_SIZE) / 2.0;
        let step = PORT_SIZE + PORT_INSET;
        let x = match port.direction {
            PortDirection::Input => origin.x + PORT_INSET + slot * step,
            PortDirection::Output => {
                origin.x + MODULE_WIDTH - PORT_INSET - PORT_SIZE - slot * step
            }
        };
        Some(Rect::from_min_size(
            Pos2::new(x, y),
            Vec2::splat(PORT_SIZE),
        ))
    }
}
