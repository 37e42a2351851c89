//! Geometry module
//!
//! The rendering-surface seam and everything computed against it: port
//! anchors, cable curves and the module face layout.
//!
//! Two coordinate spaces are in play. *Viewport* coordinates are what the
//! pointer reports and what [`RenderSurface::bounding_box`] returns.
//! *Canvas* coordinates are relative to the scrolled content of the rack;
//! module positions and cable curves live there.

mod anchors;
mod curve;
mod frame;
mod scene;

pub use anchors::{anchor_of, batch_update, render_curve};
pub use curve::{CurvePath, DroopStyle, DEFAULT_DROOP_CAP, DEFAULT_DROOP_FACTOR};
pub use frame::{ModuleFrame, HEADER_HEIGHT, MODULE_WIDTH, PORT_SIZE};
pub use scene::{Scene, SceneCurve};

use egui::{Pos2, Rect, Vec2};

use crate::graph::{ModuleId, ModuleKind, PortDirection};

/// Handle of a curve primitive owned by the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveHandle(pub u64);

/// How a curve primitive is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveStyle {
    /// A committed cable.
    Cable,
    /// The translucent cable following the pointer during a drag.
    Pending,
}

/// A hit-testable element of the rendered rack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// The whole module box.
    Module(ModuleId),
    /// The draggable header strip of a module.
    Header(ModuleId),
    /// A port socket.
    Port {
        module: ModuleId,
        port: &'static str,
        direction: PortDirection,
    },
}

impl ElementId {
    /// Module the element belongs to.
    pub fn module(&self) -> ModuleId {
        match self {
            ElementId::Module(id) | ElementId::Header(id) => *id,
            ElementId::Port { module, .. } => *module,
        }
    }

    /// Returns `(module, port)` if this is an input socket.
    pub fn as_input_port(&self) -> Option<(ModuleId, &'static str)> {
        match self {
            ElementId::Port {
                module,
                port,
                direction: PortDirection::Input,
            } => Some((*module, port)),
            _ => None,
        }
    }

    /// Returns `(module, port)` if this is an output socket.
    pub fn as_output_port(&self) -> Option<(ModuleId, &'static str)> {
        match self {
            ElementId::Port {
                module,
                port,
                direction: PortDirection::Output,
            } => Some((*module, port)),
            _ => None,
        }
    }
}

/// The drawing layer the patch renders into.
pub trait RenderSurface {
    /// Viewport rect of the scrollable rack container.
    fn container_rect(&self) -> Rect;

    /// Current scroll offset of the container content.
    fn scroll_offset(&self) -> Vec2;

    /// Viewport rect of an element, or `None` if it is not rendered.
    fn bounding_box(&self, element: ElementId) -> Option<Rect>;

    /// Innermost element under a viewport point.
    fn hit_test(&self, point: Pos2) -> Option<ElementId>;

    /// Draws (or moves) a module with its top-left at a canvas position.
    fn place_module(&mut self, id: ModuleId, kind: ModuleKind, position: Pos2);

    /// Removes a module's rendering.
    fn remove_module(&mut self, id: ModuleId);

    /// Creates an empty curve primitive.
    fn create_curve(&mut self, style: CurveStyle) -> CurveHandle;

    /// Sets the path of a curve primitive.
    fn set_curve_path(&mut self, handle: CurveHandle, path: CurvePath);

    /// Removes a curve primitive. Unknown handles are ignored.
    fn remove_curve(&mut self, handle: CurveHandle);

    /// Converts a viewport point to canvas coordinates.
    fn to_canvas(&self, point: Pos2) -> Pos2 {
        Pos2::ZERO + (point - self.container_rect().min) + self.scroll_offset()
    }

    /// Converts a canvas point to viewport coordinates.
    fn to_viewport(&self, point: Pos2) -> Pos2 {
        self.container_rect().min + (point.to_vec2() - self.scroll_offset())
    }
}
