//! Host input translation.
//!
//! Turns mouse and touch event families into [`PointerEvent`]s. Touch
//! events report a list of touches; the first one drives the gesture, and a
//! release is located by the touch that changed.

use egui::Pos2;

use super::{PointerEvent, PointerPhase};

/// Raw host input, shaped like browser mouse and touch events.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// Primary mouse button pressed.
    MouseDown { position: Pos2 },
    /// Mouse moved, with or without a button held.
    MouseMove { position: Pos2 },
    /// Primary mouse button released.
    MouseUp { position: Pos2 },
    /// Primary mouse button double-clicked.
    DoubleClick { position: Pos2 },
    /// `touches` holds every finger currently on the screen.
    TouchStart { touches: Vec<Pos2> },
    /// A finger moved. `touches` holds every finger on the screen.
    TouchMove { touches: Vec<Pos2> },
    /// `changed` holds the fingers that were lifted.
    TouchEnd { changed: Vec<Pos2> },
}

/// Translates a host event into a pointer event.
///
/// Returns `None` for touch events without a usable touch point.
pub fn translate(event: &HostEvent) -> Option<PointerEvent> {
    match event {
        HostEvent::MouseDown { position } => {
            Some(PointerEvent::mouse(PointerPhase::Press, *position))
        }
        HostEvent::MouseMove { position } => {
            Some(PointerEvent::mouse(PointerPhase::Move, *position))
        }
        HostEvent::MouseUp { position } => {
            Some(PointerEvent::mouse(PointerPhase::Release, *position))
        }
        HostEvent::DoubleClick { position } => {
            Some(PointerEvent::mouse(PointerPhase::DoubleClick, *position))
        }
        HostEvent::TouchStart { touches } => touches
            .first()
            .map(|p| PointerEvent::touch(PointerPhase::Press, *p)),
        HostEvent::TouchMove { touches } => touches
            .first()
            .map(|p| PointerEvent::touch(PointerPhase::Move, *p)),
        HostEvent::TouchEnd { changed } => changed
            .first()
            .map(|p| PointerEvent::touch(PointerPhase::Release, *p)),
    }
}
