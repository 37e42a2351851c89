//! The uniform pointer-gesture event.
//!
//! Mouse and touch input both arrive here as the same press / move /
//! release shape, so the drag state machines never look at the device.

use egui::Pos2;

/// Which device family produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerSource {
    /// Mouse or pen with hover.
    Mouse,
    /// Touch screen.
    Touch,
}

/// Stage of a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Button down / finger down.
    Press,
    /// Pointer moved.
    Move,
    /// Button up / finger lifted, anywhere on screen.
    Release,
    /// Double click (double tap).
    DoubleClick,
}

/// One pointer event in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Gesture stage.
    pub phase: PointerPhase,
    /// Producing device.
    pub source: PointerSource,
    /// Viewport position.
    pub position: Pos2,
}

impl PointerEvent {
    /// Creates a mouse event.
    pub fn mouse(phase: PointerPhase, position: Pos2) -> Self {
        Self {
            phase,
            source: PointerSource::Mouse,
            position,
        }
    }

    /// Creates a touch event.
    pub fn touch(phase: PointerPhase, position: Pos2) -> Self {
        Self {
            phase,
            source: PointerSource::Touch,
            position,
        }
    }
}

/// What the host should do with its own event after dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The event was used by the patch editor.
    pub consumed: bool,
    /// Suppress the host's default action (page scroll on touch).
    pub prevent_default: bool,
    /// Do not deliver the event to enclosing elements.
    pub stop_propagation: bool,
}

impl EventResponse {
    /// The event was not used.
    pub fn ignored() -> Self {
        Self::default()
    }

    /// The event was used.
    pub fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }

    /// Marks the event as not to be propagated further.
    pub fn stop_propagation(mut self) -> Self {
        self.stop_propagation = true;
        self
    }
}
