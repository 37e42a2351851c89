//! Pointer interaction state machines.
//!
//! Two drags share one controller and exclude each other:
//!
//! - module drag: `Idle -> Dragging { module, offset } -> Idle`
//! - cable drag: `Idle -> Pending { source, start, curve } -> Idle`
//!
//! A finished cable drag ends in exactly one of commit or abort, and the
//! pending curve and listeners are cleaned up exactly once either way.

use egui::{Pos2, Vec2};
use tracing::{debug, warn};

use super::listeners::{DragKind, ListenerEvent, ListenerRegistry};
use super::{EventResponse, PointerEvent, PointerPhase, PointerSource};
use crate::engine::SignalBackend;
use crate::error::PatchError;
use crate::geometry::{self, CurveHandle, CurveStyle, ElementId, RenderSurface};
use crate::graph::{Cable, ModuleId};
use crate::rack::Rack;

/// An active module drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModuleDrag {
    /// Module being moved.
    pub module: ModuleId,
    /// Pointer position relative to the module's top-left corner.
    pub offset: Vec2,
}

/// An active cable drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingCable {
    /// Module the cable was pulled from.
    pub source: ModuleId,
    /// Output port on the source module.
    pub source_port: &'static str,
    /// Canvas anchor of the source port.
    pub start: Pos2,
    /// Canvas position of the free end.
    pub current: Pos2,
    /// Temporary curve following the pointer.
    pub curve: CurveHandle,
}

/// How a cable drag ended.
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// A cable was committed.
    Connected(Cable),
    /// Dropped on an input, but the connection was refused.
    Rejected(PatchError),
    /// Dropped away from any input.
    Aborted,
    /// No cable drag was in progress.
    Stale,
}

/// Owns the drag state of one editor.
#[derive(Debug, Default)]
pub struct InteractionController {
    module_drag: Option<ModuleDrag>,
    cable_drag: Option<PendingCable>,
    listeners: ListenerRegistry,
}

impl InteractionController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active module drag, if any.
    pub fn module_drag(&self) -> Option<&ModuleDrag> {
        self.module_drag.as_ref()
    }

    /// The active cable drag, if any.
    pub fn pending_cable(&self) -> Option<&PendingCable> {
        self.cable_drag.as_ref()
    }

    /// Returns true if any drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.module_drag.is_some() || self.cable_drag.is_some()
    }

    /// Number of global listeners currently attached.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ========================================================================
    // Event Dispatch
    // ========================================================================

    /// Routes a pointer event to the state machines.
    pub fn handle_event<S: RenderSurface, B: SignalBackend>(
        &mut self,
        rack: &mut Rack<S, B>,
        event: PointerEvent,
    ) -> EventResponse {
        let response = match event.phase {
            PointerPhase::Press => self.on_press(rack, event.position),
            PointerPhase::Move => self.on_move(rack, event.position),
            PointerPhase::Release => self.on_release(rack, event.position),
            PointerPhase::DoubleClick => self.on_double_click(rack, event.position),
        };

        EventResponse {
            prevent_default: response.consumed && event.source == PointerSource::Touch,
            ..response
        }
    }

    fn on_press<S: RenderSurface, B: SignalBackend>(
        &mut self,
        rack: &mut Rack<S, B>,
        position: Pos2,
    ) -> EventResponse {
        if self.is_dragging() {
            debug!("press ignored, drag already in progress");
            return EventResponse::ignored();
        }

        let hit = rack.surface.hit_test(position);
        if let Some((module, port)) = hit.and_then(|h| h.as_output_port()) {
            return match self.start_cable_drag(rack, module, port, position) {
                // The module underneath must not start a drag of its own
                Ok(()) => EventResponse::consumed().stop_propagation(),
                Err(err) => {
                    debug!("cable drag not started: {}", err);
                    EventResponse::ignored()
                }
            };
        }

        match hit {
            Some(ElementId::Header(module)) => match self.start_drag_module(rack, module, position) {
                Ok(()) => EventResponse::consumed(),
                Err(err) => {
                    debug!("module drag not started: {}", err);
                    EventResponse::ignored()
                }
            },
            _ => EventResponse::ignored(),
        }
    }

    fn on_move<S: RenderSurface, B: SignalBackend>(
        &mut self,
        rack: &mut Rack<S, B>,
        position: Pos2,
    ) -> EventResponse {
        let mut consumed = false;
        if self.listeners.is_registered(DragKind::Module, ListenerEvent::Move) {
            consumed |= self.on_drag_module(rack, position);
        }
        if self.listeners.is_registered(DragKind::Cable, ListenerEvent::Move) {
            consumed |= self.on_cable_drag(rack, position);
        }
        if consumed {
            EventResponse::consumed()
        } else {
            EventResponse::ignored()
        }
    }

    fn on_release<S: RenderSurface, B: SignalBackend>(
        &mut self,
        rack: &mut Rack<S, B>,
        position: Pos2,
    ) -> EventResponse {
        let mut consumed = false;
        if self.listeners.is_registered(DragKind::Module, ListenerEvent::Release) {
            self.stop_drag_module();
            consumed = true;
        }
        if self.listeners.is_registered(DragKind::Cable, ListenerEvent::Release) {
            self.handle_touch_drop(rack, position);
            consumed = true;
        }
        if consumed {
            EventResponse::consumed()
        } else {
            EventResponse::ignored()
        }
    }

    fn on_double_click<S: RenderSurface, B: SignalBackend>(
        &mut self,
        rack: &mut Rack<S, B>,
        position: Pos2,
    ) -> EventResponse {
        let hit = rack.surface.hit_test(position);
        match hit.and_then(|h| h.as_input_port()) {
            Some((module, port)) => {
                rack.disconnect_all_into(module, port);
                EventResponse::consumed().stop_propagation()
            }
            None => EventResponse::ignored(),
        }
    }

    // ========================================================================
    // Module Drag
    // ========================================================================

    /// Starts dragging a module by its header.
    ///
    /// Records where the pointer is relative to the module's top-left so the
    /// module does not jump under the pointer.
    pub fn start_drag_module<S: RenderSurface, B: SignalBackend>(
        &mut self,
        rack: &mut Rack<S, B>,
        module: ModuleId,
        pointer: Pos2,
    ) -> Result<(), PatchError> {
        if self.is_dragging() {
            return Err(PatchError::StaleGesture);
        }
        if !rack.graph.contains_module(module) {
            return Err(PatchError::ModuleNotFound(module));
        }
        let rect = rack
            .surface
            .bounding_box(ElementId::Module(module))
            .ok_or(PatchError::ModuleNotFound(module))?;

        self.module_drag = Some(ModuleDrag {
            module,
            offset: pointer - rect.min,
        });
        self.listeners.register(DragKind::Module);
        debug!("module drag started on {}", module);
        Ok(())
    }

    /// Moves the dragged module so the pointer keeps its grab offset, then
    /// re-renders every cable.
    ///
    /// Returns false if no module drag is active.
    pub fn on_drag_module<S: RenderSurface, B: SignalBackend>(
        &mut self,
        rack: &mut Rack<S, B>,
        pointer: Pos2,
    ) -> bool {
        let Some(drag) = self.module_drag else {
            return false;
        };

        let position = rack.surface.to_canvas(pointer) - drag.offset;
        if let Err(err) = rack.move_module(drag.module, position) {
            debug!("dragged module vanished: {}", err);
            self.stop_drag_module();
            return false;
        }
        rack.refresh_cables();
        true
    }

    /// Ends a module drag wherever the release happened.
    pub fn stop_drag_module(&mut self) {
        if let Some(drag) = self.module_drag.take() {
            debug!("module drag on {} stopped", drag.module);
        }
        self.listeners.unregister(DragKind::Module);
    }

    // ========================================================================
    // Cable Drag
    // ========================================================================

    /// Starts pulling a cable out of an output port.
    ///
    /// Creates a translucent curve from the port center to the pointer.
    pub fn start_cable_drag<S: RenderSurface, B: SignalBackend>(
        &mut self,
        rack: &mut Rack<S, B>,
        module: ModuleId,
        port: &'static str,
        pointer: Pos2,
    ) -> Result<(), PatchError> {
        if self.is_dragging() {
            return Err(PatchError::StaleGesture);
        }
        let start = geometry::anchor_of(&rack.surface, &rack.graph, module, port)?;
        let current = rack.surface.to_canvas(pointer);
        let style = rack.droop_style();

        let curve = rack.surface.create_curve(CurveStyle::Pending);
        geometry::render_curve(&mut rack.surface, curve, start, current, style);

        self.cable_drag = Some(PendingCable {
            source: module,
            source_port: port,
            start,
            current,
            curve,
        });
        self.listeners.register(DragKind::Cable);
        debug!("cable drag started from {}.{}", module, port);
        Ok(())
    }

    /// Moves the free end of the pending cable. Does not touch the graph.
    ///
    /// Returns false if no cable drag is active.
    pub fn on_cable_drag<S: RenderSurface, B: SignalBackend>(
        &mut self,
        rack: &mut Rack<S, B>,
        pointer: Pos2,
    ) -> bool {
        let style = rack.droop_style();
        let Some(pending) = self.cable_drag.as_mut() else {
            return false;
        };
        pending.current = rack.surface.to_canvas(pointer);
        geometry::render_curve(
            &mut rack.surface,
            pending.curve,
            pending.start,
            pending.current,
            style,
        );
        true
    }

    /// Finishes the cable drag on a known input target.
    ///
    /// Used by hosts whose input ports receive their own release events.
    pub fn end_cable_drag<S: RenderSurface, B: SignalBackend>(
        &mut self,
        rack: &mut Rack<S, B>,
        target: ModuleId,
    ) -> DropOutcome {
        let Some(pending) = self.cable_drag else {
            return DropOutcome::Stale;
        };

        let outcome = match self.complete_connection(rack, pending.source, target) {
            Ok(cable) => DropOutcome::Connected(cable),
            Err(err) => DropOutcome::Rejected(err),
        };
        self.cleanup_drag(rack);
        outcome
    }

    /// Finishes the cable drag at a release position.
    ///
    /// Hit-tests the position: an input port completes the connection,
    /// anything else aborts. Touch input has no per-element release events,
    /// so every release is routed here, mouse releases included.
    pub fn handle_touch_drop<S: RenderSurface, B: SignalBackend>(
        &mut self,
        rack: &mut Rack<S, B>,
        position: Pos2,
    ) -> DropOutcome {
        if self.cable_drag.is_none() {
            return DropOutcome::Stale;
        }

        let target = rack
            .surface
            .hit_test(position)
            .and_then(|hit| hit.as_input_port());
        match target {
            Some((module, _)) => self.end_cable_drag(rack, module),
            None => {
                self.abort_cable_drag(rack);
                DropOutcome::Aborted
            }
        }
    }

    /// Commits a connection between two modules.
    ///
    /// Self-loops and unresolvable modules are refused without touching
    /// anything. Backend refusals are logged and leave no partial state.
    pub fn complete_connection<S: RenderSurface, B: SignalBackend>(
        &mut self,
        rack: &mut Rack<S, B>,
        source: ModuleId,
        dest: ModuleId,
    ) -> Result<Cable, PatchError> {
        if source == dest {
            debug!("ignoring self connection on {}", source);
            return Err(PatchError::SelfConnection);
        }
        rack.connect(source, dest).inspect_err(|err| {
            if err.is_not_found() {
                debug!("connection {} -> {} skipped: {}", source, dest, err);
            } else {
                warn!("connection {} -> {} failed: {}", source, dest, err);
            }
        })
    }

    /// Drops the pending cable without connecting anything.
    pub fn abort_cable_drag<S: RenderSurface, B: SignalBackend>(&mut self, rack: &mut Rack<S, B>) {
        if let Some(pending) = self.cable_drag {
            debug!("cable drag from {} aborted", pending.source);
        }
        self.cleanup_drag(rack);
    }

    /// Removes the pending curve and the cable drag listeners.
    ///
    /// Does nothing when no cable drag is active.
    pub fn cleanup_drag<S: RenderSurface, B: SignalBackend>(&mut self, rack: &mut Rack<S, B>) {
        if let Some(pending) = self.cable_drag.take() {
            rack.surface.remove_curve(pending.curve);
            self.listeners.unregister(DragKind::Cable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{center_of, input_of, output_of, test_rack, TestRack};
    use crate::graph::ModuleKind;

    fn press(rack: &mut TestRack, c: &mut InteractionController, p: Pos2) -> EventResponse {
        c.handle_event(rack, PointerEvent::mouse(PointerPhase::Press, p))
    }

    fn drag_to(rack: &mut TestRack, c: &mut InteractionController, p: Pos2) -> EventResponse {
        c.handle_event(rack, PointerEvent::mouse(PointerPhase::Move, p))
    }

    fn release(rack: &mut TestRack, c: &mut InteractionController, p: Pos2) -> EventResponse {
        c.handle_event(rack, PointerEvent::mouse(PointerPhase::Release, p))
    }

    #[test]
    fn test_drag_output_onto_input_connects() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(50.0, 50.0));
        let b = rack.add_module(ModuleKind::Output, Pos2::new(500.0, 100.0));

        let from = output_of(&rack, a);
        let response = press(&mut rack, &mut c, from);
        assert!(response.stop_propagation);
        assert!(c.module_drag().is_none());
        assert_eq!(c.listener_count(), 2);
        assert_eq!(rack.surface.count_curves(CurveStyle::Pending), 1);

        drag_to(&mut rack, &mut c, Pos2::new(300.0, 300.0));
        let to = input_of(&rack, b);
        drag_to(&mut rack, &mut c, to);
        release(&mut rack, &mut c, to);

        assert_eq!(rack.graph.cable_count(), 1);
        assert_eq!(rack.graph.cables()[0].ends.from, a);
        assert_eq!(rack.graph.cables()[0].ends.to, b);
        assert_eq!(rack.backend.edge_count(), 1);
        assert_eq!(rack.surface.count_curves(CurveStyle::Cable), 1);
        assert_eq!(rack.surface.count_curves(CurveStyle::Pending), 0);
        assert_eq!(c.listener_count(), 0);
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_release_on_empty_canvas_aborts() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(50.0, 50.0));
        rack.add_module(ModuleKind::Output, Pos2::new(500.0, 100.0));

        let from = output_of(&rack, a);
        press(&mut rack, &mut c, from);
        drag_to(&mut rack, &mut c, Pos2::new(900.0, 650.0));
        release(&mut rack, &mut c, Pos2::new(900.0, 650.0));

        assert_eq!(rack.graph.cable_count(), 0);
        assert_eq!(rack.backend.edge_count(), 0);
        assert_eq!(rack.surface.curve_count(), 0);
        assert_eq!(c.listener_count(), 0);
    }

    #[test]
    fn test_release_on_output_port_aborts() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(50.0, 50.0));
        let b = rack.add_module(ModuleKind::Vca, Pos2::new(500.0, 50.0));

        let from = output_of(&rack, a);
        press(&mut rack, &mut c, from);
        let other_output = output_of(&rack, b);
        let outcome = c.handle_touch_drop(&mut rack, other_output);
        assert_eq!(outcome, DropOutcome::Aborted);
        assert_eq!(rack.graph.cable_count(), 0);
        assert_eq!(rack.surface.curve_count(), 0);
    }

    #[test]
    fn test_drop_on_own_input_is_ignored() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let vca = rack.add_module(ModuleKind::Vca, Pos2::new(50.0, 50.0));

        let from = output_of(&rack, vca);
        press(&mut rack, &mut c, from);
        let to = input_of(&rack, vca);
        let outcome = c.handle_touch_drop(&mut rack, to);
        assert_eq!(outcome, DropOutcome::Rejected(PatchError::SelfConnection));
        assert_eq!(rack.graph.cable_count(), 0);
        assert_eq!(rack.backend.edge_count(), 0);
        assert_eq!(rack.surface.curve_count(), 0);
        assert_eq!(c.listener_count(), 0);
    }

    #[test]
    fn test_complete_connection_self_loop_never_mutates() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let vca = rack.add_module(ModuleKind::Vca, Pos2::ZERO);
        assert_eq!(
            c.complete_connection(&mut rack, vca, vca),
            Err(PatchError::SelfConnection)
        );
        assert_eq!(rack.graph.cable_count(), 0);
        assert_eq!(rack.surface.curve_count(), 0);
    }

    #[test]
    fn test_touch_drag_and_drop() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(50.0, 50.0));
        let b = rack.add_module(ModuleKind::Vca, Pos2::new(500.0, 50.0));

        let from = output_of(&rack, a);
        let start = c.handle_event(&mut rack, PointerEvent::touch(PointerPhase::Press, from));
        assert!(start.prevent_default);
        let moved = c.handle_event(
            &mut rack,
            PointerEvent::touch(PointerPhase::Move, Pos2::new(250.0, 200.0)),
        );
        assert!(moved.prevent_default);
        let to = input_of(&rack, b);
        c.handle_event(&mut rack, PointerEvent::touch(PointerPhase::Release, to));

        assert_eq!(rack.graph.cable_count(), 1);
        assert_eq!(c.listener_count(), 0);
        assert_eq!(rack.surface.count_curves(CurveStyle::Pending), 0);
    }

    #[test]
    fn test_end_cable_drag_direct_target() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(50.0, 50.0));
        let b = rack.add_module(ModuleKind::Output, Pos2::new(500.0, 50.0));

        let from = output_of(&rack, a);
        c.start_cable_drag(&mut rack, a, "out", from).unwrap();
        let outcome = c.end_cable_drag(&mut rack, b);
        assert!(matches!(outcome, DropOutcome::Connected(_)));
        assert_eq!(rack.graph.cable_count(), 1);

        // A late completion after cleanup is a no-op
        assert_eq!(c.end_cable_drag(&mut rack, b), DropOutcome::Stale);
        let to = input_of(&rack, b);
        assert_eq!(c.handle_touch_drop(&mut rack, to), DropOutcome::Stale);
        assert_eq!(rack.graph.cable_count(), 1);
    }

    #[test]
    fn test_rejected_link_leaves_no_residue() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(50.0, 50.0));
        let b = rack.add_module(ModuleKind::Output, Pos2::new(500.0, 50.0));
        let node = rack.graph.find_module(b).unwrap().node;
        rack.backend.remove_node(node);

        let from = output_of(&rack, a);
        press(&mut rack, &mut c, from);
        let to = input_of(&rack, b);
        let outcome = c.handle_touch_drop(&mut rack, to);
        assert!(matches!(outcome, DropOutcome::Rejected(PatchError::LinkRejected(_))));
        assert_eq!(rack.graph.cable_count(), 0);
        assert_eq!(rack.surface.curve_count(), 0);
        assert_eq!(c.listener_count(), 0);
    }

    #[test]
    fn test_pending_curve_tracks_pointer() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(50.0, 50.0));

        let from = output_of(&rack, a);
        press(&mut rack, &mut c, from);
        drag_to(&mut rack, &mut c, Pos2::new(420.0, 380.0));
        let pending = *c.pending_cable().unwrap();
        assert_eq!(pending.current, rack.surface.to_canvas(Pos2::new(420.0, 380.0)));
        let path = rack.surface.curve(pending.curve).unwrap().path.unwrap();
        assert_eq!(path.start, pending.start);
        assert_eq!(path.end, pending.current);
        assert_eq!(rack.graph.cable_count(), 0);
    }

    #[test]
    fn test_start_cable_drag_draws_from_port_to_pointer() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(50.0, 50.0));

        c.start_cable_drag(&mut rack, a, "out", Pos2::new(300.0, 200.0)).unwrap();
        let pending = *c.pending_cable().unwrap();
        let path = rack.surface.curve(pending.curve).unwrap().path.unwrap();
        assert_eq!(path.start, rack.surface.to_canvas(output_of(&rack, a)));
        assert_eq!(path.end, rack.surface.to_canvas(Pos2::new(300.0, 200.0)));
        assert_eq!(path, geometry::CurvePath::droop(path.start, path.end, rack.droop_style()));
        assert_eq!(c.listener_count(), 2);
        assert!(c.start_cable_drag(&mut rack, a, "out", Pos2::ZERO).is_err());
    }

    #[test]
    fn test_module_drag_keeps_grab_offset() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let out = rack.add_module(ModuleKind::Output, Pos2::new(100.0, 100.0));
        let grab = center_of(&rack, ElementId::Header(out));
        let offset = grab - rack.surface.bounding_box(ElementId::Module(out)).unwrap().min;

        press(&mut rack, &mut c, grab);
        assert_eq!(c.module_drag().map(|d| d.offset), Some(offset));

        drag_to(&mut rack, &mut c, grab + Vec2::new(60.0, 40.0));
        drag_to(&mut rack, &mut c, grab + Vec2::new(60.0, 40.0));
        let position = rack.graph.find_module(out).unwrap().position;
        assert_eq!(position, Pos2::new(160.0, 140.0));
        assert_eq!(rack.surface.module_position(out), Some(position));

        release(&mut rack, &mut c, Pos2::new(-500.0, -500.0));
        assert!(!c.is_dragging());
        assert_eq!(c.listener_count(), 0);

        // Moves after release do nothing
        drag_to(&mut rack, &mut c, Pos2::new(700.0, 700.0));
        assert_eq!(rack.graph.find_module(out).unwrap().position, position);
    }

    #[test]
    fn test_module_drag_accounts_for_scroll() {
        let mut rack = test_rack();
        rack.surface.set_scroll_offset(Vec2::new(100.0, 50.0));
        let mut c = InteractionController::new();
        let out = rack.add_module(ModuleKind::Output, Pos2::new(300.0, 300.0));
        let grab = center_of(&rack, ElementId::Header(out));

        press(&mut rack, &mut c, grab);
        drag_to(&mut rack, &mut c, grab + Vec2::new(10.0, 0.0));
        assert_eq!(
            rack.graph.find_module(out).unwrap().position,
            Pos2::new(310.0, 300.0)
        );
    }

    #[test]
    fn test_module_drag_rerenders_cables() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(50.0, 50.0));
        let b = rack.add_module(ModuleKind::Output, Pos2::new(500.0, 50.0));
        let cable = rack.connect(a, b).unwrap();
        let before = rack.surface.curve(cable.curve).unwrap().path.unwrap();

        let grab = center_of(&rack, ElementId::Header(b));
        press(&mut rack, &mut c, grab);
        drag_to(&mut rack, &mut c, grab + Vec2::new(0.0, 120.0));
        let after = rack.surface.curve(cable.curve).unwrap().path.unwrap();
        assert_eq!(after.start, before.start);
        assert!((after.end.y - before.end.y - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_drags_are_mutually_exclusive() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(50.0, 50.0));
        let b = rack.add_module(ModuleKind::Output, Pos2::new(500.0, 50.0));

        let from = output_of(&rack, a);
        press(&mut rack, &mut c, from);
        let at = center_of(&rack, ElementId::Header(b));
        let second = press(&mut rack, &mut c, at);
        assert!(!second.consumed);
        assert!(c.module_drag().is_none());
        assert_eq!(c.listener_count(), 2);
        assert_eq!(
            c.start_drag_module(&mut rack, b, Pos2::ZERO),
            Err(PatchError::StaleGesture)
        );
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        c.cleanup_drag(&mut rack);
        c.abort_cable_drag(&mut rack);
        c.stop_drag_module();
        assert_eq!(c.listener_count(), 0);
        assert!(!c.on_cable_drag(&mut rack, Pos2::ZERO));
        assert!(!c.on_drag_module(&mut rack, Pos2::ZERO));
    }

    #[test]
    fn test_repeated_gestures_do_not_leak_listeners() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(50.0, 50.0));
        let b = rack.add_module(ModuleKind::Vca, Pos2::new(500.0, 50.0));

        for i in 0..10 {
            let from = output_of(&rack, a);
            press(&mut rack, &mut c, from);
            let target = if i % 2 == 0 { input_of(&rack, b) } else { Pos2::new(1200.0, 700.0) };
            release(&mut rack, &mut c, target);
            assert_eq!(c.listener_count(), 0);

            let grab = center_of(&rack, ElementId::Header(b));
            press(&mut rack, &mut c, grab);
            release(&mut rack, &mut c, grab);
            assert_eq!(c.listener_count(), 0);
        }
        // The first drop connected, later drops onto the occupied input were refused
        assert_eq!(rack.graph.cable_count(), 1);
        assert_eq!(rack.surface.count_curves(CurveStyle::Pending), 0);
    }

    #[test]
    fn test_double_click_input_removes_cables() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(50.0, 50.0));
        let b = rack.add_module(ModuleKind::Output, Pos2::new(500.0, 50.0));
        rack.connect(a, b).unwrap();

        let to = input_of(&rack, b);
        let response = c.handle_event(&mut rack, PointerEvent::mouse(PointerPhase::DoubleClick, to));
        assert!(response.stop_propagation);
        assert_eq!(rack.graph.cable_count(), 0);
        assert_eq!(rack.backend.edge_count(), 0);
        assert_eq!(rack.surface.curve_count(), 0);

        // Double-click elsewhere does nothing
        let response = c.handle_event(
            &mut rack,
            PointerEvent::mouse(PointerPhase::DoubleClick, Pos2::new(1000.0, 600.0)),
        );
        assert!(!response.consumed);
    }

    #[test]
    fn test_press_on_body_does_nothing() {
        let mut rack = test_rack();
        let mut c = InteractionController::new();
        let vca = rack.add_module(ModuleKind::Vca, Pos2::new(50.0, 50.0));
        let body = rack.surface.bounding_box(ElementId::Module(vca)).unwrap();
        let response = press(&mut rack, &mut c, Pos2::new(body.center().x, body.min.y + 50.0));
        assert!(!response.consumed);
        assert!(!c.is_dragging());
    }
}
