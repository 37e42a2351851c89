//! The patch editor: one rack plus the gesture and layout state driving it.
//!
//! This is the command surface a front-end talks to. It owns everything, so
//! several editors can run side by side.

use egui::Pos2;
use tracing::{debug, info};

use crate::config::EditorConfig;
use crate::engine::SignalBackend;
use crate::error::PatchError;
use crate::geometry::RenderSurface;
use crate::graph::{Cable, ModuleId, ModuleKind};
use crate::interaction::{
    translate, EventResponse, HostEvent, InteractionController, PointerEvent, PointerPhase,
};
use crate::layout::{self, ArrangeAnimation, ArrangeMove};
use crate::rack::Rack;

/// A patch editor over a rendering surface and a signal backend.
pub struct PatchEditor<S, B> {
    rack: Rack<S, B>,
    interaction: InteractionController,
    animation: Option<ArrangeAnimation>,
    rng: fastrand::Rng,
}

impl<S: RenderSurface, B: SignalBackend> PatchEditor<S, B> {
    /// Creates an empty editor.
    pub fn new(surface: S, backend: B, config: EditorConfig) -> Self {
        Self {
            rack: Rack::new(surface, backend, config),
            interaction: InteractionController::new(),
            animation: None,
            rng: fastrand::Rng::new(),
        }
    }

    /// Creates an editor holding the startup output module.
    pub fn with_output(surface: S, backend: B, config: EditorConfig) -> Self {
        let (x, y) = config.initial_output_position;
        let mut editor = Self::new(surface, backend, config);
        editor.rack.add_module(ModuleKind::Output, Pos2::new(x, y));
        editor
    }

    /// The rack being edited.
    pub fn rack(&self) -> &Rack<S, B> {
        &self.rack
    }

    /// Mutable access to the rack, for host-side surface updates.
    pub fn rack_mut(&mut self) -> &mut Rack<S, B> {
        &mut self.rack
    }

    /// The gesture state.
    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    /// Returns true while an auto-arrange animation is running.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn viewport_width(&self) -> f32 {
        let width = self.rack.surface.container_rect().width();
        if width.is_finite() && width > 0.0 {
            width
        } else {
            self.rack.config.default_viewport_width
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Adds a module at the next free grid slot.
    pub fn create_module(&mut self, kind: ModuleKind) -> ModuleId {
        let occupied: Vec<Pos2> = self.rack.graph.modules().iter().map(|m| m.position).collect();
        let position = layout::next_position(
            &occupied,
            self.viewport_width(),
            &self.rack.config,
            &mut self.rng,
        );
        let id = self.rack.add_module(kind, position);
        info!("added {} as {}", kind.title(), id);
        id
    }

    /// Lays every module out on the arrange grid in creation order.
    ///
    /// Positions change immediately; the rendering slides there over the
    /// configured number of frames, advanced by [`tick`](Self::tick), with
    /// cables refreshed on every frame.
    pub fn auto_arrange(&mut self) {
        self.finish_animation();

        let count = self.rack.graph.module_count();
        let targets = layout::arrange_positions(count, self.viewport_width(), &self.rack.config);
        let moves: Vec<ArrangeMove> = self
            .rack
            .graph
            .modules_mut()
            .iter_mut()
            .zip(targets)
            .map(|(module, to)| {
                let from = module.position;
                module.position = to;
                ArrangeMove {
                    id: module.id,
                    kind: module.kind,
                    from,
                    to,
                }
            })
            .collect();

        info!("arranging {} module(s)", moves.len());
        self.animation = Some(ArrangeAnimation::new(moves, self.rack.config.arrange_frames));
        self.tick();
    }

    /// Advances the arrange animation by one frame.
    ///
    /// Returns true while more frames remain, so the host keeps repainting.
    pub fn tick(&mut self) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        let running = animation.step(&mut self.rack.surface);
        self.rack.refresh_cables();
        if !running {
            debug!("arrange animation done after {} frame(s)", animation.frame());
            self.animation = None;
        }
        running
    }

    fn finish_animation(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            animation.finish(&mut self.rack.surface);
            self.rack.refresh_cables();
        }
    }

    /// Deletes a module and every cable touching it.
    ///
    /// A drag that involves the module is cancelled first.
    pub fn delete_module(&mut self, id: ModuleId) -> Result<Vec<Cable>, PatchError> {
        if self.interaction.pending_cable().is_some_and(|p| p.source == id) {
            self.interaction.abort_cable_drag(&mut self.rack);
        }
        if self.interaction.module_drag().is_some_and(|d| d.module == id) {
            self.interaction.stop_drag_module();
        }
        if let Some(animation) = self.animation.as_mut() {
            animation.forget(id);
        }

        let cables = self.rack.remove_module(id)?;
        info!("deleted {} with {} cable(s)", id, cables.len());
        Ok(cables)
    }

    /// Sets a module parameter. Returns the clamped value stored.
    pub fn set_parameter(
        &mut self,
        id: ModuleId,
        index: usize,
        value: f32,
    ) -> Result<f32, PatchError> {
        self.rack.set_parameter(id, index, value)
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Dispatches a pointer event. Errors are logged, never returned.
    pub fn handle_event(&mut self, event: PointerEvent) -> EventResponse {
        if event.phase == PointerPhase::Press {
            self.finish_animation();
        }
        self.interaction.handle_event(&mut self.rack, event)
    }

    /// Translates and dispatches a raw host event.
    pub fn handle_host_event(&mut self, event: &HostEvent) -> EventResponse {
        match translate(event) {
            Some(pointer) => self.handle_event(pointer),
            None => EventResponse::ignored(),
        }
    }
}
