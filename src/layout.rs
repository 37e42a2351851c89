//! Layout driver.
//!
//! Grid placement for new modules, auto-arrange, and the short animation
//! that keeps cables attached while arranged modules slide into place.

use egui::Pos2;

use crate::config::EditorConfig;
use crate::geometry::RenderSurface;
use crate::graph::{ModuleId, ModuleKind};

// ============================================================================
// Grid
// ============================================================================

/// Number of grid columns that fit in a viewport. Never less than one.
pub fn columns(viewport_width: f32, config: &EditorConfig) -> usize {
    let cols = ((viewport_width - config.viewport_margin) / config.grid_cell.0).floor();
    if cols.is_finite() && cols >= 1.0 {
        cols as usize
    } else {
        1
    }
}

/// Top-left of the grid slot at `index`, filling rows left to right.
fn grid_slot(index: usize, cols: usize, origin: (f32, f32), config: &EditorConfig) -> Pos2 {
    let col = (index % cols) as f32;
    let row = (index / cols) as f32;
    Pos2::new(
        origin.0 + col * config.grid_cell.0,
        origin.1 + row * config.grid_cell.1,
    )
}

/// Returns true if a module placed at `candidate` would overlap one at `other`.
fn overlaps(candidate: Pos2, other: Pos2, config: &EditorConfig) -> bool {
    let (w, h) = config.module_footprint;
    candidate.x < other.x + w
        && candidate.x + w > other.x
        && candidate.y < other.y + h
        && candidate.y + h > other.y
}

// ============================================================================
// Placement
// ============================================================================

/// Finds a spot for a new module.
///
/// Walks the placement grid and returns the first slot that overlaps none of
/// the `occupied` positions. If every attempt collides, returns a position
/// jittered near the placement origin.
pub fn next_position(
    occupied: &[Pos2],
    viewport_width: f32,
    config: &EditorConfig,
    rng: &mut fastrand::Rng,
) -> Pos2 {
    let cols = columns(viewport_width, config);
    let free = (0..config.max_placement_attempts)
        .map(|i| grid_slot(i, cols, config.placement_origin, config))
        .find(|slot| !occupied.iter().any(|&m| overlaps(*slot, m, config)));

    match free {
        Some(slot) => slot,
        None => {
            let (x, y) = config.placement_origin;
            let fallback = Pos2::new(x + rng.f32() * 50.0, y + rng.f32() * 50.0);
            tracing::debug!("no free grid slot, placing at ({}, {})", fallback.x, fallback.y);
            fallback
        }
    }
}

/// Grid positions for `count` modules in auto-arrange order.
pub fn arrange_positions(count: usize, viewport_width: f32, config: &EditorConfig) -> Vec<Pos2> {
    let cols = columns(viewport_width, config);
    (0..count)
        .map(|i| grid_slot(i, cols, config.arrange_origin, config))
        .collect()
}

// ============================================================================
// Arrange Animation
// ============================================================================

/// One module sliding to its arranged slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrangeMove {
    pub id: ModuleId,
    pub kind: ModuleKind,
    pub from: Pos2,
    pub to: Pos2,
}

/// A fixed number of frames over which arranged modules are drawn moving
/// from their old to their new positions.
///
/// Only the rendering moves; the modules' stored positions are already the
/// targets. Cables must be refreshed after every step.
#[derive(Clone, Debug)]
pub struct ArrangeAnimation {
    moves: Vec<ArrangeMove>,
    frame: u32,
    frames: u32,
}

impl ArrangeAnimation {
    /// Creates an animation lasting `frames` steps (at least one).
    pub fn new(moves: Vec<ArrangeMove>, frames: u32) -> Self {
        Self {
            moves,
            frame: 0,
            frames: frames.max(1),
        }
    }

    /// Steps taken so far.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Total number of steps.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Returns true once every step has been taken.
    pub fn is_finished(&self) -> bool {
        self.frame >= self.frames
    }

    /// Stops animating a module that no longer exists.
    pub fn forget(&mut self, id: ModuleId) {
        self.moves.retain(|m| m.id != id);
    }

    /// Advances one frame and places every module at its eased position.
    ///
    /// Returns true while frames remain.
    pub fn step<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.is_finished() {
            return false;
        }
        self.frame += 1;
        let t = ease_out(self.frame as f32 / self.frames as f32);
        for m in &self.moves {
            surface.place_module(m.id, m.kind, m.from.lerp(m.to, t));
        }
        !self.is_finished()
    }

    /// Jumps straight to the final frame.
    pub fn finish<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        for m in &self.moves {
            surface.place_module(m.id, m.kind, m.to);
        }
        self.frame = self.frames;
    }
}

/// Cubic ease-out on `[0, 1]`.
fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}
