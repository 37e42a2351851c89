//! Theme definitions for the patch editor UI
//!
//! Color constants and styling for a dark rack with bright cables.

use eframe::egui::{self, Color32, Rounding, Stroke, Vec2};

use crate::graph::ModuleRole;

/// Background colors
pub mod background {
    use super::Color32;

    /// Rack background - deep dark blue
    pub const RACK: Color32 = Color32::from_rgb(26, 26, 46);

    /// Grid line color - subtle
    pub const GRID: Color32 = Color32::from_rgb(40, 40, 60);

    /// Toolbar and status bar background
    pub const PANEL: Color32 = Color32::from_rgb(35, 35, 55);

    /// Module face
    pub const MODULE: Color32 = Color32::from_rgb(45, 45, 70);

    /// Widget background when hovered
    pub const WIDGET_HOVERED: Color32 = Color32::from_rgb(55, 55, 85);

    /// Widget background when active/pressed
    pub const WIDGET_ACTIVE: Color32 = Color32::from_rgb(65, 65, 100);
}

/// Cable colors
pub mod cable {
    use super::Color32;

    /// A committed cable - orange
    pub const COMMITTED: Color32 = Color32::from_rgb(255, 183, 77);

    /// The cable following the pointer, drawn translucent
    pub const PENDING: Color32 = Color32::from_rgba_premultiplied(128, 92, 38, 128);

    /// Cable stroke width
    pub const WIDTH: f32 = 3.0;
}

/// Port socket colors
pub mod port {
    use super::Color32;

    /// Input socket - green
    pub const INPUT: Color32 = Color32::from_rgb(129, 199, 132);

    /// Output socket - blue
    pub const OUTPUT: Color32 = Color32::from_rgb(66, 165, 245);

    /// Socket rim
    pub const RIM: Color32 = Color32::from_rgb(20, 20, 35);
}

/// Module header colors by role
pub mod module {
    use super::Color32;

    /// Sources (oscillators) - blue
    pub const SOURCE: Color32 = Color32::from_rgb(66, 165, 245);

    /// Processors (amplifiers) - cyan
    pub const PROCESSOR: Color32 = Color32::from_rgb(77, 208, 225);

    /// Sinks (output) - purple
    pub const SINK: Color32 = Color32::from_rgb(186, 104, 200);

    /// Module border
    pub const BORDER: Color32 = Color32::from_rgb(60, 60, 80);
}

/// Text colors
pub mod text {
    use super::Color32;

    /// Primary text - bright white
    pub const PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);

    /// Secondary text - dimmed
    pub const SECONDARY: Color32 = Color32::from_rgb(160, 160, 175);

    /// Disabled text
    pub const DISABLED: Color32 = Color32::from_rgb(100, 100, 115);

    /// Text on a colored header
    pub const ON_HEADER: Color32 = Color32::from_rgb(20, 20, 35);
}

/// UI accent colors
pub mod accent {
    use super::Color32;

    /// Primary accent - blue
    pub const PRIMARY: Color32 = Color32::from_rgb(66, 165, 245);

    /// Error - red
    pub const ERROR: Color32 = Color32::from_rgb(239, 83, 80);
}

/// Grid spacing for the background pattern
pub const GRID_SPACING: f32 = 20.0;

/// Rounding of module boxes
pub const ROUNDING: Rounding = Rounding {
    nw: 6.0,
    ne: 6.0,
    sw: 6.0,
    se: 6.0,
};

/// Smaller rounding for compact elements
pub const ROUNDING_SMALL: Rounding = Rounding {
    nw: 4.0,
    ne: 4.0,
    sw: 4.0,
    se: 4.0,
};

/// Header color for a module role
pub fn role_color(role: ModuleRole) -> Color32 {
    match role {
        ModuleRole::Source => module::SOURCE,
        ModuleRole::Processor => module::PROCESSOR,
        ModuleRole::Sink => module::SINK,
    }
}

/// Apply the dark rack theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let visuals = &mut style.visuals;
    visuals.dark_mode = true;
    visuals.window_fill = background::PANEL;
    visuals.window_stroke = Stroke::new(1.0, module::BORDER);
    visuals.window_rounding = ROUNDING;
    visuals.panel_fill = background::RACK;

    for widgets in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.open,
    ] {
        widgets.bg_fill = background::MODULE;
        widgets.fg_stroke = Stroke::new(1.0, text::PRIMARY);
        widgets.rounding = ROUNDING_SMALL;
    }
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text::SECONDARY);

    visuals.widgets.hovered.bg_fill = background::WIDGET_HOVERED;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text::PRIMARY);
    visuals.widgets.hovered.rounding = ROUNDING_SMALL;

    visuals.widgets.active.bg_fill = background::WIDGET_ACTIVE;
    visuals.widgets.active.fg_stroke = Stroke::new(1.5, accent::PRIMARY);
    visuals.widgets.active.rounding = ROUNDING_SMALL;

    visuals.selection.bg_fill = accent::PRIMARY.gamma_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent::PRIMARY);
    visuals.extreme_bg_color = Color32::from_rgb(20, 20, 35);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);
    style.spacing.button_padding = Vec2::new(12.0, 6.0);
    style.spacing.slider_width = 110.0;

    ctx.set_style(style);
}

/// Draw the rack grid, shifted by the canvas scroll offset
pub fn draw_grid_background(painter: &egui::Painter, rect: egui::Rect, scroll: Vec2) {
    painter.rect_filled(rect, 0.0, background::RACK);
    let stroke = Stroke::new(1.0, background::GRID);

    let mut x = rect.left() - scroll.x.rem_euclid(GRID_SPACING);
    while x <= rect.right() {
        painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], stroke);
        x += GRID_SPACING;
    }

    let mut y = rect.top() - scroll.y.rem_euclid(GRID_SPACING);
    while y <= rect.bottom() {
        painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
        y += GRID_SPACING;
    }
}
