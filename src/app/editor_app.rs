//! Main application struct for the patch editor
//!
//! Contains the EditorApp which implements eframe::App, paints the rack
//! scene and feeds egui pointer input to the patch editor.

use eframe::egui::{self, Align, Align2, FontId, Layout, RichText, Stroke};
use egui::epaint::CubicBezierShape;
use egui::{LayerId, Pos2, Rect, Vec2};

use super::theme;
use crate::config::EditorConfig;
use crate::editor::PatchEditor;
use crate::engine::SignalGraph;
use crate::geometry::{CurveStyle, ElementId, ModuleFrame, RenderSurface, Scene, PORT_SIZE};
use crate::graph::{ModuleId, ModuleKind, ParameterDisplay, PortDirection};
use crate::interaction::{PointerEvent, PointerPhase, PointerSource};

/// Main application state for the patch editor
pub struct EditorApp {
    /// The patch being edited
    editor: PatchEditor<Scene, SignalGraph>,

    /// Message shown in the status bar
    status_message: Option<String>,

    /// Whether theme has been applied
    theme_applied: bool,
}

impl EditorApp {
    /// Create a new EditorApp holding the startup output module
    pub fn new(config: EditorConfig) -> Self {
        Self {
            editor: PatchEditor::with_output(Scene::default(), SignalGraph::new(), config),
            status_message: None,
            theme_applied: false,
        }
    }

    /// Show a message in the status bar
    pub fn with_status(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }

    /// Draw the top toolbar
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) -> ToolbarActions {
        let mut actions = ToolbarActions::default();

        ui.horizontal(|ui| {
            ui.add_space(8.0);

            ui.label(RichText::new("PATCH RACK")
                .size(18.0)
                .color(theme::text::PRIMARY)
                .strong());

            ui.add_space(20.0);
            ui.separator();
            ui.add_space(20.0);

            ui.label(RichText::new("Add").color(theme::text::SECONDARY));
            ui.add_space(8.0);
            for kind in ModuleKind::ALL {
                let color = theme::role_color(kind.role());
                if ui.button(RichText::new(kind.title()).color(color)).clicked() {
                    actions.add = Some(kind);
                }
            }

            ui.add_space(20.0);
            ui.separator();
            ui.add_space(20.0);

            if ui.button("Auto Arrange").clicked() {
                actions.arrange = true;
            }
        });

        actions
    }

    /// Draw the bottom status bar
    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);

            match self.status_message {
                Some(ref message) => {
                    ui.label(RichText::new(format!("⚠ {}", message))
                        .color(theme::accent::ERROR)
                        .small());
                }
                None => {
                    let graph = &self.editor.rack().graph;
                    ui.label(RichText::new(format!(
                        "{} modules • {} cables",
                        graph.module_count(),
                        graph.cable_count()
                    ))
                    .color(theme::text::SECONDARY)
                    .small());
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(RichText::new("double-click an input to unplug")
                    .color(theme::text::DISABLED)
                    .small());
            });
        });
    }

    // ========================================================================
    // Canvas
    // ========================================================================

    /// Draw the rack and route pointer input into the editor
    fn draw_canvas(&mut self, ui: &mut egui::Ui) -> CanvasActions {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, egui::Sense::hover());

        let surface = &mut self.editor.rack_mut().surface;
        surface.set_container_rect(rect);
        if response.hovered() {
            let delta = ui.input(|i| i.smooth_scroll_delta);
            if delta != Vec2::ZERO {
                let scroll = (surface.scroll_offset() - delta).max(Vec2::ZERO);
                surface.set_scroll_offset(scroll);
            }
        }

        self.forward_pointer_input(ui, rect);

        let painter = ui.painter_at(rect);
        theme::draw_grid_background(&painter, rect, self.editor.rack().surface.scroll_offset());

        let mut actions = CanvasActions::default();
        let modules: Vec<(ModuleId, ModuleKind, Vec<f32>)> = self
            .editor
            .rack()
            .graph
            .modules()
            .iter()
            .map(|m| (m.id, m.kind, m.parameters().to_vec()))
            .collect();
        for (id, kind, parameters) in modules {
            self.draw_module(ui, &painter, id, kind, &parameters, &mut actions);
        }

        self.draw_curves(&painter);
        actions
    }

    /// Translate this frame's egui pointer events into gestures
    fn forward_pointer_input(&mut self, ui: &egui::Ui, canvas: Rect) {
        let (events, source, double_click) = ui.input(|i| {
            let source = if i.any_touches() {
                PointerSource::Touch
            } else {
                PointerSource::Mouse
            };
            let double_click = i
                .pointer
                .button_double_clicked(egui::PointerButton::Primary)
                .then(|| i.pointer.interact_pos())
                .flatten();
            (i.events.clone(), source, double_click)
        });

        let ctx = ui.ctx().clone();
        let canvas_layer = ui.layer_id();
        for event in events {
            let (phase, position) = match event {
                egui::Event::PointerMoved(pos) => (PointerPhase::Move, pos),
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if pressed {
                        (PointerPhase::Press, pos)
                    } else {
                        (PointerPhase::Release, pos)
                    }
                }
                _ => continue,
            };
            // Moves and releases are global; presses only count on the rack
            if phase == PointerPhase::Press
                && !accepts_press(canvas, canvas_layer, ctx.layer_id_at(position), position)
            {
                continue;
            }
            let response = self.editor.handle_event(PointerEvent { phase, source, position });
            if response.consumed {
                ui.ctx().request_repaint();
            }
        }

        let double_click = double_click
            .filter(|p| accepts_press(canvas, canvas_layer, ctx.layer_id_at(*p), *p));
        if let Some(position) = double_click {
            self.editor
                .handle_event(PointerEvent { phase: PointerPhase::DoubleClick, source, position });
        }
    }

    /// Paint one module and its controls
    fn draw_module(
        &self,
        ui: &mut egui::Ui,
        painter: &egui::Painter,
        id: ModuleId,
        kind: ModuleKind,
        parameters: &[f32],
        actions: &mut CanvasActions,
    ) {
        let surface = &self.editor.rack().surface;
        let Some(body) = surface.bounding_box(ElementId::Module(id)) else {
            return;
        };
        let frame = ModuleFrame::new(kind);
        let origin = body.min;
        let header = frame.header(origin);

        painter.rect(body, theme::ROUNDING, theme::background::MODULE, Stroke::new(1.0, theme::module::BORDER));
        painter.rect_filled(
            header,
            egui::Rounding { nw: theme::ROUNDING.nw, ne: theme::ROUNDING.ne, sw: 0.0, se: 0.0 },
            theme::role_color(kind.role()),
        );
        painter.text(
            header.left_center() + Vec2::new(10.0, 0.0),
            Align2::LEFT_CENTER,
            kind.title(),
            FontId::proportional(14.0),
            theme::text::ON_HEADER,
        );

        let close = Rect::from_center_size(header.right_center() - Vec2::new(14.0, 0.0), Vec2::splat(18.0));
        if ui.put(close, egui::Button::new("×").small().frame(false)).clicked() {
            actions.delete = Some(id);
        }

        for (index, definition) in kind.spec().parameters.iter().enumerate() {
            let row = frame.control(origin, index).shrink2(Vec2::new(10.0, 8.0));
            let mut value = parameters.get(index).copied().unwrap_or(definition.default);
            let changed = match definition.display.labels() {
                None => {
                    let mut slider = egui::Slider::new(&mut value, definition.min..=definition.max)
                        .text(definition.name);
                    if let Some(suffix) = unit_suffix(&definition.display) {
                        slider = slider.suffix(suffix);
                    }
                    ui.put(row, slider).changed()
                }
                Some(labels) => {
                    let mut selected = value.round() as usize;
                    let current = definition.label_for(value).unwrap_or_default();
                    ui.allocate_new_ui(egui::UiBuilder::new().max_rect(row), |ui| {
                        egui::ComboBox::from_id_salt((id, index))
                            .selected_text(current)
                            .width(row.width())
                            .show_ui(ui, |ui| {
                                for (i, label) in labels.iter().enumerate() {
                                    ui.selectable_value(&mut selected, i, *label);
                                }
                            });
                    });
                    value = selected as f32;
                    labels.get(selected).is_some_and(|l| *l != current)
                }
            };
            if changed {
                actions.parameters.push((id, index, value));
            }
        }

        for port in kind.spec().ports {
            let Some(socket) = frame.port(origin, port.id) else {
                continue;
            };
            let color = match port.direction {
                PortDirection::Input => theme::port::INPUT,
                PortDirection::Output => theme::port::OUTPUT,
            };
            painter.circle(socket.center(), PORT_SIZE / 2.0, color, Stroke::new(2.0, theme::port::RIM));
            let (anchor, align) = match port.direction {
                PortDirection::Input => (socket.right_center() + Vec2::new(6.0, 0.0), Align2::LEFT_CENTER),
                PortDirection::Output => (socket.left_center() - Vec2::new(6.0, 0.0), Align2::RIGHT_CENTER),
            };
            painter.text(anchor, align, port.name, FontId::proportional(11.0), theme::text::SECONDARY);
        }
    }

    /// Paint every cable curve, the pending one translucent
    fn draw_curves(&self, painter: &egui::Painter) {
        let surface = &self.editor.rack().surface;
        for (_, curve) in surface.curves() {
            let Some(path) = curve.path else {
                continue;
            };
            let color = match curve.style {
                CurveStyle::Cable => theme::cable::COMMITTED,
                CurveStyle::Pending => theme::cable::PENDING,
            };
            let points: [Pos2; 4] = path.points().map(|p| surface.to_viewport(p));
            painter.add(CubicBezierShape::from_points_stroke(
                points,
                false,
                egui::Color32::TRANSPARENT,
                Stroke::new(theme::cable::WIDTH, color),
            ));
        }
    }
}

/// Actions collected from the toolbar for deferred execution
#[derive(Default)]
struct ToolbarActions {
    add: Option<ModuleKind>,
    arrange: bool,
}

/// Actions collected from module controls for deferred execution
#[derive(Default)]
struct CanvasActions {
    delete: Option<ModuleId>,
    parameters: Vec<(ModuleId, usize, f32)>,
}

/// Whether a press belongs to the rack rather than a popup or panel above it
fn accepts_press(canvas: Rect, canvas_layer: LayerId, top_layer: Option<LayerId>, position: Pos2) -> bool {
    canvas.contains(position) && top_layer.map_or(true, |layer| layer == canvas_layer)
}

/// Slider suffix for a continuous parameter
fn unit_suffix(display: &ParameterDisplay) -> Option<String> {
    display
        .unit()
        .filter(|unit| !unit.is_empty())
        .map(|unit| format!(" {}", unit))
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        let toolbar_actions = egui::TopBottomPanel::top("toolbar")
            .frame(egui::Frame::none()
                .fill(theme::background::PANEL)
                .inner_margin(egui::Margin::symmetric(0.0, 8.0)))
            .show(ctx, |ui| {
                self.draw_toolbar(ui)
            })
            .inner;

        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::none()
                .fill(theme::background::PANEL)
                .inner_margin(egui::Margin::symmetric(0.0, 4.0)))
            .show(ctx, |ui| {
                self.draw_status_bar(ui);
            });

        let canvas_actions = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_canvas(ui)
            })
            .inner;

        // Deferred so no widget closure holds a borrow of the editor
        if let Some(kind) = toolbar_actions.add {
            self.editor.create_module(kind);
        }
        if toolbar_actions.arrange {
            self.editor.auto_arrange();
        }
        for (id, index, value) in canvas_actions.parameters {
            if let Err(e) = self.editor.set_parameter(id, index, value) {
                self.status_message = Some(e.to_string());
            }
        }
        if let Some(id) = canvas_actions.delete {
            if let Err(e) = self.editor.delete_module(id) {
                self.status_message = Some(e.to_string());
            }
        }

        if self.editor.tick() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_app_has_output_module() {
        let app = EditorApp::new(EditorConfig::default());
        let modules = app.editor.rack().graph.modules();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].kind, ModuleKind::Output);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_with_status() {
        let app = EditorApp::new(EditorConfig::default()).with_status("config ignored");
        assert_eq!(app.status_message.as_deref(), Some("config ignored"));
    }

    #[test]
    fn test_presses_under_popups_are_ignored() {
        let canvas = Rect::from_min_size(Pos2::ZERO, Vec2::splat(400.0));
        let rack = LayerId::background();
        let popup = LayerId::new(egui::Order::Foreground, egui::Id::new("wave"));
        let inside = Pos2::new(100.0, 100.0);

        assert!(accepts_press(canvas, rack, None, inside));
        assert!(accepts_press(canvas, rack, Some(rack), inside));
        assert!(!accepts_press(canvas, rack, Some(popup), inside));
        assert!(!accepts_press(canvas, rack, Some(rack), Pos2::new(500.0, 100.0)));
    }

    #[test]
    fn test_unit_suffix() {
        assert_eq!(
            unit_suffix(&ParameterDisplay::Linear { unit: "Hz" }).as_deref(),
            Some(" Hz")
        );
        assert_eq!(unit_suffix(&ParameterDisplay::Linear { unit: "" }), None);
        assert_eq!(unit_suffix(&ParameterDisplay::Discrete { labels: &["sine"] }), None);
    }
}
