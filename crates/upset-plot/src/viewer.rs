//! Stand-in host: an egui canvas that paints the surface and feeds pointer
//! input back as actions.

use eframe::egui;
use std::path::Path;

use crate::actions::Action;
use crate::color::Color;
use crate::export::DEFAULT_EXPORT_NAME;
use crate::host::LogSink;
use crate::input::{self, ChartInput};
use crate::scene::{Anchor, Geometry, Node, Paint, TextBlock};
use crate::state::State;
use crate::store::Store;

// Approximate baseline offset below the top of a text row.
const ASCENT_RATIO: f32 = 0.8;

pub struct UpsetViewer {
    state: State,
    canvas_size: egui::Vec2,
    pointer_inside: bool,
}

pub fn create_app(_cc: &eframe::CreationContext<'_>, input: ChartInput) -> UpsetViewer {
    let mut state = State::new(Store::new(0.0, 0.0)).with_sink(LogSink);
    state.dispatch(Action::Render {
        data: input.data,
        options: input.options,
    });
    UpsetViewer {
        state,
        canvas_size: egui::Vec2::ZERO,
        pointer_inside: false,
    }
}

// ------------------------------------------------------------------
// Painting
// ------------------------------------------------------------------

fn color32(color: Color, opacity: f64) -> egui::Color32 {
    let alpha = (color.alpha() * opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

fn fill_color(paint: &Paint, opacity: f64) -> Option<egui::Color32> {
    paint
        .fill
        .map(|c| color32(c, paint.fill_opacity * opacity))
        .filter(|c| c.a() > 0)
}

fn stroke(paint: &Paint, opacity: f64) -> Option<egui::Stroke> {
    let color = paint.stroke?;
    (paint.stroke_width > 0.0)
        .then(|| egui::Stroke::new(paint.stroke_width as f32, color32(color, opacity)))
}

fn paint_text(
    painter: &egui::Painter,
    block: &TextBlock,
    at: egui::Pos2,
    color: egui::Color32,
) {
    let angle = block.rotate.unwrap_or(0.0).to_radians() as f32;
    let rotation = egui::emath::Rot2::from_angle(angle);
    for (line, (y, size)) in block.lines.iter().zip(block.line_positions()) {
        let galley = painter.layout_no_wrap(
            line.text.clone(),
            egui::FontId::proportional(size as f32),
            color,
        );
        let width = galley.size().x;
        let height = galley.size().y;
        let dx = match block.anchor {
            Anchor::Start => 0.0,
            Anchor::Middle => -width / 2.0,
            Anchor::End => -width,
        };
        let dy = if block.middle_baseline {
            -height / 2.0
        } else {
            -(size as f32) * ASCENT_RATIO
        };
        let origin = at + egui::vec2(block.x as f32, y as f32);
        let pos = origin + rotation * egui::vec2(dx, dy);
        painter.add(egui::epaint::TextShape::new(pos, galley, color).with_angle(angle));
    }
}

fn paint_node(painter: &egui::Painter, node: &Node, origin: egui::Pos2, opacity: f64) {
    let opacity = opacity * node.paint.opacity;
    if opacity <= 0.0 {
        return;
    }
    let at = origin + egui::vec2(node.translate.0 as f32, node.translate.1 as f32);
    let paint = &node.paint;

    match &node.geometry {
        Geometry::Group => {}
        Geometry::Rect {
            x,
            y,
            width,
            height,
            rx,
        } => {
            let rect = egui::Rect::from_min_size(
                at + egui::vec2(*x as f32, *y as f32),
                egui::vec2(*width as f32, *height as f32),
            );
            if let Some(fill) = fill_color(paint, opacity) {
                painter.rect_filled(rect, *rx as f32, fill);
            }
            if let Some(stroke) = stroke(paint, opacity) {
                painter.rect_stroke(rect, *rx as f32, stroke, egui::epaint::StrokeKind::Middle);
            }
        }
        Geometry::Circle { cx, cy, r } => {
            let center = at + egui::vec2(*cx as f32, *cy as f32);
            if let Some(fill) = fill_color(paint, opacity) {
                painter.circle_filled(center, *r as f32, fill);
            }
            if let Some(stroke) = stroke(paint, opacity) {
                painter.circle_stroke(center, *r as f32, stroke);
            }
        }
        Geometry::Line { x1, y1, x2, y2 } => {
            if let Some(stroke) = stroke(paint, opacity) {
                painter.line_segment(
                    [
                        at + egui::vec2(*x1 as f32, *y1 as f32),
                        at + egui::vec2(*x2 as f32, *y2 as f32),
                    ],
                    stroke,
                );
            }
        }
        Geometry::Text(block) => {
            let color = fill_color(paint, opacity).unwrap_or(color32(Color::BLACK, opacity));
            paint_text(painter, block, at, color);
        }
    }

    for child in node.children() {
        paint_node(painter, child, at, opacity);
    }
}

// ------------------------------------------------------------------
// App
// ------------------------------------------------------------------

impl UpsetViewer {
    fn open(&mut self, path: &Path) {
        match input::load_input(path) {
            Ok(input) => self.state.dispatch(Action::Render {
                data: input.data,
                options: input.options,
            }),
            Err(e) => self.state.store.error_message = Some(e.to_string()),
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open").clicked() {
                        ui.close();
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .pick_file()
                        {
                            self.open(&path);
                        }
                    }

                    if ui.button("Export SVG").clicked() {
                        ui.close();
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("SVG", &["svg"])
                            .set_file_name(DEFAULT_EXPORT_NAME)
                            .save_file()
                        {
                            self.state.dispatch(Action::ExportSvg { path });
                        }
                    }
                });
            });
        });
    }

    /// Turn this frame's pointer activity on the canvas into actions.
    fn forward_input(&mut self, response: &egui::Response) {
        let local = |pos: egui::Pos2| {
            let v = pos - response.rect.min;
            (v.x as f64, v.y as f64)
        };

        if let Some(pos) = response.hover_pos() {
            let (x, y) = local(pos);
            self.pointer_inside = true;
            self.state.dispatch(Action::PointerMoved { x, y });
        } else if self.pointer_inside {
            self.pointer_inside = false;
            self.state.dispatch(Action::PointerLeft);
        }

        if response.drag_started() {
            // the drag registers a few points after the press
            let origin = response
                .ctx
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(pos) = origin {
                let (x, y) = local(pos);
                self.state.dispatch(Action::DragStarted { x, y });
            }
        }
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = local(pos);
            if response.dragged() {
                self.state.dispatch(Action::Dragged { x });
            }
            if response.clicked() {
                self.state.dispatch(Action::PointerClicked { x, y });
            }
        }
        if response.drag_stopped() {
            self.state.dispatch(Action::DragEnded);
        }
    }
}

impl eframe::App for UpsetViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.menu_bar(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                let size = ui.available_size();
                let (response, painter) =
                    ui.allocate_painter(size, egui::Sense::click_and_drag());

                if size != self.canvas_size {
                    self.canvas_size = size;
                    self.state.dispatch(Action::Resize {
                        width: size.x as f64,
                        height: size.y as f64,
                    });
                }
                self.forward_input(&response);

                self.state.flush_actions();
                self.state.flush_effects();

                paint_node(&painter, self.state.store.surface.root(), response.rect.min, 1.0);
            });

        // Display error dialog if there's an error message
        if let Some(error) = self.state.store.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.dispatch(Action::ClearErrorMessage);
                    }
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_scales_alpha() {
        assert_eq!(color32(Color::rgb(10, 20, 30), 0.5).a(), 128);
        assert_eq!(color32(Color::WHITE, 0.0).a(), 0);
        assert_eq!(color32(Color::rgba(0, 0, 0, 128), 1.0).a(), 128);
    }

    #[test]
    fn transparent_fill_is_skipped() {
        let paint = Paint::fill(Color::BLACK).with_fill_opacity(0.0);
        assert!(fill_color(&paint, 1.0).is_none());
        assert!(stroke(&Paint::stroke(Color::BLACK, 0.0), 1.0).is_none());
        assert!(stroke(&Paint::stroke(Color::BLACK, 1.5), 1.0).is_some());
    }
}
