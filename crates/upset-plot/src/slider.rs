//! Draggable threshold handle under the count bars.

use upset_scales::LinearScale;
use upset_scales::format::format_count;

use crate::color::Color;
use crate::scene::{Anchor, Bounds, Geometry, IdGen, Node, Paint, TextBlock};

pub const HANDLE_WIDTH: f64 = 20.0;
pub const HANDLE_HEIGHT: f64 = 17.0;
/// Gap between the axis line and the top of the handle.
pub const PADDING_TOP: f64 = 15.0;
const HANDLE_RADIUS: f64 = 7.0;
const HANDLE_FILL_OPACITY: f64 = 0.6;

const IDLE_STROKE: Color = Color::rgba(0, 0, 0, 128);
const ACTIVE_STROKE: Color = Color::BLACK;

/// Drag state of the threshold handle.
///
/// Positions are in the slider's own coordinates, where the count scale
/// maps directly to x.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    scale: LinearScale,
    candidate: f64,
    handle_x: f64,
    dragging: bool,
    /// Absolute position of the slider group.
    pub origin: (f64, f64),
}

impl Slider {
    pub fn new(scale: LinearScale, min_size: f64, origin: (f64, f64)) -> Self {
        Self {
            handle_x: scale.map(min_size),
            scale,
            candidate: min_size,
            dragging: false,
            origin,
        }
    }

    pub fn candidate(&self) -> f64 {
        self.candidate
    }

    pub fn handle_x(&self) -> f64 {
        self.handle_x
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Absolute bounds of the handle, for grabbing.
    pub fn handle_bounds(&self) -> Bounds {
        Bounds::new(
            self.origin.0 + self.handle_x - HANDLE_WIDTH / 2.0,
            self.origin.1 + PADDING_TOP,
            HANDLE_WIDTH,
            HANDLE_HEIGHT,
        )
    }

    pub fn grab(&mut self) {
        self.dragging = true;
    }

    /// Follow the pointer at local `x`. Inside the scale domain the handle
    /// moves; past either end it stays put and the candidate sticks to that
    /// end.
    pub fn drag_to(&mut self, x: f64) {
        if !self.dragging {
            return;
        }
        let (d0, d1) = self.scale.domain();
        let (lo, hi) = (d0.min(d1), d0.max(d1));
        let desired = self.scale.invert(x);
        if desired > lo && desired < hi {
            self.handle_x = x;
            self.candidate = desired;
        } else {
            self.candidate = if desired <= lo { lo } else { hi };
        }
    }

    /// End the drag and return the threshold to commit.
    pub fn release(&mut self) -> Option<f64> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        Some(self.candidate)
    }

    pub fn readout(&self) -> String {
        format!("size > {}", format_count(self.candidate))
    }

    /// Draw the handle into the slider group `g`.
    pub fn draw(&self, g: &mut Node, ids: &mut IdGen, fill: Color) {
        let (stroke, width) = if self.dragging {
            (ACTIVE_STROKE, 2.0)
        } else {
            (IDLE_STROKE, 1.0)
        };

        let handle = g.ensure_group(ids, "handle");
        handle.translate = (self.handle_x - HANDLE_WIDTH / 2.0, PADDING_TOP);

        handle
            .ensure_child(
                ids,
                "handle_rect",
                Geometry::rounded_rect(HANDLE_WIDTH, HANDLE_HEIGHT, HANDLE_RADIUS),
            )
            .paint = Paint::fill(fill)
            .with_fill_opacity(HANDLE_FILL_OPACITY)
            .with_stroke(stroke, width);

        handle
            .ensure_child(
                ids,
                "handle_pointer",
                Geometry::line(HANDLE_WIDTH / 2.0, -PADDING_TOP, HANDLE_WIDTH / 2.0, 0.0),
            )
            .paint = Paint::stroke(stroke, width);

        let text = TextBlock::single(self.readout())
            .at(-2.0, HANDLE_HEIGHT / 2.0 + 2.0)
            .anchored(Anchor::End)
            .centered_vertically();
        handle.ensure_child(ids, "handle_text", Geometry::Text(text)).paint =
            Paint::fill(Color::BLACK).with_opacity(if self.dragging { 1.0 } else { 0.0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> Slider {
        // counts 0..1000 drawn right to left over 200px
        Slider::new(LinearScale::new((0.0, 1000.0), (200.0, 0.0)), 100.0, (50.0, 400.0))
    }

    #[test]
    fn starts_at_threshold() {
        let s = slider();
        assert!((s.handle_x() - 180.0).abs() < 1e-9);
        let b = s.handle_bounds();
        assert!(b.contains(50.0 + 180.0, 400.0 + PADDING_TOP + 1.0));
        assert!(!s.is_dragging());
    }

    #[test]
    fn drag_inside_domain_moves_handle() {
        let mut s = slider();
        s.grab();
        s.drag_to(100.0);
        assert!((s.candidate() - 500.0).abs() < 1e-9);
        assert_eq!(s.handle_x(), 100.0);
        assert_eq!(s.readout(), "size > 500");
        assert_eq!(s.release(), Some(500.0));
        assert!(!s.is_dragging());
    }

    #[test]
    fn drag_past_max_holds_at_max() {
        let mut s = slider();
        s.grab();
        s.drag_to(150.0);
        s.drag_to(-40.0);
        assert_eq!(s.handle_x(), 150.0);
        assert_eq!(s.release(), Some(1000.0));
    }

    #[test]
    fn drag_past_min_holds_at_min() {
        let mut s = slider();
        s.grab();
        s.drag_to(260.0);
        assert_eq!(s.candidate(), 0.0);
        assert!((s.handle_x() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn moves_ignored_without_grab() {
        let mut s = slider();
        s.drag_to(100.0);
        assert_eq!(s.candidate(), 100.0);
        assert_eq!(s.release(), None);
    }

    #[test]
    fn readout_visible_only_while_dragging() {
        let mut ids = IdGen::default();
        let mut g = Node::group(&mut ids, "set_size_slider");
        let mut s = slider();
        s.draw(&mut g, &mut ids, Color::BLACK);
        let text = g.descendant(&["handle", "handle_text"]).unwrap();
        assert!(text.is_hidden());

        s.grab();
        s.draw(&mut g, &mut ids, Color::BLACK);
        let handle = g.child("handle").unwrap();
        assert!(!handle.child("handle_text").unwrap().is_hidden());
        assert_eq!(handle.child("handle_pointer").unwrap().paint.stroke_width, 2.0);
        assert_eq!(handle.children().len(), 3);
    }
}
