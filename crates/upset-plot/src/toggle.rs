//! Switch that hides patterns made of a single code.

use crate::color::Color;
use crate::scene::{Anchor, Bounds, Geometry, IdGen, Node, Paint, TextBlock};

pub const LABEL: &str = "Hide single code patterns";
const BUTTON_WIDTH: f64 = 11.0;
const BUTTON_HEIGHT: f64 = BUTTON_WIDTH * 1.75;
const RADIUS: f64 = 5.0;
const LABEL_X: f64 = 27.0;
const LABEL_FONT_SIZE: f64 = 14.4;

fn background(filtering: bool) -> Color {
    if filtering {
        Color::FOREST_GREEN
    } else {
        Color::ORANGE_RED
    }
}

/// Clickable area of the switch itself, relative to its group.
pub fn toggle_bounds() -> Bounds {
    Bounds::new(0.0, 0.0, BUTTON_WIDTH * 2.0, BUTTON_HEIGHT)
}

pub fn draw_toggle(g: &mut Node, ids: &mut IdGen, filtering: bool) {
    g.ensure_child(
        ids,
        "toggle_background",
        Geometry::rounded_rect(BUTTON_WIDTH * 2.0, BUTTON_HEIGHT, RADIUS),
    )
    .paint = Paint::fill(background(filtering));

    let handle = g.ensure_group(ids, "toggle_handle");
    handle.translate = (if filtering { BUTTON_WIDTH } else { 0.0 }, 0.0);
    handle
        .ensure_child(
            ids,
            "handle_rect",
            Geometry::rounded_rect(BUTTON_WIDTH, BUTTON_HEIGHT, RADIUS),
        )
        .paint = Paint::fill(Color::DIM_GREY);
    handle
        .ensure_child(
            ids,
            "handle_grip",
            Geometry::line(
                BUTTON_WIDTH / 2.0,
                BUTTON_HEIGHT - 5.0,
                BUTTON_WIDTH / 2.0,
                5.0,
            ),
        )
        .paint = Paint::stroke(Color::WHITE, 1.0).with_opacity(0.3);

    let label = TextBlock::single(LABEL)
        .at(LABEL_X, BUTTON_HEIGHT / 2.0)
        .sized(LABEL_FONT_SIZE)
        .anchored(Anchor::Start)
        .centered_vertically();
    g.ensure_child(ids, "toggle_label", Geometry::Text(label)).paint =
        Paint::fill(Color::BLACK);
}
