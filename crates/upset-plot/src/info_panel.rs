//! Hover read-outs above the count bars and the risk band.

use upset_scales::format::{format_count, format_ratio};
use upset_scales::{MarginalCode, Pattern};

use crate::color::Color;
use crate::scene::{Anchor, Geometry, IdGen, Node, Paint, TextBlock, TextLine};

pub const LINE_HEIGHT: f64 = 22.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Text placement for a panel of the given width. Narrow panels hug their
/// outer edge so the text does not run into the axes.
pub fn panel_style(width: f64, side: Side) -> (f64, f64, Anchor) {
    let edge = match side {
        Side::Left => (0.0, Anchor::Start),
        Side::Right => (width, Anchor::End),
    };
    let centered = (width / 2.0, Anchor::Middle);
    let ((x, anchor), size) = if width > 300.0 {
        (centered, 24.0)
    } else if width > 200.0 {
        (centered, 22.0)
    } else if width > 150.0 {
        (centered, 20.0)
    } else if width > 100.0 {
        (edge, 18.0)
    } else {
        (edge, 15.0)
    };
    (x, size, anchor)
}

/// Draw or refresh the panel in `g`, hidden. The last text is kept.
pub fn draw_panel(g: &mut Node, ids: &mut IdGen, size: (f64, f64), side: Side) {
    let info = g.ensure_group(ids, "info");
    info.paint = Paint::default().with_opacity(0.0);

    info.ensure_child(ids, "background", Geometry::rect(0.0, 0.0, size.0, size.1))
        .paint = Paint::fill(Color::BLACK).with_fill_opacity(0.0);

    let (x, font_size, anchor) = panel_style(size.0, side);
    let lines = info
        .child("text")
        .and_then(Node::text)
        .map(|t| t.lines.clone())
        .unwrap_or_default();
    let text = TextBlock::new(lines)
        .at(x, size.1 / 2.0)
        .sized(font_size)
        .anchored(anchor)
        .centered_vertically();
    info.ensure_child(ids, "text", Geometry::Text(text)).paint =
        Paint::fill(Color::BLACK);
}

/// Replace the panel text and make it visible.
pub fn show(g: &mut Node, lines: Vec<TextLine>) {
    let Some(info) = g.child_mut("info") else {
        return;
    };
    info.paint.opacity = 1.0;
    if let Some(Geometry::Text(block)) =
        info.child_mut("text").map(|t| &mut t.geometry)
    {
        block.lines = lines;
    }
}

pub fn hide(g: &mut Node) {
    if let Some(info) = g.child_mut("info") {
        info.paint.opacity = 0.0;
    }
}

/// Left and right panel lines for a hovered pattern.
pub fn pattern_contents(pattern: &Pattern) -> (Vec<TextLine>, Vec<TextLine>) {
    let bound = |b: Option<f64>| b.map(format_ratio).unwrap_or_else(|| "NA".into());
    (
        vec![
            TextLine::new("Appears in"),
            TextLine::below(
                format!("{} subjects", format_count(pattern.count as f64)),
                LINE_HEIGHT,
            ),
        ],
        vec![
            TextLine::new(format!("RR: {}", format_ratio(pattern.point_est))),
            TextLine::below(
                format!("({}, {})", bound(pattern.lower), bound(pattern.upper)),
                LINE_HEIGHT,
            ),
        ],
    )
}

/// Left and right panel lines for a hovered code.
pub fn code_contents(marginal: &MarginalCode) -> (Vec<TextLine>, Vec<TextLine>) {
    (
        vec![TextLine::new(format!("Code: {}", marginal.code))],
        vec![
            TextLine::new("Appears"),
            TextLine::below(
                format!("{} times", format_count(marginal.count as f64)),
                LINE_HEIGHT,
            ),
        ],
    )
}
