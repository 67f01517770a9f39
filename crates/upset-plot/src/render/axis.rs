use upset_scales::format::format_tick;
use upset_scales::{BandScale, LinearScale};

use crate::color::Color;
use crate::scene::{Anchor, Geometry, IdGen, Node, Paint, TextBlock};

pub const TICK_SIZE: f64 = 6.0;
pub const TICK_PADDING: f64 = 3.0;
pub const AXIS_FONT_SIZE: f64 = 10.0;
/// Tick count requested from the linear axes.
pub const AXIS_TICKS: usize = 5;

const AXIS_COLOR: Color = Color::BLACK;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStyle {
    pub orient: Orient,
    pub ticks: usize,
    pub anchor: Anchor,
    /// Label position relative to its tick.
    pub label_at: (f64, f64),
    pub drop_zero: bool,
    /// Tick value whose line is extended across the plot, and by how much.
    pub guide: Option<(f64, f64)>,
}

impl AxisStyle {
    pub fn bottom() -> Self {
        Self {
            orient: Orient::Bottom,
            ticks: AXIS_TICKS,
            anchor: Anchor::Middle,
            label_at: (0.0, TICK_SIZE + TICK_PADDING),
            drop_zero: false,
            guide: None,
        }
    }

    pub fn left() -> Self {
        Self {
            orient: Orient::Left,
            ticks: AXIS_TICKS,
            anchor: Anchor::End,
            label_at: (-(TICK_SIZE + TICK_PADDING), 0.0),
            drop_zero: false,
            guide: None,
        }
    }

    pub fn labels(mut self, x: f64, y: f64, anchor: Anchor) -> Self {
        self.label_at = (x, y);
        self.anchor = anchor;
        self
    }

    pub fn without_zero(mut self) -> Self {
        self.drop_zero = true;
        self
    }

    pub fn with_guide(mut self, value: f64, length: f64) -> Self {
        self.guide = Some((value, length));
        self
    }
}

/// Baseline shift so labels hang below (bottom) or center on (left) their
/// anchor point.
fn baseline_shift(orient: Orient) -> f64 {
    match orient {
        Orient::Bottom => 0.71 * AXIS_FONT_SIZE,
        Orient::Left => 0.32 * AXIS_FONT_SIZE,
    }
}

/// Draw a linear axis into `g`, ticks keyed by their label.
pub fn draw_linear_axis(
    g: &mut Node,
    ids: &mut IdGen,
    scale: &LinearScale,
    style: &AxisStyle,
) {
    let (r0, r1) = scale.range();
    let domain = match style.orient {
        Orient::Bottom => Geometry::line(r0, 0.0, r1, 0.0),
        Orient::Left => Geometry::line(0.0, r0, 0.0, r1),
    };
    g.ensure_child(ids, "domain", domain).paint =
        Paint::stroke(AXIS_COLOR, 1.0);

    let step = scale.tick_step(style.ticks);
    let ticks: Vec<f64> = scale
        .ticks(style.ticks)
        .into_iter()
        .filter(|v| !(style.drop_zero && *v == 0.0))
        .collect();

    g.sync_keyed(
        ids,
        "tick",
        &ticks,
        |v| format_tick(*v, step),
        |tick, ids, v, _| {
            let pos = scale.map(*v);
            let is_guide = style
                .guide
                .is_some_and(|(value, _)| (value - *v).abs() < 1e-9);
            let line = match style.orient {
                Orient::Bottom => {
                    tick.translate = (pos, 0.0);
                    let top = match style.guide {
                        Some((_, length)) if is_guide => -length,
                        _ => 0.0,
                    };
                    Geometry::line(0.0, top, 0.0, TICK_SIZE)
                }
                Orient::Left => {
                    tick.translate = (0.0, pos);
                    Geometry::line(0.0, 0.0, -TICK_SIZE, 0.0)
                }
            };
            tick.ensure_child(ids, "tick_line", line).paint =
                Paint::stroke(AXIS_COLOR, 1.0);

            let (x, y) = style.label_at;
            let label = TextBlock::single(format_tick(*v, step))
                .at(x, y + baseline_shift(style.orient))
                .anchored(style.anchor)
                .sized(AXIS_FONT_SIZE);
            tick.ensure_child(ids, "tick_label", Geometry::Text(label))
                .paint = Paint::fill(AXIS_COLOR);
        },
    );
}

/// Label placement for band axes: position, font size and rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandLabels {
    pub at: (f64, f64),
    pub font_size: f64,
    pub rotate: f64,
    pub anchor: Anchor,
}

/// Draw a bottom axis with one tick per band, at the band center. No
/// domain line.
pub fn draw_band_axis(
    g: &mut Node,
    ids: &mut IdGen,
    scale: &BandScale,
    labels: &BandLabels,
) {
    g.sync_keyed(
        ids,
        "tick",
        scale.keys(),
        |k| k.clone(),
        |tick, ids, key, _| {
            let center = scale.center(key).unwrap_or(0.0);
            tick.translate = (center, 0.0);
            tick.ensure_child(
                ids,
                "tick_line",
                Geometry::line(0.0, 0.0, 0.0, TICK_SIZE),
            )
            .paint = Paint::stroke(AXIS_COLOR, 1.0);

            let (x, y) = labels.at;
            let label = TextBlock::single(key.clone())
                .at(x, y + 0.71 * labels.font_size)
                .anchored(labels.anchor)
                .sized(labels.font_size)
                .rotated(labels.rotate);
            tick.ensure_child(ids, "tick_label", Geometry::Text(label))
                .paint = Paint::fill(AXIS_COLOR);
        },
    );
}
