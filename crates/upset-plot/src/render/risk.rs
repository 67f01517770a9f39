use upset_scales::Pattern;

use super::RenderContext;
use super::axis::{AxisStyle, draw_linear_axis};
use crate::color::Color;
use crate::scene::{Anchor, Geometry, IdGen, Node, Paint, TextBlock};

pub const TITLE: &str = "Relative risk";
const MAX_POINT_RADIUS: f64 = 7.0;
const NULL_FILL_OPACITY: f64 = 0.1;
const NULL_STROKE_WIDTH: f64 = 1.5;
const NULL_OPACITY: f64 = 0.5;

fn point_radius(ctx: &RenderContext) -> f64 {
    (ctx.scales.row_height / 2.0).min(MAX_POINT_RADIUS)
}

fn point_paint(pattern: &Pattern, ctx: &RenderContext) -> Paint {
    match pattern.interval() {
        Some(_) => Paint::fill(ctx.palette.rr_interval),
        None => Paint::fill(ctx.palette.null_rr_interval)
            .with_fill_opacity(NULL_FILL_OPACITY)
            .with_stroke(ctx.palette.null_rr_interval, NULL_STROKE_WIDTH)
            .with_opacity(NULL_OPACITY),
    }
}

/// Point estimate and confidence interval per pattern, with a guide at a
/// relative risk of one.
pub fn draw_risk_intervals(g: &mut Node, ids: &mut IdGen, ctx: &RenderContext) {
    let risk_x = &ctx.scales.risk_x;
    let radius = point_radius(ctx);

    let axis = g.ensure_group(ids, "rr_intervals_axis");
    axis.translate = (0.0, ctx.sizes.matrix_h);
    let mut style = AxisStyle::bottom().labels(2.0, 4.0, Anchor::Start);
    if risk_x.domain().1 >= 1.0 {
        style = style.with_guide(1.0, ctx.sizes.matrix_h);
    }
    draw_linear_axis(axis, ids, risk_x, &style);

    g.sync_keyed(
        ids,
        "rr_interval",
        ctx.patterns,
        |p| p.pattern.clone(),
        |group, ids, pattern, i| {
            group.translate = (0.0, ctx.row_center(i));

            match pattern.interval() {
                Some((lower, upper)) => {
                    group
                        .ensure_child(
                            ids,
                            "interval",
                            Geometry::line(
                                risk_x.map(lower),
                                0.0,
                                risk_x.map(upper),
                                0.0,
                            ),
                        )
                        .paint =
                        Paint::stroke(ctx.palette.rr_interval, (radius / 2.0).max(1.0));
                }
                None => {
                    group.remove_child("interval");
                }
            }

            let point = group.ensure_child(
                ids,
                "point_estimate",
                Geometry::Circle {
                    cx: risk_x.map(pattern.point_est),
                    cy: 0.0,
                    r: radius,
                },
            );
            point.paint = point_paint(pattern, ctx);
        },
    );

    let title = TextBlock::single(TITLE)
        .at(ctx.sizes.risk_w / 2.0, ctx.title_y())
        .anchored(Anchor::Middle);
    g.ensure_child(ids, "title", Geometry::Text(title)).paint =
        Paint::fill(Color::BLACK);
}
