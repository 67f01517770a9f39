use super::RenderContext;
use super::axis::{AxisStyle, draw_linear_axis};
use crate::color::Color;
use crate::scene::{Anchor, Geometry, IdGen, Node, Paint, TextBlock, TextLine};

pub const TITLE: &str = "Pattern frequency";
pub const SUBTITLE: &str = "(drag handle to change threshold)";
const SUBTITLE_FONT_SIZE: f64 = 13.0;
const SUBTITLE_DY: f64 = 15.0;

/// Horizontal bars growing leftwards from the matrix, one per pattern.
pub fn draw_count_bars(g: &mut Node, ids: &mut IdGen, ctx: &RenderContext) {
    let count_x = &ctx.scales.count_x;
    let bar_h = ctx.scales.count_bar_height;

    g.sync_keyed(
        ids,
        "pattern_count_bar",
        ctx.patterns,
        |p| p.pattern.clone(),
        |bar, _, pattern, i| {
            let x = count_x.map(pattern.count as f64);
            bar.geometry = Geometry::rect(
                x,
                ctx.row_center(i) - bar_h / 2.0,
                count_x.map(0.0) - x,
                bar_h,
            );
            bar.paint = Paint::fill(ctx.palette.pattern_count_bars);
        },
    );

    let axis = g.ensure_group(ids, "axis");
    axis.translate = (0.0, ctx.sizes.matrix_h);
    draw_linear_axis(
        axis,
        ids,
        count_x,
        &AxisStyle::bottom().labels(-2.0, 4.0, Anchor::End),
    );

    let title = TextBlock::new(vec![
        TextLine::new(TITLE),
        TextLine::below(SUBTITLE, SUBTITLE_DY).sized(SUBTITLE_FONT_SIZE),
    ])
    .at(ctx.sizes.count_bars_w / 2.0, ctx.title_y())
    .anchored(Anchor::Middle);
    g.ensure_child(ids, "title", Geometry::Text(title)).paint =
        Paint::fill(Color::BLACK);
}
