use super::RenderContext;
use super::axis::{AxisStyle, draw_linear_axis};
use crate::scene::{Anchor, Geometry, IdGen, Node, Paint};

/// Vertical bar per code above the matrix, colored like the code.
pub fn draw_marginal_bars(g: &mut Node, ids: &mut IdGen, ctx: &RenderContext) {
    let marginal_y = &ctx.scales.marginal_y;
    let code_x = &ctx.scales.code_x;

    g.sync_keyed(
        ids,
        "code_marginal_bar",
        ctx.marginals,
        |m| m.code.clone(),
        |bar, _, marginal, _| {
            let y = marginal_y.map(marginal.count as f64);
            bar.geometry = Geometry::rect(
                code_x.position(&marginal.code).unwrap_or(0.0),
                y,
                ctx.scales.column_width,
                ctx.sizes.marginal_h - y,
            );
            bar.paint = Paint::fill(ctx.code_color(&marginal.code));
        },
    );

    let axis = g.ensure_group(ids, "code_marginal_bars_axis");
    draw_linear_axis(
        axis,
        ids,
        marginal_y,
        &AxisStyle::left().without_zero().labels(-4.0, -5.0, Anchor::End),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::render::fixtures::Fixture;

    #[test]
    fn bars_rise_from_matrix_top() {
        let f = Fixture::standard();
        let mut ids = IdGen::default();
        let mut g = Node::group(&mut ids, "code_marginal_bars");
        draw_marginal_bars(&mut g, &mut ids, &f.ctx());

        let bar = g.keyed_child("code_marginal_bar", "A").unwrap();
        let Geometry::Rect { x, y, height, .. } = bar.geometry else {
            panic!("expected a rect");
        };
        assert_eq!(Some(x), f.scales.code_x.position("A"));
        // tallest code fills the marginal band
        assert!(y.abs() < 1e-9);
        assert!((height - f.sizes.marginal_h).abs() < 1e-9);
    }

    #[test]
    fn colors_follow_code_assignment() {
        let mut f = Fixture::standard();
        f.code_colors.insert("B".into(), Color::rgb(1, 2, 3));
        let mut ids = IdGen::default();
        let mut g = Node::group(&mut ids, "code_marginal_bars");
        draw_marginal_bars(&mut g, &mut ids, &f.ctx());

        let b = g.keyed_child("code_marginal_bar", "B").unwrap();
        assert_eq!(b.paint.fill, Some(Color::rgb(1, 2, 3)));
        let c = g.keyed_child("code_marginal_bar", "C").unwrap();
        assert_eq!(c.paint.fill, Some(f.palette.code_missing));
    }

    #[test]
    fn axis_skips_zero() {
        let f = Fixture::standard();
        let mut ids = IdGen::default();
        let mut g = Node::group(&mut ids, "code_marginal_bars");
        draw_marginal_bars(&mut g, &mut ids, &f.ctx());
        let axis = g.child("code_marginal_bars_axis").unwrap();
        assert!(axis.keyed_child("tick", "0").is_none());
        assert!(axis.keyed_child("tick", "100").is_some());
    }
}
