use upset_scales::Pattern;

use super::RenderContext;
use super::axis::{BandLabels, draw_band_axis};
use crate::scene::{Anchor, Geometry, IdGen, Node, Paint};

const ABSENT_DOT_OPACITY: f64 = 0.5;

const CODE_LABELS: BandLabels = BandLabels {
    at: (-7.0, -1.0),
    font_size: 12.0,
    rotate: -75.0,
    anchor: Anchor::End,
};

/// Horizontal extent covered by a pattern's codes, as band centers.
pub fn pattern_extent(pattern: &Pattern, ctx: &RenderContext) -> Option<(f64, f64)> {
    pattern
        .codes()
        .filter_map(|code| ctx.scales.code_x.center(code))
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((f64::min(lo, x), f64::max(hi, x))),
        })
}

/// One row per pattern: a dim dot for every code, a connector across the
/// pattern's codes and a colored dot for each code it contains.
pub fn draw_pattern_matrix(g: &mut Node, ids: &mut IdGen, ctx: &RenderContext) {
    let dot = ctx.scales.dot_size;
    let codes: Vec<&str> =
        ctx.marginals.iter().map(|m| m.code.as_str()).collect();

    g.sync_keyed(
        ids,
        "matrix_row",
        ctx.patterns,
        |p| p.pattern.clone(),
        |row, ids, pattern, i| {
            row.translate = (0.0, ctx.row_center(i));

            row.sync_keyed(
                ids,
                "background_dot",
                &codes,
                |c| c.to_string(),
                |node, _, code, _| {
                    node.geometry = Geometry::Circle {
                        cx: ctx.scales.code_x.center(code).unwrap_or(0.0),
                        cy: 0.0,
                        r: dot,
                    };
                    node.paint = Paint::fill(ctx.palette.code_missing)
                        .with_fill_opacity(ABSENT_DOT_OPACITY);
                },
            );

            let (x1, x2) = pattern_extent(pattern, ctx).unwrap_or((0.0, 0.0));
            row.ensure_child(
                ids,
                "pattern_extent",
                Geometry::line(x1, 0.0, x2, 0.0),
            )
            .paint = Paint::stroke(ctx.palette.pattern_bar, dot / 2.0);

            let present: Vec<&str> = pattern.codes().collect();
            row.sync_keyed(
                ids,
                "present_code",
                &present,
                |c| c.to_string(),
                |node, _, code, _| {
                    node.geometry = Geometry::Circle {
                        cx: ctx.scales.code_x.center(code).unwrap_or(0.0),
                        cy: 0.0,
                        r: dot,
                    };
                    node.paint = Paint::fill(ctx.code_color(code));
                },
            );
        },
    );

    let axis = g.ensure_group(ids, "matrix_axis");
    axis.translate = (0.0, ctx.sizes.matrix_h);
    draw_band_axis(axis, ids, &ctx.scales.code_x, &CODE_LABELS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures::Fixture;

    #[test]
    fn rows_follow_pattern_order() {
        let f = Fixture::standard();
        let mut ids = IdGen::default();
        let mut g = Node::group(&mut ids, "matrix_chart");
        draw_pattern_matrix(&mut g, &mut ids, &f.ctx());

        let keys: Vec<&str> = g
            .keyed("matrix_row")
            .map(|r| r.key.as_deref().unwrap())
            .collect();
        assert_eq!(keys, vec!["A-C", "B", "A-B-C"]);

        let row = g.keyed_child("matrix_row", "B").unwrap();
        assert!((row.translate.1 - f.ctx().row_center(1)).abs() < 1e-9);
        assert_eq!(row.keyed("background_dot").count(), 3);
        assert_eq!(row.keyed("present_code").count(), 1);
    }

    #[test]
    fn connector_spans_outer_codes() {
        let f = Fixture::standard();
        let ctx = f.ctx();
        let mut ids = IdGen::default();
        let mut g = Node::group(&mut ids, "matrix_chart");
        draw_pattern_matrix(&mut g, &mut ids, &ctx);

        let row = g.keyed_child("matrix_row", "A-C").unwrap();
        let a = f.scales.code_x.center("A").unwrap();
        let c = f.scales.code_x.center("C").unwrap();
        assert_eq!(
            row.child("pattern_extent").unwrap().geometry,
            Geometry::line(a, 0.0, c, 0.0)
        );
    }

    #[test]
    fn redraw_after_reorder_keeps_rows() {
        let mut f = Fixture::standard();
        let mut ids = IdGen::default();
        let mut g = Node::group(&mut ids, "matrix_chart");
        draw_pattern_matrix(&mut g, &mut ids, &f.ctx());
        let before = g.keyed_child("matrix_row", "B").unwrap().id();

        f.patterns.reverse();
        draw_pattern_matrix(&mut g, &mut ids, &f.ctx());
        assert_eq!(g.keyed_child("matrix_row", "B").unwrap().id(), before);
        assert_eq!(g.keyed("matrix_row").count(), 3);
    }

    #[test]
    fn axis_sits_under_matrix() {
        let f = Fixture::standard();
        let mut ids = IdGen::default();
        let mut g = Node::group(&mut ids, "matrix_chart");
        draw_pattern_matrix(&mut g, &mut ids, &f.ctx());
        let axis = g.child("matrix_axis").unwrap();
        assert_eq!(axis.translate, (0.0, f.sizes.matrix_h));
        assert_eq!(axis.keyed("tick").count(), 3);
    }
}
