//! The full draw pass and the partial redraws triggered by pointer input.

use upset_scales::{Margins, compute_scales, compute_sizes, count_scale, has_risk_data};

use crate::cache::Cache;
use crate::color::Color;
use crate::effects::{self, Effect};
use crate::highlight::{self, HighlightChange};
use crate::info_panel::{self, Side};
use crate::interaction::{self, HitItem, HitTarget, INTERACTION_BOX};
use crate::render::count_bars::draw_count_bars;
use crate::render::marginal_bars::draw_marginal_bars;
use crate::render::matrix::draw_pattern_matrix;
use crate::render::risk::draw_risk_intervals;
use crate::render::{
    CODE_MARGINAL_BARS, MATRIX_CHART, PATTERN_SIZE_BARS, RR_INTERVALS, RenderContext,
};
use crate::scene::{Anchor, Geometry, Node, Paint, TextBlock, TextLine};
use crate::slider::Slider;
use crate::store::Store;
use crate::toggle::draw_toggle;

pub const PADDING: &str = "padding";
pub const SLIDER: &str = "set_size_slider";
pub const TOGGLE: &str = "singleton_filter_button";
pub const LEFT_INFO_PANEL: &str = "left_info_panel";
pub const RIGHT_INFO_PANEL: &str = "right_info_panel";
pub const CODE_LAYER: &str = "code_interaction_layer";
pub const PATTERN_LAYER: &str = "pattern_interaction_layer";
/// Shown instead of the chart when the data holds fewer than two patterns.
pub const DATA_WARNING: &str = "data_warning_message";
/// Shown over the chart when the threshold filters out every pattern.
pub const THRESHOLD_WARNING: &str = "threshold_warning_message";

pub const ADJUST_HINT: &str = "Adjust threshold down to see groups.";
const WARNING_FONT_SIZE: f64 = 16.0;
const TOGGLE_INSET: f64 = 3.0;

/// Groups that only make sense with at least one pattern on screen.
const DATA_GROUPS: [&str; 8] = [
    MATRIX_CHART,
    PATTERN_SIZE_BARS,
    RR_INTERVALS,
    CODE_MARGINAL_BARS,
    LEFT_INFO_PANEL,
    RIGHT_INFO_PANEL,
    CODE_LAYER,
    PATTERN_LAYER,
];

fn warning_text(lead: &str, width: f64, height: f64) -> TextBlock {
    TextBlock::new(vec![
        TextLine::new(format!("{lead} filter size threshold")),
        TextLine::below(ADJUST_HINT, WARNING_FONT_SIZE),
    ])
    .at(width / 2.0, height / 2.0)
    .sized(WARNING_FONT_SIZE)
    .anchored(Anchor::Middle)
}

/// Toggle position inside the chart body: the top left corner of the
/// surface, just inside the edge.
fn toggle_offset(margins: &Margins) -> (f64, f64) {
    (-margins.left + TOGGLE_INSET, -margins.top + TOGGLE_INSET)
}

/// Absolute position of the singleton toggle.
pub fn toggle_origin(store: &Store) -> (f64, f64) {
    let (bx, by) = store.body_origin();
    let (tx, ty) = toggle_offset(&store.margins);
    (bx + tx, by + ty)
}

/// Redraw everything from the store: filter, scale, draw each component,
/// rebuild the hit regions and restore the highlight.
pub fn draw_upset(store: &mut Store, cache: &mut Cache) -> Vec<Effect> {
    store.needs_render = false;
    let (width, height) = store.viewport;
    let patterns = &store.dataset.get().patterns;
    let total = patterns.len();
    let risk = has_risk_data(patterns);
    let sizes = compute_sizes(width, height, store.margins, risk);
    let count_x = count_scale(patterns, &sizes);
    let palette = store.palette;
    let body_origin = store.body_origin();
    let margins = store.margins;

    if total < 2 {
        let (root, ids) = store.surface.parts_mut();
        root.remove_child(PADDING);
        root.remove_child(THRESHOLD_WARNING);
        let lead = if total == 1 {
            "Only one group meets"
        } else {
            "No groups meet"
        };
        root.ensure_child(
            ids,
            DATA_WARNING,
            Geometry::Text(warning_text(lead, width, height)),
        )
        .paint = Paint::fill(Color::BLACK);
        store.interaction.clear();
        store.slider = None;
        log::debug!("{total} pattern(s) in the data, chart skipped");
        return sync_highlight(store);
    }

    let filtered = cache.filtered.get(store);
    let code_colors = cache.code_colors.get(store);
    log::debug!(
        "render {width}x{height}: threshold {}, {} of {total} patterns, {} codes",
        store.view.current_min_size,
        filtered.patterns.len(),
        filtered.marginals.len()
    );

    let (root, ids) = store.surface.parts_mut();
    root.remove_child(DATA_WARNING);

    let g = root.ensure_group(ids, PADDING);
    g.translate = body_origin;

    let slider = Slider::new(
        count_x,
        store.view.current_min_size,
        (body_origin.0, body_origin.1 + sizes.h),
    );
    let slider_group = g.ensure_group(ids, SLIDER);
    slider_group.translate = (0.0, sizes.h);
    slider.draw(slider_group, ids, palette.slider_handle);
    store.slider = Some(slider);

    let toggle_group = g.ensure_group(ids, TOGGLE);
    toggle_group.translate = toggle_offset(&margins);
    draw_toggle(toggle_group, ids, store.view.filtering_singletons);

    if filtered.is_empty() {
        for class in DATA_GROUPS {
            g.remove_child(class);
        }
        store.interaction.clear();

        let warning = root.ensure_group(ids, THRESHOLD_WARNING);
        warning
            .ensure_child(ids, "background", Geometry::rect(0.0, 0.0, width, height / 2.0))
            .paint = Paint::fill(Color::WHITE);
        warning
            .ensure_child(
                ids,
                "message",
                Geometry::Text(warning_text("No groups meet", width, height)),
            )
            .paint = Paint::fill(Color::BLACK);
        return sync_highlight(store);
    }

    let scales = compute_scales(&filtered.patterns, &filtered.marginals, &sizes, count_x);
    let ctx = RenderContext {
        patterns: &filtered.patterns,
        marginals: &filtered.marginals,
        scales: &scales,
        sizes: &sizes,
        palette: &palette,
        code_colors,
    };

    let matrix = g.ensure_group(ids, MATRIX_CHART);
    matrix.translate = (sizes.count_bars_w, sizes.marginal_h);
    draw_pattern_matrix(matrix, ids, &ctx);

    let count_bars = g.ensure_group(ids, PATTERN_SIZE_BARS);
    count_bars.translate = (0.0, sizes.marginal_h);
    draw_count_bars(count_bars, ids, &ctx);

    if risk {
        let rr = g.ensure_group(ids, RR_INTERVALS);
        rr.translate = (sizes.risk_x(), sizes.marginal_h);
        draw_risk_intervals(rr, ids, &ctx);
    } else {
        g.remove_child(RR_INTERVALS);
    }

    let marginal_bars = g.ensure_group(ids, CODE_MARGINAL_BARS);
    marginal_bars.translate = (sizes.count_bars_w, 0.0);
    draw_marginal_bars(marginal_bars, ids, &ctx);

    let panel_size = (sizes.count_bars_w, sizes.marginal_h - 2.0 * sizes.padding);
    let left = g.ensure_group(ids, LEFT_INFO_PANEL);
    info_panel::draw_panel(left, ids, panel_size, Side::Left);
    let right = g.ensure_group(ids, RIGHT_INFO_PANEL);
    right.translate = (sizes.risk_x(), 0.0);
    info_panel::draw_panel(right, ids, panel_size, Side::Right);

    let border = palette.interaction_box_border;
    let code_at = (sizes.count_bars_w, 0.0);
    let code_layer = g.ensure_group(ids, CODE_LAYER);
    code_layer.translate = code_at;
    let mut regions = interaction::code_layer(
        code_layer,
        ids,
        &filtered.marginals,
        &scales,
        &sizes,
        border,
        (body_origin.0 + code_at.0, body_origin.1 + code_at.1),
    );

    let pattern_at = (0.0, sizes.marginal_h);
    let pattern_layer = g.ensure_group(ids, PATTERN_LAYER);
    pattern_layer.translate = pattern_at;
    regions.extend(interaction::pattern_layer(
        pattern_layer,
        ids,
        &filtered.patterns,
        &scales,
        &sizes,
        border,
        (body_origin.0 + pattern_at.0, body_origin.1 + pattern_at.1),
    ));
    store.interaction.set_regions(regions);

    root.remove_child(THRESHOLD_WARNING);
    sync_highlight(store)
}

/// Restore the highlight styling after a redraw, clearing it when its item
/// is gone.
fn sync_highlight(store: &mut Store) -> Vec<Effect> {
    let border = store.palette.interaction_box_border;
    let (root, _) = store.surface.parts_mut();
    let change = store
        .view
        .highlight
        .reapply(|id| root.find_by_dom_id(id).is_some());
    highlight::apply_styles(root, &store.view.highlight, border);
    match change {
        HighlightChange::Cleared => {
            vec![effects::notify_highlight(store.channel(), Vec::new())]
        }
        _ => vec![],
    }
}

pub fn redraw_slider(store: &mut Store) {
    let Some(slider) = store.slider.as_ref() else {
        return;
    };
    let fill = store.palette.slider_handle;
    let (root, ids) = store.surface.parts_mut();
    if let Some(g) = root.descendant_mut(&[PADDING, SLIDER]) {
        slider.draw(g, ids, fill);
    }
}

fn set_region_hover(root: &mut Node, id: &str, hovered: bool) {
    if let Some(rect) = root
        .find_by_dom_id_mut(id)
        .and_then(|holder| holder.child_mut(INTERACTION_BOX))
    {
        interaction::set_hovered(&mut rect.paint, hovered);
    }
}

/// Outline the hovered region and fill both info panels.
pub fn show_hover(store: &mut Store, target: &HitTarget) {
    let (left, right) = match &target.item {
        HitItem::Pattern(p) => info_panel::pattern_contents(p),
        HitItem::Code(m) => info_panel::code_contents(m),
    };
    let (root, _) = store.surface.parts_mut();
    set_region_hover(root, &target.id, true);
    if let Some(g) = root.child_mut(PADDING) {
        if let Some(panel) = g.child_mut(LEFT_INFO_PANEL) {
            info_panel::show(panel, left);
        }
        if let Some(panel) = g.child_mut(RIGHT_INFO_PANEL) {
            info_panel::show(panel, right);
        }
    }
}

pub fn hide_hover(store: &mut Store, target: &HitTarget) {
    let (root, _) = store.surface.parts_mut();
    set_region_hover(root, &target.id, false);
    if let Some(g) = root.child_mut(PADDING) {
        for class in [LEFT_INFO_PANEL, RIGHT_INFO_PANEL] {
            if let Some(panel) = g.child_mut(class) {
                info_panel::hide(panel);
            }
        }
    }
}
