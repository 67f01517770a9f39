use crate::layout::Sizes;
use crate::model::{MarginalCode, Pattern};
use crate::scale::{BandScale, LinearScale};

/// Inner and outer padding of the code columns, as a share of the step.
pub const CODE_BAND_PADDING: f64 = 0.05;
/// Count bars fill this share of their row.
pub const BAR_ROW_SHARE: f64 = 0.9;
/// Matrix dots fill this share of the smaller cell side.
pub const DOT_CELL_SHARE: f64 = 0.9;

/// Every scale needed for one render pass. Built fresh each time.
#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    /// Code columns across the matrix band.
    pub code_x: BandScale,
    /// Pattern counts, growing leftwards across the count bar band.
    pub count_x: LinearScale,
    /// Relative risk across the risk band.
    pub risk_x: LinearScale,
    /// Pattern index down the matrix band.
    pub pattern_y: LinearScale,
    /// Marginal code counts up the marginal band.
    pub marginal_y: LinearScale,
    pub row_height: f64,
    pub count_bar_height: f64,
    pub column_width: f64,
    /// Radius of a matrix dot.
    pub dot_size: f64,
}

/// Count scale for the left bars and the threshold slider. Built from the full
/// dataset so the slider range does not shrink as patterns are filtered out.
pub fn count_scale(patterns: &[Pattern], sizes: &Sizes) -> LinearScale {
    let max = patterns.iter().map(|p| p.count).max().unwrap_or(0);
    LinearScale::new((0.0, max as f64), (sizes.count_bars_w, 0.0))
}

pub fn compute_scales(
    patterns: &[Pattern],
    marginals: &[MarginalCode],
    sizes: &Sizes,
    count_x: LinearScale,
) -> Scales {
    let band_start = sizes.matrix_padding;
    let band_end = (sizes.matrix_w - sizes.matrix_padding).max(band_start);
    let code_x = BandScale::new(
        marginals.iter().map(|m| m.code.as_str()),
        (band_start, band_end),
        CODE_BAND_PADDING,
    );
    let column_width = code_x.bandwidth();

    let max_upper = patterns
        .iter()
        .filter_map(|p| p.upper)
        .filter(|u| u.is_finite())
        .fold(None, |acc: Option<f64>, u| Some(acc.map_or(u, |a| a.max(u))));
    let risk_x =
        LinearScale::new((0.0, max_upper.unwrap_or(0.0)), (0.0, sizes.risk_w));

    let pattern_y =
        LinearScale::new((0.0, patterns.len() as f64), (0.0, sizes.matrix_h));
    let row_height = pattern_y.map(1.0) - pattern_y.map(0.0);

    let max_marginal = marginals.iter().map(|m| m.count).max().unwrap_or(0);
    let marginal_y =
        LinearScale::new((0.0, max_marginal as f64), (sizes.marginal_h, 0.0));

    Scales {
        code_x,
        count_x,
        risk_x,
        pattern_y,
        marginal_y,
        row_height,
        count_bar_height: row_height * BAR_ROW_SHARE,
        column_width,
        dot_size: column_width.min(row_height) * DOT_CELL_SHARE / 2.0,
    }
}
