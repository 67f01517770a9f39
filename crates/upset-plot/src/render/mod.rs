//! The four chart components. Each one resynchronizes a group of the
//! surface with the filtered data; none of them runs on an empty pattern
//! list.

pub mod axis;
pub mod count_bars;
pub mod marginal_bars;
pub mod matrix;
pub mod risk;

use std::collections::HashMap;
use upset_scales::{MarginalCode, Pattern, Scales, Sizes};

use crate::color::Color;
use crate::options::Palette;

// Group classes, shared with the chart layout and the tests
pub const MATRIX_CHART: &str = "matrix_chart";
pub const PATTERN_SIZE_BARS: &str = "pattern_size_bars";
pub const RR_INTERVALS: &str = "rr_intervals";
pub const CODE_MARGINAL_BARS: &str = "code_marginal_bars";

/// Vertical offset of subplot titles below the matrix, in paddings.
const TITLE_PADDINGS: f64 = 2.5;

/// Everything a component reads during one render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub patterns: &'a [Pattern],
    pub marginals: &'a [MarginalCode],
    pub scales: &'a Scales,
    pub sizes: &'a Sizes,
    pub palette: &'a Palette,
    pub code_colors: &'a HashMap<String, Color>,
}

impl RenderContext<'_> {
    pub fn code_color(&self, code: &str) -> Color {
        self.code_colors
            .get(code)
            .copied()
            .unwrap_or(self.palette.code_missing)
    }

    /// Vertical center of matrix row `index`.
    pub fn row_center(&self, index: usize) -> f64 {
        self.scales.pattern_y.map(index as f64) + self.scales.row_height / 2.0
    }

    /// Baseline of the subplot titles, in subplot coordinates.
    pub fn title_y(&self) -> f64 {
        self.sizes.matrix_h + self.sizes.margin.bottom
            - self.sizes.padding * TITLE_PADDINGS
    }
}
