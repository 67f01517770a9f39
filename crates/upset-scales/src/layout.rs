use crate::model::Pattern;

// Width units of the three horizontal bands
pub const COUNT_BARS_UNITS: f64 = 1.0;
pub const RISK_UNITS: f64 = 1.0;
pub const MATRIX_UNITS: f64 = 0.7;

/// Share of the usable height taken by the marginal bars.
pub const MARGINAL_HEIGHT_SHARE: f64 = 0.3;

pub const MATRIX_PADDING: f64 = 10.0;
pub const PADDING: f64 = 10.0;

/// Space reserved around the plotting area for axes and titles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(20.0, 50.0, 70.0, 50.0)
    }
}

/// Pixel extents of every region of the chart for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizes {
    /// Pattern count bars, left band.
    pub count_bars_w: f64,
    /// Relative risk intervals, right band. Zero without risk data.
    pub risk_w: f64,
    /// Pattern matrix, middle band.
    pub matrix_w: f64,
    pub marginal_h: f64,
    pub matrix_h: f64,
    pub matrix_padding: f64,
    pub padding: f64,
    /// Usable width inside the margins.
    pub w: f64,
    /// Usable height inside the margins.
    pub h: f64,
    pub margin: Margins,
}

impl Sizes {
    /// Left edge of the risk band.
    pub fn risk_x(&self) -> f64 {
        self.count_bars_w + self.matrix_w
    }
}

/// Split the viewport into the chart bands. Usable extents never go negative.
pub fn compute_sizes(
    width: f64,
    height: f64,
    margin: Margins,
    has_risk_data: bool,
) -> Sizes {
    let risk_units = if has_risk_data { RISK_UNITS } else { 0.0 };
    let total_units = COUNT_BARS_UNITS + risk_units + MATRIX_UNITS;

    let w = (width - margin.left - margin.right).max(0.0);
    let h = (height - margin.top - margin.bottom).max(0.0);

    Sizes {
        count_bars_w: w * COUNT_BARS_UNITS / total_units,
        risk_w: w * risk_units / total_units,
        matrix_w: w * MATRIX_UNITS / total_units,
        marginal_h: h * MARGINAL_HEIGHT_SHARE,
        matrix_h: h * (1.0 - MARGINAL_HEIGHT_SHARE),
        matrix_padding: MATRIX_PADDING,
        padding: PADDING,
        w,
        h,
        margin,
    }
}

/// Risk estimates exist unless every pattern is made of SNP-only subjects.
pub fn has_risk_data(patterns: &[Pattern]) -> bool {
    patterns.iter().any(|p| p.num_snp < p.count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn width_bands_follow_unit_ratios() {
        let s = compute_sizes(1000.0, 600.0, Margins::default(), true);
        assert!(close(s.w, 900.0));
        assert!(close(s.h, 510.0));
        assert!(close(s.count_bars_w, 900.0 / 2.7));
        assert!(close(s.risk_w, 900.0 / 2.7));
        assert!(close(s.matrix_w, 900.0 * 0.7 / 2.7));
        assert!(close(s.count_bars_w + s.risk_w + s.matrix_w, s.w));
        assert!(close(s.marginal_h, 153.0));
        assert!(close(s.matrix_h, 357.0));
    }

    #[test]
    fn no_risk_band_without_risk_data() {
        let s = compute_sizes(1000.0, 600.0, Margins::default(), false);
        assert_eq!(s.risk_w, 0.0);
        assert!(close(s.count_bars_w + s.matrix_w, s.w));
        assert!(close(s.risk_x(), s.w));
    }

    #[test]
    fn tiny_viewport_clamps_to_zero() {
        let s = compute_sizes(40.0, 30.0, Margins::default(), true);
        assert_eq!(s.w, 0.0);
        assert_eq!(s.h, 0.0);
        assert_eq!(s.matrix_h, 0.0);
    }

    #[test]
    fn risk_data_detected_from_snp_counts() {
        let mut p = Pattern {
            pattern: "A".into(),
            size: 1,
            count: 10,
            point_est: 1.0,
            lower: None,
            upper: None,
            num_snp: 10,
        };
        assert!(!has_risk_data(std::slice::from_ref(&p)));
        p.num_snp = 3;
        assert!(has_risk_data(&[p]));
        assert!(!has_risk_data(&[]));
    }
}
