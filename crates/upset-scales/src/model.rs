use serde::{Deserialize, Serialize};

/// Separator between the codes of a pattern string, e.g. `"A-B-C"`.
pub const PATTERN_SEPARATOR: char = '-';

/// One observed combination of codes and its aggregate statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Dash-joined ordered codes.
    pub pattern: String,
    /// Number of codes in `pattern`.
    pub size: usize,
    /// Number of subjects showing this pattern.
    pub count: u64,
    #[serde(rename = "pointEst")]
    pub point_est: f64,
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
    #[serde(default)]
    pub num_snp: u64,
}

impl Pattern {
    /// The codes making up this pattern, in pattern order.
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.pattern.split(PATTERN_SEPARATOR)
    }

    pub fn code_list(&self) -> Vec<String> {
        self.codes().map(str::to_owned).collect()
    }

    /// Confidence bounds, or `None` when either side is undefined.
    pub fn interval(&self) -> Option<(f64, f64)> {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => Some((lower, upper)),
            _ => None,
        }
    }

    pub fn is_singleton(&self) -> bool {
        self.size == 1
    }

    /// Check the record invariants: the pattern string holds exactly `size`
    /// non-empty codes and the bounds are either both present or both absent.
    pub fn validate(&self) -> Result<(), DataError> {
        let tokens: Vec<&str> = self.codes().collect();
        if tokens.iter().any(|t| t.is_empty()) {
            return Err(DataError::EmptyCode(self.pattern.clone()));
        }
        if tokens.len() != self.size {
            return Err(DataError::SizeMismatch {
                pattern: self.pattern.clone(),
                size: self.size,
                found: tokens.len(),
            });
        }
        if self.lower.is_some() != self.upper.is_some() {
            return Err(DataError::HalfOpenInterval(self.pattern.clone()));
        }
        Ok(())
    }
}

/// Per-code aggregate count, independent of pattern membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginalCode {
    pub code: String,
    pub count: u64,
}

/// Compare two code lists by length and multiset content.
pub fn codes_equal<S: AsRef<str>>(a: &[S], b: &[S]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut left: Vec<&str> = a.iter().map(AsRef::as_ref).collect();
    let mut right: Vec<&str> = b.iter().map(AsRef::as_ref).collect();
    left.sort_unstable();
    right.sort_unstable();
    left == right
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("pattern `{pattern}` declares {size} codes but holds {found}")]
    SizeMismatch {
        pattern: String,
        size: usize,
        found: usize,
    },
    #[error("pattern `{0}` contains an empty code")]
    EmptyCode(String),
    #[error("pattern `{0}` has only one confidence bound")]
    HalfOpenInterval(String),
}
