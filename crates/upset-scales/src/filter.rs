use std::cmp::Reverse;
use std::collections::HashSet;

use crate::model::{MarginalCode, Pattern};

/// Patterns and marginal codes that survive a threshold.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filtered {
    /// Sorted by descending count; ties keep input order.
    pub patterns: Vec<Pattern>,
    /// Input marginals whose code appears in at least one surviving pattern.
    pub marginals: Vec<MarginalCode>,
}

impl Filtered {
    /// No pattern met the threshold. This is a display state, not an error.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Keep patterns with `count >= min_size`, optionally dropping single-code
/// patterns, and reduce the marginals to the codes still referenced.
pub fn filter_set_size(
    patterns: &[Pattern],
    marginals: &[MarginalCode],
    min_size: f64,
    remove_singletons: bool,
) -> Filtered {
    let mut kept: Vec<Pattern> = patterns
        .iter()
        .filter(|p| p.count as f64 >= min_size)
        .filter(|p| !(remove_singletons && p.is_singleton()))
        .cloned()
        .collect();

    // sort_by_key is stable
    kept.sort_by_key(|p| Reverse(p.count));

    let present: HashSet<&str> =
        kept.iter().flat_map(|p| p.codes()).collect();

    let marginals = marginals
        .iter()
        .filter(|m| present.contains(m.code.as_str()))
        .cloned()
        .collect();

    Filtered {
        patterns: kept,
        marginals,
    }
}

/// Threshold to start from for a fresh dataset: the configured default,
/// lowered to the second largest count when the default would leave fewer
/// than two patterns on screen.
pub fn starting_min_size(patterns: &[Pattern], default_min: f64) -> f64 {
    let mut counts: Vec<u64> = patterns.iter().map(|p| p.count).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));

    let shown = counts
        .iter()
        .take_while(|&&c| c as f64 >= default_min)
        .count();

    match counts.get(1) {
        Some(&second) if shown < 2 => second as f64,
        _ => default_min,
    }
}
