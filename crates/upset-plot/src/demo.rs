//! Synthetic dataset for running the viewer without a host.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use upset_scales::{MarginalCode, Pattern};

use crate::input::ChartInput;
use crate::options::Options;

const CODES: [&str; 9] = [
    "250.2", "401.1", "272.1", "278.1", "296.2", "300.1", "327.3", "411.4", "530.1",
];
const PATTERN_ATTEMPTS: usize = 60;
const MAX_PATTERN_SIZE: usize = 4;

/// A reproducible dataset: the same seed always gives the same patterns.
pub fn dataset(seed: u64) -> ChartInput {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut patterns: BTreeMap<String, Pattern> = BTreeMap::new();

    for _ in 0..PATTERN_ATTEMPTS {
        let size = rng.random_range(1..=MAX_PATTERN_SIZE);
        let mut picked = index::sample(&mut rng, CODES.len(), size).into_vec();
        picked.sort_unstable();
        let pattern = picked
            .iter()
            .map(|&i| CODES[i])
            .collect::<Vec<_>>()
            .join("-");

        // larger combinations are rarer
        let count = rng.random_range(10..2000u64) / size as u64;
        let point_est = rng.random_range(0.4..3.5);
        let num_snp = if rng.random_bool(0.15) {
            count
        } else {
            rng.random_range(0..count)
        };
        let (lower, upper) = if num_snp == count {
            (None, None)
        } else {
            let spread = rng.random_range(0.1..0.8);
            (Some(point_est * (1.0 - spread / 2.0)), Some(point_est * (1.0 + spread)))
        };

        patterns.entry(pattern.clone()).or_insert(Pattern {
            pattern,
            size,
            count,
            point_est,
            lower,
            upper,
            num_snp,
        });
    }

    let mut data: Vec<Pattern> = patterns.into_values().collect();
    data.sort_by(|a, b| b.count.cmp(&a.count));

    let marginal_data = CODES
        .iter()
        .map(|&code| {
            let in_patterns: u64 = data
                .iter()
                .filter(|p| p.codes().any(|c| c == code))
                .map(|p| p.count)
                .sum();
            MarginalCode {
                code: code.to_string(),
                count: in_patterns + rng.random_range(0..500),
            }
        })
        .collect();

    ChartInput {
        data,
        options: Options {
            marginal_data,
            min_set_size: 150.0,
            msg_loc: Some("upset_demo".to_string()),
            ..Options::default()
        },
    }
}
