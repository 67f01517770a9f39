use std::collections::{BTreeMap, HashMap};
use upset_scales::{Filtered, codes_equal, filter_set_size};

use crate::color::Color;
use crate::options::code_colors;
use crate::store::Store;
use crate::versioned::Memoized;

/// Marginal codes plus the host color assignment. Two sets are equal when
/// they hold the same codes, whatever the order; fallback colors follow the
/// sorted codes, so the order never matters to the result.
#[derive(Debug, Clone)]
pub struct CodeSet {
    codes: Vec<String>,
    assigned: BTreeMap<String, String>,
}

impl CodeSet {
    fn of(store: &Store) -> Self {
        let options = &store.dataset.get().options;
        Self {
            codes: options.marginal_data.iter().map(|m| m.code.clone()).collect(),
            assigned: options.code_to_color.clone(),
        }
    }
}

impl PartialEq for CodeSet {
    fn eq(&self, other: &Self) -> bool {
        codes_equal(&self.codes, &other.codes) && self.assigned == other.assigned
    }
}

pub struct Cache {
    pub filtered: Memoized<Store, (u64, f64, bool), Filtered>,
    pub code_colors: Memoized<Store, CodeSet, HashMap<String, Color>>,
}

impl Cache {
    pub fn new() -> Self {
        let filtered = Memoized::new(
            |s: &Store| {
                (
                    s.dataset.version(),
                    s.view.current_min_size,
                    s.view.filtering_singletons,
                )
            },
            |s: &Store| {
                let data = s.dataset.get();
                filter_set_size(
                    &data.patterns,
                    &data.options.marginal_data,
                    s.view.current_min_size,
                    s.view.filtering_singletons,
                )
            },
        );

        let code_colors = Memoized::new(CodeSet::of, |s: &Store| {
            let options = &s.dataset.get().options;
            code_colors(&options.marginal_data, &options.code_to_color)
        });

        Self {
            filtered,
            code_colors,
        }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::render::fixtures::{marginal, pattern};

    fn options(codes: &[&str]) -> Options {
        Options {
            marginal_data: codes.iter().map(|c| marginal(c, 10)).collect(),
            min_set_size: 1.0,
            ..Options::default()
        }
    }

    #[test]
    fn filtered_follows_view_state() {
        let mut store = Store::new(800.0, 600.0);
        store.load_dataset(
            vec![pattern("A-B", 50, None), pattern("A", 20, None), pattern("B", 5, None)],
            options(&["A", "B"]),
        );
        let mut cache = Cache::new();
        store.view.current_min_size = 10.0;
        assert_eq!(cache.filtered.get(&store).patterns.len(), 2);

        store.view.filtering_singletons = true;
        let filtered = cache.filtered.get(&store);
        assert_eq!(filtered.patterns.len(), 1);
        assert_eq!(filtered.patterns[0].pattern, "A-B");
    }

    #[test]
    fn warm_and_fresh_caches_agree_on_colors() {
        let mut store = Store::new(800.0, 600.0);
        let mut warm = Cache::new();
        store.load_dataset(Vec::new(), options(&["A", "B"]));
        warm.code_colors.get(&store);
        let version = warm.code_colors.version();

        store.load_dataset(Vec::new(), options(&["B", "A"]));
        let mut fresh = Cache::new();
        assert_eq!(warm.code_colors.get(&store), fresh.code_colors.get(&store));
        assert_eq!(warm.code_colors.version(), version);

        store.load_dataset(Vec::new(), options(&["A", "B", "C"]));
        assert_eq!(warm.code_colors.get(&store).len(), 3);
        assert_eq!(warm.code_colors.version(), version + 1);
    }
}
