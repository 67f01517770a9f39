//! Change counters for store data and the caches keyed on them.

/// Store data that counts its writes. Derived views key on the count, so an
/// untouched dataset never gets refiltered.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    version: u64,
    data: T,
}

impl<T> Versioned<T> {
    pub fn new(data: T) -> Self {
        Self { version: 0, data }
    }

    pub fn get(&self) -> &T {
        &self.data
    }

    /// Any mutable access counts as a write.
    pub fn get_mut(&mut self) -> &mut T {
        self.version = self.version.wrapping_add(1);
        &mut self.data
    }

    pub fn set(&mut self, data: T) {
        self.data = data;
        self.version = self.version.wrapping_add(1);
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

/// A value derived from `S`, recomputed when the key read from `S` changes.
/// Keys only need `PartialEq`, so a key may define its own notion of "same
/// input" (the code colors compare code sets ignoring order).
pub struct Memoized<S, K, V> {
    recomputed: u64,
    cached: Option<(K, V)>,
    key_of: Box<dyn Fn(&S) -> K>,
    compute: Box<dyn Fn(&S) -> V>,
}

impl<S, K, V> Memoized<S, K, V>
where
    K: PartialEq,
{
    pub fn new(
        key_of: impl Fn(&S) -> K + 'static,
        compute: impl Fn(&S) -> V + 'static,
    ) -> Self {
        Self {
            recomputed: 0,
            cached: None,
            key_of: Box::new(key_of),
            compute: Box::new(compute),
        }
    }

    pub fn get<'a>(&'a mut self, source: &S) -> &'a V {
        let key = (self.key_of)(source);
        if !matches!(&self.cached, Some((last, _)) if *last == key) {
            self.cached = None;
            self.recomputed = self.recomputed.wrapping_add(1);
        }
        let compute = &self.compute;
        let (_, value) = self.cached.get_or_insert_with(|| (key, compute(source)));
        value
    }

    /// Number of recomputations so far.
    pub fn version(&self) -> u64 {
        self.recomputed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn versioned_counts_mutations() {
        let mut v = Versioned::new(1);
        assert_eq!(v.version(), 0);
        *v.get_mut() += 1;
        v.set(5);
        assert_eq!(*v.get(), 5);
        assert_eq!(v.version(), 2);
    }

    #[test]
    fn memoized_recomputes_on_key_change_only() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut doubled = Memoized::new(
            |s: &Versioned<i32>| s.version(),
            move |s: &Versioned<i32>| {
                counter.set(counter.get() + 1);
                s.get() * 2
            },
        );

        let mut source = Versioned::new(21);
        assert_eq!(*doubled.get(&source), 42);
        assert_eq!(*doubled.get(&source), 42);
        assert_eq!(calls.get(), 1);

        source.set(4);
        assert_eq!(*doubled.get(&source), 8);
        assert_eq!(calls.get(), 2);
        assert_eq!(doubled.version(), 2);
    }

    #[test]
    fn key_equality_decides_reuse() {
        // Keys equal up to case share one cached value.
        #[derive(Debug)]
        struct Folded(String);
        impl PartialEq for Folded {
            fn eq(&self, other: &Self) -> bool {
                self.0.eq_ignore_ascii_case(&other.0)
            }
        }

        let mut length = Memoized::new(|s: &String| Folded(s.clone()), |s: &String| s.len());
        assert_eq!(*length.get(&"abc".to_string()), 3);
        assert_eq!(*length.get(&"ABC".to_string()), 3);
        assert_eq!(length.version(), 1);
        assert_eq!(*length.get(&"abcd".to_string()), 4);
        assert_eq!(length.version(), 2);
    }
}
