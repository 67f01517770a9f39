//! Continuous and band scales mapping data values to pixels.

use std::collections::HashMap;

//##########################################################
// Linear
//##########################################################

/// Affine map from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value to the range. A zero-width domain maps everything
    /// onto the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return r0;
        }
        r0 + (x - d0) / span * (r1 - r0)
    }

    /// Map a range value back to the domain.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 || !span.is_finite() {
            return d0;
        }
        d0 + (y - r0) / span * (d1 - d0)
    }

    /// Roughly `count` round values spanning the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Distance between consecutive ticks produced by `ticks(count)`.
    pub fn tick_step(&self, count: usize) -> f64 {
        let (d0, d1) = self.domain;
        tick_step(d0.min(d1), d0.max(d1), count)
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Integer tick indices and the increment between them. A negative increment
/// means ticks are `index / -inc`, which keeps decimals exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10f64.powf(-power) / factor;
        i1 = (start * scale).round();
        i2 = (stop * scale).round();
        if i1 / scale < start {
            i1 += 1.0;
        }
        if i2 / scale > stop {
            i2 -= 1.0;
        }
        inc = -scale;
    } else {
        let scale = 10f64.powf(power) * factor;
        i1 = (start / scale).round();
        i2 = (stop / scale).round();
        if i1 * scale < start {
            i1 += 1.0;
        }
        if i2 * scale > stop {
            i2 -= 1.0;
        }
        inc = scale;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Nice tick values in 1-2-5 increments between `start` and `stop`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) || !inc.is_finite() {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let value = |k: usize| {
        let i = i1 + k as f64;
        if inc < 0.0 { i / -inc } else { i * inc }
    };
    let mut out: Vec<f64> = (0..n).map(value).collect();
    if reverse {
        out.reverse();
    }
    out
}

/// Positive spacing of the ticks `ticks(start, stop, count)` would produce.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !(stop > start) || !start.is_finite() || !stop.is_finite() {
        return 0.0;
    }
    let (_, _, inc) = tick_spec(start, stop, count as f64);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}

//##########################################################
// Band
//##########################################################

/// Evenly spaced bands for an ordered list of keys, with inner and outer
/// padding expressed as a fraction of the step. Band starts and widths are
/// rounded to whole pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    keys: Vec<String>,
    index: HashMap<String, usize>,
    range: (f64, f64),
    padding: f64,
    step: f64,
    start: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Keys keep their first-seen order; repeats are ignored.
    pub fn new<I, S>(keys: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();
        for key in keys {
            let key: String = key.into();
            if !index.contains_key(&key) {
                index.insert(key.clone(), ordered.len());
                ordered.push(key);
            }
        }

        let mut scale = Self {
            keys: ordered,
            index,
            range,
            padding,
            step: 0.0,
            start: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        scale
    }

    fn rescale(&mut self) {
        let n = self.keys.len() as f64;
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let inner = self.padding;
        let outer = self.padding;
        let align = 0.5;

        let step = ((hi - lo) / (n - inner + outer * 2.0).max(1.0)).floor();
        let start = lo + (hi - lo - step * (n - inner)) * align;

        self.step = step;
        self.start = start.round();
        self.bandwidth = (step * (1.0 - inner)).round();
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Left edge of the band for `key`, or `None` for an unknown key.
    pub fn position(&self, key: &str) -> Option<f64> {
        let i = *self.index.get(key)?;
        let (r0, r1) = self.range;
        let i = if r1 < r0 { self.keys.len() - 1 - i } else { i };
        Some(self.start + self.step * i as f64)
    }

    pub fn center(&self, key: &str) -> Option<f64> {
        self.position(key).map(|x| x + self.bandwidth / 2.0)
    }
}
