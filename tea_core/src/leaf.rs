//! The physical state of one batch of leaves.

/// Moisture fraction bounds.
pub const MOISTURE_RANGE: (f64, f64) = (0.0, 1.0);
/// Aroma and color index bounds.
pub const INDEX_RANGE: (f64, f64) = (0.0, 100.0);

/// State vector of a batch. `temperature_c` is never clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeaLeaf {
    /// Water content fraction, [0.0, 1.0].
    pub moisture: f64,
    /// Leaf temperature in °C.
    pub temperature_c: f64,
    /// Aroma index, [0, 100].
    pub aroma: f64,
    /// Color index, [0, 100].
    pub color: f64,
}

impl Default for TeaLeaf {
    fn default() -> Self {
        Self {
            moisture: 0.75,
            temperature_c: 25.0,
            aroma: 10.0,
            color: 10.0,
        }
    }
}

impl TeaLeaf {
    /// True when every bounded quantity sits inside its range.
    pub fn in_bounds(&self) -> bool {
        let within = |v: f64, (lo, hi): (f64, f64)| (lo..=hi).contains(&v);
        within(self.moisture, MOISTURE_RANGE)
            && within(self.aroma, INDEX_RANGE)
            && within(self.color, INDEX_RANGE)
    }

    /// Copy with `normalize` applied.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        normalize(&mut self);
        self
    }
}

/// `v` if it lies in `[lo, hi]`, otherwise the nearer bound.
#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Pull moisture, aroma and color back into range; temperature is untouched.
#[inline]
pub fn normalize(leaf: &mut TeaLeaf) {
    leaf.moisture = clamp(leaf.moisture, MOISTURE_RANGE.0, MOISTURE_RANGE.1);
    leaf.aroma = clamp(leaf.aroma, INDEX_RANGE.0, INDEX_RANGE.1);
    leaf.color = clamp(leaf.color, INDEX_RANGE.0, INDEX_RANGE.1);
}
