//! Small numerical helpers.

use std::hash::Hash;

/// A wrapper for `f64` that implements `Ord`.
///
/// Unlike the more principled wrappers in the `ordered_float` crate, this
/// one just panics when comparing NaNs -- it doesn't order them, nor does
/// it guard against them on construction. Every public entry point checks
/// its inputs for NaN, so by the time anything is sorted there are none
/// left to compare.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CheapOrderedFloat(f64);

impl Hash for CheapOrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state)
    }
}

impl CheapOrderedFloat {
    /// Retrieve the inner `f64`.
    pub fn into_inner(self) -> f64 {
        self.0
    }
}

// Now comes the fishy stuff.
impl Eq for CheapOrderedFloat {}

impl PartialOrd for CheapOrderedFloat {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CheapOrderedFloat {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 < other.0 {
            std::cmp::Ordering::Less
        } else if self.0 > other.0 {
            std::cmp::Ordering::Greater
        } else {
            debug_assert!(!self.0.is_nan() && !other.0.is_nan());
            std::cmp::Ordering::Equal
        }
    }
}

impl From<f64> for CheapOrderedFloat {
    fn from(value: f64) -> Self {
        CheapOrderedFloat(value)
    }
}

/// Linearly maps `value` from the range `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Values outside the input range extrapolate.
pub fn normalize(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    debug_assert!(in_max != in_min);
    let t = (value - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}

/// Checks that every one of `values` is finite, reporting the first problem found.
pub(crate) fn check_finite(values: impl IntoIterator<Item = f64>) -> Result<(), crate::Error> {
    for v in values {
        if v.is_nan() {
            return Err(crate::Error::NaN);
        }
        if v.is_infinite() {
            return Err(crate::Error::Infinity);
        }
    }
    Ok(())
}
