use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::ThresholdError;

/// Histogram height emitted for a slope whose magnitude is below the
/// threshold. Keeps insignificant moves visible and distinguishable from a
/// true zero.
pub const DOT_SIZE: f64 = 0.2;

/// Minimum absolute slope, in percent, for a bar to be drawn at full height.
///
/// Wraps a non-negative, non-NaN `f64`. [`Threshold::new`] panics on invalid
/// input; [`Threshold::try_from`] reports it as a [`ThresholdError`].
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe because
/// NaN is rejected at construction. Defaults to `0.1`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    /// Creates a new threshold.
    ///
    /// # Panics
    ///
    /// Panics if `value` is negative or NaN.
    #[must_use]
    pub fn new(value: f64) -> Self {
        match Self::try_from(value) {
            Ok(threshold) => threshold,
            Err(e) => panic!("{e}"),
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Threshold {
    type Error = ThresholdError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(ThresholdError::NaN);
        }
        if value < 0.0 {
            return Err(ThresholdError::Negative(value));
        }
        // -0.0 hashes differently from 0.0
        Ok(Self(value + 0.0))
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl PartialEq for Threshold {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Threshold {}

impl Hash for Threshold {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(0.1)
    }
}

impl Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Splits a slope into `(positive, negative)` histogram channels.
///
/// At or above the threshold the slope goes to the channel matching its sign
/// at full magnitude. Below it, the channel gets a [`DOT_SIZE`] marker of
/// matching sign. At most one channel is non-zero.
///
/// A slope of exactly zero is not positive: it yields `(0.0, -DOT_SIZE)`
/// (or `(0.0, 0.0)` with a zero threshold).
///
/// # Example
///
/// ```
/// use ma_slope::{DOT_SIZE, Threshold, classify};
///
/// let threshold = Threshold::new(0.1);
///
/// assert_eq!(classify(1.0, threshold), (1.0, 0.0));
/// assert_eq!(classify(-0.5, threshold), (0.0, -0.5));
/// assert_eq!(classify(0.05, threshold), (DOT_SIZE, 0.0));
/// assert_eq!(classify(0.0, threshold), (0.0, -DOT_SIZE));
/// ```
#[inline]
#[must_use]
pub fn classify(slope: f64, threshold: Threshold) -> (f64, f64) {
    let is_positive = slope > 0.0;

    if slope.abs() >= threshold.0 {
        if is_positive {
            (slope, 0.0)
        } else {
            (0.0, slope)
        }
    } else if is_positive {
        (DOT_SIZE, 0.0)
    } else {
        (0.0, -DOT_SIZE)
    }
}
