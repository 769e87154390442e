use std::{fmt::Display, num::NonZero};

use crate::{Average, ring_buffer::RingBuffer};

/// Simple moving average over a scalar series.
///
/// Computes the unweighted mean of the last *n* samples. Returns `None` until
/// the window is full.
///
/// The running sum is split into the part contributed by older samples and
/// the newest sample, so [`replace`](Average::replace) is O(1) and recomputes
/// from exactly the same base every time.
///
/// # Example
///
/// ```
/// use ma_slope::{Average, SimpleAverage};
/// use std::num::NonZero;
///
/// let mut sma = SimpleAverage::new(NonZero::new(3).unwrap());
///
/// assert_eq!(sma.push(10.0), None);
/// assert_eq!(sma.push(20.0), None);
/// assert_eq!(sma.push(30.0), Some(20.0));
/// assert_eq!(sma.push(40.0), Some(30.0));
/// ```
#[derive(Clone, Debug)]
pub struct SimpleAverage {
    window: RingBuffer,
    /// Sum of every sample in the window except the newest. Maintained
    /// incrementally, may accumulate FP rounding drift over very long runs,
    /// but negligible for typical window sizes on financial data.
    base: f64,
    newest: f64,
    length_reciprocal: f64,
}

impl SimpleAverage {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self {
            window: RingBuffer::new(length.get()),
            base: 0.0,
            newest: 0.0,
            #[allow(clippy::cast_precision_loss)]
            length_reciprocal: 1.0 / length.get() as f64,
        }
    }
}

impl Average for SimpleAverage {
    #[inline]
    fn push(&mut self, value: f64) -> Option<f64> {
        let total = self.base + self.newest;

        self.base = match self.window.push(value) {
            Some(evicted) => total - evicted,
            None => total,
        };
        self.newest = value;

        self.value()
    }

    #[inline]
    fn replace(&mut self, value: f64) -> Option<f64> {
        if self.window.is_empty() {
            return self.push(value);
        }

        self.window.replace(value);
        self.newest = value;

        self.value()
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.window
            .is_ready()
            .then(|| (self.base + self.newest) * self.length_reciprocal)
    }

    #[inline]
    fn length(&self) -> usize {
        self.window.capacity()
    }
}

impl Display for SimpleAverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({})", self.length())
    }
}
