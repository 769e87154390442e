use std::{fmt::Display, num::NonZero};

use crate::{Average, ring_buffer::RingBuffer};

/// Linearly weighted moving average over a scalar series.
///
/// The newest sample has weight `length`, the oldest weight `1`:
///
/// ```text
/// WMA = (1 × x[t−n+1] + 2 × x[t−n+2] + … + n × x[t]) / (n × (n + 1) / 2)
/// ```
///
/// Maintains a weighted and a plain running sum over the older samples so
/// each push is O(1): advancing the window lowers every existing weight by
/// one, which is a subtraction of the plain sum.
///
/// # Example
///
/// ```
/// use ma_slope::{Average, WeightedAverage};
/// use std::num::NonZero;
///
/// let mut wma = WeightedAverage::new(NonZero::new(3).unwrap());
///
/// assert_eq!(wma.push(1.0), None);
/// assert_eq!(wma.push(2.0), None);
/// // (1 + 4 + 9) / 6
/// let value = wma.push(3.0).unwrap();
/// assert!((value - 14.0 / 6.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct WeightedAverage {
    window: RingBuffer,
    /// Weighted sum of the window excluding the newest sample.
    base_weighted: f64,
    /// Plain sum of the window excluding the newest sample.
    base_plain: f64,
    newest: f64,
    denominator_reciprocal: f64,
}

impl WeightedAverage {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        let n = length.get();

        Self {
            window: RingBuffer::new(n),
            base_weighted: 0.0,
            base_plain: 0.0,
            newest: 0.0,
            #[allow(clippy::cast_precision_loss)]
            denominator_reciprocal: 2.0 / (n * (n + 1)) as f64,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    #[inline]
    fn newest_weight(&self) -> f64 {
        self.window.len() as f64
    }
}

impl Average for WeightedAverage {
    #[inline]
    fn push(&mut self, value: f64) -> Option<f64> {
        let weighted = self.newest_weight().mul_add(self.newest, self.base_weighted);
        let plain = self.base_plain + self.newest;

        match self.window.push(value) {
            Some(evicted) => {
                self.base_weighted = weighted - plain;
                self.base_plain = plain - evicted;
            }
            None => {
                self.base_weighted = weighted;
                self.base_plain = plain;
            }
        }
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
        self.window.is_ready().then(|| {
            self.newest_weight().mul_add(self.newest, self.base_weighted)
                * self.denominator_reciprocal
        })
    }

    #[inline]
    fn length(&self) -> usize {
        self.window.capacity()
    }
}

impl Display for WeightedAverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WMA({})", self.length())
    }
}
