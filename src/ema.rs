use std::{fmt::Display, num::NonZero};

use crate::{Average, SimpleAverage};

#[derive(Clone, Debug)]
enum EmaPhase {
    Seeding(SimpleAverage),
    Active { previous: f64, current: f64 },
}

/// Exponential moving average over a scalar series.
///
/// Uses the standard smoothing factor `α = 2 / (length + 1)`:
///
/// ```text
/// EMA = α × value + (1 − α) × prev_EMA
/// ```
///
/// The first `length` samples are collected to compute an SMA seed. The seed
/// is the first defined value; the recursion starts on the sample after it.
/// Once seeded, the SMA state is dropped and each update is a single fused
/// multiply-add.
///
/// [`replace`](Average::replace) recomputes from the previous EMA without
/// advancing state.
///
/// # Example
///
/// ```
/// use ma_slope::{Average, ExponentialAverage};
/// use std::num::NonZero;
///
/// let mut ema = ExponentialAverage::new(NonZero::new(3).unwrap());
///
/// assert_eq!(ema.push(2.0), None);
/// assert_eq!(ema.push(4.0), None);
///
/// // SMA seed = (2 + 4 + 6) / 3 = 4.0
/// assert_eq!(ema.push(6.0), Some(4.0));
///
/// // α = 0.5: 8 × 0.5 + 4 × 0.5 = 6.0
/// assert_eq!(ema.push(8.0), Some(6.0));
/// ```
#[derive(Clone, Debug)]
pub struct ExponentialAverage {
    length: usize,
    alpha: f64,
    phase: EmaPhase,
}

impl ExponentialAverage {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
            #[allow(clippy::cast_precision_loss)]
            alpha: 2.0 / (length.get() + 1) as f64,
            phase: EmaPhase::Seeding(SimpleAverage::new(length)),
        }
    }
}

impl Average for ExponentialAverage {
    #[inline]
    fn push(&mut self, value: f64) -> Option<f64> {
        match &mut self.phase {
            EmaPhase::Seeding(sma) => {
                if let Some(seed) = sma.value() {
                    let current = self.alpha.mul_add(value - seed, seed);
                    self.phase = EmaPhase::Active {
                        previous: seed,
                        current,
                    };
                } else {
                    sma.push(value);
                }
            }
            EmaPhase::Active { previous, current } => {
                *previous = *current;
                *current = self.alpha.mul_add(value - *previous, *previous);
            }
        }

        self.value()
    }

    #[inline]
    fn replace(&mut self, value: f64) -> Option<f64> {
        match &mut self.phase {
            EmaPhase::Seeding(sma) => {
                sma.replace(value);
            }
            EmaPhase::Active { previous, current } => {
                *current = self.alpha.mul_add(value - *previous, *previous);
            }
        }

        self.value()
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        match &self.phase {
            EmaPhase::Seeding(sma) => sma.value(),
            EmaPhase::Active { current, .. } => Some(*current),
        }
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl Display for ExponentialAverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({})", self.length)
    }
}
