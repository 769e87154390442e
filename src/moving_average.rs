use std::{fmt::Display, num::NonZero};

use crate::{ExponentialAverage, MaType, SimpleAverage, WeightedAverage};

/// A streaming moving average over a scalar series.
///
/// Samples arrive in index order through [`push`](Average::push). The newest
/// sample can be recomputed in place through [`replace`](Average::replace),
/// which is how amendments to an open bar are applied. Replacing with the same
/// value twice yields bit-identical output.
pub trait Average {
    /// Appends a sample for the next index and returns the updated average,
    /// or `None` while fewer than `length` samples have been seen.
    fn push(&mut self, value: f64) -> Option<f64>;

    /// Replaces the newest sample and returns the recomputed average.
    ///
    /// Behaves like [`push`](Average::push) if nothing has been pushed yet.
    fn replace(&mut self, value: f64) -> Option<f64>;

    /// The current average without advancing state.
    fn value(&self) -> Option<f64>;

    /// Window length.
    fn length(&self) -> usize;
}

/// Moving average dispatching on [`MaType`].
///
/// # Example
///
/// ```
/// use ma_slope::{Average, MaType, MovingAverage};
/// use std::num::NonZero;
///
/// let mut ma = MovingAverage::new(MaType::Simple, NonZero::new(2).unwrap());
///
/// assert_eq!(ma.push(10.0), None);
/// assert_eq!(ma.push(20.0), Some(15.0));
///
/// // amend the newest sample
/// assert_eq!(ma.replace(30.0), Some(20.0));
/// ```
#[derive(Clone, Debug)]
pub enum MovingAverage {
    Simple(SimpleAverage),
    Exponential(ExponentialAverage),
    Weighted(WeightedAverage),
}

impl MovingAverage {
    #[must_use]
    pub fn new(ma_type: MaType, length: NonZero<usize>) -> Self {
        match ma_type {
            MaType::Simple => Self::Simple(SimpleAverage::new(length)),
            MaType::Exponential => Self::Exponential(ExponentialAverage::new(length)),
            MaType::Weighted => Self::Weighted(WeightedAverage::new(length)),
        }
    }

    #[must_use]
    pub fn ma_type(&self) -> MaType {
        match self {
            Self::Simple(_) => MaType::Simple,
            Self::Exponential(_) => MaType::Exponential,
            Self::Weighted(_) => MaType::Weighted,
        }
    }
}

impl Average for MovingAverage {
    #[inline]
    fn push(&mut self, value: f64) -> Option<f64> {
        match self {
            Self::Simple(ma) => ma.push(value),
            Self::Exponential(ma) => ma.push(value),
            Self::Weighted(ma) => ma.push(value),
        }
    }

    #[inline]
    fn replace(&mut self, value: f64) -> Option<f64> {
        match self {
            Self::Simple(ma) => ma.replace(value),
            Self::Exponential(ma) => ma.replace(value),
            Self::Weighted(ma) => ma.replace(value),
        }
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        match self {
            Self::Simple(ma) => ma.value(),
            Self::Exponential(ma) => ma.value(),
            Self::Weighted(ma) => ma.value(),
        }
    }

    #[inline]
    fn length(&self) -> usize {
        match self {
            Self::Simple(ma) => ma.length(),
            Self::Exponential(ma) => ma.length(),
            Self::Weighted(ma) => ma.length(),
        }
    }
}

impl Display for MovingAverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple(ma) => Display::fmt(ma, f),
            Self::Exponential(ma) => Display::fmt(ma, f),
            Self::Weighted(ma) => Display::fmt(ma, f),
        }
    }
}
