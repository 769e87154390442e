use crate::{MaSlope, MaSlopeConfig, MaSlopeValue, Ohlcv};

/// The four output lines of [`MaSlope`], indexed like the bar series.
///
/// Undefined MA line and zero line values are stored as `None`.
///
/// # Example
///
/// ```
/// use ma_slope::{IndicatorConfig, IndicatorConfigBuilder, MaSlopeConfig, MaSlopeSeries};
/// use std::num::NonZero;
/// # use ma_slope::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.0 }
/// #     fn close(&self) -> Price { self.0 }
/// #     fn open_time(&self) -> Timestamp { self.1 }
/// # }
///
/// let config = MaSlopeConfig::builder()
///     .length(NonZero::new(1).unwrap())
///     .build();
/// let bars = [Bar(100.0, 1), Bar(101.0, 2)];
///
/// let series = MaSlopeSeries::from_bars(config, &bars);
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.positive(), &[0.0, 1.0]);
/// assert_eq!(series.zero_line(), &[Some(0.0), Some(0.0)]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaSlopeSeries {
    positive: Vec<f64>,
    negative: Vec<f64>,
    ma_line: Vec<Option<f64>>,
    zero_line: Vec<Option<f64>>,
}

impl MaSlopeSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a fresh [`MaSlope`] over `bars` and records every output.
    /// Bars sharing an `open_time` amend the same index.
    #[must_use]
    pub fn from_bars(config: MaSlopeConfig, bars: &[impl Ohlcv]) -> Self {
        let mut indicator = MaSlope::new(config);
        let mut series = Self::with_capacity(bars.len());

        for bar in bars {
            if let Some(value) = indicator.compute(bar) {
                series.record(&value);
            }
        }

        series
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            positive: Vec::with_capacity(capacity),
            negative: Vec::with_capacity(capacity),
            ma_line: Vec::with_capacity(capacity),
            zero_line: Vec::with_capacity(capacity),
        }
    }

    /// Stores `value` at its index: appends for the next index, overwrites
    /// for the latest one.
    ///
    /// # Panics
    ///
    /// Panics if `value` belongs to neither the latest nor the next index.
    pub fn record(&mut self, value: &MaSlopeValue) {
        let index = value.index();
        let len = self.len();

        if index == len {
            self.positive.push(value.positive());
            self.negative.push(value.negative());
            self.ma_line.push(value.ma_line());
            self.zero_line.push(value.zero_line());
        } else {
            assert!(
                index + 1 == len,
                "only the latest index can be amended: len={len}, got={index}"
            );
            self.positive[index] = value.positive();
            self.negative[index] = value.negative();
            self.ma_line[index] = value.ma_line();
            self.zero_line[index] = value.zero_line();
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.positive.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn positive(&self) -> &[f64] {
        &self.positive
    }

    #[inline]
    #[must_use]
    pub fn negative(&self) -> &[f64] {
        &self.negative
    }

    #[inline]
    #[must_use]
    pub fn ma_line(&self) -> &[Option<f64>] {
        &self.ma_line
    }

    #[inline]
    #[must_use]
    pub fn zero_line(&self) -> &[Option<f64>] {
        &self.zero_line
    }
}
