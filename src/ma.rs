use std::{fmt::Display, num::NonZero};

use serde::{Deserialize, Serialize};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, MaType, MovingAverage, Ohlcv, Price,
    PriceSource, bar_clock::BarClock,
};

/// Configuration for the moving average tracker ([`Ma`]).
///
/// # Example
///
/// ```rust
/// use ma_slope::{IndicatorConfig, IndicatorConfigBuilder, MaConfig, MaType, PriceSource};
/// use std::num::NonZero;
///
/// let config = MaConfig::builder()
///     .length(NonZero::new(20).unwrap())
///     .source(PriceSource::Typical)
///     .ma_type(MaType::Weighted)
///     .build();
///
/// assert_eq!(config.length(), 20);
/// assert_eq!(config.ma_type(), MaType::Weighted);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MaConfig {
    length: NonZero<usize>,
    #[serde(default)]
    source: PriceSource,
    #[serde(default)]
    ma_type: MaType,
}

impl IndicatorConfig for MaConfig {
    type Builder = MaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MaConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length.get()
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl MaConfig {
    /// Averaging method.
    #[inline]
    #[must_use]
    pub fn ma_type(&self) -> MaType {
        self.ma_type
    }

    /// Simple average on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// Simple average on median price: `(high + low) / 2`.
    #[must_use]
    pub fn median(length: NonZero<usize>) -> Self {
        Self::builder()
            .length(length)
            .source(PriceSource::Median)
            .build()
    }
}

impl Display for MaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MaConfig({}, {}, {})",
            self.ma_type, self.length, self.source
        )
    }
}

/// Builder for [`MaConfig`].
///
/// Defaults: source = [`PriceSource::Close`], method = [`MaType::Simple`].
/// Length must be set before calling [`build`](IndicatorConfigBuilder::build).
pub struct MaConfigBuilder {
    length: Option<NonZero<usize>>,
    source: PriceSource,
    ma_type: MaType,
}

impl MaConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
            ma_type: MaType::Simple,
        }
    }

    /// Sets the averaging method.
    #[inline]
    #[must_use]
    pub fn ma_type(mut self, ma_type: MaType) -> Self {
        self.ma_type = ma_type;
        self
    }
}

impl IndicatorConfigBuilder<MaConfig> for MaConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length);
        self
    }

    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> MaConfig {
        MaConfig {
            length: self.length.expect("length is required"),
            source: self.source,
            ma_type: self.ma_type,
        }
    }
}

/// Moving average of a bar series.
///
/// Extracts the configured [`PriceSource`] from each bar and feeds it to a
/// [`MovingAverage`] of the configured [`MaType`]. Returns `None` until
/// `length` bars have been seen.
///
/// Supports live repainting: feeding a bar with the same `open_time`
/// replaces the current value without advancing the window.
///
/// # Example
///
/// ```rust
/// use ma_slope::{Ma, MaConfig};
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
/// let mut ma = Ma::new(MaConfig::close(NonZero::new(3).unwrap()));
///
/// assert_eq!(ma.compute(&Bar(10.0, 1)), None);
/// assert_eq!(ma.compute(&Bar(20.0, 2)), None);
/// assert_eq!(ma.compute(&Bar(30.0, 3)), Some(20.0));
/// ```
#[derive(Clone, Debug)]
pub struct Ma {
    config: MaConfig,
    clock: BarClock,
    average: MovingAverage,
    current: Option<Price>,
}

impl Indicator for Ma {
    type Config = MaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            clock: BarClock::default(),
            average: MovingAverage::new(config.ma_type, config.length),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, kline: &impl Ohlcv) -> Option<Price> {
        let price = self.config.source.extract(kline);

        let (event, _) = self.clock.tick(kline);
        self.current = event.feed(&mut self.average, price);

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Ma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MA({}, {}, {})",
            self.config.ma_type, self.config.length, self.config.source
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, bar, nz};

    fn sma(length: usize) -> Ma {
        Ma::new(MaConfig::close(nz(length)))
    }

    fn ma(ma_type: MaType, length: usize) -> Ma {
        Ma::new(MaConfig::builder().length(nz(length)).ma_type(ma_type).build())
    }

    mod filling {
        use super::*;

        #[test]
        fn none_until_window_full() {
            let mut ma = sma(3);
            assert_eq!(ma.compute(&bar(10.0, 1)), None);
            assert_eq!(ma.compute(&bar(20.0, 2)), None);
        }

        #[test]
        fn returns_average_when_full() {
            let mut ma = sma(3);
            ma.compute(&bar(10.0, 1));
            ma.compute(&bar(20.0, 2));
            assert_eq!(ma.compute(&bar(30.0, 3)), Some(20.0));
        }
    }

    mod sliding {
        use super::*;

        #[test]
        fn drops_oldest_on_advance() {
            let mut ma = sma(2);
            ma.compute(&bar(10.0, 1));
            ma.compute(&bar(20.0, 2));
            // (20 + 30) / 2 = 25
            assert_eq!(ma.compute(&bar(30.0, 3)), Some(25.0));
        }
    }

    mod repaint {
        use super::*;

        #[test]
        fn updates_current_bar() {
            let mut ma = sma(2);
            ma.compute(&bar(10.0, 1));
            ma.compute(&bar(20.0, 2));
            // (10 + 30) / 2 = 20
            assert_eq!(ma.compute(&bar(30.0, 2)), Some(20.0));
        }

        #[test]
        fn repaint_during_filling() {
            let mut ma = sma(3);
            ma.compute(&bar(10.0, 1));
            ma.compute(&bar(15.0, 1)); // repaint
            assert_eq!(ma.compute(&bar(20.0, 2)), None);
            // (15 + 20 + 30) / 3 = 21.666...
            assert_approx!(ma.compute(&bar(30.0, 3)).unwrap(), 65.0 / 3.0);
        }

        #[test]
        fn exponential_repaint_recomputes_from_previous() {
            let mut ma = ma(MaType::Exponential, 3);
            for (i, v) in [2.0, 4.0, 6.0, 8.0].into_iter().enumerate() {
                ma.compute(&bar(v, i as u64));
            }
            // previous = 4: 12 × 0.5 + 4 × 0.5 = 8
            assert_eq!(ma.compute(&bar(12.0, 3)), Some(8.0));
        }
    }

    mod live_data {
        use super::*;

        #[test]
        fn mixed_open_and_closed_bars() {
            let mut ma = sma(3);

            assert_eq!(ma.compute(&bar(5.0, 1)), None);
            assert_eq!(ma.compute(&bar(3.0, 1)), None); // repaint

            assert_eq!(ma.compute(&bar(6.0, 2)), None);
            assert_eq!(ma.compute(&bar(8.0, 2)), None); // repaint

            // (3 + 8 + 4) / 3 = 5
            assert_eq!(ma.compute(&bar(4.0, 3)), Some(5.0));
            // (3 + 8 + 7) / 3 = 6
            assert_eq!(ma.compute(&bar(7.0, 3)), Some(6.0));
            // (8 + 7 + 9) / 3 = 8
            assert_eq!(ma.compute(&bar(9.0, 4)), Some(8.0));
        }
    }

    mod price_source {
        use super::*;
        use crate::test_util::Bar;

        #[test]
        fn median_source() {
            let mut ma = Ma::new(MaConfig::median(nz(2)));
            ma.compute(&Bar::new(0.0, 20.0, 10.0, 0.0).at(1)); // 15
            // (15 + 25) / 2 = 20
            assert_eq!(ma.compute(&Bar::new(0.0, 30.0, 20.0, 0.0).at(2)), Some(20.0));
        }
    }

    mod weighted {
        use super::*;

        #[test]
        fn weights_latest_bar_heaviest() {
            let mut ma = ma(MaType::Weighted, 2);
            ma.compute(&bar(10.0, 1));
            // (10 + 2 × 40) / 3 = 30
            assert_approx!(ma.compute(&bar(40.0, 2)).unwrap(), 30.0);
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_correctly() {
            assert_eq!(sma(20).to_string(), "MA(Simple, 20, Close)");
        }

        #[test]
        fn config_formats_correctly() {
            let config = MaConfig::close(nz(20));
            assert_eq!(config.to_string(), "MaConfig(Simple, 20, Close)");
        }
    }

    mod clone {
        use super::*;

        #[test]
        fn produces_independent_state() {
            let mut ma = sma(3);
            ma.compute(&bar(10.0, 1));
            ma.compute(&bar(20.0, 2));

            let mut cloned = ma.clone();

            assert_eq!(ma.compute(&bar(30.0, 3)), Some(20.0));
            assert_eq!(cloned.value(), None);
            assert_eq!(cloned.compute(&bar(90.0, 3)), Some(40.0));
        }
    }

    mod config {
        use super::*;
        use std::collections::HashSet;

        #[test]
        fn close_helper_uses_close_source() {
            let config = MaConfig::close(nz(10));
            assert_eq!(*config.source(), PriceSource::Close);
            assert_eq!(config.ma_type(), MaType::Simple);
        }

        #[test]
        #[should_panic(expected = "length is required")]
        fn panics_without_length() {
            let _ = MaConfig::builder().build();
        }

        #[test]
        fn eq_and_hash() {
            let a = MaConfig::close(nz(20));
            let b = MaConfig::close(nz(20));
            let c = MaConfig::builder()
                .length(nz(20))
                .ma_type(MaType::Exponential)
                .build();

            let mut set = HashSet::new();
            set.insert(a);

            assert!(set.contains(&b));
            assert!(!set.contains(&c));
        }

        #[test]
        fn deserializes_with_defaults() {
            let config: MaConfig = serde_json::from_str(r#"{ "length": 5 }"#).unwrap();
            assert_eq!(config, MaConfig::close(nz(5)));
        }

        #[test]
        fn rejects_zero_length() {
            assert!(serde_json::from_str::<MaConfig>(r#"{ "length": 0 }"#).is_err());
        }
    }
}
