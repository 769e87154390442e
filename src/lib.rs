//! Streaming moving-average slope indicator for Rust.
//!
//! [`MaSlope`] accepts any type implementing [`Ohlcv`] and reports, per bar,
//! the percentage change of a moving average split into a positive and a
//! negative histogram channel, an optional moving average of the slope and
//! an optional zero line. Bars are fed one at a time; a bar with the same
//! `open_time` as the previous one amends the current bar in place.
//!
//! The building blocks are public as well: [`Ma`] tracks a moving average of
//! a [`PriceSource`], [`percent_change`] and [`classify`] are the pure slope
//! and histogram steps, and [`MovingAverage`] is the push/replace
//! accumulator behind every average.
//!
//! Indicator types ([`Ma`], [`MaSlope`]) expose [`new`](Ma::new),
//! [`compute`](Ma::compute), and [`value`](Ma::value) as inherent methods,
//! no trait import needed. Import [`Indicator`] only for generic code.

mod bar_clock;
mod classify;
mod ema;
mod error;
mod indicator;
mod ma;
mod ma_slope;
mod ma_type;
mod moving_average;
mod ohlcv;
mod price_source;
mod ring_buffer;
mod series;
mod slope;
mod sma;
mod wma;

pub use crate::error::{ParseError, ThresholdError};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::ohlcv::{Ohlcv, Price, Timestamp};
pub use crate::price_source::PriceSource;

pub use crate::ema::ExponentialAverage;
pub use crate::ma_type::MaType;
pub use crate::moving_average::{Average, MovingAverage};
pub use crate::sma::SimpleAverage;
pub use crate::wma::WeightedAverage;

pub use crate::classify::{DOT_SIZE, Threshold, classify};
pub use crate::slope::percent_change;

pub use crate::ma::{Ma, MaConfig, MaConfigBuilder};
pub use crate::ma_slope::{MaSlope, MaSlopeConfig, MaSlopeConfigBuilder, MaSlopeValue, SlopePhase};
pub use crate::series::MaSlopeSeries;

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, kline: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, kline)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Ma, MaConfig, Price);
impl_indicator_methods!(MaSlope, MaSlopeConfig, MaSlopeValue);

#[cfg(test)]
mod test_util;
