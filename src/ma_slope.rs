use std::{fmt::Display, num::NonZero};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ma, MaConfig, MaType,
    MovingAverage, Ohlcv, PriceSource, SimpleAverage, Threshold,
    bar_clock::{BarClock, BarEvent},
    classify, percent_change,
};

const DEFAULT_PERIOD: NonZero<usize> = NonZero::new(14).unwrap();
const NO_SMOOTHING: NonZero<usize> = NonZero::new(1).unwrap();

/// Configuration for the moving average slope indicator ([`MaSlope`]).
///
/// The [`length`](IndicatorConfig::length) of this config is the period of
/// the moving average whose slope is measured.
///
/// # Warm-up
///
/// - Bars `0..period` are warm-up and emit neutral output.
/// - With smoothing enabled, the smoothed slope replaces the raw slope from
///   bar [`smoothing_warm_up`](Self::smoothing_warm_up) onward.
/// - The MA line is defined from bar
///   [`ma_line_warm_up`](Self::ma_line_warm_up) onward.
///
/// # Example
///
/// ```
/// use ma_slope::{IndicatorConfig, IndicatorConfigBuilder, MaSlopeConfig};
/// use std::num::NonZero;
///
/// let config = MaSlopeConfig::builder()
///     .length(NonZero::new(14).unwrap())
///     .smoothing_period(NonZero::new(5).unwrap())
///     .build();
///
/// assert_eq!(config.length(), 14);
/// assert_eq!(config.smoothing_warm_up(), 18);
/// assert_eq!(config.ma_line_warm_up(), 31);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MaSlopeConfig {
    period: NonZero<usize>,
    ma_type: MaType,
    threshold: Threshold,
    show_ma_line: bool,
    ma_line_period: NonZero<usize>,
    ma_line_type: MaType,
    source: PriceSource,
    smoothing_period: NonZero<usize>,
    show_zero_line: bool,
}

impl IndicatorConfig for MaSlopeConfig {
    type Builder = MaSlopeConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MaSlopeConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.period.get()
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl MaSlopeConfig {
    /// Averaging method of the measured moving average.
    #[inline]
    #[must_use]
    pub fn ma_type(&self) -> MaType {
        self.ma_type
    }

    /// Minimum absolute slope drawn at full height.
    #[inline]
    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    #[inline]
    #[must_use]
    pub fn show_ma_line(&self) -> bool {
        self.show_ma_line
    }

    /// Period of the moving average drawn over the slope.
    #[inline]
    #[must_use]
    pub fn ma_line_period(&self) -> usize {
        self.ma_line_period.get()
    }

    #[inline]
    #[must_use]
    pub fn ma_line_type(&self) -> MaType {
        self.ma_line_type
    }

    /// Period of the simple average applied to the raw slope. `1` disables
    /// smoothing.
    #[inline]
    #[must_use]
    pub fn smoothing_period(&self) -> usize {
        self.smoothing_period.get()
    }

    #[inline]
    #[must_use]
    pub fn is_smoothed(&self) -> bool {
        self.smoothing_period.get() > 1
    }

    #[inline]
    #[must_use]
    pub fn show_zero_line(&self) -> bool {
        self.show_zero_line
    }

    /// First bar index at which the smoothed slope is used:
    /// `period + smoothing_period − 1`.
    #[inline]
    #[must_use]
    pub fn smoothing_warm_up(&self) -> usize {
        self.period.get() + self.smoothing_period.get() - 1
    }

    /// First bar index at which the MA line is defined:
    /// `period + ma_line_period − 1`, plus `smoothing_period − 1` when
    /// smoothing is enabled.
    #[inline]
    #[must_use]
    pub fn ma_line_warm_up(&self) -> usize {
        let required = self.period.get() + self.ma_line_period.get() - 1;

        if self.is_smoothed() {
            required + self.smoothing_period.get() - 1
        } else {
            required
        }
    }

    /// Default settings with a custom period.
    #[must_use]
    pub fn with_period(period: NonZero<usize>) -> Self {
        Self::builder().length(period).build()
    }
}

impl Default for MaSlopeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for MaSlopeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MaSlopeConfig({}, {}, {}, {}, smoothing {})",
            self.ma_type, self.period, self.source, self.threshold, self.smoothing_period
        )
    }
}

/// Builder for [`MaSlopeConfig`].
///
/// Defaults: period = 14, method = [`MaType::Simple`], threshold = 0.1%,
/// MA line shown with period 14 and [`MaType::Simple`],
/// source = [`PriceSource::Close`], smoothing = 1 (off), zero line shown.
pub struct MaSlopeConfigBuilder {
    period: NonZero<usize>,
    ma_type: MaType,
    threshold: Threshold,
    show_ma_line: bool,
    ma_line_period: NonZero<usize>,
    ma_line_type: MaType,
    source: PriceSource,
    smoothing_period: NonZero<usize>,
    show_zero_line: bool,
}

impl MaSlopeConfigBuilder {
    fn new() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            ma_type: MaType::Simple,
            threshold: Threshold::default(),
            show_ma_line: true,
            ma_line_period: DEFAULT_PERIOD,
            ma_line_type: MaType::Simple,
            source: PriceSource::Close,
            smoothing_period: NO_SMOOTHING,
            show_zero_line: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn ma_type(mut self, ma_type: MaType) -> Self {
        self.ma_type = ma_type;
        self
    }

    #[inline]
    #[must_use]
    pub fn threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    #[inline]
    #[must_use]
    pub fn show_ma_line(mut self, show: bool) -> Self {
        self.show_ma_line = show;
        self
    }

    #[inline]
    #[must_use]
    pub fn ma_line_period(mut self, period: NonZero<usize>) -> Self {
        self.ma_line_period = period;
        self
    }

    #[inline]
    #[must_use]
    pub fn ma_line_type(mut self, ma_type: MaType) -> Self {
        self.ma_line_type = ma_type;
        self
    }

    #[inline]
    #[must_use]
    pub fn smoothing_period(mut self, period: NonZero<usize>) -> Self {
        self.smoothing_period = period;
        self
    }

    #[inline]
    #[must_use]
    pub fn show_zero_line(mut self, show: bool) -> Self {
        self.show_zero_line = show;
        self
    }
}

impl IndicatorConfigBuilder<MaSlopeConfig> for MaSlopeConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.period = length;
        self
    }

    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> MaSlopeConfig {
        MaSlopeConfig {
            period: self.period,
            ma_type: self.ma_type,
            threshold: self.threshold,
            show_ma_line: self.show_ma_line,
            ma_line_period: self.ma_line_period,
            ma_line_type: self.ma_line_type,
            source: self.source,
            smoothing_period: self.smoothing_period,
            show_zero_line: self.show_zero_line,
        }
    }
}

/// Which slope a bar's histogram is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlopePhase {
    /// Fewer than `period` bars before this one: neutral output.
    WarmUp,
    /// Raw percentage change of the moving average.
    ActiveRaw,
    /// Simple average of the raw slope over `smoothing_period` bars.
    ActiveSmoothed,
}

impl Display for SlopePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// [`MaSlope`] output for a single bar.
///
/// `positive` and `negative` are never both non-zero; `positive ≥ 0` and
/// `negative ≤ 0`. The MA line and zero line are `None` when undefined or
/// hidden, which consumers must not plot as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaSlopeValue {
    index: usize,
    phase: SlopePhase,
    slope: Option<f64>,
    positive: f64,
    negative: f64,
    ma_line: Option<f64>,
    zero_line: Option<f64>,
}

impl MaSlopeValue {
    /// 0-based index of the bar this value belongs to.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> SlopePhase {
        self.phase
    }

    /// Processed slope in percent, `None` during warm-up.
    #[inline]
    #[must_use]
    pub fn slope(&self) -> Option<f64> {
        self.slope
    }

    /// Positive histogram channel.
    #[inline]
    #[must_use]
    pub fn positive(&self) -> f64 {
        self.positive
    }

    /// Negative histogram channel.
    #[inline]
    #[must_use]
    pub fn negative(&self) -> f64 {
        self.negative
    }

    /// Moving average of the processed slope.
    #[inline]
    #[must_use]
    pub fn ma_line(&self) -> Option<f64> {
        self.ma_line
    }

    #[inline]
    #[must_use]
    pub fn zero_line(&self) -> Option<f64> {
        self.zero_line
    }
}

impl Display for MaSlopeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MaSlope[{}](+: {}, -: {}, ma: ",
            self.index, self.positive, self.negative
        )?;
        match self.ma_line {
            Some(ma_line) => write!(f, "{ma_line})"),
            None => write!(f, "n/a)"),
        }
    }
}

/// Moving average slope (MA Slope).
///
/// Measures the bar-to-bar percentage change of a moving average of the
/// configured price source and splits it into a positive and a negative
/// histogram channel:
///
/// ```text
/// slope    = (MA[i] − MA[i−1]) / MA[i−1] × 100
/// positive = slope       if slope ≥  threshold, DOT_SIZE if 0 < slope < threshold
/// negative = slope       if slope ≤ −threshold, −DOT_SIZE if −threshold < slope ≤ 0
/// ```
///
/// Optionally the raw slope is smoothed with a simple average over
/// `smoothing_period` bars, and a second moving average of the slope is
/// reported as the MA line.
///
/// Unlike the other indicators, `compute` returns a value for every bar:
/// warm-up bars carry zeroed channels and an undefined MA line.
///
/// Supports live repainting: feeding a bar with the same `open_time`
/// recomputes the current bar in place. Repainting the same data twice
/// yields identical output.
///
/// # Example
///
/// ```
/// use ma_slope::{IndicatorConfig, IndicatorConfigBuilder, MaSlope, MaSlopeConfig, SlopePhase};
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
/// let mut slope = MaSlope::new(config);
///
/// let first = slope.compute(&Bar(100.0, 1)).unwrap();
/// assert_eq!(first.phase(), SlopePhase::WarmUp);
/// assert_eq!((first.positive(), first.negative()), (0.0, 0.0));
///
/// // MA rises 100 → 101: +1%
/// let second = slope.compute(&Bar(101.0, 2)).unwrap();
/// assert_eq!((second.positive(), second.negative()), (1.0, 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct MaSlope {
    config: MaSlopeConfig,
    clock: BarClock,
    ma: Ma,
    previous_ma: Option<f64>,
    smoother: Option<SimpleAverage>,
    ma_line: MovingAverage,
    current: Option<MaSlopeValue>,
}

impl MaSlope {
    /// The config this indicator was built with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MaSlopeConfig {
        &self.config
    }

    fn raw_slope(&self, index: usize, current_ma: Option<f64>) -> f64 {
        if index < self.config.period.get() {
            return 0.0;
        }

        match (current_ma, self.previous_ma) {
            (Some(current), Some(previous)) => percent_change(current, previous),
            _ => 0.0,
        }
    }

    fn phase(&self, index: usize) -> SlopePhase {
        if index < self.config.period.get() {
            SlopePhase::WarmUp
        } else if self.config.is_smoothed() && index >= self.config.smoothing_warm_up() {
            SlopePhase::ActiveSmoothed
        } else {
            SlopePhase::ActiveRaw
        }
    }

    fn log_transitions(&self, next: &MaSlopeValue) {
        let previous = self.current.as_ref();

        if previous.is_none_or(|p| p.phase != next.phase) {
            trace!(index = next.index, phase = %next.phase, "ma slope phase changed");
        }
        if next.ma_line.is_some() && previous.is_none_or(|p| p.ma_line.is_none()) {
            trace!(index = next.index, "ma slope line visible");
        }
    }
}

impl Indicator for MaSlope {
    type Config = MaSlopeConfig;
    type Output = MaSlopeValue;

    fn new(config: Self::Config) -> Self {
        debug!(%config, "creating ma slope indicator");

        let ma_config = MaConfig::builder()
            .length(config.period)
            .source(config.source)
            .ma_type(config.ma_type)
            .build();

        Self {
            config,
            clock: BarClock::default(),
            ma: Ma::new(ma_config),
            previous_ma: None,
            smoother: config
                .is_smoothed()
                .then(|| SimpleAverage::new(config.smoothing_period)),
            ma_line: MovingAverage::new(config.ma_line_type, config.ma_line_period),
            current: None,
        }
    }

    fn compute(&mut self, kline: &impl Ohlcv) -> Option<MaSlopeValue> {
        let (event, index) = self.clock.tick(kline);

        if event == BarEvent::NewBar {
            self.previous_ma = self.ma.value();
        }
        let current_ma = self.ma.compute(kline);

        let raw = self.raw_slope(index, current_ma);
        let smoothed = self
            .smoother
            .as_mut()
            .and_then(|smoother| event.feed(smoother, raw));

        let phase = self.phase(index);
        let slope = match phase {
            SlopePhase::WarmUp => 0.0,
            SlopePhase::ActiveRaw => raw,
            SlopePhase::ActiveSmoothed => smoothed.unwrap_or(raw),
        };

        let ma_line = event.feed(&mut self.ma_line, slope).filter(|_| {
            self.config.show_ma_line && index >= self.config.ma_line_warm_up()
        });

        let (positive, negative) = match phase {
            SlopePhase::WarmUp => (0.0, 0.0),
            _ => classify(slope, self.config.threshold),
        };

        let value = MaSlopeValue {
            index,
            phase,
            slope: (phase != SlopePhase::WarmUp).then_some(slope),
            positive,
            negative,
            ma_line,
            zero_line: self.config.show_zero_line.then_some(0.0),
        };

        self.log_transitions(&value);
        self.current = Some(value);

        self.current
    }

    #[inline]
    fn value(&self) -> Option<MaSlopeValue> {
        self.current
    }
}

impl Display for MaSlope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MASlope({}, {}, {})",
            self.config.period, self.config.ma_type, self.config.source
        )
    }
}
