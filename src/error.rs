use thiserror::Error;

/// Returned by the strict `FromStr` implementations of
/// [`PriceSource`](crate::PriceSource) and [`MaType`](crate::MaType).
///
/// The lenient `parse_or_default` constructors never produce this error;
/// they fall back to the default variant instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown price source: {0:?}")]
    UnknownPriceSource(String),
    #[error("unknown moving average type: {0:?}")]
    UnknownMaType(String),
}

/// Returned when converting an `f64` into a [`Threshold`](crate::Threshold).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ThresholdError {
    #[error("threshold must not be NaN")]
    NaN,
    #[error("threshold must be non-negative, got {0}")]
    Negative(f64),
}
