use crate::{Ohlcv, ParseError, Price};

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Price source extracted from an [`Ohlcv`] bar before feeding into an
/// indicator.
///
/// Each indicator is configured with a `PriceSource` that determines which
/// value (or derived value) to compute on.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    /// Closing price.
    #[default]
    Close,
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Median price: `(high + low) / 2`.
    Median,
    /// Typical price: `(high + low + close) / 3`.
    Typical,
    /// Weighted close: `(high + low + close + close) / 4`.
    Weighted,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for PriceSource {
    type Err = ParseError;

    /// Case-insensitive. Accepts the variant names plus the common
    /// shorthands `hl2`, `hlc3` and `hlcc4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "close" => Ok(Self::Close),
            "open" => Ok(Self::Open),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "median" | "hl2" => Ok(Self::Median),
            "typical" | "hlc3" => Ok(Self::Typical),
            "weighted" | "hlcc4" => Ok(Self::Weighted),
            _ => Err(ParseError::UnknownPriceSource(s.to_owned())),
        }
    }
}

impl PriceSource {
    /// Parses `s`, falling back to [`PriceSource::Close`] when the name is
    /// not recognised.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    #[inline]
    pub(crate) fn extract(self, ohlcv: &impl Ohlcv) -> Price {
        match self {
            Self::Close => ohlcv.close(),
            Self::Open => ohlcv.open(),
            Self::High => ohlcv.high(),
            Self::Low => ohlcv.low(),
            Self::Median => f64::midpoint(ohlcv.high(), ohlcv.low()),
            Self::Typical => (ohlcv.high() + ohlcv.low() + ohlcv.close()) / 3.0,
            Self::Weighted => (ohlcv.high() + ohlcv.low() + ohlcv.close() + ohlcv.close()) / 4.0,
        }
    }
}
