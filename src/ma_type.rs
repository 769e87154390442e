use crate::ParseError;

use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Moving average method.
///
/// Selects the accumulator used by [`MovingAverage`](crate::MovingAverage).
/// [`Simple`](MaType::Simple) is the default.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaType {
    /// Arithmetic mean of the last `length` values.
    #[default]
    Simple,
    /// Exponential smoothing with `α = 2 / (length + 1)`, seeded with the
    /// simple mean of the first `length` values.
    Exponential,
    /// Linearly weighted mean, newest value weighted `length`, oldest `1`.
    Weighted,
}

impl Display for MaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for MaType {
    type Err = ParseError;

    /// Case-insensitive. Accepts the variant names plus `sma`, `ema` and
    /// `wma`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" | "sma" => Ok(Self::Simple),
            "exponential" | "ema" => Ok(Self::Exponential),
            "weighted" | "wma" => Ok(Self::Weighted),
            _ => Err(ParseError::UnknownMaType(s.to_owned())),
        }
    }
}

impl MaType {
    /// Parses `s`, falling back to [`MaType::Simple`] when the name is not
    /// recognised.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}
