use crate::{Average, Ohlcv, Timestamp};

/// What a bar fed into an indicator means for its state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BarEvent {
    /// First time this `open_time` is seen: advance to the next index.
    NewBar,
    /// Same `open_time` as the previous call: recompute the current index.
    Amend,
}

impl BarEvent {
    /// Pushes `value` into `average` on a new bar, replaces the newest
    /// sample on an amendment.
    #[inline]
    pub(crate) fn feed(self, average: &mut impl Average, value: f64) -> Option<f64> {
        match self {
            Self::NewBar => average.push(value),
            Self::Amend => average.replace(value),
        }
    }
}

/// Tracks bar boundaries and the 0-based index of the current bar.
#[derive(Clone, Debug, Default)]
pub(crate) struct BarClock {
    last_open_time: Option<Timestamp>,
    index: Option<usize>,
}

impl BarClock {
    /// Classifies `ohlcv` and returns the index it belongs to.
    #[inline]
    pub(crate) fn tick(&mut self, ohlcv: &impl Ohlcv) -> (BarEvent, usize) {
        debug_assert!(
            self.last_open_time.is_none_or(|t| t <= ohlcv.open_time()),
            "open_time must be non-decreasing: last={}, got={}",
            self.last_open_time.unwrap_or(0),
            ohlcv.open_time(),
        );

        match self.index {
            Some(index) if self.last_open_time.is_some_and(|t| t == ohlcv.open_time()) => {
                (BarEvent::Amend, index)
            }
            _ => {
                let index = self.index.map_or(0, |i| i + 1);
                self.last_open_time = Some(ohlcv.open_time());
                self.index = Some(index);
                (BarEvent::NewBar, index)
            }
        }
    }
}
