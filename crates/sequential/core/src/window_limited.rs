//! Stopping times driven by a window-limited statistic.
//!
//! The statistic update and the threshold sweep happen inside the same
//! `observe` call, so a new window-limited rule only has to provide a
//! [`WindowRule`].

use crate::error::SequentialResult;
use crate::one_sided::OneSidedStoppingTime;
use crate::transform::{IdentityTransform, TimedTransform};
use crate::value::Value;
use crate::window::SlidingWindow;
use crate::windowed::{WindowRule, WindowedStatistic};

/// One-sided stopping time over a [`WindowedStatistic`].
pub type WindowLimitedStoppingTime<T, R, F = IdentityTransform> =
    OneSidedStoppingTime<T, WindowedStatistic<T, R, F>>;

impl<T, R, F> OneSidedStoppingTime<T, WindowedStatistic<T, R, F>>
where
    T: Value,
    R: WindowRule<T>,
    F: TimedTransform<T>,
{
    /// Window-limited stopping time with a transient transform.
    pub fn window_limited(
        window_size: usize,
        rule: R,
        transform: F,
        thresholds: impl IntoIterator<Item = T>,
    ) -> SequentialResult<Self> {
        let statistic = WindowedStatistic::with_transform(window_size, rule, transform)?;
        Self::new(statistic, thresholds)
    }

    pub fn window_size(&self) -> usize {
        self.statistic().window_size()
    }

    /// Current history, newest cursor included.
    pub fn history(&self) -> &SlidingWindow<T> {
        self.statistic().window()
    }
}
