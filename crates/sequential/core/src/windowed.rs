//! Window-limited statistics.
//!
//! A [`WindowedStatistic`] owns a [`SlidingWindow`] and delegates the
//! recomputation of the statistic to a [`WindowRule`]. While fewer than `L`
//! observations have been seen, the recomputed value is passed through a
//! [`TimedTransform`] before it is returned.

use crate::error::{SequentialError, SequentialResult};
use crate::record::RecordedStatistic;
use crate::statistic::Statistic;
use crate::transform::{IdentityTransform, TimedTransform};
use crate::value::Value;
use crate::window::SlidingWindow;

/// Recomputes a statistic from the current window contents.
pub trait WindowRule<T: Value> {
    /// Name used as the `"type"` tag of persisted records.
    const NAME: &'static str;

    /// Called right after a value has been pushed into `window`.
    fn on_history_updated(&mut self, window: &SlidingWindow<T>) -> T;

    /// Called after the window has been cleared.
    fn on_reset(&mut self) {}
}

/// Sliding window + update rule + transient-period transform.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowedStatistic<T, R, F = IdentityTransform> {
    window: SlidingWindow<T>,
    rule: R,
    transform: F,
    count: usize,
}

impl<T, R> WindowedStatistic<T, R, IdentityTransform>
where
    T: Value,
    R: WindowRule<T> + Default,
{
    /// Statistic over a window of `window_size` observations, no transient transform.
    pub fn new(window_size: usize) -> SequentialResult<Self> {
        Self::with_transform(window_size, R::default(), IdentityTransform)
    }
}

impl<T, R, F> WindowedStatistic<T, R, F>
where
    T: Value,
    R: WindowRule<T>,
    F: TimedTransform<T>,
{
    pub fn with_transform(window_size: usize, rule: R, transform: F) -> SequentialResult<Self> {
        Ok(Self {
            window: SlidingWindow::new(window_size)?,
            rule,
            transform,
            count: 0,
        })
    }

    /// Window size `L`.
    pub fn window_size(&self) -> usize {
        self.window.len()
    }

    pub fn window(&self) -> &SlidingWindow<T> {
        &self.window
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn transform(&self) -> &F {
        &self.transform
    }

    /// Number of observations since construction or the last reset.
    pub fn count_observations(&self) -> usize {
        self.count
    }

    fn push_and_recompute(&mut self, value: T) -> T {
        self.window.push(value);
        let raw = self.rule.on_history_updated(&self.window);
        self.count += 1;
        raw
    }
}

impl<T, R, F> Statistic<T> for WindowedStatistic<T, R, F>
where
    T: Value,
    R: WindowRule<T>,
    F: TimedTransform<T>,
{
    fn name(&self) -> &'static str {
        R::NAME
    }

    fn observe(&mut self, value: T) -> T {
        let time = self.count;
        let raw = self.push_and_recompute(value);
        if time < self.window.len() {
            self.transform.apply(time, raw)
        } else {
            raw
        }
    }

    fn observe_block(&mut self, values: &[T]) -> Vec<T> {
        let warm_up = self
            .window
            .len()
            .saturating_sub(self.count)
            .min(values.len());
        let (transient, steady) = values.split_at(warm_up);

        let mut statistics = Vec::with_capacity(values.len());
        for &x in transient {
            let time = self.count;
            let raw = self.push_and_recompute(x);
            statistics.push(self.transform.apply(time, raw));
        }
        for &x in steady {
            statistics.push(self.push_and_recompute(x));
        }
        statistics
    }

    fn reset(&mut self) {
        self.window.clear();
        self.rule.on_reset();
        self.count = 0;
    }
}

impl<T, R, F> RecordedStatistic<T> for WindowedStatistic<T, R, F>
where
    T: Value,
    R: WindowRule<T> + Default,
    F: TimedTransform<T> + Default,
{
    const NAME: &'static str = R::NAME;

    fn recorded_window(&self) -> Option<usize> {
        Some(self.window.len())
    }

    fn from_window(window: Option<usize>) -> SequentialResult<Self> {
        let size = window.ok_or_else(|| SequentialError::InvalidParameter {
            parameter: "window".into(),
            reason: format!("{} requires a window size", R::NAME),
        })?;
        Self::with_transform(size, R::default(), F::default())
    }
}
