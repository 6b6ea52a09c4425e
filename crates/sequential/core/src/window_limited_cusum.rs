//! CUSUM restricted to the trailing window of `L` observations.

use crate::transform::IdentityTransform;
use crate::value::Value;
use crate::window::SlidingWindow;
use crate::windowed::{WindowRule, WindowedStatistic};

/// Largest partial sum of the `k` most recent observations, `1 <= k <= L`.
///
/// Recomputed from scratch on every call, so each observation costs O(L).
/// Before the window fills, the zero-filled slots do not change the maximum,
/// and the statistic coincides with the unbounded CUSUM.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrailingMaxSum;

impl<T: Value> WindowRule<T> for TrailingMaxSum {
    const NAME: &'static str = "Window-limited CUSUM";

    fn on_history_updated(&mut self, window: &SlidingWindow<T>) -> T {
        let mut values = window.iter_newest_first();
        let Some(newest) = values.next() else {
            return T::ZERO;
        };
        let mut sum = newest;
        let mut best = newest;
        for x in values {
            sum += x;
            best = best.max_of(sum);
        }
        best
    }
}

/// Window-limited CUSUM statistic with an optional transient transform.
pub type WindowLimitedCusum<T, F = IdentityTransform> = WindowedStatistic<T, TrailingMaxSum, F>;
