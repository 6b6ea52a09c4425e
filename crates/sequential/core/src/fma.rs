//! Finite moving average: the sum of the last `L` observations.

use crate::transform::IdentityTransform;
use crate::value::Value;
use crate::window::SlidingWindow;
use crate::windowed::{WindowRule, WindowedStatistic};

/// Sums every slot of the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovingSum;

impl<T: Value> WindowRule<T> for MovingSum {
    const NAME: &'static str = "FMA";

    fn on_history_updated(&mut self, window: &SlidingWindow<T>) -> T {
        window
            .as_slice()
            .iter()
            .fold(T::ZERO, |sum, &x| sum + x)
    }
}

/// FMA statistic with an optional transient transform.
pub type FiniteMovingAverage<T, F = IdentityTransform> = WindowedStatistic<T, MovingSum, F>;
