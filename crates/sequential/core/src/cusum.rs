//! Classical CUSUM statistic: `R_n = max(0, R_{n-1}) + X_n`.

use crate::error::{SequentialError, SequentialResult};
use crate::record::RecordedStatistic;
use crate::statistic::Statistic;
use crate::value::Value;

/// Unbounded-window CUSUM with O(1) state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cusum<T> {
    latest: T,
}

impl<T: Value> Cusum<T> {
    pub const NAME: &'static str = "CUSUM";

    pub fn new() -> Self {
        Self { latest: T::ZERO }
    }

    /// Most recent statistic value.
    pub fn latest(&self) -> T {
        self.latest
    }
}

impl<T: Value> Default for Cusum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Value> Statistic<T> for Cusum<T> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn observe(&mut self, value: T) -> T {
        let carried = if self.latest < T::ZERO { T::ZERO } else { self.latest };
        self.latest = carried + value;
        self.latest
    }

    fn reset(&mut self) {
        self.latest = T::ZERO;
    }
}

impl<T: Value> RecordedStatistic<T> for Cusum<T> {
    const NAME: &'static str = "CUSUM";

    fn recorded_window(&self) -> Option<usize> {
        None
    }

    fn from_window(window: Option<usize>) -> SequentialResult<Self> {
        match window {
            None | Some(0) => Ok(Self::new()),
            Some(size) => Err(SequentialError::InvalidParameter {
                parameter: "window".into(),
                reason: format!("CUSUM has an unbounded window, got {size}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_negative_history() {
        let mut s = Cusum::<i64>::new();
        assert_eq!(s.observe(-3), -3);
        assert_eq!(s.observe(2), 2);
        assert_eq!(s.observe(1), 3);
    }

    #[test]
    fn matches_reference_stream() {
        let mut s = Cusum::<i64>::new();
        let out = s.observe_block(&[2, 3, -7, 1, 2, 3, 4, 5, 5, -5]);
        assert_eq!(out, vec![2, 5, -2, 1, 3, 6, 10, 15, 20, 15]);
    }

    #[test]
    fn reset_zeroes_state() {
        let mut s = Cusum::<f64>::new();
        s.observe(4.5);
        s.reset();
        assert_eq!(s.latest(), 0.0);
        assert_eq!(s, Cusum::default());
    }

    #[test]
    fn rejects_nonzero_window() {
        assert!(<Cusum<f64> as RecordedStatistic<f64>>::from_window(Some(0)).is_ok());
        let err = <Cusum<f64> as RecordedStatistic<f64>>::from_window(Some(5)).unwrap_err();
        assert!(matches!(err, SequentialError::InvalidParameter { .. }));
    }

    #[test]
    fn integer_sums_exact_near_range_limit() {
        let half = i64::MAX / 2;
        let mut s = Cusum::<i64>::new();
        s.observe(half);
        assert_eq!(s.observe(half), i64::MAX - 1);
        assert_eq!(s.observe(-half), half);

        let mut f = Cusum::<f64>::new();
        f.observe(f64::MAX);
        assert_eq!(f.observe(f64::MAX), f64::INFINITY);
    }
}
