//! Detection statistics: rules that turn an observation stream into a
//! statistic stream.

use crate::error::{SequentialError, SequentialResult};
use crate::record::RecordedStatistic;
use crate::value::Value;

/// A stateful detection statistic.
///
/// Implementations must be driven in strict time order; `reset` returns the
/// statistic to its freshly constructed state without touching its
/// configuration.
pub trait Statistic<T: Value> {
    /// Name used as the `"type"` tag of persisted records.
    fn name(&self) -> &'static str;

    /// Observe a single value and return the updated statistic.
    fn observe(&mut self, value: T) -> T;

    /// Observe a block of values and return the statistic after each of them.
    fn observe_block(&mut self, values: &[T]) -> Vec<T> {
        values.iter().map(|&x| self.observe(x)).collect()
    }

    /// Clear runtime state.
    fn reset(&mut self);
}

/// The observation itself is the statistic: `R_n = X_n`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawObservation;

impl RawObservation {
    pub const NAME: &'static str = "one-sided";
}

impl<T: Value> Statistic<T> for RawObservation {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn observe(&mut self, value: T) -> T {
        value
    }

    fn observe_block(&mut self, values: &[T]) -> Vec<T> {
        values.to_vec()
    }

    fn reset(&mut self) {}
}

impl<T: Value> RecordedStatistic<T> for RawObservation {
    const NAME: &'static str = "one-sided";

    fn recorded_window(&self) -> Option<usize> {
        None
    }

    fn from_window(window: Option<usize>) -> SequentialResult<Self> {
        match window {
            None | Some(0) => Ok(RawObservation),
            Some(size) => Err(SequentialError::InvalidParameter {
                parameter: "window".into(),
                reason: format!("raw observations have no window, got {size}"),
            }),
        }
    }
}
