//! Persisted form of stopping-time configuration.
//!
//! Only structural configuration is persisted: the statistic's type tag, its
//! window size where it has one, and the thresholds. Runtime state is never
//! written out.

use serde::{Deserialize, Serialize};

use crate::error::{SequentialError, SequentialResult};
use crate::statistic::Statistic;
use crate::value::Value;

// ── Statistic records ──────────────────────────────────────────────

/// A statistic that can be rebuilt from its persisted type tag and window.
pub trait RecordedStatistic<T: Value>: Statistic<T> + Sized {
    /// The `"type"` tag written to and expected from records.
    const NAME: &'static str;

    /// Window size, or `None` for statistics without a window.
    fn recorded_window(&self) -> Option<usize>;

    /// Rebuild a freshly reset statistic.
    fn from_window(window: Option<usize>) -> SequentialResult<Self>;
}

/// `{"type": .., "window": .., "thresholds": [..]}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoppingTimeRecord<T> {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<usize>,
    pub thresholds: Vec<T>,
}

// ── Parallel records ───────────────────────────────────────────────

/// `{"type": "parallel", "vertical thresholds": [..], "horizontal thresholds": [..]}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParallelRecord<T> {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "vertical thresholds")]
    pub vertical_thresholds: Vec<T>,
    #[serde(rename = "horizontal thresholds")]
    pub horizontal_thresholds: Vec<T>,
}

/// Fail with [`SequentialError::TypeMismatch`] unless `found == expected`.
pub(crate) fn expect_kind(expected: &str, found: &str) -> SequentialResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(SequentialError::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        })
    }
}
