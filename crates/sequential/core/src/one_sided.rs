//! One-sided stopping times over a sorted set of thresholds.
//!
//! For a statistic `R_n` and thresholds `b_0 <= b_1 <= ... <= b_{k-1}`, the
//! stopping time for `b_i` is `inf{n >= 1 : R_n > b_i}`. Since crossing `b_i`
//! implies crossing every smaller threshold, a single cursor pointing at the
//! smallest uncrossed threshold is enough to track all of them.

use std::fmt;

use tracing::{debug, trace};

use crate::error::{SequentialError, SequentialResult};
use crate::observer::Observer;
use crate::record::{expect_kind, RecordedStatistic, StoppingTimeRecord};
use crate::statistic::{RawObservation, Statistic};
use crate::value::{sort_ascending, Value};

/// Snapshot hook invoked with the stopping time when thresholds are crossed.
pub type StoppedStatisticFn<T> = Box<dyn FnMut(usize) -> T>;

/// Multi-threshold stopping time driven by a statistic `S`.
pub struct OneSidedStoppingTime<T, S = RawObservation> {
    statistic: S,
    thresholds: Vec<T>,
    when: Vec<usize>,
    stopped_statistics: Vec<Option<T>>,
    first_uncrossed: usize,
    count: usize,
    snapshot: Option<StoppedStatisticFn<T>>,
}

impl<T, S> OneSidedStoppingTime<T, S>
where
    T: Value,
    S: Statistic<T>,
{
    /// Build a stopping time; thresholds are validated then sorted ascending.
    pub fn new(statistic: S, thresholds: impl IntoIterator<Item = T>) -> SequentialResult<Self> {
        let mut thresholds: Vec<T> = thresholds.into_iter().collect();
        if let Some(index) = thresholds.iter().position(|b| !b.is_finite()) {
            return Err(SequentialError::NonFiniteThreshold { index });
        }
        sort_ascending(&mut thresholds);

        let k = thresholds.len();
        debug!(
            statistic = statistic.name(),
            thresholds = k,
            "stopping time configured"
        );
        Ok(Self {
            statistic,
            thresholds,
            when: vec![0; k],
            stopped_statistics: vec![None; k],
            first_uncrossed: 0,
            count: 0,
            snapshot: None,
        })
    }

    /// Capture a secondary statistic at every crossing.
    pub fn with_stopped_statistic(mut self, snapshot: impl FnMut(usize) -> T + 'static) -> Self {
        self.snapshot = Some(Box::new(snapshot));
        self
    }

    /// Observe the next value.
    pub fn observe(&mut self, value: T) {
        if self.is_stopped() {
            self.count += 1;
            return;
        }
        let statistic = self.statistic.observe(value);
        self.check_for_stopping(statistic);
        self.count += 1;
    }

    /// Observe consecutive values; identical to observing them one at a time.
    pub fn observe_block(&mut self, values: &[T]) {
        for (k, &x) in values.iter().enumerate() {
            if self.is_stopped() {
                self.count += values.len() - k;
                return;
            }
            self.observe(x);
        }
    }

    fn check_for_stopping(&mut self, statistic: T) {
        let time = self.count + 1;
        let first = self.first_uncrossed;
        while self.first_uncrossed < self.thresholds.len()
            && statistic > self.thresholds[self.first_uncrossed]
        {
            self.when[self.first_uncrossed] = time;
            self.first_uncrossed += 1;
        }
        if self.first_uncrossed == first {
            return;
        }

        if let Some(snapshot) = self.snapshot.as_mut() {
            let value = snapshot(time);
            for slot in &mut self.stopped_statistics[first..self.first_uncrossed] {
                *slot = Some(value);
            }
        }
        debug!(
            statistic = self.statistic.name(),
            from = first,
            to = self.first_uncrossed,
            time,
            "thresholds crossed"
        );
        if self.is_stopped() {
            debug!(statistic = self.statistic.name(), time, "all thresholds crossed");
        }
    }

    /// Clear runtime state; thresholds and statistic configuration survive.
    pub fn reset(&mut self) {
        self.statistic.reset();
        self.when.iter_mut().for_each(|t| *t = 0);
        self.stopped_statistics.iter_mut().for_each(|s| *s = None);
        self.first_uncrossed = 0;
        self.count = 0;
        trace!(statistic = self.statistic.name(), "stopping time reset");
    }

    /// Whether some threshold is still uncrossed.
    pub fn is_running(&self) -> bool {
        self.first_uncrossed < self.thresholds.len()
    }

    pub fn is_stopped(&self) -> bool {
        !self.is_running()
    }

    /// Thresholds in ascending order.
    pub fn thresholds(&self) -> &[T] {
        &self.thresholds
    }

    /// Stopping time for threshold `index`, or 0 if it has not been crossed.
    pub fn when(&self, index: usize) -> usize {
        self.when.get(index).copied().unwrap_or(0)
    }

    pub fn when_all(&self) -> &[usize] {
        &self.when
    }

    /// Snapshot captured when threshold `index` was crossed.
    pub fn stopped_statistic(&self, index: usize) -> Option<T> {
        self.stopped_statistics.get(index).copied().flatten()
    }

    /// Index of the smallest uncrossed threshold.
    pub fn first_uncrossed_index(&self) -> usize {
        self.first_uncrossed
    }

    pub fn count_observations(&self) -> usize {
        self.count
    }

    pub fn statistic(&self) -> &S {
        &self.statistic
    }
}

// ── Persistence ────────────────────────────────────────────────────

impl<T, S> OneSidedStoppingTime<T, S>
where
    T: Value,
    S: RecordedStatistic<T>,
{
    pub fn to_record(&self) -> StoppingTimeRecord<T> {
        StoppingTimeRecord {
            kind: S::NAME.to_string(),
            window: self.statistic.recorded_window(),
            thresholds: self.thresholds.clone(),
        }
    }

    pub fn from_record(record: StoppingTimeRecord<T>) -> SequentialResult<Self> {
        expect_kind(S::NAME, &record.kind)?;
        let statistic = S::from_window(record.window)?;
        Self::new(statistic, record.thresholds)
    }

    pub fn to_json(&self) -> SequentialResult<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    pub fn from_json(json: &str) -> SequentialResult<Self> {
        let record: StoppingTimeRecord<T> = serde_json::from_str(json)?;
        Self::from_record(record)
    }
}

impl<T, S> Observer<T> for OneSidedStoppingTime<T, S>
where
    T: Value,
    S: Statistic<T>,
{
    fn reset(&mut self) {
        OneSidedStoppingTime::reset(self);
    }

    fn observe(&mut self, value: T) {
        OneSidedStoppingTime::observe(self, value);
    }

    fn observe_block(&mut self, values: &[T]) {
        OneSidedStoppingTime::observe_block(self, values);
    }
}

impl<T: fmt::Debug, S: fmt::Debug> fmt::Debug for OneSidedStoppingTime<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneSidedStoppingTime")
            .field("statistic", &self.statistic)
            .field("thresholds", &self.thresholds)
            .field("when", &self.when)
            .field("first_uncrossed", &self.first_uncrossed)
            .field("count", &self.count)
            .field("snapshot", &self.snapshot.is_some())
            .finish()
    }
}
