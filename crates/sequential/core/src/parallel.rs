//! Two one-sided stopping times running in parallel.
//!
//! For a vertical statistic `V_n` with thresholds `b_0 <= ... <= b_{m-1}`
//! and a horizontal statistic `H_n` with thresholds `c_0 <= ... <= c_{n-1}`,
//! cell `(i, j)` stops at `inf{n : V_n > b_i or H_n > c_j}`.
//!
//! ```text
//!            |  c_0   c_1  ...  c_{n-1}   (horizontal)
//!   ---------|---------------------------
//!      b_0   |
//!      b_1   |      which(i, j), when(i, j)
//!      ...   |
//!   b_{m-1}  |
//!   (vertical)
//! ```
//!
//! Crossing `b_i` stops every still-running cell of row `i` at once, and
//! crossing `c_j` stops every still-running cell of column `j`. Each
//! observation therefore costs time proportional to the number of
//! thresholds it crosses, not to the size of the grid.

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{SequentialError, SequentialResult};
use crate::grid::Grid;
use crate::observer::Observer;
use crate::record::{expect_kind, ParallelRecord, RecordedStatistic};
use crate::statistic::{RawObservation, Statistic};
use crate::value::{sort_ascending, Value};

// ── Trigger flags ──────────────────────────────────────────────────

/// Which rule stopped a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerFlags(u8);

impl TriggerFlags {
    pub const NONE: Self = Self(0);
    pub const VERTICAL: Self = Self(1);
    pub const HORIZONTAL: Self = Self(2);
    pub const BOTH: Self = Self(3);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TriggerFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TriggerFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// ── Parallel stopping time ─────────────────────────────────────────

/// Disjunctive stopping time over a grid of threshold pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct ParallelStoppingTime<T, V = RawObservation, H = RawObservation> {
    vertical: V,
    horizontal: H,
    vertical_thresholds: Vec<T>,
    horizontal_thresholds: Vec<T>,
    which: Grid<TriggerFlags>,
    when: Grid<usize>,
    first_uncrossed_vertical: usize,
    first_uncrossed_horizontal: usize,
    count: usize,
}

impl<T, V, H> ParallelStoppingTime<T, V, H>
where
    T: Value,
    V: Statistic<T>,
    H: Statistic<T>,
{
    pub const NAME: &'static str = "parallel";

    /// Build a parallel stopping time; both threshold sets are validated then sorted.
    pub fn new(
        vertical: V,
        horizontal: H,
        vertical_thresholds: impl IntoIterator<Item = T>,
        horizontal_thresholds: impl IntoIterator<Item = T>,
    ) -> SequentialResult<Self> {
        let vertical_thresholds = validated(vertical_thresholds, 0)?;
        let horizontal_thresholds = validated(horizontal_thresholds, vertical_thresholds.len())?;

        let m = vertical_thresholds.len();
        let n = horizontal_thresholds.len();
        debug!(
            vertical = vertical.name(),
            horizontal = horizontal.name(),
            height = m,
            width = n,
            "parallel stopping time configured"
        );
        Ok(Self {
            vertical,
            horizontal,
            vertical_thresholds,
            horizontal_thresholds,
            which: Grid::filled(m, n, TriggerFlags::NONE),
            when: Grid::filled(m, n, 0),
            first_uncrossed_vertical: 0,
            first_uncrossed_horizontal: 0,
            count: 0,
        })
    }

    /// Observe the next `(vertical, horizontal)` pair.
    pub fn observe(&mut self, (v, h): (T, T)) {
        if self.is_stopped() {
            self.count += 1;
            return;
        }
        let v = self.vertical.observe(v);
        let h = self.horizontal.observe(h);
        let time = self.count + 1;

        let m = self.vertical_thresholds.len();
        let n = self.horizontal_thresholds.len();
        let row_start = self.first_uncrossed_vertical;
        let column_start = self.first_uncrossed_horizontal;

        let mut next_row = row_start;
        while next_row < m && v > self.vertical_thresholds[next_row] {
            for j in column_start..n {
                self.which[(next_row, j)] |= TriggerFlags::VERTICAL;
                self.when[(next_row, j)] = time;
            }
            next_row += 1;
        }

        let mut next_column = column_start;
        while next_column < n && h > self.horizontal_thresholds[next_column] {
            for i in row_start..m {
                self.which[(i, next_column)] |= TriggerFlags::HORIZONTAL;
                self.when[(i, next_column)] = time;
            }
            next_column += 1;
        }

        self.first_uncrossed_vertical = next_row;
        self.first_uncrossed_horizontal = next_column;
        self.count += 1;

        if (next_row, next_column) != (row_start, column_start) {
            debug!(
                time,
                rows = next_row - row_start,
                columns = next_column - column_start,
                "parallel thresholds crossed"
            );
            if self.is_stopped() {
                debug!(time, "parallel stopping time decided");
            }
        }
    }

    /// Observe consecutive pairs; identical to observing them one at a time.
    pub fn observe_block(&mut self, values: &[(T, T)]) {
        for (k, &pair) in values.iter().enumerate() {
            if self.is_stopped() {
                self.count += values.len() - k;
                return;
            }
            self.observe(pair);
        }
    }

    /// Observe two equally long blocks, one per statistic.
    pub fn observe_split(&mut self, vertical: &[T], horizontal: &[T]) -> SequentialResult<()> {
        if vertical.len() != horizontal.len() {
            return Err(SequentialError::ShapeMismatch {
                what: "vertical and horizontal blocks".into(),
                left: vertical.len(),
                right: horizontal.len(),
            });
        }
        for (&v, &h) in vertical.iter().zip(horizontal) {
            self.observe((v, h));
        }
        Ok(())
    }

    /// Clear runtime state; thresholds survive.
    pub fn reset(&mut self) {
        self.vertical.reset();
        self.horizontal.reset();
        self.which.fill(TriggerFlags::NONE);
        self.when.fill(0);
        self.first_uncrossed_vertical = 0;
        self.first_uncrossed_horizontal = 0;
        self.count = 0;
        trace!("parallel stopping time reset");
    }

    /// Whether some cell is still running.
    pub fn is_running(&self) -> bool {
        self.first_uncrossed_vertical < self.vertical_thresholds.len()
            && self.first_uncrossed_horizontal < self.horizontal_thresholds.len()
    }

    /// Whether every cell has stopped.
    pub fn is_stopped(&self) -> bool {
        !self.is_running()
    }

    pub fn vertical_thresholds(&self) -> &[T] {
        &self.vertical_thresholds
    }

    pub fn horizontal_thresholds(&self) -> &[T] {
        &self.horizontal_thresholds
    }

    /// Stopping time of cell `(i, j)`, or 0 if it is still running.
    pub fn when(&self, i: usize, j: usize) -> usize {
        self.when.get(i, j).unwrap_or(0)
    }

    pub fn which(&self, i: usize, j: usize) -> TriggerFlags {
        self.which.get(i, j).unwrap_or(TriggerFlags::NONE)
    }

    /// Index of the smallest vertical threshold not yet crossed.
    pub fn first_uncrossed_vertical_index(&self) -> usize {
        self.first_uncrossed_vertical
    }

    /// Index of the smallest horizontal threshold not yet crossed.
    pub fn first_uncrossed_horizontal_index(&self) -> usize {
        self.first_uncrossed_horizontal
    }

    pub fn when_grid(&self) -> &Grid<usize> {
        &self.when
    }

    pub fn which_grid(&self) -> &Grid<TriggerFlags> {
        &self.which
    }

    pub fn count_observations(&self) -> usize {
        self.count
    }

    pub fn vertical_statistic(&self) -> &V {
        &self.vertical
    }

    pub fn horizontal_statistic(&self) -> &H {
        &self.horizontal
    }
}

/// Reject non-finite thresholds, then sort. `offset` shifts reported indices.
fn validated<T: Value>(
    thresholds: impl IntoIterator<Item = T>,
    offset: usize,
) -> SequentialResult<Vec<T>> {
    let mut thresholds: Vec<T> = thresholds.into_iter().collect();
    if let Some(index) = thresholds.iter().position(|b| !b.is_finite()) {
        return Err(SequentialError::NonFiniteThreshold {
            index: offset + index,
        });
    }
    sort_ascending(&mut thresholds);
    Ok(thresholds)
}

// ── Persistence ────────────────────────────────────────────────────

impl<T, V, H> ParallelStoppingTime<T, V, H>
where
    T: Value,
    V: RecordedStatistic<T>,
    H: RecordedStatistic<T>,
{
    pub fn to_record(&self) -> ParallelRecord<T> {
        ParallelRecord {
            kind: Self::NAME.to_string(),
            vertical_thresholds: self.vertical_thresholds.clone(),
            horizontal_thresholds: self.horizontal_thresholds.clone(),
        }
    }

    /// Rebuild from a record.
    ///
    /// The record stores thresholds only, with no tag for either statistic,
    /// so both are rebuilt with `from_window(None)`. A record written by a
    /// rule over CUSUM statistics loads into a rule over raw observations
    /// without error; the caller picks `V` and `H`.
    pub fn from_record(record: ParallelRecord<T>) -> SequentialResult<Self> {
        expect_kind(Self::NAME, &record.kind)?;
        Self::new(
            V::from_window(None)?,
            H::from_window(None)?,
            record.vertical_thresholds,
            record.horizontal_thresholds,
        )
    }

    pub fn to_json(&self) -> SequentialResult<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    pub fn from_json(json: &str) -> SequentialResult<Self> {
        let record: ParallelRecord<T> = serde_json::from_str(json)?;
        Self::from_record(record)
    }
}

impl<T, V, H> Observer<(T, T)> for ParallelStoppingTime<T, V, H>
where
    T: Value,
    V: Statistic<T>,
    H: Statistic<T>,
{
    fn reset(&mut self) {
        ParallelStoppingTime::reset(self);
    }

    fn observe(&mut self, value: (T, T)) {
        ParallelStoppingTime::observe(self, value);
    }

    fn observe_block(&mut self, values: &[(T, T)]) {
        ParallelStoppingTime::observe_block(self, values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cusum::Cusum;

    fn raw(vertical: Vec<i64>, horizontal: Vec<i64>) -> ParallelStoppingTime<i64> {
        ParallelStoppingTime::new(RawObservation, RawObservation, vertical, horizontal).unwrap()
    }

    #[test]
    fn flags_combine() {
        let mut f = TriggerFlags::NONE;
        assert!(f.is_empty());
        f |= TriggerFlags::VERTICAL;
        assert!(f.contains(TriggerFlags::VERTICAL));
        assert!(!f.contains(TriggerFlags::HORIZONTAL));
        assert_eq!(f | TriggerFlags::HORIZONTAL, TriggerFlags::BOTH);
        assert_eq!(TriggerFlags::BOTH.bits(), 3);
    }

    #[test]
    fn thresholds_sorted_per_axis() {
        let rule = raw(vec![5, 1, 2], vec![4, 0]);
        assert_eq!(rule.vertical_thresholds(), &[1, 2, 5]);
        assert_eq!(rule.horizontal_thresholds(), &[0, 4]);
        assert!(rule.is_running());
        assert_eq!(rule.when_grid().height(), 3);
        assert_eq!(rule.when_grid().width(), 2);
    }

    #[test]
    fn non_finite_horizontal_reported_after_vertical() {
        let err = ParallelStoppingTime::new(
            RawObservation,
            RawObservation,
            vec![1.0, 2.0],
            vec![f64::INFINITY],
        )
        .unwrap_err();
        assert_eq!(err, SequentialError::NonFiniteThreshold { index: 2 });
    }

    #[test]
    fn vertical_crossing_stamps_row() {
        let mut rule = raw(vec![1, 3], vec![10, 20]);
        rule.observe((2, 0));
        assert_eq!(rule.when_grid(), &vec![vec![1, 1], vec![0, 0]]);
        assert_eq!(rule.which(0, 0), TriggerFlags::VERTICAL);
        assert_eq!(rule.which(0, 1), TriggerFlags::VERTICAL);
        assert_eq!(rule.which(1, 0), TriggerFlags::NONE);
        assert!(rule.is_running());
    }

    #[test]
    fn simultaneous_crossing_sets_both() {
        let mut rule = raw(vec![0], vec![0]);
        rule.observe((1, 1));
        assert_eq!(rule.which(0, 0), TriggerFlags::BOTH);
        assert_eq!(rule.when(0, 0), 1);
        assert!(rule.is_stopped());
    }

    #[test]
    fn horizontal_skips_rows_already_stopped() {
        let mut rule = raw(vec![0, 10], vec![0, 10]);
        rule.observe((1, -1));
        rule.observe((-1, 1));
        assert_eq!(rule.which(0, 0), TriggerFlags::VERTICAL);
        assert_eq!(rule.when(0, 0), 1);
        assert_eq!(rule.which(1, 0), TriggerFlags::HORIZONTAL);
        assert_eq!(rule.when(1, 0), 2);
        assert_eq!(rule.which(1, 1), TriggerFlags::NONE);
    }

    #[test]
    fn counts_after_decision() {
        let mut rule = raw(vec![0], vec![5]);
        rule.observe_block(&[(1, 0), (9, 9), (9, 9)]);
        assert!(rule.is_stopped());
        assert_eq!(rule.when(0, 0), 1);
        assert_eq!(rule.count_observations(), 3);
    }

    #[test]
    fn split_blocks_must_match() {
        let mut rule = raw(vec![0], vec![0]);
        let err = rule.observe_split(&[1, 2], &[1]).unwrap_err();
        assert!(matches!(err, SequentialError::ShapeMismatch { .. }));
        rule.observe_split(&[-1, 1], &[-1, -1]).unwrap();
        assert_eq!(rule.when(0, 0), 2);
    }

    #[test]
    fn statistics_drive_each_axis() {
        let mut rule =
            ParallelStoppingTime::new(Cusum::new(), Cusum::new(), vec![2_i64], vec![100]).unwrap();
        rule.observe_block(&[(1, 0), (1, 0), (1, 0)]);
        assert_eq!(rule.when(0, 0), 3);
        assert_eq!(rule.vertical_statistic().latest(), 3);
    }

    #[test]
    fn reset_clears_grids() {
        let mut rule = raw(vec![0, 1], vec![0]);
        rule.observe((5, 5));
        rule.reset();
        assert_eq!(rule.when_grid(), &Grid::filled(2, 1, 0));
        assert_eq!(rule.which_grid(), &Grid::filled(2, 1, TriggerFlags::NONE));
        assert_eq!(rule.count_observations(), 0);
        assert_eq!(rule.first_uncrossed_vertical_index(), 0);
        assert_eq!(rule.first_uncrossed_horizontal_index(), 0);
        assert!(rule.is_running());
        assert_eq!(rule.vertical_thresholds(), &[0, 1]);
    }

    #[test]
    fn json_round_trip() {
        let rule = raw(vec![5, 1], vec![4, 0]);
        let json = rule.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"type":"parallel","vertical thresholds":[1,5],"horizontal thresholds":[0,4]}"#
        );
        let back = ParallelStoppingTime::<i64>::from_json(&json).unwrap();
        assert_eq!(back.to_json().unwrap(), json);

        let err = ParallelStoppingTime::<i64>::from_json(
            r#"{"type":"CUSUM","vertical thresholds":[],"horizontal thresholds":[]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SequentialError::TypeMismatch { .. }));
    }

    #[test]
    fn record_carries_no_statistic_tags() {
        let cusum =
            ParallelStoppingTime::new(Cusum::new(), Cusum::new(), vec![3_i64], vec![7]).unwrap();
        let json = cusum.to_json().unwrap();

        let as_raw = ParallelStoppingTime::<i64>::from_json(&json).unwrap();
        assert_eq!(Statistic::<i64>::name(as_raw.vertical_statistic()), "one-sided");
        let as_cusum =
            ParallelStoppingTime::<i64, Cusum<i64>, Cusum<i64>>::from_json(&json).unwrap();
        assert_eq!(Statistic::<i64>::name(as_cusum.vertical_statistic()), "CUSUM");
        assert_eq!(as_raw.to_json().unwrap(), as_cusum.to_json().unwrap());
    }
}
