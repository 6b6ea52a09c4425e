//! Fixed-capacity circular history of the most recent observations.
//!
//! If `L` is the window size, the layout at time `n` is
//!
//! ```text
//!   ... --- (n - L + 1) --- n --- (n - 1) --- (n - 2) --- ...
//!              oldest     newest
//! ```
//!
//! The newest cursor moves one slot to the left (mod `L`) on every push, so
//! the slot it lands on always holds the value that is about to be discarded.

use crate::error::{SequentialError, SequentialResult};
use crate::value::Value;

/// A bounded circular buffer of exactly `L` values.
///
/// Unlike a growing ring buffer, every slot is always populated: the buffer
/// starts zero-filled and its length never changes after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SlidingWindow<T> {
    history: Vec<T>,
    newest: usize,
}

impl<T: Value> SlidingWindow<T> {
    /// Create a zero-filled window of the given size.
    pub fn new(size: usize) -> SequentialResult<Self> {
        if size == 0 {
            return Err(SequentialError::ZeroWindow);
        }
        Ok(Self {
            history: vec![T::ZERO; size],
            newest: 0,
        })
    }

    /// Overwrite the oldest slot with `value` and make it the newest.
    pub fn push(&mut self, value: T) {
        let len = self.history.len();
        self.newest = (self.newest + len - 1) % len;
        self.history[self.newest] = value;
    }

    /// Window size `L`.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Always false: a window holds at least one slot.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Physical index of the newest value.
    pub fn newest_index(&self) -> usize {
        self.newest
    }

    /// Physical index of the oldest value.
    pub fn oldest_index(&self) -> usize {
        (self.newest + self.history.len() - 1) % self.history.len()
    }

    /// The most recently pushed value.
    pub fn newest(&self) -> T {
        self.history[self.newest]
    }

    /// The value about to be overwritten by the next push.
    pub fn oldest(&self) -> T {
        self.history[self.oldest_index()]
    }

    /// Value pushed `lag` steps ago (`lag = 0` is the newest).
    pub fn lagged(&self, lag: usize) -> Option<T> {
        if lag >= self.history.len() {
            return None;
        }
        Some(self.history[(self.newest + lag) % self.history.len()])
    }

    /// Physical storage, in slot order.
    pub fn as_slice(&self) -> &[T] {
        &self.history
    }

    /// Iterate from the newest value to the oldest.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = T> + '_ {
        let (older, newer) = self.history.split_at(self.newest);
        newer.iter().chain(older.iter()).copied()
    }

    /// Zero-fill every slot and rewind the newest cursor.
    pub fn clear(&mut self) {
        for slot in &mut self.history {
            *slot = T::ZERO;
        }
        self.newest = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_rejected() {
        let err = SlidingWindow::<i64>::new(0).unwrap_err();
        assert_eq!(err, SequentialError::ZeroWindow);
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn starts_zero_filled() {
        let w = SlidingWindow::<f64>::new(4).unwrap();
        assert_eq!(w.len(), 4);
        assert!(w.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn newest_cursor_moves_left() {
        let mut w = SlidingWindow::<i64>::new(3).unwrap();
        w.push(1);
        assert_eq!(w.newest_index(), 2);
        w.push(2);
        assert_eq!(w.newest_index(), 1);
        w.push(3);
        assert_eq!(w.newest_index(), 0);
        w.push(4);
        assert_eq!(w.newest_index(), 2);
        assert_eq!(w.as_slice(), &[3, 2, 4]);
    }

    #[test]
    fn overwrite_discards_oldest() {
        let mut w = SlidingWindow::<i64>::new(3).unwrap();
        for x in 1..=5 {
            w.push(x);
        }
        assert_eq!(w.newest(), 5);
        assert_eq!(w.oldest(), 3);
        let ordered: Vec<i64> = w.iter_newest_first().collect();
        assert_eq!(ordered, vec![5, 4, 3]);
    }

    #[test]
    fn lagged_access() {
        let mut w = SlidingWindow::<i64>::new(3).unwrap();
        w.push(10);
        w.push(20);
        assert_eq!(w.lagged(0), Some(20));
        assert_eq!(w.lagged(1), Some(10));
        assert_eq!(w.lagged(2), Some(0));
        assert_eq!(w.lagged(3), None);
    }

    #[test]
    fn single_slot_window() {
        let mut w = SlidingWindow::<i64>::new(1).unwrap();
        w.push(7);
        w.push(8);
        assert_eq!(w.newest(), 8);
        assert_eq!(w.oldest(), 8);
        assert_eq!(w.newest_index(), 0);
    }

    #[test]
    fn clear_rewinds() {
        let mut w = SlidingWindow::<i64>::new(2).unwrap();
        w.push(1);
        w.push(2);
        w.clear();
        assert_eq!(w.newest_index(), 0);
        assert_eq!(w.as_slice(), &[0, 0]);
        assert_eq!(w, SlidingWindow::new(2).unwrap());
    }
}
