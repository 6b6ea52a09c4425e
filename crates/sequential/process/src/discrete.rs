//! Lockstep fan-out of one observation stream to many observers.

use sequential_core::Observer;
use tracing::{debug, trace};

use crate::source::ObservationSource;

/// Counts generated observations and forwards each of them to every
/// registered observer, in registration order.
///
/// Observers are borrowed for `'a`; drop the process (or call
/// [`DiscreteProcess::clear_observers`]) to read their results.
pub struct DiscreteProcess<'a, T: Copy, P> {
    source: P,
    count: usize,
    observers: Vec<&'a mut dyn Observer<T>>,
}

impl<'a, T, P> DiscreteProcess<'a, T, P>
where
    T: Copy + Default,
    P: ObservationSource<T>,
{
    pub fn new(source: P) -> Self {
        Self {
            source,
            count: 0,
            observers: Vec::new(),
        }
    }

    /// Register an observer; it sees every observation generated from now on.
    pub fn register_observer(&mut self, observer: &'a mut dyn Observer<T>) {
        self.observers.push(observer);
        debug!(observers = self.observers.len(), "observer registered");
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Number of observations generated since construction or the last clear.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    pub fn into_source(self) -> P {
        self.source
    }

    /// Generate one observation and forward it.
    pub fn next_value(&mut self) -> T {
        let value = self.source.next_value();
        self.count += 1;
        for observer in self.observers.iter_mut() {
            observer.observe(value);
        }
        value
    }

    /// Generate `buffer.len()` observations into `buffer` and forward them as one block.
    pub fn next_block(&mut self, buffer: &mut [T]) {
        self.source.next_block(buffer);
        self.count += buffer.len();
        for observer in self.observers.iter_mut() {
            observer.observe_block(buffer);
        }
    }

    /// Generate a fresh block of `length` observations.
    pub fn take_block(&mut self, length: usize) -> Vec<T> {
        let mut buffer = vec![T::default(); length];
        self.next_block(&mut buffer);
        buffer
    }

    /// Purge past observations and reset every observer. Registrations survive.
    pub fn clear(&mut self) {
        self.source.clear();
        self.count = 0;
        for observer in self.observers.iter_mut() {
            observer.reset();
        }
        trace!(observers = self.observers.len(), "process cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ReplaySource;
    use sequential_core::{
        Cusum, FiniteMovingAverage, OneSidedStoppingTime, RawObservation, WindowLimitedCusum,
    };

    const STREAM: [i64; 10] = [2, 3, -7, 1, 2, 3, 4, 5, 5, -5];

    #[test]
    fn fans_out_in_lockstep() {
        let mut cusum = OneSidedStoppingTime::new(Cusum::new(), vec![19_i64]).unwrap();
        let mut fma =
            OneSidedStoppingTime::new(FiniteMovingAverage::new(5).unwrap(), vec![18_i64]).unwrap();
        let mut wl =
            OneSidedStoppingTime::new(WindowLimitedCusum::new(5).unwrap(), vec![14_i64]).unwrap();
        {
            let mut process = DiscreteProcess::new(ReplaySource::new(STREAM.to_vec(), 0));
            process.register_observer(&mut cusum);
            process.register_observer(&mut fma);
            process.register_observer(&mut wl);
            assert_eq!(process.observer_count(), 3);

            for _ in 0..STREAM.len() {
                process.next_value();
            }
            assert_eq!(process.count(), 10);
        }
        assert_eq!(cusum.when(0), 9);
        assert_eq!(fma.when(0), 9);
        assert_eq!(wl.when(0), 8);
    }

    #[test]
    fn block_and_single_agree() {
        let mut single = OneSidedStoppingTime::new(Cusum::new(), vec![4_i64, 12]).unwrap();
        let mut block = OneSidedStoppingTime::new(Cusum::new(), vec![4_i64, 12]).unwrap();
        {
            let mut process = DiscreteProcess::new(ReplaySource::new(STREAM.to_vec(), 0));
            process.register_observer(&mut single);
            for _ in 0..STREAM.len() {
                process.next_value();
            }
        }
        {
            let mut process = DiscreteProcess::new(ReplaySource::new(STREAM.to_vec(), 0));
            process.register_observer(&mut block);
            let values = process.take_block(4);
            assert_eq!(values, vec![2, 3, -7, 1]);
            process.take_block(6);
        }
        assert_eq!(single.when_all(), block.when_all());
        assert_eq!(single.when_all(), &[2, 8]);
        assert_eq!(single.count_observations(), block.count_observations());
    }

    #[test]
    fn clear_resets_source_and_observers() {
        let mut rule = OneSidedStoppingTime::new(RawObservation, vec![2_i64]).unwrap();
        let mut process = DiscreteProcess::new(ReplaySource::new(STREAM.to_vec(), 0));
        process.register_observer(&mut rule);
        process.take_block(3);
        process.clear();
        assert_eq!(process.count(), 0);
        assert_eq!(process.next_value(), 2);
        process.clear_observers();
        assert_eq!(process.observer_count(), 0);
        drop(process);
        assert_eq!(rule.count_observations(), 1);
        assert_eq!(rule.when(0), 0);
    }
}
