//! Producers of one observation per discrete time step.

/// A discrete-time observation generator.
pub trait ObservationSource<T> {
    /// Generate the observation for the next time step.
    fn next_value(&mut self) -> T;

    /// Fill `buffer` with the observations for the next `buffer.len()` time steps.
    fn next_block(&mut self, buffer: &mut [T]) {
        for slot in buffer.iter_mut() {
            *slot = self.next_value();
        }
    }

    /// Forget past observations.
    fn clear(&mut self) {}
}

/// Wraps a closure `FnMut() -> T` as a source.
pub struct FnSource<F>(pub F);

impl<T, F> ObservationSource<T> for FnSource<F>
where
    F: FnMut() -> T,
{
    fn next_value(&mut self) -> T {
        (self.0)()
    }
}

/// Replays a fixed sequence, then repeats its last value.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplaySource<T> {
    values: Vec<T>,
    position: usize,
    fallback: T,
}

impl<T: Copy> ReplaySource<T> {
    /// `fallback` is only produced when `values` is empty.
    pub fn new(values: Vec<T>, fallback: T) -> Self {
        Self {
            values,
            position: 0,
            fallback,
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.position)
    }
}

impl<T: Copy> ObservationSource<T> for ReplaySource<T> {
    fn next_value(&mut self) -> T {
        let value = match self.values.get(self.position) {
            Some(&x) => x,
            None => self.values.last().copied().unwrap_or(self.fallback),
        };
        self.position += 1;
        value
    }

    fn clear(&mut self) {
        self.position = 0;
    }
}
