//! Anything that consumes a discrete-time stream in lockstep with others.

/// A stream consumer driven one time step at a time.
pub trait Observer<X: Copy> {
    /// Return to the freshly constructed state, keeping configuration.
    fn reset(&mut self);

    /// Observe the value for the next time step.
    fn observe(&mut self, value: X);

    /// Observe consecutive time steps.
    fn observe_block(&mut self, values: &[X]) {
        for &value in values {
            self.observe(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<i64>);

    impl Observer<i64> for Recorder {
        fn reset(&mut self) {
            self.0.clear();
        }

        fn observe(&mut self, value: i64) {
            self.0.push(value);
        }
    }

    #[test]
    fn default_block_observes_in_order() {
        let mut r = Recorder::default();
        r.observe_block(&[3, 1, 2]);
        assert_eq!(r.0, vec![3, 1, 2]);
        r.reset();
        assert!(r.0.is_empty());
    }
}
