//! Auto-regressive process `X_t = e_t + phi_1 X_{t-1} + ... + phi_p X_{t-p}`.

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sequential_core::{SequentialError, SequentialResult, SlidingWindow, Value};
use tracing::debug;

use crate::source::ObservationSource;

/// AR(p) process driven by iid noise `e_t`.
pub struct AutoRegressiveProcess<T, D> {
    noise: D,
    ar_parameters: Vec<T>,
    // [X_{t-1}, ..., X_{t-p}]; absent for p = 0.
    history: Option<SlidingWindow<T>>,
    rng: StdRng,
}

impl<T, D> AutoRegressiveProcess<T, D>
where
    T: Value,
    D: Distribution<T>,
{
    /// Every AR parameter must be finite.
    pub fn new(noise: D, ar_parameters: Vec<T>, seed: Option<u64>) -> SequentialResult<Self> {
        if let Some(index) = ar_parameters.iter().position(|phi| !phi.is_finite()) {
            return Err(SequentialError::InvalidParameter {
                parameter: "AR parameters".into(),
                reason: format!("coefficient {} is not finite", index + 1),
            });
        }
        let history = if ar_parameters.is_empty() {
            None
        } else {
            Some(SlidingWindow::new(ar_parameters.len())?)
        };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(order = ar_parameters.len(), "auto-regressive process configured");
        Ok(Self {
            noise,
            ar_parameters,
            history,
            rng,
        })
    }

    /// `[phi_1, ..., phi_p]`.
    pub fn ar_parameters(&self) -> &[T] {
        &self.ar_parameters
    }

    pub fn order(&self) -> usize {
        self.ar_parameters.len()
    }
}

impl<T, D> ObservationSource<T> for AutoRegressiveProcess<T, D>
where
    T: Value,
    D: Distribution<T>,
{
    fn next_value(&mut self) -> T {
        let mut newest = self.noise.sample(&mut self.rng);
        if let Some(history) = self.history.as_mut() {
            for (&phi, past) in self.ar_parameters.iter().zip(history.iter_newest_first()) {
                newest += phi * past;
            }
            history.push(newest);
        }
        newest
    }

    fn clear(&mut self) {
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }
    }
}
