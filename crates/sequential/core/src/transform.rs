//! Timed transforms applied to windowed statistics during the transient period.
//!
//! If the detection statistic is `R_n = sum(last L observations)`, the
//! transient period is `R_1, ..., R_{L-1}`: the window is not full yet and
//! callers may want to rescale or shift the raw value.

use crate::error::{SequentialError, SequentialResult};
use crate::value::Value;

/// A function `f(time, x) -> x`, where `time` is the zero-based number of
/// observations seen before the current one.
pub trait TimedTransform<T> {
    fn apply(&self, time: usize, value: T) -> T;
}

/// Leaves every value untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdentityTransform;

impl<T> TimedTransform<T> for IdentityTransform {
    fn apply(&self, _time: usize, value: T) -> T {
        value
    }
}

/// Wraps a closure `Fn(usize, T) -> T` as a timed transform.
#[derive(Clone, Copy)]
pub struct TransformFn<F>(pub F);

impl<T, F> TimedTransform<T> for TransformFn<F>
where
    F: Fn(usize, T) -> T,
{
    fn apply(&self, time: usize, value: T) -> T {
        (self.0)(time, value)
    }
}

impl<F> std::fmt::Debug for TransformFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TransformFn")
    }
}

/// `f(t, x) = scale[t] * x + shift[t]` for `t < len`, identity afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WindowLimitedLinearTransform<T> {
    scale_factors: Vec<T>,
    shifts: Vec<T>,
}

impl<T: Value> WindowLimitedLinearTransform<T> {
    pub fn new(scale_factors: Vec<T>, shifts: Vec<T>) -> SequentialResult<Self> {
        if scale_factors.len() != shifts.len() {
            return Err(SequentialError::ShapeMismatch {
                what: "scale factors and shifts".into(),
                left: scale_factors.len(),
                right: shifts.len(),
            });
        }
        Ok(Self {
            scale_factors,
            shifts,
        })
    }

    /// Number of leading time steps the transform affects.
    pub fn len(&self) -> usize {
        self.scale_factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scale_factors.is_empty()
    }
}

impl<T: Value> TimedTransform<T> for WindowLimitedLinearTransform<T> {
    fn apply(&self, time: usize, value: T) -> T {
        match (self.scale_factors.get(time), self.shifts.get(time)) {
            (Some(&scale), Some(&shift)) => scale * value + shift,
            _ => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_passes_through() {
        assert_eq!(TimedTransform::<i64>::apply(&IdentityTransform, 0, 7), 7);
        assert_eq!(TimedTransform::<f64>::apply(&IdentityTransform, 9, -1.5), -1.5);
    }

    #[test]
    fn closure_transform() {
        let double_early = TransformFn(|t: usize, x: i64| if t < 2 { 2 * x } else { x });
        assert_eq!(double_early.apply(0, 3), 6);
        assert_eq!(double_early.apply(1, 3), 6);
        assert_eq!(double_early.apply(2, 3), 3);
    }

    #[test]
    fn linear_transform_applies_per_step() {
        let f = WindowLimitedLinearTransform::new(vec![2.0, 0.5], vec![1.0, -1.0]).unwrap();
        assert_eq!(f.len(), 2);
        assert_eq!(f.apply(0, 3.0), 7.0);
        assert_eq!(f.apply(1, 4.0), 1.0);
        assert_eq!(f.apply(2, 4.0), 4.0);
    }

    #[test]
    fn linear_transform_shape_mismatch() {
        let err = WindowLimitedLinearTransform::new(vec![1_i64, 2], vec![0]).unwrap_err();
        assert!(matches!(
            err,
            SequentialError::ShapeMismatch { left: 2, right: 1, .. }
        ));
    }
}
