//! Scalar value trait shared by observations, statistics and thresholds.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A totally-ordered scalar that can be observed, accumulated and compared
/// against thresholds.
///
/// Statistics accumulate with plain `+`. For the integer implementations the
/// caller keeps every running sum inside the type's range: the largest
/// window-limited or CUSUM sum of a stream must not exceed `MAX`, or the
/// addition overflows (a panic in debug builds, wrap-around in release).
/// Floats saturate to infinity instead.
pub trait Value:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + AddAssign
    + Mul<Output = Self>
    + Debug
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// Additive identity.
    const ZERO: Self;

    /// Whether the value is finite. Integers are always finite.
    fn is_finite(self) -> bool;

    /// Larger of two values.
    fn max_of(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
}

macro_rules! impl_float_value {
    ($($t:ty),*) => {
        $(
            impl Value for $t {
                const ZERO: Self = 0.0;

                fn is_finite(self) -> bool {
                    <$t>::is_finite(self)
                }
            }
        )*
    };
}

macro_rules! impl_integer_value {
    ($($t:ty),*) => {
        $(
            impl Value for $t {
                const ZERO: Self = 0;

                fn is_finite(self) -> bool {
                    true
                }
            }
        )*
    };
}

impl_float_value!(f32, f64);
impl_integer_value!(i32, i64, isize);

/// Sort values in ascending order. Incomparable pairs are treated as equal.
pub(crate) fn sort_ascending<T: Value>(values: &mut [T]) {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_finiteness() {
        assert!(Value::is_finite(1.5_f64));
        assert!(!Value::is_finite(f64::NAN));
        assert!(!Value::is_finite(f64::INFINITY));
        assert!(!Value::is_finite(f32::NEG_INFINITY));
    }

    #[test]
    fn integers_always_finite() {
        assert!(Value::is_finite(i64::MAX));
        assert!(Value::is_finite(-7_i32));
    }

    #[test]
    fn sort_puts_smallest_first() {
        let mut v = vec![5_i64, 1, 2];
        sort_ascending(&mut v);
        assert_eq!(v, vec![1, 2, 5]);

        let mut w = vec![0.5_f64, -1.0, 0.25];
        sort_ascending(&mut w);
        assert_eq!(w, vec![-1.0, 0.25, 0.5]);
    }

    #[test]
    fn max_of_picks_larger() {
        assert_eq!(3_i64.max_of(-2), 3);
        assert_eq!((-2.0_f64).max_of(0.0), 0.0);
    }
}
