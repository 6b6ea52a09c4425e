//! # sequential-core
//!
//! Online sequential detection: detection statistics over a scalar stream and
//! the stopping times that decide when those statistics cross thresholds.
//!
//! ## Architecture
//!
//! ```text
//!   observation x_n
//!        │
//!        ▼
//!   ┌──────────────────────────┐      ┌──────────────┐
//!   │  Statistic               │      │  Cusum       │  ← O(1) state
//!   │  ┌────────────────────┐  │◄─────┴──────────────┘
//!   │  │ SlidingWindow (L)  │  │  ← circular history, newest cursor
//!   │  └────────────────────┘  │
//!   │  WindowRule + transform  │  ← FMA, window-limited CUSUM
//!   └────────────┬─────────────┘
//!                │ R_n
//!                ▼
//!   ┌──────────────────────────┐      ┌──────────────────────────┐
//!   │  OneSidedStoppingTime    │      │  ParallelStoppingTime    │
//!   │  sorted thresholds       │      │  (V_n, H_n) over m × n   │
//!   │  crossing cursor         │      │  two crossing cursors    │
//!   └────────────┬─────────────┘      └────────────┬─────────────┘
//!                │ when(i)                          │ when(i, j), which(i, j)
//!                ▼                                  ▼
//! ```
//!
//! ## Invariants
//!
//! - A window never changes size after construction; a push overwrites the oldest slot.
//! - Thresholds are sorted ascending at construction and never change afterwards.
//! - Crossing cursors only move forward until `reset`.
//! - Parallel trigger flags are only ever OR'ed in until `reset`.
//! - `reset` clears runtime state and keeps configuration.
//!
//! ## Quick Start
//!
//! ```rust
//! use sequential_core::{Cusum, OneSidedStoppingTime};
//!
//! let mut rule = OneSidedStoppingTime::new(Cusum::new(), vec![5_i64, 1, 2]).unwrap();
//! for x in [0, -1, 1, 2, 0, 3, 3] {
//!     rule.observe(x);
//! }
//! assert_eq!(rule.when_all(), &[4, 4, 6]);
//! assert!(rule.is_stopped());
//! ```

#![deny(unsafe_code)]

pub mod cusum;
pub mod error;
pub mod fma;
pub mod grid;
pub mod observer;
pub mod one_sided;
pub mod parallel;
pub mod record;
pub mod statistic;
pub mod transform;
pub mod value;
pub mod window;
pub mod window_limited;
pub mod window_limited_cusum;
pub mod windowed;

// Re-exports for convenience
pub use cusum::Cusum;
pub use error::{SequentialError, SequentialResult};
pub use fma::{FiniteMovingAverage, MovingSum};
pub use grid::Grid;
pub use observer::Observer;
pub use one_sided::{OneSidedStoppingTime, StoppedStatisticFn};
pub use parallel::{ParallelStoppingTime, TriggerFlags};
pub use record::{ParallelRecord, RecordedStatistic, StoppingTimeRecord};
pub use statistic::{RawObservation, Statistic};
pub use transform::{IdentityTransform, TimedTransform, TransformFn, WindowLimitedLinearTransform};
pub use value::Value;
pub use window::SlidingWindow;
pub use window_limited::WindowLimitedStoppingTime;
pub use window_limited_cusum::{TrailingMaxSum, WindowLimitedCusum};
pub use windowed::{WindowRule, WindowedStatistic};
