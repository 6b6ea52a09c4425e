//! # sequential-process
//!
//! Observation sources for sequential detection, and a driver that feeds one
//! source to many stopping times in lockstep.
//!
//! ```text
//!   ┌──────────────────────┐   next_value / next_block   ┌─────────────────┐
//!   │  ObservationSource   │────────────────────────────►│ DiscreteProcess │
//!   │ iid persist/trans, AR│                             │  count + fanout │
//!   └──────────────────────┘                             └────────┬────────┘
//!                                                                 │ observe
//!                                              ┌──────────────────┼──────────────────┐
//!                                              ▼                  ▼                  ▼
//!                                            CUSUM               FMA        window-limited CUSUM
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::distributions::Uniform;
//! use sequential_core::{Cusum, OneSidedStoppingTime};
//! use sequential_process::{DiscreteProcess, IidPersistentConfig, IidPersistentProcess};
//!
//! let source = IidPersistentProcess::new(
//!     Uniform::new(-1.0, 1.0),
//!     Uniform::new(0.5, 1.5),
//!     IidPersistentConfig { first_under_change_index: 50, seed: Some(42) },
//! );
//! let mut rule = OneSidedStoppingTime::new(Cusum::new(), vec![10.0, 20.0]).unwrap();
//! {
//!     let mut process = DiscreteProcess::new(source);
//!     process.register_observer(&mut rule);
//!     process.take_block(200);
//! }
//! assert!(rule.when(0) > 0);
//! ```

#![deny(unsafe_code)]

pub mod autoregressive;
pub mod discrete;
pub mod iid;
pub mod source;

// Re-exports for convenience
pub use autoregressive::AutoRegressiveProcess;
pub use discrete::DiscreteProcess;
pub use iid::{IidPersistentConfig, IidPersistentProcess, IidTransientConfig, IidTransientProcess};
pub use source::{FnSource, ObservationSource, ReplaySource};
