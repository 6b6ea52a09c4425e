//! Independent observations with a change at a known index.
//!
//! [`IidPersistentProcess`] stays under change once the change starts.
//! [`IidTransientProcess`] returns to the no-change regime after the last
//! under-change index.

use std::marker::PhantomData;

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sequential_core::{SequentialError, SequentialResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::source::ObservationSource;

/// Configuration for [`IidPersistentProcess`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IidPersistentConfig {
    /// Zero-based index of the first observation drawn under change.
    #[serde(rename = "first under-change index")]
    pub first_under_change_index: usize,

    /// Seed for reproducible runs; entropy-seeded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Draws from `no_change` before the change index and from `under_change`
/// from it on.
pub struct IidPersistentProcess<T, N, U> {
    no_change: N,
    under_change: U,
    config: IidPersistentConfig,
    rng: StdRng,
    generated: usize,
    _value: PhantomData<fn() -> T>,
}

impl<T, N, U> IidPersistentProcess<T, N, U>
where
    N: Distribution<T>,
    U: Distribution<T>,
{
    pub fn new(no_change: N, under_change: U, config: IidPersistentConfig) -> Self {
        let rng = seeded_rng(config.seed);
        debug!(
            first_under_change_index = config.first_under_change_index,
            seeded = config.seed.is_some(),
            "iid persistent process configured"
        );
        Self {
            no_change,
            under_change,
            config,
            rng,
            generated: 0,
            _value: PhantomData,
        }
    }

    pub fn first_under_change_index(&self) -> usize {
        self.config.first_under_change_index
    }

    pub fn config(&self) -> &IidPersistentConfig {
        &self.config
    }

    /// Whether the next observation is drawn under change.
    pub fn is_under_change(&self) -> bool {
        self.generated >= self.config.first_under_change_index
    }
}

impl<T, N, U> ObservationSource<T> for IidPersistentProcess<T, N, U>
where
    N: Distribution<T>,
    U: Distribution<T>,
{
    fn next_value(&mut self) -> T {
        let value = if self.is_under_change() {
            self.under_change.sample(&mut self.rng)
        } else {
            self.no_change.sample(&mut self.rng)
        };
        self.generated += 1;
        value
    }

    fn next_block(&mut self, buffer: &mut [T]) {
        let pre_change = self
            .config
            .first_under_change_index
            .saturating_sub(self.generated)
            .min(buffer.len());
        let (before, after) = buffer.split_at_mut(pre_change);
        for slot in before.iter_mut() {
            *slot = self.no_change.sample(&mut self.rng);
        }
        for slot in after.iter_mut() {
            *slot = self.under_change.sample(&mut self.rng);
        }
        self.generated += buffer.len();
    }

    fn clear(&mut self) {
        self.generated = 0;
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ── Transient change ───────────────────────────────────────────────

/// Configuration for [`IidTransientProcess`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IidTransientConfig {
    /// Zero-based index of the first observation drawn under change.
    #[serde(rename = "first under-change index")]
    pub first_under_change_index: usize,

    /// Zero-based index of the last observation drawn under change.
    #[serde(rename = "last under-change index")]
    pub last_under_change_index: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Draws from `under_change` for indices in
/// `first_under_change_index..=last_under_change_index` and from `no_change`
/// everywhere else.
pub struct IidTransientProcess<T, N, U> {
    no_change: N,
    under_change: U,
    config: IidTransientConfig,
    rng: StdRng,
    generated: usize,
    _value: PhantomData<fn() -> T>,
}

impl<T, N, U> IidTransientProcess<T, N, U>
where
    N: Distribution<T>,
    U: Distribution<T>,
{
    /// Fails when the last under-change index precedes the first.
    pub fn new(
        no_change: N,
        under_change: U,
        config: IidTransientConfig,
    ) -> SequentialResult<Self> {
        if config.last_under_change_index < config.first_under_change_index {
            return Err(SequentialError::InvalidParameter {
                parameter: "last under-change index".into(),
                reason: format!(
                    "{} precedes first under-change index {}",
                    config.last_under_change_index, config.first_under_change_index
                ),
            });
        }
        debug!(
            first_under_change_index = config.first_under_change_index,
            last_under_change_index = config.last_under_change_index,
            seeded = config.seed.is_some(),
            "iid transient process configured"
        );
        Ok(Self {
            no_change,
            under_change,
            rng: seeded_rng(config.seed),
            config,
            generated: 0,
            _value: PhantomData,
        })
    }

    pub fn first_under_change_index(&self) -> usize {
        self.config.first_under_change_index
    }

    pub fn last_under_change_index(&self) -> usize {
        self.config.last_under_change_index
    }

    /// Number of observations drawn under change; at least one.
    pub fn change_duration(&self) -> usize {
        self.config.last_under_change_index - self.config.first_under_change_index + 1
    }

    pub fn config(&self) -> &IidTransientConfig {
        &self.config
    }

    /// Whether the next observation is drawn under change.
    pub fn is_under_change(&self) -> bool {
        (self.config.first_under_change_index..=self.config.last_under_change_index)
            .contains(&self.generated)
    }
}

impl<T, N, U> ObservationSource<T> for IidTransientProcess<T, N, U>
where
    N: Distribution<T>,
    U: Distribution<T>,
{
    fn next_value(&mut self) -> T {
        let value = if self.is_under_change() {
            self.under_change.sample(&mut self.rng)
        } else {
            self.no_change.sample(&mut self.rng)
        };
        self.generated += 1;
        value
    }

    fn next_block(&mut self, buffer: &mut [T]) {
        let length = buffer.len();
        let pre_change = self
            .config
            .first_under_change_index
            .saturating_sub(self.generated)
            .min(length);
        let until_post = (self.config.last_under_change_index + 1)
            .saturating_sub(self.generated)
            .min(length);
        let (before, rest) = buffer.split_at_mut(pre_change);
        let (during, after) = rest.split_at_mut(until_post.saturating_sub(pre_change));
        for slot in before.iter_mut() {
            *slot = self.no_change.sample(&mut self.rng);
        }
        for slot in during.iter_mut() {
            *slot = self.under_change.sample(&mut self.rng);
        }
        for slot in after.iter_mut() {
            *slot = self.no_change.sample(&mut self.rng);
        }
        self.generated += length;
    }

    fn clear(&mut self) {
        self.generated = 0;
    }
}
