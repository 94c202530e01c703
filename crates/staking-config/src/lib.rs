//! Policy configuration and wall-clock access: the config provider and
//! timestamp oracle the staking core reads but never owns.
//!
//! Neither is part of the staking core's own state machine — the core only
//! ever reads them — so they live in their own crate and are consumed
//! through small traits, keeping the separation between state and
//! policy/execution-glue concerns clean.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Policy values governing stake bounds, lockup duration, reward rate, and
/// whether the validator set may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingConfig {
    pub min_stake: u64,
    pub max_stake: u64,
    pub recurring_lockup_secs: u64,
    pub allow_validator_set_change: bool,
    pub reward_rate: u64,
    pub reward_rate_denominator: u64,
}

impl StakingConfig {
    /// Minimal sanity check a config provider should run before accepting a
    /// config: stake bounds must be orderable and the reward rate must have
    /// a nonzero denominator.
    pub fn is_valid(&self) -> bool {
        self.min_stake <= self.max_stake && self.reward_rate_denominator > 0
    }
}

/// Read-only access to the policy values governing staking behavior.
pub trait ConfigProvider {
    fn get(&self) -> StakingConfig;

    fn get_required_stake(&self) -> (u64, u64) {
        let cfg = self.get();
        (cfg.min_stake, cfg.max_stake)
    }

    fn get_recurring_lockup_duration(&self) -> u64 {
        self.get().recurring_lockup_secs
    }

    fn get_reward_rate(&self) -> (u64, u64) {
        let cfg = self.get();
        (cfg.reward_rate, cfg.reward_rate_denominator)
    }

    fn get_allow_validator_set_change(&self) -> bool {
        self.get().allow_validator_set_change
    }
}

/// A `ConfigProvider` backed by a fixed, in-process value — genesis installs
/// one of these; nothing in this core persists config to external storage.
#[derive(Debug, Clone)]
pub struct StaticConfigProvider(StakingConfig);

impl StaticConfigProvider {
    pub fn new(config: StakingConfig) -> Self {
        Self(config)
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn get(&self) -> StakingConfig {
        self.0
    }
}

/// A monotonically non-decreasing wall-clock reading, in seconds.
pub trait Clock {
    fn now_seconds(&self) -> u64;
}

/// A manually-advanced clock for deterministic tests.
#[derive(Debug, Default)]
pub struct TestClock(AtomicU64);

impl TestClock {
    pub fn new(now: u64) -> Self {
        Self(AtomicU64::new(now))
    }

    pub fn fast_forward(&self, secs: u64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, now: u64) {
        self.0.store(now, Ordering::SeqCst);
    }
}

impl Clock for TestClock {
    fn now_seconds(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}
