//! The validator staking core: the stake pool data model, the validator
//! set and its pending queues, the epoch transition procedure, per-validator
//! performance accounting, capability-based authorization, and genesis
//! bootstrap.
//!
//! Synchronous by design (no `async fn` anywhere in this crate): the host
//! runtime drives transactions against this core one at a time, with no
//! suspension points and no interleaving, so there is nothing here for an
//! executor to schedule around.

pub mod capability;
pub mod epoch;
pub mod error;
pub mod events;
pub mod genesis;
pub mod ops;
pub mod performance;
pub mod pool;
pub mod rewards;
pub mod validator_config;
pub mod validator_set;

pub use capability::OwnerCapability;
pub use error::{Result, StakingError};
pub use events::StakePoolEvents;
pub use genesis::genesis;
pub use ops::StakingCore;
pub use performance::ValidatorPerformance;
pub use pool::StakePool;
pub use rewards::calculate_rewards;
pub use validator_config::ValidatorConfig;
pub use validator_set::{ValidatorInfo, ValidatorSet, ValidatorState, MAX_VALIDATOR_SET_SIZE};
