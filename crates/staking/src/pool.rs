//! The per-validator stake pool: four time-phased buckets of
//! `Coin<StakeToken>` plus lockup, operator/voter addresses, and the pool's
//! event log.

use crate::events::StakePoolEvents;
use blockchain_crypto::Address;
use coin::{Coin, StakeToken};

/// All stake controlled by one owner capability, partitioned into four
/// time-phased buckets.
#[derive(Debug)]
pub struct StakePool {
    pub active: Coin<StakeToken>,
    pub inactive: Coin<StakeToken>,
    pub pending_active: Coin<StakeToken>,
    pub pending_inactive: Coin<StakeToken>,
    pub locked_until_secs: u64,
    pub operator_address: Address,
    pub delegated_voter: Address,
    pub events: StakePoolEvents,
}

impl StakePool {
    /// A freshly registered pool: every bucket zero, no lockup yet, operator
    /// and voter both defaulted to the owning signer.
    pub fn new(operator_address: Address, delegated_voter: Address) -> Self {
        Self {
            active: Coin::zero(),
            inactive: Coin::zero(),
            pending_active: Coin::zero(),
            pending_inactive: Coin::zero(),
            locked_until_secs: 0,
            operator_address,
            delegated_voter,
            events: StakePoolEvents::default(),
        }
    }

    /// `active + pending_active + pending_inactive`, the quantity
    /// `add_stake`'s `StakeExceedsMax` check bounds.
    pub fn committed_stake(&self) -> u64 {
        self.active
            .value()
            .saturating_add(self.pending_active.value())
            .saturating_add(self.pending_inactive.value())
    }

    /// Voting power at this instant: `active + pending_inactive` (glossary).
    pub fn voting_power(&self) -> u64 {
        self.active.value().saturating_add(self.pending_inactive.value())
    }

    /// Every bucket's value, for conservation checks in tests.
    pub fn total_value(&self) -> u64 {
        self.active
            .value()
            .saturating_add(self.inactive.value())
            .saturating_add(self.pending_active.value())
            .saturating_add(self.pending_inactive.value())
    }
}
