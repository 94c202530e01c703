//! The validator set singleton and its three ordered queues. A pool's
//! observable state is never stored on the pool itself — it is derived by
//! asking which of these sequences, if any, contains its address.

use crate::validator_config::ValidatorConfig;
use blockchain_crypto::Address;

/// Upper bound on `|active| + |pending_active|`, imposed by the external
/// bitvec voting-power representation.
pub const MAX_VALIDATOR_SET_SIZE: usize = 65536;

/// A row in one of the three ordered sequences: address, voting power frozen
/// at the moment the row was computed, and a config snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorInfo {
    pub addr: Address,
    pub voting_power: u64,
    pub config: ValidatorConfig,
}

/// The four states derived purely from set membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorState {
    PendingActive,
    Active,
    PendingInactive,
    Inactive,
}

impl ValidatorState {
    /// Both `Active` and `PendingInactive` still count for current-epoch
    /// voting power and reward eligibility.
    pub fn is_current_epoch_validator(self) -> bool {
        matches!(self, ValidatorState::Active | ValidatorState::PendingInactive)
    }
}

/// The three-queue registry. A given address appears in at most one of the
/// three sequences at any time.
#[derive(Debug, Default)]
pub struct ValidatorSet {
    pub active_validators: Vec<ValidatorInfo>,
    pub pending_active: Vec<ValidatorInfo>,
    pub pending_inactive: Vec<ValidatorInfo>,
}

impl ValidatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_of(&self, addr: Address) -> ValidatorState {
        if self.pending_active.iter().any(|v| v.addr == addr) {
            ValidatorState::PendingActive
        } else if self.active_validators.iter().any(|v| v.addr == addr) {
            ValidatorState::Active
        } else if self.pending_inactive.iter().any(|v| v.addr == addr) {
            ValidatorState::PendingInactive
        } else {
            ValidatorState::Inactive
        }
    }

    pub fn is_current_epoch_validator(&self, addr: Address) -> bool {
        self.state_of(addr).is_current_epoch_validator()
    }

    pub fn active_index_of(&self, addr: Address) -> Option<usize> {
        self.active_validators.iter().position(|v| v.addr == addr)
    }

    /// `|active| + |pending_active|`, the quantity `join_validator_set`'s
    /// `ValidatorSetTooLarge` check bounds.
    pub fn committed_set_size(&self) -> usize {
        self.active_validators.len() + self.pending_active.len()
    }
}
