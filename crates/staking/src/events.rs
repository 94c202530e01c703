//! The append-only event stream each pool-mutating operation emits. One
//! struct per kind, one `Vec<T>` per kind on [`StakePoolEvents`] rather than
//! a single dynamically-typed event bus, since there is exactly one
//! consumer (the stream itself) and the kinds are closed.

use blockchain_crypto::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterValidatorCandidateEvent {
    pub pool_address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOperatorEvent {
    pub pool_address: Address,
    pub old_operator: Address,
    pub new_operator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStakeEvent {
    pub pool_address: Address,
    pub amount_added: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateConsensusKeyEvent {
    pub pool_address: Address,
    pub old_consensus_pubkey: Vec<u8>,
    pub new_consensus_pubkey: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNetworkAndFullnodeAddressesEvent {
    pub pool_address: Address,
    pub old_network_addresses: Vec<u8>,
    pub new_network_addresses: Vec<u8>,
    pub old_fullnode_addresses: Vec<u8>,
    pub new_fullnode_addresses: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncreaseLockupEvent {
    pub pool_address: Address,
    pub old_locked_until_secs: u64,
    pub new_locked_until_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinValidatorSetEvent {
    pub pool_address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributeRewardsEvent {
    pub pool_address: Address,
    pub rewards_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockStakeEvent {
    pub pool_address: Address,
    pub amount_unlocked: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawStakeEvent {
    pub pool_address: Address,
    pub amount_withdrawn: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveValidatorSetEvent {
    pub pool_address: Address,
}

/// Per-pool event log, one vector per kind, append-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StakePoolEvents {
    pub register_validator_candidate: Vec<RegisterValidatorCandidateEvent>,
    pub set_operator: Vec<SetOperatorEvent>,
    pub add_stake: Vec<AddStakeEvent>,
    pub rotate_consensus_key: Vec<RotateConsensusKeyEvent>,
    pub update_network_and_fullnode_addresses: Vec<UpdateNetworkAndFullnodeAddressesEvent>,
    pub increase_lockup: Vec<IncreaseLockupEvent>,
    pub join_validator_set: Vec<JoinValidatorSetEvent>,
    pub distribute_rewards: Vec<DistributeRewardsEvent>,
    pub unlock_stake: Vec<UnlockStakeEvent>,
    pub withdraw_stake: Vec<WithdrawStakeEvent>,
    pub leave_validator_set: Vec<LeaveValidatorSetEvent>,
}
