//! The tagged error discriminants for the staking core. User-facing operations
//! surface these by returning `Err`, which callers are expected to treat as
//! "abort the whole transaction, no partial effect" — the epoch engine and
//! `update_performance_statistics` never produce these; they are
//! non-abort-by-construction (out-of-range inputs are silently dropped
//! rather than rejected).

use coin::CoinError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StakingError {
    // -- Auth --
    #[error("signer is not the pool's operator")]
    NotOperator,
    #[error("an address may hold at most one stake pool")]
    AlreadyRegistered,
    #[error("validator set changes are disabled by policy")]
    SetChangeDisabled,

    // -- Validation --
    #[error("consensus public key failed proof-of-possession check")]
    InvalidPublicKey,
    #[error("stake amount must be greater than zero")]
    InvalidStakeAmount,
    #[error("active stake is below the minimum required to join the validator set")]
    StakeTooLow,
    #[error("active stake exceeds the maximum allowed to join the validator set")]
    StakeTooHigh,
    #[error("total pool stake would exceed the configured maximum")]
    StakeExceedsMax,
    #[error("validator set is already at its maximum size")]
    ValidatorSetTooLarge,
    #[error("requested lockup duration is shorter than the minimum")]
    LockTimeTooShort,
    #[error("requested lockup duration is longer than the maximum")]
    LockTimeTooLong,

    // -- State --
    #[error("pool has no validator config; populate it before joining the set")]
    ValidatorConfigMissing,
    #[error("validator is already a member of the validator set")]
    AlreadyActive,
    #[error("pool is not a member of the validator set")]
    NotValidator,
    #[error("cannot remove the last active validator")]
    LastValidator,
    #[error("no coins are available to withdraw")]
    NoCoinsToWithdraw,
    #[error("withdrawal is not allowed in the pool's current state")]
    WithdrawNotAllowed,

    // -- Capability / registry bookkeeping, needed to give extract/deposit
    // of the owner capability typed errors rather than panicking --
    #[error("no stake pool is registered at this address")]
    NoSuchPool,
    #[error("no owner capability is held at this address")]
    NoOwnerCapability,
    #[error("an owner capability is already held at this address")]
    OwnerCapabilityAlreadyHeld,

    // -- Genesis --
    #[error(
        "genesis validator sequences have mismatched lengths: owners={owners}, pubkeys={pubkeys}, \
         pops={pops}, net_addrs={net_addrs}, fn_addrs={fn_addrs}, stakes={stakes}"
    )]
    MismatchedValidatorSequenceLengths {
        owners: usize,
        pubkeys: usize,
        pops: usize,
        net_addrs: usize,
        fn_addrs: usize,
        stakes: usize,
    },
    #[error(transparent)]
    Coin(#[from] CoinError),
}

pub type Result<T> = std::result::Result<T, StakingError>;
