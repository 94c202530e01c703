use blockchain_crypto::Address;
use staking_config::{StakingConfig, StaticConfigProvider, TestClock};

pub fn config(
    min_stake: u64,
    max_stake: u64,
    recurring_lockup_secs: u64,
    allow_validator_set_change: bool,
    reward_rate: u64,
    reward_rate_denominator: u64,
) -> StaticConfigProvider {
    StaticConfigProvider::new(StakingConfig {
        min_stake,
        max_stake,
        recurring_lockup_secs,
        allow_validator_set_change,
        reward_rate,
        reward_rate_denominator,
    })
}

pub fn clock(now: u64) -> TestClock {
    TestClock::new(now)
}

pub fn addr(byte: u8) -> Address {
    Address::from_bytes([byte; 32])
}

/// A standalone [`coin::MintAuthority`] for minting stake coins to hand to
/// `add_stake` in tests. Independent of whatever authority a test's
/// `StakingCore` was built with — both are interchangeable bearer tokens,
/// there is nothing core-specific about the one a `StakingCore` holds.
pub fn mint_authority() -> coin::MintAuthority {
    coin::test_authorities().0
}

/// A deterministic, valid (pubkey, proof-of-possession) pair for tests —
/// `join_validator_set` only checks that the pubkey is non-empty and that
/// `initialize_validator`/`rotate_consensus_key` pass BLS verification.
pub fn pop_keypair(seed: u8) -> (Vec<u8>, Vec<u8>) {
    let seed_bytes = [seed; 32];
    blockchain_crypto::bls::generate_pop_keypair(&seed_bytes)
}
