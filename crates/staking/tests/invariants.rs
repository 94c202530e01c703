//! Universal invariants and the stake round-trip property that aren't
//! already pinned down by the end-to-end scenarios or the crate's own
//! unit tests.

mod common;

use coin::Coin;
use staking::{StakingCore, ValidatorState};

#[test]
fn add_stake_epoch_unlock_epoch_withdraw_returns_principal_plus_rewards() {
    let cfg = common::config(100, 10_000, 1000, true, 1, 100);
    let clock = common::clock(0);
    let (mint, _burn) = coin::test_authorities();
    let mut core = StakingCore::new(cfg, clock, mint);

    let v = common::addr(1);
    let (pk, pop) = common::pop_keypair(1);
    core.initialize_validator(v, pk, pop, vec![1], vec![1]).unwrap();
    let cap = core.extract_owner_cap(v).unwrap();
    core.add_stake(&cap, Coin::mint(500, &common::mint_authority())).unwrap();
    core.join_validator_set(v, v).unwrap();
    core.on_new_epoch();
    assert_eq!(core.get_validator_state(v), ValidatorState::Active);

    core.update_performance_statistics(Some(0), vec![]);
    core.on_new_epoch();
    let rewards_earned = core.get_stake_pool(v).unwrap().active.value() - 500;
    assert!(rewards_earned > 0);

    let principal_plus_rewards = 500 + rewards_earned;
    core.unlock(&cap, principal_plus_rewards).unwrap();
    core.clock().fast_forward(1000);
    core.on_new_epoch();

    let withdrawn = core.withdraw(&cap, principal_plus_rewards).unwrap();
    assert_eq!(withdrawn.value(), principal_plus_rewards);
}

#[test]
fn set_disjointness_and_size_bound_hold_after_joins() {
    let cfg = common::config(100, 10_000, 3600, true, 1, 100);
    let clock = common::clock(0);
    let (mint, _burn) = coin::test_authorities();
    let mut core = StakingCore::new(cfg, clock, mint);

    let addrs: Vec<_> = (1..=5u8).map(common::addr).collect();
    for (i, &v) in addrs.iter().enumerate() {
        let (pk, pop) = common::pop_keypair(20 + i as u8);
        core.initialize_validator(v, pk, pop, vec![1], vec![1]).unwrap();
        let cap = core.extract_owner_cap(v).unwrap();
        core.add_stake(&cap, Coin::mint(100, &common::mint_authority())).unwrap();
        core.deposit_owner_cap(v, cap).unwrap();
        core.join_validator_set(v, v).unwrap();

        let set = core.validator_set();
        assert!(set.active_validators.len() + set.pending_active.len() <= staking::MAX_VALIDATOR_SET_SIZE);
    }

    let set = core.validator_set();
    let mut seen = std::collections::HashSet::new();
    for row in set.active_validators.iter().chain(set.pending_active.iter()).chain(set.pending_inactive.iter()) {
        assert!(seen.insert(row.addr), "address appeared in more than one queue");
    }
}

#[test]
fn min_stake_filter_applies_immediately_after_epoch() {
    // A validator joins at exactly min_stake, unlocks everything, and once
    // the lockup expires and the next epoch sweeps pending_inactive into
    // inactive, its voting power (active + pending_inactive) drops to zero
    // and the rebuild step must remove it from the active set.
    let cfg = common::config(100, 10_000, 3600, true, 0, 100);
    let clock = common::clock(0);
    let (mint, _burn) = coin::test_authorities();
    let mut core = StakingCore::new(cfg, clock, mint);

    let v = common::addr(1);
    let (pk, pop) = common::pop_keypair(1);
    core.initialize_validator(v, pk, pop, vec![1], vec![1]).unwrap();
    let cap = core.extract_owner_cap(v).unwrap();
    core.add_stake(&cap, Coin::mint(100, &common::mint_authority())).unwrap();
    core.join_validator_set(v, v).unwrap();
    core.on_new_epoch();
    assert_eq!(core.get_validator_state(v), ValidatorState::Active);

    core.unlock(&cap, 100).unwrap();
    core.clock().fast_forward(3600);
    core.on_new_epoch();

    assert_eq!(core.get_validator_state(v), ValidatorState::Inactive);
    for row in core.validator_set().active_validators.iter() {
        assert!(row.voting_power >= 100);
    }
}
