//! Genesis bootstrap, one-shot and invoked exactly once per process: issue
//! the coin authorities, register every initial validator, and promote them
//! all into the active set before the chain produces its first block.
//!
//! Block assembly itself belongs to the host runtime and is out of scope
//! here; this module only bootstraps the staking singletons and initial
//! validator set.

use blockchain_crypto::Address;
use coin::{BurnAuthority, Coin};
use staking_config::{Clock, ConfigProvider};
use tracing::info;

use crate::error::{Result, StakingError};
use crate::ops::StakingCore;

/// Bootstrap the staking core: issue the one-and-only mint/burn authority
/// pair, register and fund every initial validator, and run the first
/// epoch transition so they all start out `ACTIVE`.
///
/// All six input sequences must have equal length. Returns the burn
/// authority alongside the core so the caller can hand it to the
/// (out-of-scope) fee-collecting module.
pub fn genesis<C: ConfigProvider, K: Clock>(
    config: C,
    clock: K,
    owners: Vec<Address>,
    pubkeys: Vec<Vec<u8>>,
    pops: Vec<Vec<u8>>,
    network_addrs: Vec<Vec<u8>>,
    fullnode_addrs: Vec<Vec<u8>>,
    stakes: Vec<u64>,
) -> Result<(StakingCore<C, K>, BurnAuthority)> {
    let n = owners.len();
    if pubkeys.len() != n
        || pops.len() != n
        || network_addrs.len() != n
        || fullnode_addrs.len() != n
        || stakes.len() != n
    {
        return Err(StakingError::MismatchedValidatorSequenceLengths {
            owners: n,
            pubkeys: pubkeys.len(),
            pops: pops.len(),
            net_addrs: network_addrs.len(),
            fn_addrs: fullnode_addrs.len(),
            stakes: stakes.len(),
        });
    }

    let (mint_authority, burn_authority) = coin::issue_authorities()?;
    let mut core = StakingCore::new(config, clock, mint_authority);

    for i in 0..n {
        core.initialize_validator(
            owners[i],
            pubkeys[i].clone(),
            pops[i].clone(),
            network_addrs[i].clone(),
            fullnode_addrs[i].clone(),
        )?;

        let cap = core.extract_owner_cap(owners[i])?;
        core.increase_lockup(&cap)?;
        if stakes[i] > 0 {
            let stake_coin: Coin<coin::StakeToken> = Coin::mint(stakes[i], &core.mint_authority);
            core.add_stake(&cap, stake_coin)?;
        }
        core.join_validator_set_internal(owners[i])?;
        core.deposit_owner_cap(owners[i], cap)?;
    }

    // Promote everyone out of pending_active so the chain starts with a
    // populated ACTIVE set rather than an empty one.
    core.on_new_epoch();

    info!(validators = n, "genesis bootstrap complete");
    Ok((core, burn_authority))
}
