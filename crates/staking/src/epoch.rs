//! The epoch transition procedure: the core algorithm this whole crate
//! exists to run correctly. Must never abort — every step reads values that
//! are already known to be in range, and the reward formula itself cannot
//! panic (see [`crate::rewards::calculate_rewards`]).
//!
//! Step ordering: distribute rewards and promote `pending_active` happen
//! together, in one loop over `active_validators ∪ pending_inactive`;
//! releasing expired `pending_inactive` happens in a second, narrower loop
//! over `active_validators` only (mirroring a per-active-validator
//! stake-pool update rather than a per-pending-inactive one); lockup renewal
//! is a third, separate loop at the end.

use blockchain_crypto::Address;
use staking_config::{Clock, ConfigProvider};
use tracing::info;

use crate::events::DistributeRewardsEvent;
use crate::ops::StakingCore;
use crate::rewards::distribute;
use crate::validator_set::ValidatorInfo;

impl<C: ConfigProvider, K: Clock> StakingCore<C, K> {
    /// Reconcile the validator set, distribute rewards, and roll lockups
    /// forward. Intended to be callable only from the block prologue; the
    /// host runtime is expected to gate access to this method the same way
    /// it gates any other privileged entry point.
    pub fn on_new_epoch(&mut self) {
        let now = self.clock.now_seconds();
        let (rate, denom) = self.config.get_reward_rate();
        let min_stake = self.config.get_required_stake().0;
        let recurring_lockup = self.config.get_recurring_lockup_duration();

        // Steps 1 + 2: distribute rewards, then promote pending_active -> active,
        // for every pool still counted this epoch (active or pending_inactive).
        let reward_targets: Vec<(Address, u64)> = self
            .validator_set
            .active_validators
            .iter()
            .chain(self.validator_set.pending_inactive.iter())
            .map(|v| (v.addr, v.config.validator_index))
            .collect();

        for (addr, index) in reward_targets {
            let (success, failed) = self.performance.get(index as usize);
            let total = success.saturating_add(failed);
            let mint_authority = &self.mint_authority;
            if let Some(pool) = self.pools.get_mut(&addr) {
                let active_reward =
                    distribute(&mut pool.active, success, total, rate, denom, mint_authority);
                let pending_inactive_reward = distribute(
                    &mut pool.pending_inactive,
                    success,
                    total,
                    rate,
                    denom,
                    mint_authority,
                );
                let total_reward = active_reward.saturating_add(pending_inactive_reward);
                if total_reward > 0 {
                    pool.events.distribute_rewards.push(DistributeRewardsEvent {
                        pool_address: addr,
                        rewards_amount: total_reward,
                    });
                }

                let promoted = pool.pending_active.extract_all();
                pool.active.merge(promoted);
            }
        }

        // Step 3: release expired pending_inactive, active pools only.
        let active_addrs: Vec<Address> =
            self.validator_set.active_validators.iter().map(|v| v.addr).collect();
        for addr in active_addrs {
            if let Some(pool) = self.pools.get_mut(&addr) {
                if now >= pool.locked_until_secs {
                    let released = pool.pending_inactive.extract_all();
                    pool.inactive.merge(released);
                }
            }
        }

        // Step 4: set reconciliation.
        let newly_promoted = std::mem::take(&mut self.validator_set.pending_active);
        self.validator_set.active_validators.extend(newly_promoted);
        self.validator_set.pending_inactive.clear();

        // Step 5: rebuild active set and indices, dropping rows below min_stake.
        let mut next_epoch_validators = Vec::with_capacity(self.validator_set.active_validators.len());
        for row in self.validator_set.active_validators.drain(..) {
            let addr = row.addr;
            let Some(pool) = self.pools.get(&addr) else {
                continue;
            };
            let voting_power = pool.voting_power();
            if voting_power < min_stake {
                continue;
            }
            let config = self
                .validator_configs
                .get(&addr)
                .cloned()
                .unwrap_or(row.config);
            next_epoch_validators.push(ValidatorInfo {
                addr,
                voting_power,
                config,
            });
        }
        for (i, row) in next_epoch_validators.iter_mut().enumerate() {
            row.config.validator_index = i as u64;
            if let Some(config) = self.validator_configs.get_mut(&row.addr) {
                config.validator_index = i as u64;
            }
        }
        self.performance.reset(next_epoch_validators.len());
        self.validator_set.active_validators = next_epoch_validators;

        // Step 6: auto-renew lockup for every pool still active.
        let active_addrs: Vec<Address> =
            self.validator_set.active_validators.iter().map(|v| v.addr).collect();
        for addr in active_addrs {
            if let Some(pool) = self.pools.get_mut(&addr) {
                if pool.locked_until_secs <= now {
                    pool.locked_until_secs = now.saturating_add(recurring_lockup);
                }
            }
        }

        info!(
            active = self.validator_set.active_validators.len(),
            "epoch transition complete"
        );
    }
}
