//! The operations surface: every externally-invoked entry point against the
//! staking core, plus the read-only queries supplementing it
//! (`stake_pool_exists`/`get_stake_pool`, matching how the reference
//! validator-set test harnesses query pool state directly between
//! operations).
//!
//! `StakingCore` owns every process-wide singleton (`ValidatorSet`,
//! `ValidatorPerformance`, `MintAuthority`) plus the per-pool stores, so the
//! whole core is a single owned root struct.

use std::collections::HashMap;

use blockchain_crypto::{bls::verify_bls_pop, Address};
use coin::{Coin, MintAuthority, StakeToken};
use staking_config::{ConfigProvider, Clock};
use tracing::{debug, info};

use crate::capability::OwnerCapability;
use crate::error::{Result, StakingError};
use crate::events::{
    AddStakeEvent, IncreaseLockupEvent, JoinValidatorSetEvent, LeaveValidatorSetEvent,
    RegisterValidatorCandidateEvent, RotateConsensusKeyEvent, SetOperatorEvent,
    UnlockStakeEvent, UpdateNetworkAndFullnodeAddressesEvent, WithdrawStakeEvent,
};
use crate::pool::StakePool;
use crate::validator_config::ValidatorConfig;
use crate::validator_set::{ValidatorSet, ValidatorState, MAX_VALIDATOR_SET_SIZE};
use crate::performance::ValidatorPerformance;

/// The staking core's owned state: pools, configs, capability registry, the
/// three process-wide singletons, and the read-only collaborators it closes
/// over (`ConfigProvider`, `Clock`).
pub struct StakingCore<C: ConfigProvider, K: Clock> {
    pub(crate) pools: HashMap<Address, StakePool>,
    pub(crate) validator_configs: HashMap<Address, ValidatorConfig>,
    /// Keyed by the address currently *holding* the capability, not
    /// necessarily the pool's own address — ownership is transferable via
    /// `extract_owner_cap`/`deposit_owner_cap`.
    pub(crate) capabilities: HashMap<Address, OwnerCapability>,
    pub(crate) validator_set: ValidatorSet,
    pub(crate) performance: ValidatorPerformance,
    pub(crate) mint_authority: MintAuthority,
    pub(crate) config: C,
    pub(crate) clock: K,
}

impl<C: ConfigProvider, K: Clock> StakingCore<C, K> {
    /// Construct a staking core around a caller-supplied [`MintAuthority`] —
    /// obtaining one at all already requires [`coin::issue_authorities`] (or,
    /// in tests, [`coin::test_authorities`]), so this constructor adds no
    /// new way to mint staking rewards out of nowhere.
    pub fn new(config: C, clock: K, mint_authority: MintAuthority) -> Self {
        Self {
            pools: HashMap::new(),
            validator_configs: HashMap::new(),
            capabilities: HashMap::new(),
            validator_set: ValidatorSet::new(),
            performance: ValidatorPerformance::new(),
            mint_authority,
            config,
            clock,
        }
    }

    // -- read-only queries --

    pub fn stake_pool_exists(&self, addr: Address) -> bool {
        self.pools.contains_key(&addr)
    }

    pub fn get_stake_pool(&self, addr: Address) -> Option<&StakePool> {
        self.pools.get(&addr)
    }

    pub fn get_validator_config(&self, addr: Address) -> Option<&ValidatorConfig> {
        self.validator_configs.get(&addr)
    }

    pub fn get_validator_state(&self, addr: Address) -> ValidatorState {
        self.validator_set.state_of(addr)
    }

    pub fn is_current_epoch_validator(&self, addr: Address) -> bool {
        self.validator_set.is_current_epoch_validator(addr)
    }

    pub fn validator_set(&self) -> &ValidatorSet {
        &self.validator_set
    }

    pub fn performance(&self) -> &ValidatorPerformance {
        &self.performance
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    fn pool_mut(&mut self, addr: Address) -> Result<&mut StakePool> {
        self.pools.get_mut(&addr).ok_or(StakingError::NoSuchPool)
    }

    fn register_pool(
        &mut self,
        signer: Address,
        operator: Address,
        voter: Address,
        validator_config: ValidatorConfig,
    ) -> Result<OwnerCapability> {
        if self.pools.contains_key(&signer) {
            return Err(StakingError::AlreadyRegistered);
        }
        self.pools.insert(signer, StakePool::new(operator, voter));
        self.validator_configs.insert(signer, validator_config);
        let cap = OwnerCapability::new(signer);
        self.pools
            .get_mut(&signer)
            .expect("just inserted")
            .events
            .register_validator_candidate
            .push(RegisterValidatorCandidateEvent { pool_address: signer });
        info!(pool = %signer, "stake pool registered");
        Ok(cap)
    }

    /// Registers a new validator candidate. Mints and returns the
    /// `OwnerCapability` to the caller rather than depositing it directly,
    /// so the caller decides whether to keep it at `signer` or move it
    /// elsewhere immediately.
    pub fn initialize_validator(
        &mut self,
        signer: Address,
        consensus_pubkey: Vec<u8>,
        pop: Vec<u8>,
        network_addresses: Vec<u8>,
        fullnode_addresses: Vec<u8>,
    ) -> Result<()> {
        if !verify_bls_pop(&consensus_pubkey, &pop) {
            return Err(StakingError::InvalidPublicKey);
        }
        let cap = self.register_pool(
            signer,
            signer,
            signer,
            ValidatorConfig::new(consensus_pubkey, network_addresses, fullnode_addresses),
        )?;
        self.capabilities.insert(signer, cap);
        Ok(())
    }

    /// Registers an owner-only pool: `ValidatorConfig` fields stay
    /// empty until populated before `join_validator_set`.
    pub fn initialize_owner_only(
        &mut self,
        signer: Address,
        initial_stake: Coin<StakeToken>,
        operator: Address,
        voter: Address,
    ) -> Result<()> {
        let cap = self.register_pool(signer, operator, voter, ValidatorConfig::empty())?;
        if initial_stake.value() > 0 {
            self.add_stake(&cap, initial_stake)?;
        }
        self.capabilities.insert(signer, cap);
        Ok(())
    }

    pub fn extract_owner_cap(&mut self, signer: Address) -> Result<OwnerCapability> {
        self.capabilities
            .remove(&signer)
            .ok_or(StakingError::NoOwnerCapability)
    }

    pub fn deposit_owner_cap(&mut self, signer: Address, cap: OwnerCapability) -> Result<()> {
        if self.capabilities.contains_key(&signer) {
            return Err(StakingError::OwnerCapabilityAlreadyHeld);
        }
        self.capabilities.insert(signer, cap);
        Ok(())
    }

    pub fn set_operator(&mut self, cap: &OwnerCapability, new_operator: Address) -> Result<()> {
        let pool = self.pool_mut(cap.pool_address())?;
        let old_operator = pool.operator_address;
        pool.operator_address = new_operator;
        pool.events.set_operator.push(SetOperatorEvent {
            pool_address: cap.pool_address(),
            old_operator,
            new_operator,
        });
        Ok(())
    }

    pub fn set_delegated_voter(&mut self, cap: &OwnerCapability, new_voter: Address) -> Result<()> {
        let pool = self.pool_mut(cap.pool_address())?;
        pool.delegated_voter = new_voter;
        Ok(())
    }

    /// Deposits stake into the pool. Currently-a-set-member pools receive
    /// new stake into `pending_active`; everyone else receives it directly
    /// into `active`.
    pub fn add_stake(&mut self, cap: &OwnerCapability, coin: Coin<StakeToken>) -> Result<()> {
        if coin.value() == 0 {
            return Err(StakingError::InvalidStakeAmount);
        }
        let addr = cap.pool_address();
        let is_member = self.validator_set.is_current_epoch_validator(addr);
        let max_stake = self.config.get_required_stake().1;
        let amount = coin.value();
        let pool = self.pool_mut(addr)?;
        let projected = pool.committed_stake().saturating_add(amount);
        if projected > max_stake {
            return Err(StakingError::StakeExceedsMax);
        }
        if is_member {
            pool.pending_active.merge(coin);
        } else {
            pool.active.merge(coin);
        }
        pool.events.add_stake.push(AddStakeEvent {
            pool_address: addr,
            amount_added: amount,
        });
        debug!(pool = %addr, amount, member = is_member, "stake added");
        Ok(())
    }

    /// Moves stake from `active` toward withdrawal. A zero amount is a silent no-op with no event.
    pub fn unlock(&mut self, cap: &OwnerCapability, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let addr = cap.pool_address();
        let pool = self.pool_mut(addr)?;
        let extracted = pool.active.extract(amount)?;
        pool.pending_inactive.merge(extracted);
        pool.events.unlock_stake.push(UnlockStakeEvent {
            pool_address: addr,
            amount_unlocked: amount,
        });
        Ok(())
    }

    /// Withdraws unlocked stake. If the pool is inactive and lockup has
    /// expired, sweeps `pending_inactive` into `inactive` first (lazily
    /// collapsing it), then extracts `min(amount, value(inactive))`.
    pub fn withdraw(&mut self, cap: &OwnerCapability, amount: u64) -> Result<Coin<StakeToken>> {
        let addr = cap.pool_address();
        let now = self.clock.now_seconds();
        let state = self.validator_set.state_of(addr);
        let pool = self.pool_mut(addr)?;
        if state == ValidatorState::Inactive && now >= pool.locked_until_secs {
            let swept = pool.pending_inactive.extract_all();
            pool.inactive.merge(swept);
        }
        let to_withdraw = amount.min(pool.inactive.value());
        if to_withdraw == 0 {
            return Err(StakingError::NoCoinsToWithdraw);
        }
        let withdrawn = pool.inactive.extract(to_withdraw)?;
        pool.events.withdraw_stake.push(WithdrawStakeEvent {
            pool_address: addr,
            amount_withdrawn: to_withdraw,
        });
        Ok(withdrawn)
    }

    /// Rotates the pool's consensus key. Effective next epoch: the active
    /// set only refreshes its snapshot at the epoch boundary (step 5).
    pub fn rotate_consensus_key(
        &mut self,
        signer: Address,
        pool_addr: Address,
        new_pk: Vec<u8>,
        pop: Vec<u8>,
    ) -> Result<()> {
        self.require_operator(signer, pool_addr)?;
        if !verify_bls_pop(&new_pk, &pop) {
            return Err(StakingError::InvalidPublicKey);
        }
        let config = self
            .validator_configs
            .get_mut(&pool_addr)
            .ok_or(StakingError::ValidatorConfigMissing)?;
        let old_consensus_pubkey = std::mem::replace(&mut config.consensus_pubkey, new_pk.clone());
        if let Some(pool) = self.pools.get_mut(&pool_addr) {
            pool.events.rotate_consensus_key.push(RotateConsensusKeyEvent {
                pool_address: pool_addr,
                old_consensus_pubkey,
                new_consensus_pubkey: new_pk,
            });
        }
        Ok(())
    }

    /// Updates the pool's published network/fullnode addresses. Same auth and
    /// next-epoch-effective semantics as key rotation.
    pub fn update_network_and_fullnode_addresses(
        &mut self,
        signer: Address,
        pool_addr: Address,
        network_addresses: Vec<u8>,
        fullnode_addresses: Vec<u8>,
    ) -> Result<()> {
        self.require_operator(signer, pool_addr)?;
        let config = self
            .validator_configs
            .get_mut(&pool_addr)
            .ok_or(StakingError::ValidatorConfigMissing)?;
        let old_network_addresses = std::mem::replace(&mut config.network_addresses, network_addresses.clone());
        let old_fullnode_addresses =
            std::mem::replace(&mut config.fullnode_addresses, fullnode_addresses.clone());
        if let Some(pool) = self.pools.get_mut(&pool_addr) {
            pool.events
                .update_network_and_fullnode_addresses
                .push(UpdateNetworkAndFullnodeAddressesEvent {
                    pool_address: pool_addr,
                    old_network_addresses,
                    new_network_addresses: network_addresses,
                    old_fullnode_addresses,
                    new_fullnode_addresses: fullnode_addresses,
                });
        }
        Ok(())
    }

    /// Extends the pool's lockup deadline. Never shortens: there is no parameter
    /// to pass a lower value with, only "extend to `now + recurring_lockup`".
    pub fn increase_lockup(&mut self, cap: &OwnerCapability) -> Result<()> {
        let addr = cap.pool_address();
        let recurring = self.config.get_recurring_lockup_duration();
        let now = self.clock.now_seconds();
        let pool = self.pool_mut(addr)?;
        let old_locked_until_secs = pool.locked_until_secs;
        pool.locked_until_secs = now.saturating_add(recurring);
        pool.events.increase_lockup.push(IncreaseLockupEvent {
            pool_address: addr,
            old_locked_until_secs,
            new_locked_until_secs: pool.locked_until_secs,
        });
        Ok(())
    }

    /// Queues the pool to join the validator set at the next epoch boundary.
    pub fn join_validator_set(&mut self, signer: Address, pool_addr: Address) -> Result<()> {
        self.require_operator(signer, pool_addr)?;
        if !self.config.get_allow_validator_set_change() {
            return Err(StakingError::SetChangeDisabled);
        }
        self.join_validator_set_internal(pool_addr)
    }

    /// Identical preconditions to `join_validator_set` minus the
    /// `allow_set_change` gate, used only by genesis.
    pub(crate) fn join_validator_set_internal(&mut self, pool_addr: Address) -> Result<()> {
        if self.validator_set.state_of(pool_addr) != ValidatorState::Inactive {
            return Err(StakingError::AlreadyActive);
        }
        let (min_stake, max_stake) = self.config.get_required_stake();
        let config = self
            .validator_configs
            .get(&pool_addr)
            .ok_or(StakingError::ValidatorConfigMissing)?;
        if config.consensus_pubkey.is_empty() {
            return Err(StakingError::InvalidPublicKey);
        }
        if self.validator_set.committed_set_size() >= MAX_VALIDATOR_SET_SIZE {
            return Err(StakingError::ValidatorSetTooLarge);
        }
        let pool = self.pools.get(&pool_addr).ok_or(StakingError::NoSuchPool)?;
        let active_value = pool.active.value();
        if active_value < min_stake {
            return Err(StakingError::StakeTooLow);
        }
        if active_value > max_stake {
            return Err(StakingError::StakeTooHigh);
        }
        let info = crate::validator_set::ValidatorInfo {
            addr: pool_addr,
            voting_power: pool.voting_power(),
            config: config.clone(),
        };
        self.validator_set.pending_active.push(info);
        if let Some(pool) = self.pools.get_mut(&pool_addr) {
            pool.events
                .join_validator_set
                .push(JoinValidatorSetEvent { pool_address: pool_addr });
        }
        info!(pool = %pool_addr, "validator queued to join set");
        Ok(())
    }

    /// Removes the pool from the active set, moving it to `pending_inactive`.
    pub fn leave_validator_set(&mut self, signer: Address, pool_addr: Address) -> Result<()> {
        self.require_operator(signer, pool_addr)?;
        if !self.config.get_allow_validator_set_change() {
            return Err(StakingError::SetChangeDisabled);
        }
        let index = self
            .validator_set
            .active_index_of(pool_addr)
            .ok_or(StakingError::NotValidator)?;
        if self.validator_set.active_validators.len() <= 1 {
            return Err(StakingError::LastValidator);
        }
        let info = self.validator_set.active_validators.swap_remove(index);
        self.validator_set.pending_inactive.push(info);
        if let Some(pool) = self.pools.get_mut(&pool_addr) {
            pool.events
                .leave_validator_set
                .push(LeaveValidatorSetEvent { pool_address: pool_addr });
        }
        info!(pool = %pool_addr, "validator left the active set");
        Ok(())
    }

    /// Records block-proposal outcomes for the current epoch. Must never abort:
    /// out-of-bounds indices are silently skipped.
    pub fn update_performance_statistics(
        &mut self,
        proposer_index: Option<u64>,
        failed_indices: Vec<u64>,
    ) {
        for index in failed_indices {
            self.performance.record_failed(index);
        }
        if let Some(index) = proposer_index {
            self.performance.record_successful(index);
        }
    }

    fn require_operator(&self, signer: Address, pool_addr: Address) -> Result<()> {
        let pool = self.pools.get(&pool_addr).ok_or(StakingError::NoSuchPool)?;
        if pool.operator_address != signer {
            return Err(StakingError::NotOperator);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator_set::ValidatorInfo;
    use blockchain_crypto::bls::generate_pop_keypair;
    use staking_config::{StakingConfig, StaticConfigProvider, TestClock};

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    fn core_with(
        min_stake: u64,
        max_stake: u64,
        lockup: u64,
        allow_set_change: bool,
        rate: u64,
        denom: u64,
        now: u64,
    ) -> StakingCore<StaticConfigProvider, TestClock> {
        let (mint, _burn) = coin::test_authorities();
        let cfg = StaticConfigProvider::new(StakingConfig {
            min_stake,
            max_stake,
            recurring_lockup_secs: lockup,
            allow_validator_set_change: allow_set_change,
            reward_rate: rate,
            reward_rate_denominator: denom,
        });
        StakingCore::new(cfg, TestClock::new(now), mint)
    }

    #[test]
    fn initialize_validator_rejects_bad_proof_of_possession() {
        let mut core = core_with(100, 10_000, 3600, true, 1, 100, 0);
        let signer = addr(1);
        let (pk, _real_pop) = generate_pop_keypair(&[1u8; 32]);
        let wrong_pop = generate_pop_keypair(&[2u8; 32]).1;
        let err = core
            .initialize_validator(signer, pk, wrong_pop, vec![1], vec![1])
            .unwrap_err();
        assert_eq!(err, StakingError::InvalidPublicKey);
    }

    #[test]
    fn registering_twice_at_the_same_address_fails() {
        let mut core = core_with(100, 10_000, 3600, true, 1, 100, 0);
        let signer = addr(1);
        let (pk, pop) = generate_pop_keypair(&[1u8; 32]);
        core.initialize_validator(signer, pk.clone(), pop.clone(), vec![1], vec![1])
            .unwrap();
        let err = core
            .initialize_validator(signer, pk, pop, vec![1], vec![1])
            .unwrap_err();
        assert_eq!(err, StakingError::AlreadyRegistered);
    }

    #[test]
    fn join_at_exactly_min_stake_succeeds_one_below_fails() {
        let (pk, pop) = generate_pop_keypair(&[1u8; 32]);
        let signer = addr(1);

        let mut core = core_with(100, 10_000, 3600, true, 1, 100, 0);
        core.initialize_validator(signer, pk.clone(), pop.clone(), vec![1], vec![1])
            .unwrap();
        let cap = core.extract_owner_cap(signer).unwrap();
        core.add_stake(&cap, Coin::mint(100, &core.mint_authority)).unwrap();
        core.deposit_owner_cap(signer, cap).unwrap();
        core.join_validator_set(signer, signer).unwrap();
        assert_eq!(core.get_validator_state(signer), ValidatorState::PendingActive);

        let signer2 = addr(2);
        let mut core2 = core_with(100, 10_000, 3600, true, 1, 100, 0);
        core2
            .initialize_validator(signer2, pk, pop, vec![1], vec![1])
            .unwrap();
        let cap2 = core2.extract_owner_cap(signer2).unwrap();
        core2
            .add_stake(&cap2, Coin::mint(99, &core2.mint_authority))
            .unwrap();
        core2.deposit_owner_cap(signer2, cap2).unwrap();
        let err = core2.join_validator_set(signer2, signer2).unwrap_err();
        assert_eq!(err, StakingError::StakeTooLow);
    }

    /// Once the committed set size has hit
    /// `MAX_VALIDATOR_SET_SIZE`, the next join fails. Padding
    /// `pending_active` with synthetic rows avoids actually registering and
    /// joining tens of thousands of real pools just to reach the bound.
    #[test]
    fn join_validator_set_rejects_once_set_is_full() {
        let mut core = core_with(100, 10_000, 3600, true, 1, 100, 0);
        for i in 0..MAX_VALIDATOR_SET_SIZE {
            core.validator_set.pending_active.push(ValidatorInfo {
                addr: Address::from_bytes([(i % 256) as u8; 32]),
                voting_power: 0,
                config: ValidatorConfig::empty(),
            });
        }

        let signer = addr(250);
        let (pk, pop) = generate_pop_keypair(&[9u8; 32]);
        core.initialize_validator(signer, pk, pop, vec![1], vec![1]).unwrap();
        let cap = core.extract_owner_cap(signer).unwrap();
        core.add_stake(&cap, Coin::mint(200, &core.mint_authority)).unwrap();
        core.deposit_owner_cap(signer, cap).unwrap();

        let err = core.join_validator_set(signer, signer).unwrap_err();
        assert_eq!(err, StakingError::ValidatorSetTooLarge);
    }

    #[test]
    fn leave_validator_set_forbids_emptying_the_active_set() {
        let mut core = core_with(100, 10_000, 3600, true, 1, 100, 0);
        let signer = addr(1);
        let (pk, pop) = generate_pop_keypair(&[1u8; 32]);
        core.initialize_validator(signer, pk, pop, vec![1], vec![1]).unwrap();
        let cap = core.extract_owner_cap(signer).unwrap();
        core.add_stake(&cap, Coin::mint(100, &core.mint_authority)).unwrap();
        core.deposit_owner_cap(signer, cap).unwrap();
        core.join_validator_set(signer, signer).unwrap();
        core.on_new_epoch();
        assert_eq!(core.get_validator_state(signer), ValidatorState::Active);

        let err = core.leave_validator_set(signer, signer).unwrap_err();
        assert_eq!(err, StakingError::LastValidator);
    }

    #[test]
    fn unlock_zero_is_a_silent_no_op() {
        let mut core = core_with(100, 10_000, 3600, true, 1, 100, 0);
        let signer = addr(1);
        let (pk, pop) = generate_pop_keypair(&[1u8; 32]);
        core.initialize_validator(signer, pk, pop, vec![1], vec![1]).unwrap();
        let cap = core.extract_owner_cap(signer).unwrap();
        core.add_stake(&cap, Coin::mint(100, &core.mint_authority)).unwrap();
        core.unlock(&cap, 0).unwrap();
        let pool = core.get_stake_pool(signer).unwrap();
        assert_eq!(pool.active.value(), 100);
        assert_eq!(pool.pending_inactive.value(), 0);
        assert!(pool.events.unlock_stake.is_empty());
    }

    #[test]
    fn withdraw_caps_at_available_inactive_balance() {
        let mut core = core_with(100, 10_000, 0, true, 1, 100, 100);
        let signer = addr(1);
        let (pk, pop) = generate_pop_keypair(&[1u8; 32]);
        core.initialize_validator(signer, pk, pop, vec![1], vec![1]).unwrap();
        let cap = core.extract_owner_cap(signer).unwrap();
        core.add_stake(&cap, Coin::mint(100, &core.mint_authority)).unwrap();
        core.unlock(&cap, 60).unwrap();
        // pool was never joined, so it is INACTIVE and lockup (0) is already
        // expired at now=100: withdraw sweeps pending_inactive into inactive
        // lazily before extracting.
        let withdrawn = core.withdraw(&cap, 1_000).unwrap();
        assert_eq!(withdrawn.value(), 60);
    }

    #[test]
    fn rotate_consensus_key_twice_restores_the_original() {
        let mut core = core_with(100, 10_000, 3600, true, 1, 100, 0);
        let signer = addr(1);
        let (pk, pop) = generate_pop_keypair(&[1u8; 32]);
        core.initialize_validator(signer, pk.clone(), pop, vec![1], vec![1])
            .unwrap();

        let (new_pk, new_pop) = generate_pop_keypair(&[2u8; 32]);
        core.rotate_consensus_key(signer, signer, new_pk, new_pop)
            .unwrap();
        let orig_pop_again = generate_pop_keypair(&[1u8; 32]).1;
        core.rotate_consensus_key(signer, signer, pk.clone(), orig_pop_again)
            .unwrap();

        assert_eq!(
            core.get_validator_config(signer).unwrap().consensus_pubkey,
            pk
        );
    }
}
