//! The capability-based authorization layer.
//!
//! `OwnerCapability` is deliberately not `Clone`/`Copy`: the only ways to
//! come into possession of one are registering a new pool (one is minted to
//! the signer) or `extract_owner_cap`, and the only way to give it up is
//! `deposit_owner_cap`. There is no path that derives a capability from
//! public state — it can only be minted once per pool and moved from there.

use blockchain_crypto::Address;

/// Move-only bearer token authorizing stake-mutating calls against the pool
/// at `pool_address` (`add_stake`, `unlock`, `withdraw`, `set_operator`,
/// `set_delegated_voter`).
#[derive(Debug, PartialEq, Eq)]
pub struct OwnerCapability {
    pool_address: Address,
}

impl OwnerCapability {
    /// Crate-private: only [`crate::ops::StakingCore`] mints one, and only
    /// when it also creates the matching `StakePool`.
    pub(crate) fn new(pool_address: Address) -> Self {
        Self { pool_address }
    }

    pub fn pool_address(&self) -> Address {
        self.pool_address
    }
}
