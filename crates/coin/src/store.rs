//! A minimal per-address coin store: a plain address-to-balance ledger for
//! this denomination. The staking core itself never touches this — pool
//! buckets hold `Coin` values in-line, and genesis mints stake directly into
//! them — but callers outside the staking core may need it (e.g. crediting
//! an owner's spendable balance before they ever call `add_stake`).

use crate::{Coin, CoinError};
use blockchain_crypto::Address;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("address not registered")]
    NotRegistered,
    #[error("address already registered")]
    AlreadyRegistered,
    #[error(transparent)]
    Coin(#[from] CoinError),
}

/// An in-memory account registry for one coin denomination.
#[derive(Debug, Default)]
pub struct CoinStore<T> {
    balances: HashMap<Address, Coin<T>>,
}

impl<T> CoinStore<T> {
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Open a zero-balance account for `addr`.
    pub fn register(&mut self, addr: Address) -> Result<(), StoreError> {
        if self.balances.contains_key(&addr) {
            return Err(StoreError::AlreadyRegistered);
        }
        self.balances.insert(addr, Coin::zero());
        Ok(())
    }

    pub fn is_registered(&self, addr: &Address) -> bool {
        self.balances.contains_key(addr)
    }

    pub fn balance(&self, addr: &Address) -> Result<u64, StoreError> {
        self.balances
            .get(addr)
            .map(|c| c.value())
            .ok_or(StoreError::NotRegistered)
    }

    /// Deposit `coin` into `addr`'s balance.
    pub fn deposit(&mut self, addr: &Address, coin: Coin<T>) -> Result<(), StoreError> {
        let balance = self.balances.get_mut(addr).ok_or(StoreError::NotRegistered)?;
        balance.merge(coin);
        Ok(())
    }

    /// Withdraw `amount` from `addr`'s balance.
    pub fn withdraw(&mut self, addr: &Address, amount: u64) -> Result<Coin<T>, StoreError> {
        let balance = self.balances.get_mut(addr).ok_or(StoreError::NotRegistered)?;
        Ok(balance.extract(amount)?)
    }
}
