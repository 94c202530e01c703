//! A linear, typed coin value and its mint/burn authorities.
//!
//! A `Coin<T>` can be split (`extract`), joined (`merge`), measured
//! (`value`), and minted/burned only by whoever holds the matching authority
//! token — never silently duplicated or destroyed, because there is no
//! public way to construct a nonzero `Coin` except by extracting value out
//! of another one or by minting.

mod store;

pub use store::{CoinStore, StoreError};

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinError {
    #[error("insufficient balance: have {available}, requested {requested}")]
    InsufficientBalance { available: u64, requested: u64 },
    #[error("mint and burn authorities have already been issued")]
    AuthoritiesAlreadyIssued,
}

pub type Result<T> = std::result::Result<T, CoinError>;

/// Marker type for the denomination staked by validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeToken;

/// A linear value of `T`-denominated coin. Deliberately not `Clone`/`Copy`
/// and not `Default`-constructible to a nonzero value: the only ways to get
/// one are [`Coin::zero`], [`Coin::extract`]/[`Coin::extract_all`] from an
/// existing coin, or [`Coin::mint`] with a [`MintAuthority`] in hand.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Coin<T> {
    value: u64,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Coin<T> {
    /// A coin of value zero.
    pub fn zero() -> Self {
        Self {
            value: 0,
            _marker: PhantomData,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Merge `src` into `self`, destroying `src` and adding its value.
    pub fn merge(&mut self, src: Coin<T>) {
        self.value = self.value.saturating_add(src.value);
    }

    /// Split `amount` out of `self` into a new coin.
    pub fn extract(&mut self, amount: u64) -> Result<Coin<T>> {
        if amount > self.value {
            return Err(CoinError::InsufficientBalance {
                available: self.value,
                requested: amount,
            });
        }
        self.value -= amount;
        Ok(Coin {
            value: amount,
            _marker: PhantomData,
        })
    }

    /// Extract the entire value of `self`, leaving a zero coin behind.
    pub fn extract_all(&mut self) -> Coin<T> {
        let value = self.value;
        self.value = 0;
        Coin {
            value,
            _marker: PhantomData,
        }
    }

    /// Mint `amount` new coins. Only callable with a [`MintAuthority`] in
    /// hand, which can only be constructed once (by genesis).
    pub fn mint(amount: u64, _authority: &MintAuthority) -> Self {
        Self {
            value: amount,
            _marker: PhantomData,
        }
    }

    /// Destroy a coin, permanently removing its value from circulation.
    /// Only callable with a [`BurnAuthority`] in hand.
    pub fn burn(coin: Coin<T>, _authority: &BurnAuthority) {
        drop(coin);
    }
}

static AUTHORITIES_ISSUED: AtomicBool = AtomicBool::new(false);

/// Bearer token authorizing [`Coin::mint`]. The staking core holds this to
/// issue epoch rewards.
#[derive(Debug)]
pub struct MintAuthority(());

/// Bearer token authorizing [`Coin::burn`]. Held by the fee-collecting
/// module, external to this core.
#[derive(Debug)]
pub struct BurnAuthority(());

/// Issue the one and only (mint, burn) authority pair for this process.
/// Returns [`CoinError::AuthoritiesAlreadyIssued`] on any call after the
/// first — genesis calls this exactly once; there is no other public path
/// to construct either authority.
pub fn issue_authorities() -> Result<(MintAuthority, BurnAuthority)> {
    if AUTHORITIES_ISSUED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(CoinError::AuthoritiesAlreadyIssued);
    }
    Ok((MintAuthority(()), BurnAuthority(())))
}

/// Construct an authority pair without the process-wide one-shot guard.
///
/// Only compiled for tests (in this crate and in dependents that enable the
/// `testing` feature): unit tests for the staking core each need their own
/// independent `MintAuthority` rather than sharing the single process-wide
/// instance `issue_authorities` hands out.
#[cfg(any(test, feature = "testing"))]
pub fn test_authorities() -> (MintAuthority, BurnAuthority) {
    (MintAuthority(()), BurnAuthority(()))
}
