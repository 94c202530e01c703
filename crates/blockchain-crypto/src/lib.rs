//! Hashing, addresses, and signature verification shared by the staking core.
//!
//! This crate plays the role of the cryptographic external collaborators
//! named in the staking spec: address/identity hashing (used internally by
//! the staking core to key pools) and the BLS12-381 proof-of-possession
//! verifier consumed from entry points that rotate or register a consensus
//! key.

pub mod address;
pub mod bls;
pub mod hash;

use thiserror::Error;

/// Crate-wide error type for hashing and address failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CryptoError {
    #[error("invalid hash format: {0}")]
    InvalidHash(String),
    #[error("address format error: {0}")]
    AddressError(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

pub use address::Address;
pub use hash::Hash256;
