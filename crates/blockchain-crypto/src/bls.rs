//! BLS12-381 proof-of-possession verification.
//!
//! The staking core never lets an operator register or rotate a consensus
//! key without first checking a proof-of-possession: a signature, made with
//! the claimed private key, over the public key itself. This is what makes
//! rogue-key attacks against stake-weighted voting power infeasible (an
//! attacker who only has someone else's public key cannot forge a valid PoP
//! for it). Consensus/network/validator bookkeeping around it belongs to the
//! host runtime.

use blst::min_pk::{PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;

/// Domain separation tag for proof-of-possession signatures, matching the
/// convention used by BLS proof-of-possession schemes (ciphersuite-scoped,
/// distinct from the tag used for ordinary message signing).
const POP_DST: &[u8] = b"STAKING_BLS12381_POP_V1";

/// Verify that `pop_bytes` is a valid proof-of-possession for `pubkey_bytes`:
/// a BLS signature, under the claimed key, over the key's own encoding.
///
/// Returns `false` (never panics) for malformed public keys or signatures —
/// this is called from user-facing entry points that must reject bad input
/// with a typed error, not abort the process.
pub fn verify_bls_pop(pubkey_bytes: &[u8], pop_bytes: &[u8]) -> bool {
    let pk = match PublicKey::from_bytes(pubkey_bytes) {
        Ok(pk) => pk,
        Err(_) => return false,
    };
    let sig = match Signature::from_bytes(pop_bytes) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    sig.verify(true, pubkey_bytes, POP_DST, &[], &pk, true) == BLST_ERROR::BLST_SUCCESS
}

/// Test/genesis helper: derive a BLS keypair and a valid proof-of-possession
/// for it, in the shape `verify_bls_pop` expects.
pub fn generate_pop_keypair(seed: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut ikm = [0u8; 32];
    let n = seed.len().min(32);
    ikm[..n].copy_from_slice(&seed[..n]);
    let sk = SecretKey::key_gen(&ikm, &[]).expect("ikm must be at least 32 bytes");
    let pk = sk.sk_to_pk();
    let pk_bytes = pk.compress().to_vec();
    let pop = sk.sign(&pk_bytes, POP_DST, &[]);
    (pk_bytes, pop.compress().to_vec())
}
