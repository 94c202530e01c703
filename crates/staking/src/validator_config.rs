//! Per-pool consensus identity: the BLS consensus public key and
//! network/fullnode addresses an operator publishes, plus the cached
//! back-pointer into the active set's index.

/// Consensus and networking identity for one pool. `validator_index` is a
/// cached back-pointer into `ValidatorSet::active_validators`, authoritative
/// only between epoch boundaries — consumers must bounds-check rather than
/// trust it outside that window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub consensus_pubkey: Vec<u8>,
    pub network_addresses: Vec<u8>,
    pub fullnode_addresses: Vec<u8>,
    pub validator_index: u64,
}

impl ValidatorConfig {
    pub fn new(
        consensus_pubkey: Vec<u8>,
        network_addresses: Vec<u8>,
        fullnode_addresses: Vec<u8>,
    ) -> Self {
        Self {
            consensus_pubkey,
            network_addresses,
            fullnode_addresses,
            validator_index: 0,
        }
    }

    /// `initialize_owner_only` leaves every field empty; `join_validator_set`
    /// requires a non-empty `consensus_pubkey` before it will accept the pool.
    pub fn empty() -> Self {
        Self::default()
    }
}
