//! The proposal performance registry backing `update_performance_statistics`.
//! A singleton sequence parallel to `ValidatorSet::active_validators`,
//! indexed the same way.

/// `(successful_proposals, failed_proposals)` per active-set index.
#[derive(Debug, Default)]
pub struct ValidatorPerformance {
    pub validators: Vec<(u64, u64)>,
}

impl ValidatorPerformance {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh all-zero sequence of the given length, installed at the end
    /// of every `on_new_epoch`.
    pub fn reset(&mut self, len: usize) {
        self.validators = vec![(0, 0); len];
    }

    /// Increment the failed-proposal count at `index`, or do nothing if it
    /// is out of bounds. Called only from the never-abort
    /// `update_performance_statistics` path.
    pub fn record_failed(&mut self, index: u64) {
        if let Some(slot) = self.validators.get_mut(index as usize) {
            slot.1 = slot.1.saturating_add(1);
        }
    }

    /// Increment the successful-proposal count at `index`, or do nothing if
    /// it is out of bounds.
    pub fn record_successful(&mut self, index: u64) {
        if let Some(slot) = self.validators.get_mut(index as usize) {
            slot.0 = slot.0.saturating_add(1);
        }
    }

    pub fn get(&self, index: usize) -> (u64, u64) {
        self.validators.get(index).copied().unwrap_or((0, 0))
    }
}
