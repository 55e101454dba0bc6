//! Dense output-slot assignment for the enabled statistics.

use crate::error::EngineError;
use crate::statistic::{StatisticKind, StatisticSet};

/// Maps every enabled statistic to a dense output slot.
///
/// Slots are assigned once per run in the order of
/// [`StatisticSet::enabled`] and stay stable for the whole run. Statistics
/// that are not enabled have no slot and are never computed.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<StatisticKind>,
    needs_samples: bool,
}

impl Registry {
    /// Resolves `set` into slots.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `set`, or [`EngineError::NoStatistics`]
    /// if nothing is enabled.
    pub fn resolve(set: &StatisticSet) -> Result<Self, EngineError> {
        set.validate()?;
        let entries = set.enabled();
        if entries.is_empty() {
            return Err(EngineError::NoStatistics);
        }
        let needs_samples = entries.iter().any(StatisticKind::needs_samples);
        Ok(Self {
            entries,
            needs_samples,
        })
    }

    /// Number of active statistics (and output products).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a resolved registry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Output slot of `kind`, or `None` if it is not enabled.
    pub fn slot(&self, kind: StatisticKind) -> Option<usize> {
        self.entries.iter().position(|k| *k == kind)
    }

    /// Statistic stored in `slot`.
    pub fn kind(&self, slot: usize) -> Option<StatisticKind> {
        self.entries.get(slot).copied()
    }

    /// Active `(slot, kind)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, StatisticKind)> + '_ {
        self.entries.iter().copied().enumerate()
    }

    /// Returns `true` if any active statistic needs the sorted gap sample.
    pub fn needs_samples(&self) -> bool {
        self.needs_samples
    }
}
