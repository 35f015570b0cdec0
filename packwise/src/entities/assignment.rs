use crate::entities::PackSize;
use serde::Serialize;
use std::collections::BTreeMap;

/// The packs chosen to fulfill an order: a count per pack size.
///
/// Every entry has a count > 0; a size absent from the map means zero packs
/// of that size. Serializes as a JSON object mapping size to count.
/// A fresh value is produced per selection, it has no lifecycle beyond that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackAssignment {
    counts: BTreeMap<PackSize, u64>,
}

impl PackAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `n` packs of `size` to the assignment. Zero additions are ignored
    /// so the counts > 0 invariant holds.
    pub fn add(&mut self, size: PackSize, n: u64) {
        if n > 0 {
            *self.counts.entry(size).or_insert(0) += n;
        }
    }

    /// Number of packs of `size`, 0 if the size is absent.
    pub fn count_of(&self, size: PackSize) -> u64 {
        self.counts.get(&size).copied().unwrap_or(0)
    }

    /// Total items shipped: Σ size × count. Saturates at `u64::MAX` when the
    /// true total is not representable.
    pub fn total_items(&self) -> u64 {
        self.counts.iter().fold(0u64, |total, (size, count)| {
            total.saturating_add(size.saturating_mul(*count))
        })
    }

    /// Total number of packs: Σ count.
    pub fn total_packs(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in descending pack size order.
    pub fn iter(&self) -> impl Iterator<Item = (PackSize, u64)> + '_ {
        self.counts.iter().rev().map(|(&size, &count)| (size, count))
    }
}

impl FromIterator<(PackSize, u64)> for PackAssignment {
    fn from_iter<T: IntoIterator<Item = (PackSize, u64)>>(iter: T) -> Self {
        let mut assignment = Self::new();
        for (size, count) in iter {
            assignment.add(size, count);
        }
        assignment
    }
}
