use crate::entities::PackSize;
use itertools::Itertools;

/// Snapshot of the available pack sizes at the moment a calculation starts.
///
/// Owned by value: the caller fetches it from wherever the catalog lives and
/// hands it to the selector. Input order is irrelevant, duplicates are
/// meaningless and collapsed. Internally kept sorted in descending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Distinct pack sizes, descending.
    sizes: Vec<PackSize>,
}

impl Catalog {
    pub fn new(sizes: impl IntoIterator<Item = PackSize>) -> Self {
        let sizes = sizes
            .into_iter()
            .sorted_unstable_by(|a, b| b.cmp(a))
            .dedup()
            .collect_vec();

        assert!(
            sizes.iter().all(|&s| s > 0),
            "all pack sizes should be positive"
        );

        Self { sizes }
    }

    /// Distinct pack sizes in descending order.
    pub fn sizes(&self) -> &[PackSize] {
        &self.sizes
    }

    /// The largest pack size, or `None` for an empty catalog.
    pub fn largest(&self) -> Option<PackSize> {
        self.sizes.first().copied()
    }

    pub fn contains(&self, size: PackSize) -> bool {
        self.sizes.contains(&size)
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }
}

impl FromIterator<PackSize> for Catalog {
    fn from_iter<T: IntoIterator<Item = PackSize>>(iter: T) -> Self {
        Self::new(iter)
    }
}
