//! Validity checks used in `debug_assert!` statements.

use crate::entities::{Catalog, PackAssignment};

/// Structural validity of a selection result: every assigned size exists in
/// the catalog snapshot, and the shipped total covers the order whenever the
/// catalog offers any pack at all.
pub fn assignment_is_valid(catalog: &Catalog, quantity: u64, assignment: &PackAssignment) -> bool {
    let sizes_in_catalog = assignment.iter().all(|(size, _)| catalog.contains(size));
    let covers_order = catalog.is_empty() || assignment.total_items() >= quantity;

    sizes_in_catalog && covers_order
}
