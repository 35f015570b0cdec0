mod assignment;
mod catalog;

pub use assignment::PackAssignment;
pub use catalog::Catalog;

/// Number of items contained in a single shippable pack. Always positive.
pub type PackSize = u64;
