//! Optimal shipping-pack selection.
//!
//! Given a catalog of fixed pack sizes and an order quantity, [`select`]
//! computes which whole packs to ship such that the shipped quantity covers
//! the order with the smallest possible overage, using the fewest packs
//! among ties. The selector is a pure function of its inputs: no state,
//! no side effects, safe to call concurrently against any catalog snapshot.

pub mod entities;
pub mod selector;
pub mod util;

pub use entities::{Catalog, PackAssignment, PackSize};
pub use selector::select;
