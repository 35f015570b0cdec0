//! Orchestration around the `packwise` selector: a SQLite-backed pack-size
//! catalog and the HTTP API that exposes it. The selector itself stays pure;
//! this crate fetches a fresh catalog snapshot per calculation and forwards
//! the result.

pub mod api;
pub mod store;
