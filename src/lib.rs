//! Packwise
//!
//! Packwise decides which packs to ship for an order: never less than the
//! requested quantity, as little surplus as possible, and then as few packs
//! as possible. Results for the default catalogue are kept in a bounded,
//! time-expiring cache.

pub mod cache;
pub mod calculator;
pub mod config;
pub mod packs;
pub mod prelude;
pub mod report;
pub mod solvers;
