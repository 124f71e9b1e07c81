//! Subcommands

pub(crate) mod calculate;
pub(crate) mod sizes;
