//! Subcommand implementations.
//!
//! Results are reported through `tracing` at `info`; problems the shopper
//! should notice go out at `warn`.

pub mod cart;
pub mod catalog;
pub mod order;
