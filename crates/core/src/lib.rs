//! Order Desk Core - Shared domain types.
//!
//! This crate provides the types used across all Order Desk components:
//! - `client` - Cart store, catalog search, order submission, data store client
//! - `cli` - Command-line driver for browsing, cart editing and ordering
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no local
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, emails, catalog products, customers, cart lines
//!   and the order records written to the data store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
