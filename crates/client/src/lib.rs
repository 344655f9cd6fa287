//! Order Desk client library.
//!
//! # Modules
//!
//! - [`cart`] - The persisted cart store
//! - [`search`] - Catalog holding and product search filtering
//! - [`selection`] - Product selection during order review
//! - [`submit`] - Two-phase order submission
//! - [`store`] - Remote data store trait and `PostgREST` client
//! - [`local`] - Durable local key-value storage
//! - [`config`] - Environment configuration
//! - [`error`] - Application error taxonomy
//! - [`state`] - Session wiring used by the CLI

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod local;
pub mod search;
pub mod selection;
pub mod state;
pub mod store;
pub mod submit;

pub use cart::CartStore;
pub use config::DeskConfig;
pub use error::DeskError;
pub use search::{Catalog, filter_products};
pub use selection::Selection;
pub use state::DeskState;
pub use store::{DataStore, RestDataStore, StoreError};
pub use submit::{OrderSubmitter, SubmissionReport, link_selected_products, resolve_customer};
