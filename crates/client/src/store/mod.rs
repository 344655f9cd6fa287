//! Remote data store: catalog, customers and orders.
//!
//! # Architecture
//!
//! - [`DataStore`] is the seam between the cart/order logic and the network
//! - [`RestDataStore`] talks to a hosted `PostgREST` endpoint with `reqwest`
//! - The data store is source of truth for products, customers and orders;
//!   nothing is cached locally except the cart
//!
//! # Tables
//!
//! | table | used for |
//! |---|---|
//! | `products` | catalog listing |
//! | `customers` | customer lookup by id |
//! | `orders` | order creation and history |
//! | `orderproductmap` | one row per ordered product |

mod rest;

use std::future::Future;

use order_desk_core::{Customer, CustomerId, NewOrder, NewOrderLine, Order, OrderId, Product};
use thiserror::Error;

pub use rest::RestDataStore;

/// Errors that can occur when talking to the data store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the store.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Response body did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An insert returned no row.
    #[error("No row returned from {0}")]
    MissingRow(String),
}

/// Request/response operations offered by the remote data store.
///
/// Every call reports failure as a [`StoreError`]; none of them panic.
pub trait DataStore {
    /// List the full product catalog.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, StoreError>> + Send;

    /// Look a customer up by id. `Ok(None)` means no such customer.
    fn lookup_customer(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, StoreError>> + Send;

    /// Insert an order and return its generated id.
    fn create_order(
        &self,
        order: &NewOrder,
    ) -> impl Future<Output = Result<OrderId, StoreError>> + Send;

    /// Insert one order line.
    fn create_order_line(
        &self,
        line: &NewOrderLine,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// List stored orders, newest first.
    fn list_orders(&self) -> impl Future<Output = Result<Vec<Order>, StoreError>> + Send;
}
