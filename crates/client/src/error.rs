//! Application-level error taxonomy.
//!
//! Every user action in the client returns `Result<T, DeskError>`. Each
//! variant maps to a user-facing prompt via [`DeskError::user_message`].
//! Per-line insert failures during submission are not errors at this level:
//! they are recorded in [`SubmissionReport`](crate::submit::SubmissionReport).

use order_desk_core::ProductId;
use thiserror::Error;

use crate::config::ConfigError;
use crate::local::LocalStoreError;
use crate::store::StoreError;

/// Application-level error type for Order Desk.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Catalog, customer or order-history fetch failed.
    #[error("Fetch failed: {0}")]
    FetchFailed(#[source] StoreError),

    /// Proceeding to order review with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Submitting with no products selected.
    #[error("No products selected")]
    EmptySelection,

    /// Submitting before the customer was resolved.
    #[error("Customer details are missing")]
    MissingCustomer,

    /// The order row could not be created; nothing else was written.
    #[error("Order creation failed: {0}")]
    OrderCreateFailed(#[source] StoreError),

    /// A product id that is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// The data store client could not be built.
    #[error("Data store client error: {0}")]
    Client(#[source] StoreError),

    /// Local persistence failed.
    #[error("Storage error: {0}")]
    Storage(#[from] LocalStoreError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl DeskError {
    /// The message shown to the shopper for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::FetchFailed(_) => "Unable to fetch data. Please try again later.".to_string(),
            Self::EmptyCart => "Your cart is empty. Add items to proceed.".to_string(),
            Self::EmptySelection => {
                "Please select at least one item to proceed with the order.".to_string()
            }
            Self::MissingCustomer => "Customer details are missing.".to_string(),
            Self::OrderCreateFailed(_) => "Error submitting order.".to_string(),
            Self::UnknownProduct(id) => format!("No product with id {id} in the catalog."),
            Self::Client(_) => "Unable to reach the data store.".to_string(),
            Self::Storage(_) => "Unable to save your cart on this device.".to_string(),
            Self::Config(e) => e.to_string(),
        }
    }

    /// Whether this error stopped an action before anything was written remotely.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::EmptyCart | Self::EmptySelection | Self::MissingCustomer
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_classification() {
        assert!(DeskError::EmptyCart.is_precondition());
        assert!(DeskError::EmptySelection.is_precondition());
        assert!(DeskError::MissingCustomer.is_precondition());
        assert!(!DeskError::OrderCreateFailed(StoreError::MissingRow("orders".into())).is_precondition());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            DeskError::EmptySelection.user_message(),
            "Please select at least one item to proceed with the order."
        );
        assert_eq!(
            DeskError::UnknownProduct(ProductId::new(9)).user_message(),
            "No product with id 9 in the catalog."
        );
    }
}
