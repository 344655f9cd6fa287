//! Catalog and customer commands.

use order_desk_client::{DeskError, DeskState};
use tracing::{info, warn};

/// List catalog products, optionally filtered.
///
/// # Errors
///
/// Returns [`DeskError::FetchFailed`] if the catalog cannot be fetched.
pub async fn products(state: &DeskState, search: Option<&str>) -> Result<(), DeskError> {
    let catalog = state.catalog().await?;
    let matches = catalog.search(search.unwrap_or_default());

    if matches.is_empty() {
        info!("No products available.");
        return Ok(());
    }

    info!("Available Products");
    for product in matches {
        info!(
            "  [{}] {} - {}",
            product.id,
            product.name_or_empty(),
            product.description_or_empty()
        );
    }
    Ok(())
}

/// Show the configured customer.
///
/// # Errors
///
/// Returns [`DeskError::FetchFailed`] if the lookup fails.
pub async fn customer(state: &DeskState) -> Result<(), DeskError> {
    match state.customer().await? {
        Some(customer) => {
            info!("Customer Details");
            info!("  Name: {}", customer.name);
            info!("  Email: {}", customer.email);
            info!("  Customer ID: {}", customer.id);
        }
        None => warn!(id = %state.config().customer_id, "Customer not found."),
    }
    Ok(())
}
