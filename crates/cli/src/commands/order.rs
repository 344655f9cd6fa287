//! Order review, submission and history commands.

use chrono::Local;
use order_desk_client::{DeskError, DeskState};
use order_desk_core::{CartLine, ProductId};
use tracing::{info, warn};

/// Select cart lines and submit them as one order.
///
/// Mirrors the review step: an empty cart blocks before anything else, ids
/// that are not in the cart are ignored, and a failed customer lookup is
/// reported but left for the submitter to turn into `MissingCustomer`.
///
/// # Errors
///
/// Returns the submitter's precondition or order-creation error.
pub async fn submit(
    state: &mut DeskState,
    select: &[ProductId],
    all: bool,
) -> Result<(), DeskError> {
    let mut selection = state.cart().proceed()?;
    if all {
        selection.extend(state.cart().lines().iter().map(CartLine::product_id));
    } else {
        for &product_id in select {
            if state.cart().line(product_id).is_some() {
                selection.select(product_id);
            } else {
                warn!(%product_id, "Not in the cart, ignoring");
            }
        }
    }

    let customer = match state.customer().await {
        Ok(customer) => customer,
        Err(e) => {
            warn!("{}", e.user_message());
            None
        }
    };

    let (submitter, cart) = state.submitter();
    let report = submitter
        .submit(cart, &mut selection, customer.as_ref())
        .await?;

    info!("Order submitted successfully! (order {})", report.order_id);
    for product_id in &report.skipped {
        warn!(%product_id, "Product left the cart before it could be linked");
    }
    for failure in &report.failed {
        warn!(product_id = %failure.product_id, error = %failure.error, "Product was not linked to the order");
    }
    Ok(())
}

/// List submitted orders.
///
/// # Errors
///
/// Returns [`DeskError::FetchFailed`] if the listing fails.
pub async fn list(state: &DeskState) -> Result<(), DeskError> {
    let orders = state.orders().await?;
    if orders.is_empty() {
        info!("No orders found.");
        return Ok(());
    }

    info!("Orders List");
    for order in orders {
        info!(
            "  #{} {} {}",
            order.id,
            order.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
            order.description.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}
