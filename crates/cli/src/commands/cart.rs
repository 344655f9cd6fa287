//! Cart commands.

use chrono::Local;
use order_desk_client::{DeskError, DeskState};
use order_desk_core::{CartLine, ProductId};
use tracing::{info, warn};

/// Print the cart.
pub fn show(state: &DeskState) {
    let cart = state.cart();
    if cart.is_empty() {
        info!("Your cart is empty. Add products to see them here.");
        return;
    }

    info!("Cart ({} items)", cart.total_quantity());
    for line in cart.lines() {
        print_line(line);
    }
}

/// Add one of a catalog product.
///
/// # Errors
///
/// Returns [`DeskError::FetchFailed`] if the catalog cannot be fetched, or
/// [`DeskError::UnknownProduct`] if `product_id` is not listed.
pub async fn add(state: &mut DeskState, product_id: ProductId) -> Result<(), DeskError> {
    let catalog = state.catalog().await?;
    let product = catalog.require(product_id)?;

    let cart = state.cart_mut();
    cart.add_to_cart(product);
    if let Some(line) = cart.line(product_id) {
        print_line(line);
    }
    Ok(())
}

pub fn increment(state: &mut DeskState, product_id: ProductId) {
    let cart = state.cart_mut();
    cart.increment_quantity(product_id);
    report(cart.line(product_id), product_id);
}

pub fn decrement(state: &mut DeskState, product_id: ProductId) {
    let cart = state.cart_mut();
    cart.decrement_quantity(product_id);
    report(cart.line(product_id), product_id);
}

pub fn remove(state: &mut DeskState, product_id: ProductId) {
    let cart = state.cart_mut();
    if cart.line(product_id).is_none() {
        warn!(%product_id, "Product is not in the cart");
        return;
    }
    cart.remove_from_cart(product_id);
    info!(%product_id, "Removed from cart");
}

pub fn clear(state: &mut DeskState) {
    state.cart_mut().clear();
    info!("Cart cleared");
}

fn report(line: Option<&CartLine>, product_id: ProductId) {
    match line {
        Some(line) => print_line(line),
        None => warn!(%product_id, "Product is not in the cart"),
    }
}

fn print_line(line: &CartLine) {
    info!(
        "  [{}] {} x{} (added {}) {}",
        line.product_id(),
        line.product.name_or_empty(),
        line.quantity,
        line.date_added.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
        line.product.description_or_empty()
    );
}
