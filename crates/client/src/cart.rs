//! The cart store.
//!
//! [`CartStore`] owns the ordered list of [`CartLine`]s and writes the whole
//! cart to a [`LocalStore`] after every mutation, so the cart survives
//! restarts until an order is submitted. There is one cart per local store;
//! callers pass the store around by reference instead of sharing global state.
//!
//! Invariants held at all times:
//! - at most one line per product id
//! - every quantity is at least 1 (decrement never removes a line)
//! - lines stay in first-insertion order

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use order_desk_core::{CartLine, Product, ProductId, Quantity};
use tracing::{debug, warn};

use crate::error::DeskError;
use crate::local::{LocalStore, LocalStoreError};
use crate::selection::Selection;

/// Local store key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Source of the `date_added` timestamp for new lines.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<F: Fn() -> DateTime<Utc>> Clock for F {
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// The shopper's cart, persisted to a [`LocalStore`].
#[derive(Debug)]
pub struct CartStore<S, C = SystemClock> {
    lines: Vec<CartLine>,
    store: S,
    clock: C,
}

impl<S: LocalStore> CartStore<S> {
    /// Load the cart persisted in `store` using the system clock.
    ///
    /// See [`CartStore::load_with_clock`].
    pub fn load(store: S) -> Self {
        Self::load_with_clock(store, SystemClock)
    }
}

impl<S: LocalStore, C: Clock> CartStore<S, C> {
    /// Load the cart persisted in `store`.
    ///
    /// A missing entry yields an empty cart. An entry that cannot be read or
    /// does not decode to a valid cart (bad JSON, zero quantities, duplicate
    /// product ids) is logged and also yields an empty cart.
    pub fn load_with_clock(store: S, clock: C) -> Self {
        let lines = match store.get(CART_KEY) {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|reason| {
                warn!(%reason, "Discarding malformed persisted cart");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                Vec::new()
            }
        };
        debug!(lines = lines.len(), "Cart loaded");

        Self {
            lines,
            store,
            clock,
        }
    }

    /// Add one of `product`.
    ///
    /// An existing line gains one unit and keeps its `date_added`; otherwise a
    /// new line with quantity 1 is appended.
    pub fn add_to_cart(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.incremented();
        } else {
            let line = CartLine::new(product.clone(), self.clock.now());
            self.lines.push(line);
        }
        self.persist();
    }

    /// One more of `product_id`. No-op if it is not in the cart.
    pub fn increment_quantity(&mut self, product_id: ProductId) {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = line.quantity.incremented();
            self.persist();
        }
    }

    /// One fewer of `product_id`, never below 1. No-op if it is not in the cart.
    pub fn decrement_quantity(&mut self, product_id: ProductId) {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = line.quantity.decremented();
            self.persist();
        }
    }

    /// Remove the line for `product_id`. No-op if it is not in the cart.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id() != product_id);
        if self.lines.len() != before {
            self.persist();
        }
    }

    /// Empty the cart and delete the persisted copy.
    pub fn clear(&mut self) {
        self.lines.clear();
        if let Err(e) = self.store.remove(CART_KEY) {
            warn!(error = %e, "Failed to remove persisted cart");
        }
    }

    /// Start order review.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::EmptyCart`] if there is nothing to review.
    pub fn proceed(&self) -> Result<Selection, DeskError> {
        if self.is_empty() {
            return Err(DeskError::EmptyCart);
        }
        Ok(Selection::new())
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<Quantity> {
        self.line(product_id).map(|line| line.quantity)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Write the cart out now.
    ///
    /// Mutations already do this; this is for callers that need the error.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store rejects the write.
    pub fn save(&self) -> Result<(), LocalStoreError> {
        let raw = serde_json::to_string(&self.lines)?;
        self.store.set(CART_KEY, &raw)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}

/// Decode and validate a persisted cart.
fn decode(raw: &str) -> Result<Vec<CartLine>, String> {
    let lines: Vec<CartLine> = serde_json::from_str(raw).map_err(|e| e.to_string())?;

    let mut seen = HashSet::with_capacity(lines.len());
    if let Some(dup) = lines.iter().find(|line| !seen.insert(line.product_id())) {
        return Err(format!("duplicate product id {}", dup.product_id()));
    }

    Ok(lines)
}
