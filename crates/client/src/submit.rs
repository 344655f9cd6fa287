//! Two-phase order submission.
//!
//! Submitting writes one `orders` row, then one `orderproductmap` row per
//! selected cart line. The second phase is best-effort: a failed line insert
//! is logged and reported but does not undo the order or stop its siblings.
//! Submission is not idempotent; submitting twice creates two orders.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use order_desk_core::{CartLine, Customer, CustomerId, NewOrder, NewOrderLine, OrderId, ProductId};
use tracing::{error, info, instrument, warn};

use crate::cart::{CartStore, Clock};
use crate::error::DeskError;
use crate::local::LocalStore;
use crate::selection::Selection;
use crate::store::{DataStore, StoreError};

/// Description written on orders when none is configured.
pub const DEFAULT_ORDER_DESCRIPTION: &str = "New Order";

/// An order line whose insert failed.
#[derive(Debug)]
pub struct LineFailure {
    pub product_id: ProductId,
    pub error: StoreError,
}

/// Outcome of a submission that got past order creation.
#[derive(Debug)]
pub struct SubmissionReport {
    /// Id generated for the new order.
    pub order_id: OrderId,
    /// Products whose order line was written.
    pub linked: Vec<ProductId>,
    /// Selected products that were no longer in the cart.
    pub skipped: Vec<ProductId>,
    /// Products whose order line insert failed.
    pub failed: Vec<LineFailure>,
}

impl SubmissionReport {
    /// Whether every selected product ended up on the order.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// Line outcome inside [`link_selected_products`].
enum Linked {
    Written(ProductId),
    Skipped(ProductId),
    Failed(LineFailure),
}

/// Resolve the customer orders are placed for.
///
/// `Ok(None)` means the lookup worked but no such customer exists; callers
/// hand that to [`OrderSubmitter::submit`], which reports
/// [`DeskError::MissingCustomer`].
///
/// # Errors
///
/// Returns [`DeskError::FetchFailed`] if the lookup itself fails.
#[instrument(skip(store))]
pub async fn resolve_customer<D: DataStore>(
    store: &D,
    id: CustomerId,
) -> Result<Option<Customer>, DeskError> {
    match store.lookup_customer(id).await {
        Ok(Some(customer)) => Ok(Some(customer)),
        Ok(None) => {
            warn!(%id, "Customer not found");
            Ok(None)
        }
        Err(e) => {
            error!(%id, error = %e, "Error fetching customer details");
            Err(DeskError::FetchFailed(e))
        }
    }
}

/// Writes orders for the shopper's cart.
pub struct OrderSubmitter<'a, D> {
    store: &'a D,
    description: String,
}

impl<'a, D: DataStore> OrderSubmitter<'a, D> {
    /// A submitter writing orders labelled [`DEFAULT_ORDER_DESCRIPTION`].
    #[must_use]
    pub fn new(store: &'a D) -> Self {
        Self::with_description(store, DEFAULT_ORDER_DESCRIPTION)
    }

    #[must_use]
    pub fn with_description(store: &'a D, description: impl Into<String>) -> Self {
        Self {
            store,
            description: description.into(),
        }
    }

    /// Submit the selected cart lines as one order for `customer`.
    ///
    /// Preconditions are checked in order, before any write: the selection
    /// must be non-empty, then the customer must be resolved. On success the
    /// cart and the selection are both cleared. On [`DeskError::OrderCreateFailed`]
    /// neither is touched.
    ///
    /// # Errors
    ///
    /// - [`DeskError::EmptySelection`] if nothing is selected
    /// - [`DeskError::MissingCustomer`] if `customer` is `None`
    /// - [`DeskError::OrderCreateFailed`] if the order row could not be written
    #[instrument(skip_all, fields(selected = selection.len()))]
    pub async fn submit<S: LocalStore, C: Clock>(
        &self,
        cart: &mut CartStore<S, C>,
        selection: &mut Selection,
        customer: Option<&Customer>,
    ) -> Result<SubmissionReport, DeskError> {
        if selection.is_empty() {
            return Err(DeskError::EmptySelection);
        }
        let customer = customer.ok_or(DeskError::MissingCustomer)?;

        let order_id = self.create_order(customer.id, Utc::now()).await?;
        let report = link_selected_products(self.store, order_id, cart.lines(), selection).await;

        info!(
            %order_id,
            linked = report.linked.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Order submitted"
        );

        cart.clear();
        selection.clear();
        Ok(report)
    }

    async fn create_order(
        &self,
        customer_id: CustomerId,
        created_at: DateTime<Utc>,
    ) -> Result<OrderId, DeskError> {
        let order = NewOrder {
            description: self.description.clone(),
            created_at,
            customer_id,
        };

        self.store.create_order(&order).await.map_err(|e| {
            error!(%customer_id, error = %e, "Error submitting order");
            DeskError::OrderCreateFailed(e)
        })
    }
}

/// Write one order line per selected product, all concurrently.
///
/// Quantities are read from `lines` at call time. Selected ids missing from
/// `lines` are skipped. Insert failures are collected, not propagated, and
/// every insert is awaited before returning.
pub async fn link_selected_products<D: DataStore>(
    store: &D,
    order_id: OrderId,
    lines: &[CartLine],
    selection: &Selection,
) -> SubmissionReport {
    let inserts = selection.ids().iter().map(|product_id| {
        let line = lines.iter().find(|line| line.product_id() == *product_id);
        async move {
            let Some(line) = line else {
                warn!(%order_id, %product_id, "Selected product no longer in cart, skipping");
                return Linked::Skipped(*product_id);
            };

            let record = NewOrderLine {
                order_id,
                product_id: *product_id,
                quantity: line.quantity,
            };
            match store.create_order_line(&record).await {
                Ok(()) => Linked::Written(*product_id),
                Err(e) => {
                    error!(%order_id, %product_id, error = %e, "Error linking product to order");
                    Linked::Failed(LineFailure {
                        product_id: *product_id,
                        error: e,
                    })
                }
            }
        }
    });

    let mut report = SubmissionReport {
        order_id,
        linked: Vec::new(),
        skipped: Vec::new(),
        failed: Vec::new(),
    };
    for outcome in join_all(inserts).await {
        match outcome {
            Linked::Written(id) => report.linked.push(id),
            Linked::Skipped(id) => report.skipped.push(id),
            Linked::Failed(failure) => report.failed.push(failure),
        }
    }
    report
}
