//! Integration tests for two-phase order submission.
//!
//! These run the real cart store and submitter against `FakeDataStore`, so
//! every assertion is about what actually reached the data store.

use order_desk_client::cart::CartStore;
use order_desk_client::local::MemoryStore;
use order_desk_client::submit::DEFAULT_ORDER_DESCRIPTION;
use order_desk_client::{
    DeskError, OrderSubmitter, Selection, StoreError, link_selected_products, resolve_customer,
};
use order_desk_core::{CustomerId, OrderId, ProductId, Quantity};
use order_desk_integration_tests::{FakeDataStore, bike, car, customer, fixed_time, laptop};

fn ids(values: &[i64]) -> Selection {
    values.iter().copied().map(ProductId::new).collect()
}

// =============================================================================
// Preconditions
// =============================================================================

#[tokio::test]
async fn test_empty_selection_writes_nothing() {
    let store = FakeDataStore::new();
    let local = MemoryStore::new();
    let mut cart = CartStore::load(&local);
    cart.add_to_cart(&laptop());
    let mut selection = cart.proceed().unwrap();

    let result = OrderSubmitter::new(&store)
        .submit(&mut cart, &mut selection, Some(&customer()))
        .await;

    assert!(matches!(result, Err(DeskError::EmptySelection)));
    assert_eq!(store.write_count(), 0);
    assert_eq!(cart.len(), 1);
}

#[tokio::test]
async fn test_empty_selection_reported_before_missing_customer() {
    let store = FakeDataStore::new();
    let local = MemoryStore::new();
    let mut cart = CartStore::load(&local);
    cart.add_to_cart(&laptop());
    let mut selection = Selection::new();

    let result = OrderSubmitter::new(&store)
        .submit(&mut cart, &mut selection, None)
        .await;

    assert!(matches!(result, Err(DeskError::EmptySelection)));
}

#[tokio::test]
async fn test_missing_customer_writes_nothing() {
    let store = FakeDataStore::new();
    let local = MemoryStore::new();
    let mut cart = CartStore::load(&local);
    cart.add_to_cart(&laptop());
    let mut selection = ids(&[1]);

    let result = OrderSubmitter::new(&store)
        .submit(&mut cart, &mut selection, None)
        .await;

    assert!(matches!(result, Err(DeskError::MissingCustomer)));
    assert_eq!(store.write_count(), 0);
    assert_eq!(selection.len(), 1);
    assert_eq!(cart.len(), 1);
}

#[test]
fn test_proceed_with_empty_cart_blocks() {
    let local = MemoryStore::new();
    let cart = CartStore::load(&local);

    let err = cart.proceed().unwrap_err();
    assert!(matches!(err, DeskError::EmptyCart));
    assert_eq!(err.user_message(), "Your cart is empty. Add items to proceed.");
}

// =============================================================================
// Successful Submission
// =============================================================================

#[tokio::test]
async fn test_single_line_scenario() {
    let store = FakeDataStore::new();
    let local = MemoryStore::new();
    let mut cart = CartStore::load(&local);
    cart.add_to_cart(&laptop());
    cart.add_to_cart(&laptop());
    let mut selection = cart.proceed().unwrap();
    selection.select(ProductId::new(1));

    let report = OrderSubmitter::new(&store)
        .submit(&mut cart, &mut selection, Some(&customer()))
        .await
        .unwrap();

    let orders = store.orders();
    assert_eq!(orders.len(), 1);
    let (order_id, order) = &orders[0];
    assert_eq!(order.customer_id, CustomerId::new(2));
    assert_eq!(order.description, DEFAULT_ORDER_DESCRIPTION);

    let lines = store.order_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].order_id, *order_id);
    assert_eq!(lines[0].product_id, ProductId::new(1));
    assert_eq!(lines[0].quantity, Quantity::new(2).unwrap());

    assert_eq!(report.order_id, *order_id);
    assert!(report.is_complete());
    assert!(cart.is_empty());
    assert!(selection.is_empty());

    // The persisted copy is gone too
    assert!(CartStore::load(&local).is_empty());
}

#[tokio::test]
async fn test_only_selected_lines_are_linked() {
    let store = FakeDataStore::new();
    let local = MemoryStore::new();
    let mut cart = CartStore::load(&local);
    cart.add_to_cart(&laptop());
    cart.add_to_cart(&car());
    cart.add_to_cart(&bike());
    cart.increment_quantity(ProductId::new(4));
    let mut selection = ids(&[4, 1]);

    let report = OrderSubmitter::with_description(&store, "Walk-in")
        .submit(&mut cart, &mut selection, Some(&customer()))
        .await
        .unwrap();

    let mut linked: Vec<(i64, u32)> = store
        .order_lines()
        .iter()
        .map(|l| (l.product_id.as_i64(), l.quantity.get()))
        .collect();
    linked.sort_unstable();
    assert_eq!(linked, vec![(1, 1), (4, 2)]);
    assert_eq!(report.linked.len(), 2);
    assert_eq!(store.orders()[0].1.description, "Walk-in");
    // The unselected car goes too: a successful submission clears the whole cart
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_resubmission_creates_a_second_order() {
    let store = FakeDataStore::new();
    let local = MemoryStore::new();
    let submitter = OrderSubmitter::new(&store);

    for _ in 0..2 {
        let mut cart = CartStore::load(&local);
        cart.add_to_cart(&laptop());
        let mut selection = ids(&[1]);
        submitter
            .submit(&mut cart, &mut selection, Some(&customer()))
            .await
            .unwrap();
    }

    let orders = store.orders();
    assert_eq!(orders.len(), 2);
    assert_ne!(orders[0].0, orders[1].0);
}

// =============================================================================
// Failure Handling
// =============================================================================

#[tokio::test]
async fn test_order_create_failure_leaves_state_untouched() {
    let store = FakeDataStore::new().failing_create_order();
    let local = MemoryStore::new();
    let mut cart = CartStore::load(&local);
    cart.add_to_cart(&laptop());
    let mut selection = ids(&[1]);

    let result = OrderSubmitter::new(&store)
        .submit(&mut cart, &mut selection, Some(&customer()))
        .await;

    match result {
        Err(DeskError::OrderCreateFailed(StoreError::Api { status, .. })) => assert_eq!(status, 400),
        other => panic!("expected OrderCreateFailed, got {other:?}"),
    }
    assert_eq!(store.write_count(), 0);
    assert_eq!(cart.len(), 1);
    assert_eq!(selection.len(), 1);
    assert_eq!(CartStore::load(&local).len(), 1);
}

#[tokio::test]
async fn test_line_failure_is_not_fatal() {
    let store = FakeDataStore::new().failing_line_for(ProductId::new(3));
    let local = MemoryStore::new();
    let mut cart = CartStore::load(&local);
    cart.add_to_cart(&laptop());
    cart.add_to_cart(&car());
    cart.add_to_cart(&bike());
    let mut selection = ids(&[1, 3, 4]);

    let report = OrderSubmitter::new(&store)
        .submit(&mut cart, &mut selection, Some(&customer()))
        .await
        .unwrap();

    assert_eq!(store.orders().len(), 1);
    assert_eq!(store.order_lines().len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].product_id, ProductId::new(3));
    assert!(!report.is_complete());
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_link_skips_products_missing_from_cart() {
    let store = FakeDataStore::new();
    let local = MemoryStore::new();
    let mut cart = CartStore::load(&local);
    cart.add_to_cart(&laptop());
    let selection = ids(&[1, 3]);

    let report = link_selected_products(&store, OrderId::new(7), cart.lines(), &selection).await;

    assert_eq!(report.linked, vec![ProductId::new(1)]);
    assert_eq!(report.skipped, vec![ProductId::new(3)]);
    assert!(report.failed.is_empty());
    assert_eq!(store.order_lines().len(), 1);
    assert_eq!(store.order_lines()[0].order_id, OrderId::new(7));
}

#[tokio::test]
async fn test_line_quantity_read_at_submission_time() {
    let store = FakeDataStore::new();
    let local = MemoryStore::new();
    let mut cart = CartStore::load_with_clock(&local, fixed_time);
    cart.add_to_cart(&laptop());
    let mut selection = cart.proceed().unwrap();
    selection.select(ProductId::new(1));

    // Quantity changes during review are picked up
    cart.increment_quantity(ProductId::new(1));
    cart.increment_quantity(ProductId::new(1));

    OrderSubmitter::new(&store)
        .submit(&mut cart, &mut selection, Some(&customer()))
        .await
        .unwrap();

    assert_eq!(store.order_lines()[0].quantity.get(), 3);
}

// =============================================================================
// Customer Resolution
// =============================================================================

#[tokio::test]
async fn test_resolve_customer() {
    let store = FakeDataStore::new().with_customer(customer());

    let found = resolve_customer(&store, CustomerId::new(2)).await.unwrap();
    assert_eq!(found.unwrap().email.as_str(), "a@x.com");

    let missing = resolve_customer(&store, CustomerId::new(9)).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_resolve_customer_fetch_failure() {
    let store = FakeDataStore::new().failing_lookup_customer();

    let result = resolve_customer(&store, CustomerId::new(2)).await;
    assert!(matches!(result, Err(DeskError::FetchFailed(_))));
}
