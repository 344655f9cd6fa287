//! Integration test support for Order Desk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p order-desk-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart store persistence and catalog-driven cart edits
//! - `order_submission` - Two-phase submission against [`FakeDataStore`]
//!
//! The fake records every write so tests can assert exactly what reached the
//! data store, and can be told to fail specific calls.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use order_desk_client::{DataStore, StoreError};
use order_desk_core::{
    Customer, CustomerId, Email, NewOrder, NewOrderLine, Order, OrderId, Product, ProductId,
};

/// An in-memory [`DataStore`] that records writes.
#[derive(Debug, Default)]
pub struct FakeDataStore {
    inner: Mutex<FakeState>,
}

#[derive(Debug, Default)]
struct FakeState {
    products: Vec<Product>,
    customers: Vec<Customer>,
    orders: Vec<(OrderId, NewOrder)>,
    order_lines: Vec<NewOrderLine>,
    next_order_id: i64,
    fail_list_products: bool,
    fail_lookup_customer: bool,
    fail_create_order: bool,
    fail_lines_for: HashSet<ProductId>,
}

impl FakeDataStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FakeState {
                next_order_id: 100,
                ..FakeState::default()
            }),
        }
    }

    #[must_use]
    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.state().products = products;
        self
    }

    #[must_use]
    pub fn with_customer(self, customer: Customer) -> Self {
        self.state().customers.push(customer);
        self
    }

    #[must_use]
    pub fn failing_list_products(self) -> Self {
        self.state().fail_list_products = true;
        self
    }

    #[must_use]
    pub fn failing_lookup_customer(self) -> Self {
        self.state().fail_lookup_customer = true;
        self
    }

    #[must_use]
    pub fn failing_create_order(self) -> Self {
        self.state().fail_create_order = true;
        self
    }

    /// Make order line inserts for `product_id` fail.
    #[must_use]
    pub fn failing_line_for(self, product_id: ProductId) -> Self {
        self.state().fail_lines_for.insert(product_id);
        self
    }

    /// Orders written so far, with their generated ids.
    #[must_use]
    pub fn orders(&self) -> Vec<(OrderId, NewOrder)> {
        self.state().orders.clone()
    }

    /// Order lines written so far.
    #[must_use]
    pub fn order_lines(&self) -> Vec<NewOrderLine> {
        self.state().order_lines.clone()
    }

    /// Total successful writes of any kind.
    #[must_use]
    pub fn write_count(&self) -> usize {
        let state = self.state();
        state.orders.len() + state.order_lines.len()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn rejected(message: &str) -> StoreError {
    StoreError::Api {
        status: 400,
        message: message.to_string(),
    }
}

impl DataStore for FakeDataStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let state = self.state();
        if state.fail_list_products {
            return Err(StoreError::Api {
                status: 503,
                message: "catalog unavailable".to_string(),
            });
        }
        Ok(state.products.clone())
    }

    async fn lookup_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let state = self.state();
        if state.fail_lookup_customer {
            return Err(StoreError::Parse("customer lookup failed".to_string()));
        }
        Ok(state.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn create_order(&self, order: &NewOrder) -> Result<OrderId, StoreError> {
        let mut state = self.state();
        if state.fail_create_order {
            return Err(rejected("orders insert rejected"));
        }
        let id = OrderId::new(state.next_order_id);
        state.next_order_id += 1;
        state.orders.push((id, order.clone()));
        Ok(id)
    }

    async fn create_order_line(&self, line: &NewOrderLine) -> Result<(), StoreError> {
        let mut state = self.state();
        if state.fail_lines_for.contains(&line.product_id) {
            return Err(rejected("orderproductmap insert rejected"));
        }
        state.order_lines.push(*line);
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let state = self.state();
        let mut orders: Vec<Order> = state
            .orders
            .iter()
            .map(|(id, order)| Order {
                id: *id,
                created_at: order.created_at,
                customer_id: Some(order.customer_id),
                description: Some(order.description.clone()),
            })
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }
}

// =============================================================================
// Fixtures
// =============================================================================

#[must_use]
pub fn laptop() -> Product {
    Product::new(ProductId::new(1), "Laptop", "Slim 14 inch notebook")
}

#[must_use]
pub fn gaming_laptop() -> Product {
    Product::new(ProductId::new(2), "Gaming Laptop", "RGB keyboard")
}

#[must_use]
pub fn car() -> Product {
    Product::new(ProductId::new(3), "Car", "Red hatchback")
}

#[must_use]
pub fn bike() -> Product {
    Product::new(ProductId::new(4), "Bike", "Road bike")
}

#[must_use]
pub fn catalog() -> Vec<Product> {
    vec![laptop(), gaming_laptop(), car(), bike()]
}

/// Customer 2, the default configured customer.
///
/// # Panics
///
/// Never: the address is a valid literal.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn customer() -> Customer {
    Customer {
        id: CustomerId::new(2),
        name: "A".to_string(),
        email: Email::parse("a@x.com").unwrap(),
    }
}

/// A fixed clock reading for deterministic `date_added` values.
///
/// # Panics
///
/// Never: the timestamp is a valid literal.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn fixed_time() -> DateTime<Utc> {
    "2024-05-01T08:00:00Z".parse().unwrap()
}
