//! Core types for Order Desk.
//!
//! This module provides type-safe wrappers and records for the domain.

pub mod cart_line;
pub mod customer;
pub mod email;
pub mod id;
pub mod order;
pub mod product;

pub use cart_line::{CartLine, Quantity, QuantityError};
pub use customer::Customer;
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{NewOrder, NewOrderLine, Order};
pub use product::Product;
