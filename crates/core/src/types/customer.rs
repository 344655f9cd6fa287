//! Customer records.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::CustomerId;

/// A customer row as returned by the `customers` lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(rename = "customer_name")]
    pub name: String,
    pub email: Email,
}
