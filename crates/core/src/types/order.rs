//! Order and order line records.
//!
//! [`NewOrder`] and [`NewOrderLine`] are the insert payloads; [`Order`] is
//! what the data store hands back when orders are listed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart_line::Quantity;
use super::id::{CustomerId, OrderId, ProductId};

/// Insert payload for the `orders` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
    #[serde(rename = "orderdescription")]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub customer_id: CustomerId,
}

/// Insert payload for the `orderproductmap` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewOrderLine {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(rename = "orderdescription", default)]
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_wire_names() {
        let order = NewOrder {
            description: "New Order".to_string(),
            created_at: "2024-05-01T10:00:00Z".parse().unwrap(),
            customer_id: CustomerId::new(2),
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["orderdescription"], "New Order");
        assert_eq!(value["customer_id"], 2);
        assert_eq!(value["created_at"], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_order_line_wire_names() {
        let line = NewOrderLine {
            order_id: OrderId::new(10),
            product_id: ProductId::new(1),
            quantity: Quantity::new(2).unwrap(),
        };
        let value = serde_json::to_value(line).unwrap();
        assert_eq!(value, serde_json::json!({"order_id": 10, "product_id": 1, "quantity": 2}));
    }

    #[test]
    fn test_order_tolerates_sparse_rows() {
        let order: Order =
            serde_json::from_str(r#"{"id": 4, "created_at": "2024-05-01T10:00:00+00:00"}"#).unwrap();
        assert_eq!(order.id, OrderId::new(4));
        assert_eq!(order.customer_id, None);
    }
}
