use crate::model::{MenuItemId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

row_id!(
    /// Store-internal identifier of an order. Customers see the order code instead.
    OrderId
);

/// Kitchen progress of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Ready,
    Done,
}

/// Payment progress of an order, independent of [`OrderStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Ready => "Ready",
            OrderStatus::Done => "Done",
        })
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Ready" => Ok(OrderStatus::Ready),
            "Done" => Ok(OrderStatus::Done),
            other => Err(format!("Invalid status: {other:?}")),
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
        })
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(PaymentStatus::Pending),
            "Paid" => Ok(PaymentStatus::Paid),
            "Failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("Invalid payment status: {other:?}")),
        }
    }
}

/// One line of an order, snapshotted at placement.
///
/// Later edits to the menu item (or its deletion) never change a stored line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "menuItemId", alias = "menu_item_id")]
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "unit_price", skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl OrderLine {
    pub fn new(menu_item_id: MenuItemId, quantity: u32) -> Self {
        Self {
            menu_item_id,
            quantity,
            name: None,
            price: None,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    /// Customer-facing code, e.g. `ORD-1760745600000`. Unique and never reassigned.
    #[serde(rename = "order_id")]
    pub order_code: String,
    /// `None` once the owning account no longer exists.
    pub user_id: Option<UserId>,
    #[serde(rename = "order_items")]
    pub items: Vec<OrderLine>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: Decimal,
    pub tax_amount: Decimal,
    pub subtotal_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload. Amounts are taken as supplied by the customer.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub order_code: String,
    pub user_id: Option<UserId>,
    pub items: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub at: DateTime<Utc>,
}

/// Status and/or payment status change.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub at: DateTime<Utc>,
}

/// What a customer sees in their order history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub order_id: String,
    pub order_items: Vec<OrderLine>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_code,
            order_items: order.items,
            status: order.status,
            total_amount: order.total_amount,
            created_at: order.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings_are_exact() {
        assert_eq!("Ready".parse::<OrderStatus>().unwrap(), OrderStatus::Ready);
        assert!("ready".parse::<OrderStatus>().is_err());
        assert!("Cancelled".parse::<OrderStatus>().is_err());
        assert_eq!("Paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert!("Refunded".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_order_line_accepts_both_spellings() {
        let camel: OrderLine =
            serde_json::from_str(r#"{"menuItemId": 1, "quantity": 2}"#).unwrap();
        let snake: OrderLine =
            serde_json::from_str(r#"{"menu_item_id": 1, "quantity": 2, "unit_price": 40}"#)
                .unwrap();
        assert_eq!(camel.menu_item_id, MenuItemId(1));
        assert_eq!(snake.menu_item_id, MenuItemId(1));
        assert_eq!(snake.price, Some(Decimal::from(40)));
    }

    #[test]
    fn test_order_serializes_with_column_names() {
        let at = DateTime::from_timestamp(0, 0).unwrap();
        let order = Order {
            id: OrderId(1),
            order_code: "ORD-1".into(),
            user_id: None,
            items: vec![OrderLine::new(MenuItemId(2), 1)],
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            total_amount: Decimal::new(8800, 2),
            tax_amount: Decimal::new(800, 2),
            subtotal_amount: Decimal::new(8000, 2),
            created_at: at,
            updated_at: at,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["order_id"], "ORD-1");
        assert_eq!(json["order_items"][0]["menuItemId"], 2);
        assert_eq!(json["total_amount"], "88.00");
        assert_eq!(json["status"], "Pending");
        assert!(json["user_id"].is_null());
    }
}
