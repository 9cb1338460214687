use crate::model::{OrderId, PaymentStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

row_id!(
    /// Identifier of a row in the payments table.
    PaymentId
);

/// One payment attempt against an order. Recorded, never processed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub amount: Decimal,
    pub payment_method: Option<String>,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload.
#[derive(Debug, Clone)]
pub struct PaymentCreate {
    pub order_id: OrderId,
    pub amount: Decimal,
    pub payment_method: Option<String>,
    pub at: DateTime<Utc>,
}
