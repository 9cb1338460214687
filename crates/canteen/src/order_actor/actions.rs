//! Custom actions for the Order table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Operations on an order beyond status updates.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Records a payment attempt against this order.
    ///
    /// Runs inside the order table, so it cannot interleave with the order being deleted.
    RecordPayment {
        amount: Decimal,
        payment_method: Option<String>,
        at: DateTime<Utc>,
    },
}
