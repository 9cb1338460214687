//! Relative quantity changes for a [`StockEntry`](crate::model::StockEntry).

use super::StockError;
use chrono::{DateTime, Utc};

/// Adjustments applied inside the stock table, so two concurrent adjustments never
/// lose an update.
#[derive(Debug, Clone)]
pub enum StockAction {
    /// Adds `by` (> 0).
    Increment { by: i64, at: DateTime<Utc> },
    /// Subtracts `by` (> 0), flooring at zero. Never fails for a large `by`.
    Decrement { by: i64, at: DateTime<Utc> },
}

/// Accepts a strictly positive adjustment.
pub fn check_delta(by: i64) -> Result<i64, StockError> {
    if by <= 0 {
        return Err(StockError::InvalidArgument("Quantity must be positive".into()));
    }
    Ok(by)
}
