use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

row_id!(
    /// Identifier of a row in the stock table.
    StockId
);

/// A named ingredient or supply and how much of it is on hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockEntry {
    pub id: StockId,
    pub item_name: String,
    /// Never negative.
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload.
#[derive(Debug, Clone)]
pub struct StockCreate {
    pub item_name: String,
    pub quantity: i64,
    pub at: DateTime<Utc>,
}

/// Direct set of name and/or quantity; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockFields {
    pub item_name: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct StockUpdate {
    pub fields: StockFields,
    pub at: DateTime<Utc>,
}
