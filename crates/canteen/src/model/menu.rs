use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

row_id!(
    /// Identifier of a row in the menu_items table.
    MenuItemId
);

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    /// DECIMAL(10, 2), never negative.
    pub price: Decimal,
    pub image_url: Option<String>,
    pub available: bool,
    /// DECIMAL(3, 1) between 0 and 5.
    pub rating: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when adding a dish. `available` defaults to true, `rating` to 0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
    pub rating: Option<Decimal>,
}

/// Insert payload.
#[derive(Debug, Clone)]
pub struct MenuItemCreate {
    pub fields: MenuItemFields,
    pub at: DateTime<Utc>,
}

/// Partial update: only the fields that are `Some` change.
#[derive(Debug, Clone)]
pub struct MenuItemUpdate {
    pub fields: MenuItemFields,
    pub at: DateTime<Utc>,
}

impl MenuItemUpdate {
    pub fn availability(available: bool, at: DateTime<Utc>) -> Self {
        Self {
            fields: MenuItemFields {
                available: Some(available),
                ..MenuItemFields::default()
            },
            at,
        }
    }
}
