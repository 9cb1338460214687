//! Row types for the five canteen tables and their insert/update payloads.
//!
//! Each row implements [`ActorEntity`](resource_store::ActorEntity) in its table module
//! (`user_actor`, `menu_actor`, ...). Rows serialize with the column names clients already
//! depend on (`order_id`, `order_items`, `total_amount`, ...).

/// Declares a SERIAL-style row identifier.
macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// Rounds to `dp` places and pads to exactly that scale, like a `DECIMAL(_, dp)` column.
pub fn fixed_scale(value: rust_decimal::Decimal, dp: u32) -> rust_decimal::Decimal {
    let mut value = value.round_dp(dp);
    value.rescale(dp);
    value
}

pub mod menu;
pub mod order;
pub mod payment;
pub mod stock;
pub mod user;

pub use menu::*;
pub use order::*;
pub use payment::*;
pub use stock::*;
pub use user::*;
