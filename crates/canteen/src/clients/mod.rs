//! Typed clients over the generic [`ResourceClient`](resource_store::ResourceClient).
//!
//! Each client is the public face of one table: it checks the caller's role against
//! [`policy`](crate::auth::policy), stamps timestamps from the injected clock, and turns store
//! errors back into the table's own error type.

pub mod menu_client;
pub mod order_client;
pub mod payment_client;
pub mod stock_client;
pub mod user_client;

pub use menu_client::*;
pub use order_client::*;
pub use payment_client::*;
pub use stock_client::*;
pub use user_client::*;
