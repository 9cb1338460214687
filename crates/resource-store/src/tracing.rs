//! # Logging
//!
//! [`setup_tracing`] installs the `tracing` subscriber used by the server binary and by tests
//! that want to see table activity.
//!
//! Every table logs under its row type (`entity_type="Order"`), so the module path is hidden
//! with `with_target(false)` and the compact formatter keeps spans inline.
//!
//! ```bash
//! # Request lines, table inserts/deletes and rollbacks
//! RUST_LOG=info canteen-server
//!
//! # Full payloads on every table request
//! RUST_LOG=debug canteen-server
//!
//! # Only the store internals
//! RUST_LOG=resource_store=debug canteen-server
//! ```
//!
//! With `RUST_LOG=info` placing an order reads:
//!
//! ```text
//! INFO create_order: Created entity_type="Order" id=1 size=1
//! INFO create_order: Order placed order_id="ORD-1760745600000"
//! ```
//!
//! A rejected stock adjustment shows the rollback:
//!
//! ```text
//! WARN decrement: Rolled back entity_type="StockEntry" id=1 error=Entity error: Quantity must be positive
//! ```

/// Initializes logging from `RUST_LOG`. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already names the table
        .compact()
        .init();
}
