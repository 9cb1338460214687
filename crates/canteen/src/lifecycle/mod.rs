//! # System Lifecycle
//!
//! Start-up, wiring and shutdown of the store.
//!
//! [`CanteenSystem`] is the explicitly constructed store handle: it spawns one table actor per
//! entity, injects the payments client into the order table (its cascade and payment
//! recording run from there), and hands typed clients to whoever needs them. Nothing in the
//! crate reaches for a global.
//!
//! ## Dependency Injection via Context
//!
//! Tables are created without dependencies and receive them when started:
//!
//! ```rust,ignore
//! let (payment_actor, payment_client) = payment_actor::new(capacity);
//! let (order_actor, order_client) = order_actor::new(capacity);
//!
//! let payments = PaymentClient::new(payment_client);
//! tokio::spawn(payment_actor.run(()));
//! tokio::spawn(order_actor.run(payments.clone()));
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. Every client is dropped, closing the table channels.
//! 2. Each actor sees its receiver close and leaves its loop. The order table drops its
//!    payments client on the way out, which in turn lets the payments table finish.
//! 3. All table tasks are awaited.
//!
//! The dependency graph is acyclic, so channel closure alone is enough.

pub mod canteen_system;
pub mod seed;

pub use canteen_system::*;
pub use seed::*;
