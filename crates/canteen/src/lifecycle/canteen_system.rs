use crate::api::AppState;
use crate::auth::{AuthorizationGate, CredentialHasher, JwtTokens};
use crate::clients::{MenuClient, OrderClient, PaymentClient, StockClient, UserClient};
use crate::clock::Clock;
use crate::config::Config;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running store: one actor per table plus the typed clients over them.
///
/// # Example
///
/// ```ignore
/// let system = CanteenSystem::new(&config, Arc::new(SystemClock), Arc::new(Argon2Hasher::default()));
///
/// let menu = system.menu.list_items().await?;
///
/// system.shutdown().await?;
/// ```
pub struct CanteenSystem {
    pub users: UserClient,
    pub menu: MenuClient,
    pub stock: StockClient,
    pub orders: OrderClient,
    pub payments: PaymentClient,

    pub tokens: Arc<JwtTokens>,
    pub gate: AuthorizationGate,
    pub clock: Arc<dyn Clock>,

    /// Table tasks, awaited on shutdown.
    handles: Vec<JoinHandle<()>>,
}

impl CanteenSystem {
    /// Spawns every table. Must be called inside a tokio runtime.
    pub fn new(config: &Config, clock: Arc<dyn Clock>, hasher: Arc<dyn CredentialHasher>) -> Self {
        let capacity = config.channel_capacity;

        // 1. Create tables (no dependencies yet)
        let (user_actor, user_client) = crate::user_actor::new(capacity);
        let (menu_actor, menu_client) = crate::menu_actor::new(capacity);
        let (stock_actor, stock_client) = crate::stock_actor::new(capacity);
        let (payment_actor, payment_client) = crate::payment_actor::new(capacity);
        let (order_actor, order_client) = crate::order_actor::new(capacity);

        let payments = PaymentClient::new(payment_client);

        // 2. Start them, injecting context
        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(menu_actor.run(())),
            tokio::spawn(stock_actor.run(())),
            // Order table: payments client for cascades and payment recording
            tokio::spawn(order_actor.run(payments.clone())),
            tokio::spawn(payment_actor.run(())),
        ];

        let tokens = Arc::new(JwtTokens::new(
            &config.jwt_secret,
            config.jwt_expiry_secs,
            clock.clone(),
        ));
        let gate = AuthorizationGate::new(tokens.clone());

        info!(tables = handles.len(), capacity, "Store started");

        Self {
            users: UserClient::new(user_client, hasher, clock.clone()),
            menu: MenuClient::new(menu_client, clock.clone()),
            stock: StockClient::new(stock_client, clock.clone()),
            orders: OrderClient::new(order_client, payments.clone(), clock.clone()),
            payments,
            tokens,
            gate,
            clock,
            handles,
        }
    }

    /// Clones of the handles the HTTP layer needs.
    pub fn api_state(&self) -> AppState {
        AppState {
            users: self.users.clone(),
            menu: self.menu.clone(),
            stock: self.stock.clone(),
            orders: self.orders.clone(),
            tokens: self.tokens.clone(),
            gate: self.gate.clone(),
            clock: self.clock.clone(),
        }
    }

    /// Drops every client and waits for all tables to stop.
    ///
    /// Clones handed out earlier (e.g. through [`api_state`](Self::api_state)) must be dropped
    /// first, otherwise their tables keep running and this never returns.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store...");

        drop(self.users);
        drop(self.menu);
        drop(self.stock);
        drop(self.orders);
        drop(self.payments);
        drop(self.gate);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Table task failed");
                return Err(format!("Table task failed: {e}"));
            }
        }

        info!("Store shutdown complete");
        Ok(())
    }
}
