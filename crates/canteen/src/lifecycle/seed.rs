//! Start-up data: the default menu, the initial stock rows and the provisioned admin.
//!
//! Seeding writes through the raw table clients, so it needs no principal.

use super::CanteenSystem;
use crate::clients::{MenuClient, StockClient};
use crate::menu_actor::MenuError;
use crate::model::{MenuItemCreate, MenuItemFields, Role, StockCreate};
use crate::stock_actor::StockError;
use crate::user_actor::UserError;
use resource_store::ActorClient;
use rust_decimal::Decimal;
use tracing::{info, instrument};

/// Username of the account provisioned from `ADMIN_PASSWORD`.
pub const ADMIN_USERNAME: &str = "admin";

/// `(name, description, category, price, rating)`
const MENU: [(&str, &str, &str, i64, i64); 6] = [
    ("Idli Sambar", "Steamed rice cakes with lentil soup", "breakfast", 40, 47),
    ("Masala Dosa", "Crispy crepe with spiced potato filling", "breakfast", 60, 48),
    ("Paneer Tikka", "Grilled cottage cheese with spices", "snacks", 90, 46),
    ("Chole Bhature", "Spicy chickpeas with fried bread", "lunch", 80, 45),
    ("Cold Coffee", "Chilled coffee with ice cream", "beverages", 45, 44),
    ("Regular Thaali", "Complete meal with rice, dal, vegetables and roti", "lunch", 150, 49),
];

const STOCK: [(&str, i64); 3] = [("Rice", 10), ("Coffee Beans", 7), ("Paneer", 4)];

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Stock(#[from] StockError),
    #[error(transparent)]
    User(#[from] UserError),
}

impl CanteenSystem {
    /// Inserts the default menu and stock rows, unless the menu already has dishes.
    ///
    /// Returns whether anything was written.
    #[instrument(skip(self))]
    pub async fn seed_defaults(&self) -> Result<bool, SeedError> {
        if !self.menu.list().await?.is_empty() {
            info!("Menu already populated, skipping seed");
            return Ok(false);
        }

        let at = self.clock.now();
        for (name, description, category, price, rating) in MENU {
            let fields = MenuItemFields {
                name: Some(name.to_string()),
                description: Some(description.to_string()),
                category: Some(category.to_string()),
                price: Some(Decimal::from(price)),
                image_url: None,
                available: Some(true),
                rating: Some(Decimal::new(rating, 1)),
            };
            self.menu
                .inner()
                .create(MenuItemCreate { fields, at })
                .await
                .map_err(MenuClient::map_error)?;
        }

        for (item_name, quantity) in STOCK {
            self.stock
                .inner()
                .create(StockCreate {
                    item_name: item_name.to_string(),
                    quantity,
                    at,
                })
                .await
                .map_err(StockClient::map_error)?;
        }

        info!(menu = MENU.len(), stock = STOCK.len(), "Seeded default data");
        Ok(true)
    }

    /// Provisions the `admin` account with `password` if it does not exist yet.
    #[instrument(skip(self, password))]
    pub async fn provision_admin(&self, password: &str) -> Result<(), SeedError> {
        let admin = self
            .users
            .provision(ADMIN_USERNAME, password, Role::Admin)
            .await?;
        info!(id = %admin.id, "Admin account ready");
        Ok(())
    }
}
