//! # Menu Client
//!
//! The menu catalog: public reads, admin-only writes, and availability toggles for floor
//! staff.

use crate::auth::{policy, Principal};
use crate::clock::Clock;
use crate::menu_actor::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemFields, MenuItemId, MenuItemUpdate};
use async_trait::async_trait;
use resource_store::{ActorClient, FrameworkError, ResourceClient};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
    clock: Arc<dyn Clock>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>, clock: Arc<dyn Clock>) -> Self {
        Self { inner, clock }
    }

    /// Every dish, ordered by category then name. No authentication.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<MenuItem>, MenuError> {
        let mut items = self.list().await?;
        items.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
        Ok(items)
    }

    /// The staff view of the menu (admin, kitchen).
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn list_for_staff(&self, principal: &Principal) -> Result<Vec<MenuItem>, MenuError> {
        policy::MENU_STAFF.require(principal)?;
        self.list_items().await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: MenuItemId) -> Result<MenuItem, MenuError> {
        self.get(id)
            .await?
            .ok_or_else(|| MenuError::NotFound(id.to_string()))
    }

    /// Adds a dish (admin). Name, category and price are required.
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn create_item(
        &self,
        principal: &Principal,
        fields: MenuItemFields,
    ) -> Result<MenuItem, MenuError> {
        policy::MENU_WRITE.require(principal)?;
        let params = MenuItemCreate {
            fields,
            at: self.clock.now(),
        };
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(%id, "Menu item created");
        self.get_item(id).await
    }

    /// Partial update (admin).
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn update_item(
        &self,
        principal: &Principal,
        id: MenuItemId,
        fields: MenuItemFields,
    ) -> Result<MenuItem, MenuError> {
        policy::MENU_WRITE.require(principal)?;
        let update = MenuItemUpdate {
            fields,
            at: self.clock.now(),
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Marks a dish available or sold out (admin, kitchen, cashier).
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn set_availability(
        &self,
        principal: &Principal,
        id: MenuItemId,
        available: bool,
    ) -> Result<MenuItem, MenuError> {
        policy::MENU_AVAILABILITY.require(principal)?;
        let update = MenuItemUpdate::availability(available, self.clock.now());
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Hard delete (admin). Orders keep their own copy of the line.
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn delete_item(&self, principal: &Principal, id: MenuItemId) -> Result<(), MenuError> {
        policy::MENU_WRITE.require(principal)?;
        self.delete(id).await?;
        info!(%id, "Menu item deleted");
        Ok(())
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<MenuError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => MenuError::NotFound(id),
            Err(other) => MenuError::ActorCommunicationError(other.to_string()),
        }
    }
}
