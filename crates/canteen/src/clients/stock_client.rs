//! # Stock Client
//!
//! The stock ledger. Reads are public; creating and deleting entries is for admin and
//! kitchen; direct sets and relative adjustments are also open to cashiers.

use crate::auth::{policy, Principal};
use crate::clock::Clock;
use crate::model::{StockCreate, StockEntry, StockFields, StockId, StockUpdate};
use crate::stock_actor::{check_delta, StockAction, StockError};
use async_trait::async_trait;
use resource_store::{ActorClient, FrameworkError, ResourceClient};
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct StockClient {
    inner: ResourceClient<StockEntry>,
    clock: Arc<dyn Clock>,
}

impl StockClient {
    pub fn new(inner: ResourceClient<StockEntry>, clock: Arc<dyn Clock>) -> Self {
        Self { inner, clock }
    }

    /// All entries ordered by item name.
    #[instrument(skip(self))]
    pub async fn list_entries(&self) -> Result<Vec<StockEntry>, StockError> {
        let mut entries = self.list().await?;
        entries.sort_by(|a, b| a.item_name.cmp(&b.item_name).then(a.id.cmp(&b.id)));
        Ok(entries)
    }

    /// The staff view: newest entries first.
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn list_for_staff(&self, principal: &Principal) -> Result<Vec<StockEntry>, StockError> {
        policy::STOCK_STAFF.require(principal)?;
        let mut entries = self.list().await?;
        entries.sort_by_key(|e| Reverse((e.created_at, e.id)));
        Ok(entries)
    }

    #[instrument(skip(self))]
    pub async fn get_entry(&self, id: StockId) -> Result<StockEntry, StockError> {
        self.get(id)
            .await?
            .ok_or_else(|| StockError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn create_entry(
        &self,
        principal: &Principal,
        item_name: String,
        quantity: i64,
    ) -> Result<StockEntry, StockError> {
        policy::STOCK_MANAGE.require(principal)?;
        let params = StockCreate {
            item_name,
            quantity,
            at: self.clock.now(),
        };
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(%id, "Stock entry created");
        self.get_entry(id).await
    }

    /// Sets name and/or quantity directly; absent fields are kept.
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn set_entry(
        &self,
        principal: &Principal,
        id: StockId,
        fields: StockFields,
    ) -> Result<StockEntry, StockError> {
        policy::STOCK_ADJUST.require(principal)?;
        let update = StockUpdate {
            fields,
            at: self.clock.now(),
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Adds `by` (> 0) to the quantity.
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn increment(
        &self,
        principal: &Principal,
        id: StockId,
        by: i64,
    ) -> Result<StockEntry, StockError> {
        policy::STOCK_ADJUST.require(principal)?;
        let by = check_delta(by)?;
        let at = self.clock.now();
        self.adjust(id, StockAction::Increment { by, at }).await
    }

    /// Subtracts `by` (> 0), flooring at zero.
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn decrement(
        &self,
        principal: &Principal,
        id: StockId,
        by: i64,
    ) -> Result<StockEntry, StockError> {
        policy::STOCK_ADJUST.require(principal)?;
        let by = check_delta(by)?;
        let at = self.clock.now();
        self.adjust(id, StockAction::Decrement { by, at }).await
    }

    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn delete_entry(&self, principal: &Principal, id: StockId) -> Result<(), StockError> {
        policy::STOCK_MANAGE.require(principal)?;
        self.delete(id).await?;
        info!(%id, "Stock entry deleted");
        Ok(())
    }

    async fn adjust(&self, id: StockId, action: StockAction) -> Result<StockEntry, StockError> {
        let entry = self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?;
        info!(%id, quantity = entry.quantity, "Stock adjusted");
        Ok(entry)
    }
}

#[async_trait]
impl ActorClient<StockEntry> for StockClient {
    type Error = StockError;

    fn inner(&self) -> &ResourceClient<StockEntry> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<StockError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => StockError::NotFound(id),
            Err(other) => StockError::ActorCommunicationError(other.to_string()),
        }
    }
}
