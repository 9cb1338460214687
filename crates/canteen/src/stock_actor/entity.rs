//! [`ActorEntity`] implementation for [`StockEntry`].

use super::actions::{check_delta, StockAction};
use super::error::StockError;
use crate::model::{StockCreate, StockEntry, StockId, StockUpdate};
use async_trait::async_trait;
use resource_store::ActorEntity;

fn item_name(name: String) -> Result<String, StockError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(StockError::InvalidArgument("Missing required field: item_name".into()));
    }
    Ok(name)
}

fn quantity(quantity: i64) -> Result<i64, StockError> {
    if quantity < 0 {
        return Err(StockError::InvalidArgument("Quantity cannot be negative".into()));
    }
    Ok(quantity)
}

#[async_trait]
impl ActorEntity for StockEntry {
    type Id = StockId;
    type Create = StockCreate;
    type Update = StockUpdate;
    type Action = StockAction;
    type ActionResult = StockEntry;
    type Context = ();
    type Error = StockError;

    fn from_create_params(id: StockId, params: StockCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            item_name: item_name(params.item_name)?,
            quantity: quantity(params.quantity)?,
            created_at: params.at,
            updated_at: params.at,
        })
    }

    /// Sets whichever of name and quantity are present.
    async fn on_update(&mut self, update: StockUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let name = update.fields.item_name.map(item_name).transpose()?;
        let qty = update.fields.quantity.map(quantity).transpose()?;
        if let Some(name) = name {
            self.item_name = name;
        }
        if let Some(qty) = qty {
            self.quantity = qty;
        }
        self.updated_at = update.at;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: StockAction,
        _ctx: &(),
    ) -> Result<StockEntry, Self::Error> {
        match action {
            StockAction::Increment { by, at } => {
                self.quantity = self
                    .quantity
                    .checked_add(check_delta(by)?)
                    .ok_or_else(|| StockError::InvalidArgument("Quantity too large".into()))?;
                self.updated_at = at;
            }
            StockAction::Decrement { by, at } => {
                self.quantity = (self.quantity - check_delta(by)?).max(0);
                self.updated_at = at;
            }
        }
        Ok(self.clone())
    }
}
