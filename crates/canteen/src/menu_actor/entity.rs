//! [`ActorEntity`] implementation for [`MenuItem`].

use super::error::MenuError;
use crate::model::{
    fixed_scale, MenuItem, MenuItemCreate, MenuItemFields, MenuItemId, MenuItemUpdate,
};
use async_trait::async_trait;
use resource_store::ActorEntity;
use rust_decimal::Decimal;
use std::convert::Infallible;

const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

fn required(value: Option<String>, field: &str) -> Result<String, MenuError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MenuError::ValidationError(format!("Missing required field: {field}")))
}

fn non_blank(value: String, field: &str) -> Result<String, MenuError> {
    required(Some(value), field)
}

fn check_price(price: Decimal) -> Result<Decimal, MenuError> {
    if price < Decimal::ZERO {
        return Err(MenuError::ValidationError("Price cannot be negative".into()));
    }
    Ok(fixed_scale(price, 2))
}

fn check_rating(rating: Decimal) -> Result<Decimal, MenuError> {
    if rating < Decimal::ZERO || rating > MAX_RATING {
        return Err(MenuError::ValidationError(
            "Rating must be between 0 and 5".into(),
        ));
    }
    Ok(fixed_scale(rating, 1))
}

impl MenuItem {
    /// Applies the `Some` fields of `fields`, validating each one.
    ///
    /// Fails before writing anything if any field is invalid.
    fn apply(&mut self, fields: MenuItemFields) -> Result<(), MenuError> {
        let name = fields.name.map(|v| non_blank(v, "name")).transpose()?;
        let category = fields.category.map(|v| non_blank(v, "category")).transpose()?;
        let price = fields.price.map(check_price).transpose()?;
        let rating = fields.rating.map(check_rating).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(rating) = rating {
            self.rating = rating;
        }
        if let Some(description) = fields.description {
            self.description = Some(description);
        }
        if let Some(image_url) = fields.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(available) = fields.available {
            self.available = available;
        }
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = MenuError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, Self::Error> {
        let fields = params.fields;
        let price = fields.price.ok_or_else(|| {
            MenuError::ValidationError("Missing required field: price".into())
        })?;
        Ok(Self {
            id,
            name: required(fields.name, "name")?,
            category: required(fields.category, "category")?,
            price: check_price(price)?,
            description: fields.description,
            image_url: fields.image_url,
            available: fields.available.unwrap_or(true),
            rating: check_rating(fields.rating.unwrap_or_default())?,
            created_at: params.at,
            updated_at: params.at,
        })
    }

    async fn on_update(&mut self, update: MenuItemUpdate, _ctx: &()) -> Result<(), Self::Error> {
        self.apply(update.fields)?;
        self.updated_at = update.at;
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
