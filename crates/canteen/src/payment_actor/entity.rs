//! [`ActorEntity`] implementation for [`Payment`].

use super::error::PaymentError;
use crate::model::{fixed_scale, Payment, PaymentCreate, PaymentId, PaymentStatus};
use async_trait::async_trait;
use resource_store::ActorEntity;
use rust_decimal::Decimal;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Payment {
    type Id = PaymentId;
    type Create = PaymentCreate;
    // Attempts are append-only.
    type Update = ();
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = PaymentError;

    fn from_create_params(id: PaymentId, params: PaymentCreate) -> Result<Self, Self::Error> {
        if params.amount < Decimal::ZERO {
            return Err(PaymentError::ValidationError(
                "Amount cannot be negative".into(),
            ));
        }
        Ok(Self {
            id,
            order_id: params.order_id,
            amount: fixed_scale(params.amount, 2),
            payment_method: params
                .payment_method
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            payment_status: PaymentStatus::Pending,
            created_at: params.at,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
