//! [`ActorEntity`] implementation for [`Order`].
//!
//! - **Create** validates the item list and the amounts and inserts the row with both
//!   statuses `Pending`. The order code is the table's unique column.
//! - **Update** sets status and/or payment status. Any value may follow any other, and
//!   repeating a value is a no-op apart from `updated_at`.
//! - **Delete** first deletes the order's payments (cascade).
//! - **RecordPayment** inserts a payment row for this order.

use super::actions::OrderAction;
use super::error::OrderError;
use crate::clients::PaymentClient;
use crate::model::{
    fixed_scale, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate, Payment, PaymentCreate,
    PaymentStatus,
};
use async_trait::async_trait;
use resource_store::ActorEntity;
use rust_decimal::Decimal;
use tracing::info;

fn amount(value: Decimal, field: &str) -> Result<Decimal, OrderError> {
    if value < Decimal::ZERO {
        return Err(OrderError::ValidationError(format!(
            "{field} cannot be negative"
        )));
    }
    Ok(fixed_scale(value, 2))
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Payment;
    type Context = PaymentClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError(
                "Order must contain at least one item".into(),
            ));
        }
        if let Some(line) = params.items.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "Quantity must be positive for menu item {}",
                line.menu_item_id
            )));
        }
        if params.order_code.trim().is_empty() {
            return Err(OrderError::ValidationError("Order code is required".into()));
        }

        let subtotal = amount(params.subtotal, "subtotal")?;
        let tax = amount(params.tax, "tax")?;
        let total = amount(params.total, "total")?;
        if total != subtotal + tax {
            return Err(OrderError::ValidationError(format!(
                "total ({total}) must equal subtotal ({subtotal}) + tax ({tax})"
            )));
        }

        Ok(Self {
            id,
            order_code: params.order_code,
            user_id: params.user_id,
            items: params.items,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            total_amount: total,
            tax_amount: tax,
            subtotal_amount: subtotal,
            created_at: params.at,
            updated_at: params.at,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.order_code.clone())
    }

    async fn on_update(
        &mut self,
        update: OrderUpdate,
        _ctx: &PaymentClient,
    ) -> Result<(), Self::Error> {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(payment_status) = update.payment_status {
            self.payment_status = payment_status;
        }
        self.updated_at = update.at;
        Ok(())
    }

    async fn on_delete(&self, payments: &PaymentClient) -> Result<(), Self::Error> {
        let removed = payments.delete_for_order(self.id).await?;
        if removed > 0 {
            info!(order_id = %self.order_code, removed, "Cascaded payments");
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        payments: &PaymentClient,
    ) -> Result<Payment, Self::Error> {
        match action {
            OrderAction::RecordPayment {
                amount,
                payment_method,
                at,
            } => {
                let payment = payments
                    .record(PaymentCreate {
                        order_id: self.id,
                        amount,
                        payment_method,
                        at,
                    })
                    .await?;
                Ok(payment)
            }
        }
    }
}
