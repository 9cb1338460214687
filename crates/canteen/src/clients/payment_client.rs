//! # Payment Client
//!
//! Used by the order table (as its context) and by [`OrderClient`](super::OrderClient) for
//! listings. Role checks happen in `OrderClient`.

use crate::model::{OrderId, Payment, PaymentCreate};
use crate::payment_actor::PaymentError;
use async_trait::async_trait;
use resource_store::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct PaymentClient {
    inner: ResourceClient<Payment>,
}

impl PaymentClient {
    pub fn new(inner: ResourceClient<Payment>) -> Self {
        Self { inner }
    }

    /// Inserts a payment attempt and returns the stored row.
    #[instrument(skip(self, params), fields(order_id = %params.order_id))]
    pub async fn record(&self, params: PaymentCreate) -> Result<Payment, PaymentError> {
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.get(id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(id.to_string()))
    }

    /// Payments for one order, oldest first.
    #[instrument(skip(self))]
    pub async fn list_for_order(&self, order_id: OrderId) -> Result<Vec<Payment>, PaymentError> {
        let payments = self.list().await?;
        Ok(payments
            .into_iter()
            .filter(|p| p.order_id == order_id)
            .collect())
    }

    /// Deletes every payment of `order_id`. Returns how many were removed.
    ///
    /// Every payment is attempted even after a failure. If any delete fails the result is
    /// [`PaymentError::CascadeIncomplete`] with the counts, and the payments that did go
    /// stay gone; calling again removes only what is left.
    #[instrument(skip(self))]
    pub async fn delete_for_order(&self, order_id: OrderId) -> Result<usize, PaymentError> {
        let payments = self.list_for_order(order_id).await?;
        let mut deleted = 0;
        let mut failure = None;
        for payment in &payments {
            debug!(payment_id = %payment.id, "Deleting payment");
            match self.delete(payment.id).await {
                // Already gone counts as deleted.
                Ok(()) | Err(PaymentError::NotFound(_)) => deleted += 1,
                Err(e) => {
                    warn!(payment_id = %payment.id, error = %e, "Payment delete failed");
                    failure = Some(e);
                }
            }
        }
        match failure {
            None => Ok(deleted),
            Some(e) => Err(PaymentError::CascadeIncomplete {
                order_id: order_id.to_string(),
                deleted,
                remaining: payments.len() - deleted,
                reason: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl ActorClient<Payment> for PaymentClient {
    type Error = PaymentError;

    fn inner(&self) -> &ResourceClient<Payment> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<PaymentError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => PaymentError::NotFound(id),
            Err(other) => PaymentError::ActorCommunicationError(other.to_string()),
        }
    }
}
