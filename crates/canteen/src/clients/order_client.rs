//! # Order Client
//!
//! Order placement, the kitchen/cashier workflow, payments against an order, and the read
//! side (staff listing, lookup, a customer's own history).
//!
//! Placing an order is a single atomic create on the order table. The order code is derived
//! from the clock (`ORD-<unix millis>`); the table's unique index has the last word, and a
//! collision is retried with a suffixed code a bounded number of times.

use crate::auth::{policy, Principal};
use crate::clients::PaymentClient;
use crate::clock::Clock;
use crate::model::{
    Order, OrderCreate, OrderId, OrderLine, OrderStatus, OrderSummary, OrderUpdate, Payment,
    PaymentStatus,
};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use resource_store::{ActorClient, FrameworkError, ResourceClient};
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Attempts at finding a free order code before giving up with `Conflict`.
pub const ORDER_CODE_ATTEMPTS: u32 = 3;

/// What a customer submits when placing an order. Amounts are taken as given.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub items: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

fn order_code(millis: i64, attempt: u32) -> String {
    if attempt == 1 {
        format!("ORD-{millis}")
    } else {
        format!("ORD-{millis}-{attempt}")
    }
}

fn newest_first(orders: &mut [Order]) {
    orders.sort_by_key(|o| Reverse((o.created_at, o.id)));
}

#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    payments: PaymentClient,
    clock: Arc<dyn Clock>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, payments: PaymentClient, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            payments,
            clock,
        }
    }

    /// Places an order for the caller. Any authenticated role may order.
    ///
    /// The new order is `Pending`/`Pending`. Stock and availability are not consulted.
    #[instrument(skip(self, principal, draft), fields(user = %principal.username, lines = draft.items.len()))]
    pub async fn create_order(
        &self,
        principal: &Principal,
        draft: OrderDraft,
    ) -> Result<Order, OrderError> {
        policy::ANY.require(principal)?;
        let at = self.clock.now();
        let millis = at.timestamp_millis();

        for attempt in 1..=ORDER_CODE_ATTEMPTS {
            let code = order_code(millis, attempt);
            let params = OrderCreate {
                order_code: code.clone(),
                user_id: Some(principal.id),
                items: draft.items.clone(),
                subtotal: draft.subtotal,
                tax: draft.tax,
                total: draft.total,
                at,
            };
            match self.inner.create(params).await {
                Ok(id) => {
                    info!(%id, order_code = %code, "Order placed");
                    return self.get_order(id).await;
                }
                Err(FrameworkError::Conflict(key)) => {
                    warn!(order_code = %key, attempt, "Order code taken");
                }
                Err(e) => return Err(Self::map_error(e)),
            }
        }
        Err(OrderError::Conflict(order_code(millis, ORDER_CODE_ATTEMPTS)))
    }

    /// Sets the kitchen status. Any status may follow any other.
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn update_status(
        &self,
        principal: &Principal,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        policy::ORDER_STAFF.require(principal)?;
        let update = OrderUpdate {
            status: Some(status),
            payment_status: None,
            at: self.clock.now(),
        };
        let order = self.inner.update(id, update).await.map_err(Self::map_error)?;
        info!(%id, %status, "Order status updated");
        Ok(order)
    }

    /// Sets the payment status. Not gated by the kitchen status.
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn update_payment_status(
        &self,
        principal: &Principal,
        id: OrderId,
        payment_status: PaymentStatus,
    ) -> Result<Order, OrderError> {
        policy::ORDER_STAFF.require(principal)?;
        let update = OrderUpdate {
            status: None,
            payment_status: Some(payment_status),
            at: self.clock.now(),
        };
        let order = self.inner.update(id, update).await.map_err(Self::map_error)?;
        info!(%id, %payment_status, "Payment status updated");
        Ok(order)
    }

    /// Deletes an order and, through the table's delete hook, its payments (admin).
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn delete_order(&self, principal: &Principal, id: OrderId) -> Result<(), OrderError> {
        policy::ORDER_DELETE.require(principal)?;
        self.delete(id).await?;
        info!(%id, "Order deleted");
        Ok(())
    }

    /// Records a payment attempt against an existing order (admin, cashier).
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn record_payment(
        &self,
        principal: &Principal,
        id: OrderId,
        amount: Decimal,
        payment_method: Option<String>,
    ) -> Result<Payment, OrderError> {
        policy::PAYMENT_RECORD.require(principal)?;
        let action = OrderAction::RecordPayment {
            amount,
            payment_method,
            at: self.clock.now(),
        };
        let payment = self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?;
        info!(%id, payment_id = %payment.id, "Payment recorded");
        Ok(payment)
    }

    /// Payments recorded against an order, oldest first.
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn payments_for(
        &self,
        principal: &Principal,
        id: OrderId,
    ) -> Result<Vec<Payment>, OrderError> {
        policy::PAYMENT_VIEW.require(principal)?;
        self.get_order(id).await?;
        Ok(self.payments.list_for_order(id).await?)
    }

    // ---- read side ----

    /// Every order, newest first.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list().await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    /// The staff listing (admin, kitchen, cashier).
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn list_for_staff(&self, principal: &Principal) -> Result<Vec<Order>, OrderError> {
        policy::ORDER_STAFF.require(principal)?;
        self.list_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// The caller's own orders, newest first, without amounts beyond the total.
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn list_for_user(&self, principal: &Principal) -> Result<Vec<OrderSummary>, OrderError> {
        let mut orders: Vec<Order> = self
            .list()
            .await?
            .into_iter()
            .filter(|o| o.user_id == Some(principal.id))
            .collect();
        newest_first(&mut orders);
        Ok(orders.into_iter().map(OrderSummary::from).collect())
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(FrameworkError::Conflict(key)) => OrderError::Conflict(key),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthError;
    use crate::clock::FixedClock;
    use crate::model::{MenuItemId, Role, UserId};
    use chrono::DateTime;
    use resource_store::mock::{create_mock_client, expect_create, MockClient};
    use rust_decimal_macros::dec;

    const NOW: i64 = 1_760_745_600_000;

    fn principal(id: u32, role: Role) -> Principal {
        Principal {
            id: UserId(id),
            username: format!("user{id}"),
            role,
        }
    }

    fn order(id: u32, user: Option<u32>, created: i64) -> Order {
        let at = DateTime::from_timestamp(created, 0).unwrap();
        Order {
            id: OrderId(id),
            order_code: format!("ORD-{id}"),
            user_id: user.map(UserId),
            items: vec![OrderLine::new(MenuItemId(1), 2)],
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            total_amount: dec!(88),
            tax_amount: dec!(8),
            subtotal_amount: dec!(80),
            created_at: at,
            updated_at: at,
        }
    }

    fn draft() -> OrderDraft {
        OrderDraft {
            items: vec![OrderLine::new(MenuItemId(1), 2)],
            subtotal: dec!(80),
            tax: dec!(8),
            total: dec!(88),
        }
    }

    fn client(orders: ResourceClient<Order>) -> OrderClient {
        let payments = MockClient::<Payment>::new();
        OrderClient::new(
            orders,
            PaymentClient::new(payments.client()),
            Arc::new(FixedClock::at_millis(NOW)),
        )
    }

    #[test]
    fn test_order_codes() {
        assert_eq!(order_code(NOW, 1), "ORD-1760745600000");
        assert_eq!(order_code(NOW, 3), "ORD-1760745600000-3");
    }

    #[tokio::test]
    async fn test_create_order_stamps_code_and_owner() {
        let (raw, mut receiver) = create_mock_client::<Order>(10);
        let client = client(raw);

        let task = tokio::spawn(async move {
            client
                .create_order(&principal(5, Role::Student), draft())
                .await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.order_code, "ORD-1760745600000");
        assert_eq!(params.user_id, Some(UserId(5)));
        assert_eq!(params.at.timestamp_millis(), NOW);
        responder.send(Ok(OrderId(1))).unwrap();

        match receiver.recv().await {
            Some(resource_store::ResourceRequest::Get { id, respond_to }) => {
                assert_eq!(id, OrderId(1));
                respond_to.send(Ok(Some(order(1, Some(5), 0)))).unwrap();
            }
            other => panic!("Expected Get request, got {other:?}"),
        }

        let placed = task.await.unwrap().unwrap();
        assert_eq!(placed.id, OrderId(1));
    }

    #[tokio::test]
    async fn test_code_collision_is_retried_then_reported() {
        let mut mock = MockClient::<Order>::new();
        for _ in 0..ORDER_CODE_ATTEMPTS {
            mock.expect_create()
                .return_err(FrameworkError::Conflict("ORD-1760745600000".into()));
        }

        let result = client(mock.client())
            .create_order(&principal(5, Role::Student), draft())
            .await;
        assert_eq!(
            result,
            Err(OrderError::Conflict("ORD-1760745600000-3".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_validation_error_is_not_retried() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(
                OrderError::ValidationError("Order must contain at least one item".into()),
            )));

        let result = client(mock.client())
            .create_order(&principal(5, Role::Student), draft())
            .await;
        assert_eq!(
            result,
            Err(OrderError::ValidationError(
                "Order must contain at least one item".into()
            ))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_student_cannot_update_status() {
        let mock = MockClient::<Order>::new();
        let result = client(mock.client())
            .update_status(&principal(5, Role::Student), OrderId(1), OrderStatus::Ready)
            .await;
        assert_eq!(
            result,
            Err(OrderError::Auth(AuthError::Forbidden {
                role: Role::Student
            }))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_kitchen_cannot_record_payment() {
        let mock = MockClient::<Order>::new();
        let result = client(mock.client())
            .record_payment(&principal(2, Role::Kitchen), OrderId(1), dec!(88), None)
            .await;
        assert!(matches!(
            result,
            Err(OrderError::Auth(AuthError::Forbidden { .. }))
        ));
    }

    #[tokio::test]
    async fn test_history_is_own_orders_newest_first() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_list().return_ok(vec![
            order(1, Some(5), 100),
            order(2, Some(6), 200),
            order(3, Some(5), 300),
            order(4, None, 400),
        ]);

        let history = client(mock.client())
            .list_for_user(&principal(5, Role::Student))
            .await
            .unwrap();
        let codes: Vec<&str> = history.iter().map(|s| s.order_id.as_str()).collect();
        assert_eq!(codes, vec!["ORD-3", "ORD-1"]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_order_is_not_found() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_get(OrderId(9)).return_ok(None);
        mock.expect_update(OrderId(9))
            .return_err(FrameworkError::NotFound("9".into()));

        let client = client(mock.client());
        assert_eq!(
            client.get_order(OrderId(9)).await,
            Err(OrderError::NotFound("9".into()))
        );
        assert_eq!(
            client
                .update_status(&principal(1, Role::Cashier), OrderId(9), OrderStatus::Done)
                .await,
            Err(OrderError::NotFound("9".into()))
        );
        mock.verify();
    }
}
