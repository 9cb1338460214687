//! Full-system scenarios: every table running, wired the way the server wires them.

use argon2::Params;
use canteen::auth::{AuthError, Argon2Hasher, Principal, TokenVerifier};
use canteen::clients::{OrderDraft, Registration};
use canteen::clock::FixedClock;
use canteen::config::Config;
use canteen::lifecycle::CanteenSystem;
use canteen::menu_actor::MenuError;
use canteen::model::{
    MenuItemFields, MenuItemId, OrderLine, OrderStatus, PaymentStatus, Role, StockFields, UserId,
};
use canteen::order_actor::OrderError;
use canteen::stock_actor::StockError;
use canteen::user_actor::UserError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

const NOW: i64 = 1_760_745_600_000;

fn system() -> CanteenSystem {
    let hasher = Argon2Hasher::new(Params::new(1024, 1, 1, None).unwrap());
    CanteenSystem::new(
        &Config::default(),
        Arc::new(FixedClock::at_millis(NOW)),
        Arc::new(hasher),
    )
}

fn staff(role: Role) -> Principal {
    Principal {
        id: UserId(100),
        username: role.to_string(),
        role,
    }
}

fn student(id: u32) -> Principal {
    Principal {
        id: UserId(id),
        username: format!("student{id}"),
        role: Role::Student,
    }
}

fn draft(items: Vec<OrderLine>) -> OrderDraft {
    OrderDraft {
        items,
        subtotal: dec!(80),
        tax: dec!(8),
        total: dec!(88),
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let system = system();

    let alice = system
        .users
        .register(Registration {
            username: "alice".into(),
            password: "p1".into(),
            email: None,
            role: Role::Student,
        })
        .await
        .unwrap();
    assert_eq!(alice.role, Role::Student);

    let logged_in = system.users.verify_credentials("alice", "p1").await.unwrap();
    assert_eq!(logged_in.id, alice.id);
    let token = system.tokens.issue(&Principal::from(&logged_in)).unwrap();
    assert_eq!(system.tokens.verify(&token).unwrap().username, "alice");

    assert_eq!(
        system.users.verify_credentials("alice", "wrong").await,
        Err(UserError::InvalidCredentials)
    );

    let again = system
        .users
        .register(Registration {
            username: "alice".into(),
            password: "p2".into(),
            email: None,
            role: Role::Student,
        })
        .await;
    assert_eq!(again, Err(UserError::AlreadyExists("alice".into())));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_order_scenario() {
    let system = system();

    let order = system
        .orders
        .create_order(&student(7), draft(vec![OrderLine::new(MenuItemId(1), 2)]))
        .await
        .unwrap();

    assert_eq!(order.total_amount, dec!(88));
    assert_eq!(order.subtotal_amount, dec!(80));
    assert_eq!(order.tax_amount, dec!(8));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert_eq!(order.user_id, Some(UserId(7)));
    assert!(!order.order_code.is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_order_leaves_no_row() {
    let system = system();

    let result = system.orders.create_order(&student(7), draft(vec![])).await;
    assert_eq!(
        result,
        Err(OrderError::ValidationError(
            "Order must contain at least one item".into()
        ))
    );
    assert!(system.orders.list_all().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_same_millisecond_orders_get_distinct_codes() {
    let system = system();
    let line = || vec![OrderLine::new(MenuItemId(1), 1)];

    let mut codes = Vec::new();
    for _ in 0..3 {
        let order = system
            .orders
            .create_order(&student(7), draft(line()))
            .await
            .unwrap();
        codes.push(order.order_code);
    }
    assert_eq!(
        codes,
        vec![
            "ORD-1760745600000",
            "ORD-1760745600000-2",
            "ORD-1760745600000-3"
        ]
    );

    // Every candidate code is taken now.
    let fourth = system.orders.create_order(&student(7), draft(line())).await;
    assert!(matches!(fourth, Err(OrderError::Conflict(_))));
    assert_eq!(system.orders.list_all().await.unwrap().len(), 3);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_status_updates_are_permissive_and_idempotent() {
    let system = system();
    let kitchen = staff(Role::Kitchen);
    let order = system
        .orders
        .create_order(&student(7), draft(vec![OrderLine::new(MenuItemId(1), 2)]))
        .await
        .unwrap();

    let first = system
        .orders
        .update_status(&kitchen, order.id, OrderStatus::Ready)
        .await
        .unwrap();
    let second = system
        .orders
        .update_status(&kitchen, order.id, OrderStatus::Ready)
        .await
        .unwrap();
    assert_eq!(first, second);

    let back = system
        .orders
        .update_status(&kitchen, order.id, OrderStatus::Pending)
        .await
        .unwrap();
    assert_eq!(back.status, OrderStatus::Pending);

    let paid = system
        .orders
        .update_payment_status(&staff(Role::Cashier), order.id, PaymentStatus::Paid)
        .await
        .unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert_eq!(paid.status, OrderStatus::Pending);

    assert!(matches!(
        system
            .orders
            .update_status(&student(7), order.id, OrderStatus::Done)
            .await,
        Err(OrderError::Auth(AuthError::Forbidden { .. }))
    ));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_order_cascades_payments() {
    let system = system();
    let order = system
        .orders
        .create_order(&student(7), draft(vec![OrderLine::new(MenuItemId(1), 2)]))
        .await
        .unwrap();

    let cashier = staff(Role::Cashier);
    system
        .orders
        .record_payment(&cashier, order.id, dec!(88), Some("upi".into()))
        .await
        .unwrap();
    system
        .orders
        .record_payment(&cashier, order.id, dec!(88), None)
        .await
        .unwrap();
    assert_eq!(
        system.orders.payments_for(&cashier, order.id).await.unwrap().len(),
        2
    );

    // Only admins delete.
    assert!(system.orders.delete_order(&cashier, order.id).await.is_err());
    system
        .orders
        .delete_order(&staff(Role::Admin), order.id)
        .await
        .unwrap();

    assert!(system
        .payments
        .list_for_order(order.id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        system.orders.payments_for(&cashier, order.id).await,
        Err(OrderError::NotFound(order.id.to_string()))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_history_only_shows_own_orders() {
    let system = system();
    let line = || vec![OrderLine::new(MenuItemId(1), 1)];

    system.orders.create_order(&student(7), draft(line())).await.unwrap();
    system.orders.create_order(&student(8), draft(line())).await.unwrap();
    system.orders.create_order(&student(7), draft(line())).await.unwrap();

    let history = system.orders.list_for_user(&student(7)).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|s| s.total_amount == dec!(88)));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_stock_decrement_floors_at_zero() {
    let system = system();
    let kitchen = staff(Role::Kitchen);

    let rice = system
        .stock
        .create_entry(&kitchen, "Rice".into(), 10)
        .await
        .unwrap();
    let after = system
        .stock
        .decrement(&staff(Role::Cashier), rice.id, 15)
        .await
        .unwrap();
    assert_eq!(after.quantity, 0);

    for delta in [0, -3] {
        assert!(matches!(
            system.stock.increment(&kitchen, rice.id, delta).await,
            Err(StockError::InvalidArgument(_))
        ));
        assert!(matches!(
            system.stock.decrement(&kitchen, rice.id, delta).await,
            Err(StockError::InvalidArgument(_))
        ));
    }
    assert_eq!(system.stock.get_entry(rice.id).await.unwrap().quantity, 0);

    let set = system
        .stock
        .set_entry(
            &kitchen,
            rice.id,
            StockFields {
                item_name: None,
                quantity: Some(12),
            },
        )
        .await
        .unwrap();
    assert_eq!(set.item_name, "Rice");
    assert_eq!(set.quantity, 12);

    // Cashiers adjust but do not delete.
    assert!(system
        .stock
        .delete_entry(&staff(Role::Cashier), rice.id)
        .await
        .is_err());
    system.stock.delete_entry(&kitchen, rice.id).await.unwrap();
    assert_eq!(
        system.stock.get_entry(rice.id).await,
        Err(StockError::NotFound(rice.id.to_string()))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_menu_delete_keeps_order_snapshot() {
    let system = system();
    let admin = staff(Role::Admin);

    let dosa = system
        .menu
        .create_item(
            &admin,
            MenuItemFields {
                name: Some("Masala Dosa".into()),
                category: Some("breakfast".into()),
                price: Some(dec!(60)),
                ..MenuItemFields::default()
            },
        )
        .await
        .unwrap();
    assert!(dosa.available);
    assert_eq!(dosa.rating, Decimal::ZERO);

    let line = OrderLine {
        menu_item_id: dosa.id,
        quantity: 2,
        name: Some(dosa.name.clone()),
        price: Some(dosa.price),
    };
    let order = system
        .orders
        .create_order(&student(7), draft(vec![line.clone()]))
        .await
        .unwrap();

    system.menu.delete_item(&admin, dosa.id).await.unwrap();

    assert!(system.menu.list_items().await.unwrap().is_empty());
    assert_eq!(
        system.menu.get_item(dosa.id).await,
        Err(MenuError::NotFound(dosa.id.to_string()))
    );
    let stored = system.orders.get_order(order.id).await.unwrap();
    assert_eq!(stored.items, vec![line]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_seed_runs_once() {
    let system = system();

    assert!(system.seed_defaults().await.unwrap());
    assert!(!system.seed_defaults().await.unwrap());

    let menu = system.menu.list_items().await.unwrap();
    assert_eq!(menu.len(), 6);
    assert_eq!(menu[0].category, "beverages");
    assert_eq!(system.stock.list_entries().await.unwrap().len(), 3);

    system.provision_admin("secret").await.unwrap();
    system.provision_admin("ignored").await.unwrap();
    let admin = system.users.verify_credentials("admin", "secret").await.unwrap();
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(
        system
            .users
            .list_users(&Principal::from(&admin))
            .await
            .unwrap()
            .len(),
        1
    );

    system.shutdown().await.unwrap();
}
