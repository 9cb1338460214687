use async_trait::async_trait;
use resource_store::{ActorEntity, FrameworkError, ResourceActor};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Locker {
    id: u32,
    label: String,
    items: i64,
}

#[derive(Debug)]
struct LockerCreate {
    label: String,
    items: i64,
}

#[derive(Debug)]
struct LockerUpdate {
    label: Option<String>,
    items: Option<i64>,
}

#[derive(Debug)]
enum LockerAction {
    Take(i64),
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum LockerError {
    #[error("Items cannot be negative")]
    Negative,
    #[error("Not enough items: have {have}, want {want}")]
    NotEnough { have: i64, want: i64 },
}

#[async_trait]
impl ActorEntity for Locker {
    type Id = u32;
    type Create = LockerCreate;
    type Update = LockerUpdate;
    type Action = LockerAction;
    type ActionResult = i64;
    type Context = ();
    type Error = LockerError;

    fn from_create_params(id: u32, params: LockerCreate) -> Result<Self, Self::Error> {
        if params.items < 0 {
            return Err(LockerError::Negative);
        }
        Ok(Self {
            id,
            label: params.label,
            items: params.items,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.label.clone())
    }

    async fn on_update(
        &mut self,
        update: LockerUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        // Applied field by field so a late failure leaves a half-written row behind.
        if let Some(label) = update.label {
            self.label = label;
        }
        if let Some(items) = update.items {
            if items < 0 {
                return Err(LockerError::Negative);
            }
            self.items = items;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: LockerAction,
        _ctx: &Self::Context,
    ) -> Result<i64, Self::Error> {
        match action {
            LockerAction::Take(want) => {
                self.items -= want;
                if self.items < 0 {
                    return Err(LockerError::NotEnough {
                        have: self.items + want,
                        want,
                    });
                }
                Ok(self.items)
            }
        }
    }
}

fn create(label: &str, items: i64) -> LockerCreate {
    LockerCreate {
        label: label.into(),
        items,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let (actor, client) = ResourceActor::<Locker>::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let id: u32 = client.create(create("A1", 3)).await.unwrap();
    assert_eq!(id, 1);

    // 2. Action
    let left = client.perform_action(id, LockerAction::Take(2)).await.unwrap();
    assert_eq!(left, 1);

    // 3. Update
    let updated = client
        .update(
            id,
            LockerUpdate {
                label: Some("B1".into()),
                items: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "B1");

    // The index follows the new label.
    assert!(client.find_by_key("A1").await.unwrap().is_none());
    assert_eq!(client.find_by_key("B1").await.unwrap().unwrap().id, id);

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(client.find_by_key("B1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_ids_are_sequential_and_list_is_ordered() {
    let (actor, client) = ResourceActor::<Locker>::new(10);
    tokio::spawn(actor.run(()));

    for label in ["C", "A", "B"] {
        client.create(create(label, 0)).await.unwrap();
    }

    let rows = client.list().await.unwrap();
    let ids: Vec<u32> = rows.iter().map(|r| r.id).collect();
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(labels, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_duplicate_unique_key_is_conflict() {
    let (actor, client) = ResourceActor::<Locker>::new(10);
    tokio::spawn(actor.run(()));

    client.create(create("A1", 1)).await.unwrap();
    let result = client.create(create("A1", 5)).await;
    assert!(matches!(result, Err(FrameworkError::Conflict(key)) if key == "A1"));
    assert_eq!(client.list().await.unwrap().len(), 1);

    // Renaming onto a taken label is refused and rolled back.
    let other = client.create(create("A2", 1)).await.unwrap();
    let result = client
        .update(
            other,
            LockerUpdate {
                label: Some("A1".into()),
                items: None,
            },
        )
        .await;
    assert!(matches!(result, Err(FrameworkError::Conflict(_))));
    assert_eq!(client.get(other).await.unwrap().unwrap().label, "A2");
}

#[tokio::test]
async fn test_failed_create_inserts_nothing() {
    let (actor, client) = ResourceActor::<Locker>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(create("A1", -1)).await.unwrap_err();
    assert_eq!(
        err.downcast_entity::<LockerError>().unwrap(),
        LockerError::Negative
    );
    assert!(client.list().await.unwrap().is_empty());
    assert!(client.find_by_key("A1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_update_is_rolled_back() {
    let (actor, client) = ResourceActor::<Locker>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(create("A1", 4)).await.unwrap();
    let result = client
        .update(
            id,
            LockerUpdate {
                label: Some("Z9".into()),
                items: Some(-3),
            },
        )
        .await;
    assert!(result.is_err());

    let row = client.get(id).await.unwrap().unwrap();
    assert_eq!(row, Locker { id, label: "A1".into(), items: 4 });
    assert!(client.find_by_key("Z9").await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_action_is_rolled_back() {
    let (actor, client) = ResourceActor::<Locker>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(create("A1", 2)).await.unwrap();
    let err = client
        .perform_action(id, LockerAction::Take(5))
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_entity::<LockerError>().unwrap(),
        LockerError::NotEnough { have: 2, want: 5 }
    );
    assert_eq!(client.get(id).await.unwrap().unwrap().items, 2);
}

#[tokio::test]
async fn test_missing_row_is_not_found() {
    let (actor, client) = ResourceActor::<Locker>::new(10);
    tokio::spawn(actor.run(()));

    assert!(client.get(42).await.unwrap().is_none());
    assert!(matches!(
        client.delete(42).await,
        Err(FrameworkError::NotFound(id)) if id == "42"
    ));
    assert!(matches!(
        client.perform_action(42, LockerAction::Take(1)).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_client_reports_closed_table() {
    let (actor, client) = ResourceActor::<Locker>::new(10);
    // Never started: dropping the actor closes the channel.
    drop(actor);

    assert!(matches!(
        client.list().await,
        Err(FrameworkError::ActorClosed)
    ));
}
