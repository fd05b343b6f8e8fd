use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: u32,
    title: String,
}

#[derive(Debug)]
struct TicketTitle(String);

#[derive(Debug, thiserror::Error)]
#[error("ticket title must not be empty")]
struct EmptyTitle;

#[async_trait]
impl ActorEntity for Ticket {
    type Id = u32;
    type Create = TicketTitle;
    type Update = TicketTitle;
    type Error = EmptyTitle;

    fn from_create_params(id: u32, params: TicketTitle) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            title: params.0,
        })
    }

    async fn on_create(&mut self) -> Result<(), Self::Error> {
        if self.title.is_empty() {
            return Err(EmptyTitle);
        }
        Ok(())
    }

    async fn on_update(&mut self, update: TicketTitle) -> Result<(), Self::Error> {
        self.title = update.0;
        if self.title.is_empty() {
            return Err(EmptyTitle);
        }
        Ok(())
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    let handle = tokio::spawn(actor.run());

    // 1. Create
    let first = client.create(TicketTitle("first".into())).await.unwrap();
    assert_eq!(first.id, 1); // First ID should be 1
    let second = client.create(TicketTitle("second".into())).await.unwrap();
    assert_eq!(second.id, 2);

    // 2. List keeps creation order
    let titles: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["first", "second"]);

    // 3. Update
    let updated = client.update(1, TicketTitle("renamed".into())).await.unwrap();
    assert_eq!(updated.title, "renamed");

    // 4. Delete
    client.delete(1).await.unwrap();
    assert!(client.get(1).await.unwrap().is_none());
    assert_eq!(client.list().await.unwrap(), vec![second]);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_refused_hooks_leave_state_untouched() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run());

    let result = client.create(TicketTitle(String::new())).await;
    assert!(matches!(result, Err(FrameworkError::EntityError(_))));
    assert!(client.list().await.unwrap().is_empty());

    let ticket = client.create(TicketTitle("keep".into())).await.unwrap();
    let result = client.update(ticket.id, TicketTitle(String::new())).await;
    assert!(matches!(result, Err(FrameworkError::EntityError(_))));
    assert_eq!(client.get(ticket.id).await.unwrap().unwrap().title, "keep");
}

#[tokio::test]
async fn test_missing_ids_report_not_found() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run());

    assert!(matches!(
        client.update(42, TicketTitle("x".into())).await,
        Err(FrameworkError::NotFound(id)) if id == "42"
    ));
    assert!(matches!(
        client.delete(42).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_closed_actor_is_reported() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    drop(actor);

    assert!(matches!(client.list().await, Err(FrameworkError::ActorClosed)));
}
