mod inmemory;
mod postgres;

use agenda_domain::{CalendarEvent, ID};
pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()>;
    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<CalendarEvent>;
    async fn find_many(&self, event_ids: &[ID]) -> anyhow::Result<Vec<CalendarEvent>>;
    /// All events owned by the given user, ordered by start time
    async fn find_by_user(&self, user_id: &ID) -> Vec<CalendarEvent>;
    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent>;
}

#[cfg(test)]
mod tests {
    use crate::AgendaContext;
    use agenda_domain::{CalendarEvent, ID};

    fn event_for_user(user_id: &ID, start_ts: i64) -> CalendarEvent {
        CalendarEvent {
            id: Default::default(),
            user_id: user_id.clone(),
            title: "Sync".into(),
            description: None,
            start_ts,
            end_ts: None,
            color: None,
            status: Default::default(),
            location: None,
            created: 0,
            updated: 0,
        }
    }

    #[tokio::test]
    async fn crud() {
        let ctx = AgendaContext::create_inmemory();
        let user_id = ID::default();
        let event = event_for_user(&user_id, 100);

        assert!(ctx.repos.events.insert(&event).await.is_ok());
        assert_eq!(ctx.repos.events.find(&event.id).await, Some(event.clone()));

        let mut updated = event.clone();
        updated.title = "Renamed".into();
        assert!(ctx.repos.events.save(&updated).await.is_ok());
        assert_eq!(ctx.repos.events.find(&event.id).await, Some(updated));

        assert!(ctx.repos.events.delete(&event.id).await.is_some());
        assert!(ctx.repos.events.find(&event.id).await.is_none());
    }

    #[tokio::test]
    async fn finds_by_user_ordered_by_start() {
        let ctx = AgendaContext::create_inmemory();
        let user_id = ID::default();
        let late = event_for_user(&user_id, 300);
        let early = event_for_user(&user_id, 100);
        let foreign = event_for_user(&ID::default(), 200);

        for e in [&late, &early, &foreign] {
            ctx.repos.events.insert(e).await.unwrap();
        }

        let events = ctx.repos.events.find_by_user(&user_id).await;
        assert_eq!(events, vec![early, late]);
    }
}
