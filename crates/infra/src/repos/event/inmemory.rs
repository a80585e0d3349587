use super::IEventRepo;
use crate::repos::shared::inmemory_repo;
use agenda_domain::{CalendarEvent, ID};
use std::sync::Mutex;

pub struct InMemoryEventRepo {
    events: Mutex<Vec<CalendarEvent>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        inmemory_repo::insert(e, &self.events);
        Ok(())
    }

    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        inmemory_repo::save(e, &self.events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<CalendarEvent> {
        inmemory_repo::find(event_id, &self.events)
    }

    async fn find_many(&self, event_ids: &[ID]) -> anyhow::Result<Vec<CalendarEvent>> {
        Ok(inmemory_repo::find_by(&self.events, |e| {
            event_ids.contains(&e.id)
        }))
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<CalendarEvent> {
        let mut events = inmemory_repo::find_by(&self.events, |e| &e.user_id == user_id);
        events.sort_by_key(|e| e.start_ts);
        events
    }

    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent> {
        inmemory_repo::delete(event_id, &self.events)
    }
}
