use super::IReminderRepo;
use crate::repos::shared::{inmemory_repo, DeleteResult};
use agenda_domain::{scheduler, DeliveryOutcome, Reminder, ID};
use std::sync::Mutex;

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        // Same uniqueness rule as the UNIQUE constraint in postgres
        let mut reminders = self.reminders.lock().unwrap();
        if reminders
            .iter()
            .any(|r| r.event_id == reminder.event_id && r.lead_key() == reminder.lead_key())
        {
            anyhow::bail!(
                "A reminder with the same channel and lead time already exists for event: {}",
                reminder.event_id
            );
        }
        reminders.push(reminder.clone());
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        inmemory_repo::save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        inmemory_repo::find(reminder_id, &self.reminders)
    }

    async fn find_by_event(&self, event_id: &ID) -> Vec<Reminder> {
        inmemory_repo::find_by(&self.reminders, |r| &r.event_id == event_id)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        inmemory_repo::find_by(&self.reminders, |r| &r.user_id == user_id)
    }

    async fn find_due_before(&self, before: i64) -> Vec<Reminder> {
        let reminders = self.reminders.lock().unwrap();
        scheduler::find_due(before, &reminders)
    }

    async fn mark_delivered(
        &self,
        reminder_id: &ID,
        outcome: DeliveryOutcome,
    ) -> anyhow::Result<Option<Reminder>> {
        // Check-and-set under one lock, the inmemory version of the
        // status guarded UPDATE in the postgres repo
        let mut reminders = self.reminders.lock().unwrap();
        let reminder = match reminders
            .iter_mut()
            .find(|r| &r.id == reminder_id && r.is_pending())
        {
            Some(r) => r,
            None => return Ok(None),
        };
        reminder
            .mark_delivered(outcome)
            .expect("Pending reminder to accept a delivery outcome");
        Ok(Some(reminder.clone()))
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        inmemory_repo::delete(reminder_id, &self.reminders)
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(inmemory_repo::delete_by(&self.reminders, |r| {
            &r.event_id == event_id
        }))
    }
}
