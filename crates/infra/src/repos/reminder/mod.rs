mod inmemory;
mod postgres;

use crate::repos::shared::DeleteResult;
use agenda_domain::{DeliveryOutcome, Reminder, ID};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    async fn find_by_event(&self, event_id: &ID) -> Vec<Reminder>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder>;
    /// Pending reminders with `fire_at <= before`, ordered by `(fire_at, id)`
    async fn find_due_before(&self, before: i64) -> Vec<Reminder>;
    /// Transitions a reminder out of `Pending` only if it still is
    /// `Pending` at commit time, so overlapping scans cannot deliver
    /// the same reminder twice. Returns `None` when the reminder is
    /// unknown or already terminal.
    async fn mark_delivered(
        &self,
        reminder_id: &ID,
        outcome: DeliveryOutcome,
    ) -> anyhow::Result<Option<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult>;
}
