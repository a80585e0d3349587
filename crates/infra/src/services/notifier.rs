use agenda_domain::{CalendarEvent, Reminder, ReminderChannel, ID};
use serde::Serialize;
use tracing::debug;

/// Payload describing a due `Reminder` to whatever consumes them
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderNotification {
    pub reminder_id: ID,
    pub event_id: ID,
    pub user_id: ID,
    pub channel: ReminderChannel,
    pub event_title: String,
    pub event_start_ts: i64,
    pub fire_at: i64,
}

impl ReminderNotification {
    pub fn new(reminder: &Reminder, event: &CalendarEvent) -> Self {
        Self {
            reminder_id: reminder.id.clone(),
            event_id: reminder.event_id.clone(),
            user_id: reminder.user_id.clone(),
            channel: reminder.channel,
            event_title: event.title.clone(),
            event_start_ts: event.start_ts,
            fire_at: reminder.fire_at,
        }
    }
}

/// Delivery channel for due reminders. The actual send mechanism
/// (mail server, push gateway, ...) lives outside of this service,
/// which only hands notifications over.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn send(&self, notification: &ReminderNotification) -> anyhow::Result<()>;
}

/// Posts due reminders as JSON to a configured webhook
pub struct WebhookNotifier {
    url: Option<String>,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: Option<String>) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    async fn send(&self, notification: &ReminderNotification) -> anyhow::Result<()> {
        match &self.url {
            Some(url) => {
                self.client
                    .post(url)
                    .json(notification)
                    .send()
                    .await?
                    .error_for_status()?;
                Ok(())
            }
            None => {
                debug!(
                    "No reminder webhook configured, dropping notification for reminder: {}",
                    notification.reminder_id
                );
                Ok(())
            }
        }
    }
}
