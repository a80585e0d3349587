use agenda_domain::{DeliveryStatus, Reminder, ReminderChannel, TimeUnit, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub event_id: ID,
    pub channel: ReminderChannel,
    pub lead_amount: i64,
    pub lead_unit: TimeUnit,
    pub status: DeliveryStatus,
    pub fire_at: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            event_id: reminder.event_id,
            channel: reminder.channel,
            lead_amount: reminder.lead_amount,
            lead_unit: reminder.lead_unit,
            status: reminder.status,
            fire_at: reminder.fire_at,
        }
    }
}

/// How a new reminder should be scheduled relative to its event
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettingsDTO {
    pub channel: ReminderChannel,
    pub lead_amount: i64,
    pub lead_unit: TimeUnit,
}
