use agenda_domain::{CalendarEvent, EventStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
    pub color: Option<String>,
    pub status: EventStatus,
    pub location: Option<String>,
    pub created: i64,
    pub updated: i64,
}

impl CalendarEventDTO {
    pub fn new(event: CalendarEvent) -> Self {
        Self {
            id: event.id,
            user_id: event.user_id,
            title: event.title,
            description: event.description,
            start_ts: event.start_ts,
            end_ts: event.end_ts,
            color: event.color,
            status: event.status,
            location: event.location,
            created: event.created,
            updated: event.updated,
        }
    }
}
