use crate::dtos::{CalendarEventDTO, ReminderDTO, ReminderSettingsDTO};
use agenda_domain::{CalendarEvent, EventStatus, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventResponse {
    pub event: CalendarEventDTO,
}

impl CalendarEventResponse {
    pub fn new(event: CalendarEvent) -> Self {
        Self {
            event: CalendarEventDTO::new(event),
        }
    }
}

pub mod create_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub description: Option<String>,
        pub start_ts: i64,
        pub end_ts: Option<i64>,
        pub color: Option<String>,
        pub location: Option<String>,
        /// Reminders to schedule together with the event
        #[serde(default)]
        pub reminders: Vec<ReminderSettingsDTO>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub event: CalendarEventDTO,
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(event: CalendarEvent, reminders: Vec<Reminder>) -> Self {
            Self {
                event: CalendarEventDTO::new(event),
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod get_events {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub events: Vec<CalendarEventDTO>,
    }

    impl APIResponse {
        pub fn new(events: Vec<CalendarEvent>) -> Self {
            Self {
                events: events.into_iter().map(CalendarEventDTO::new).collect(),
            }
        }
    }
}

pub mod update_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    /// Omitted fields are left unchanged. For the nullable fields an
    /// explicit `null` clears the stored value.
    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<Option<String>>,
        pub start_ts: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub end_ts: Option<Option<i64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub color: Option<Option<String>>,
        pub status: Option<EventStatus>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub location: Option<Option<String>>,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod delete_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = CalendarEventResponse;
}
