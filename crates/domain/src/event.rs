use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A single (non recurring) calendar entry owned by a `User`.
///
/// `created` and `updated` are system managed: they are assigned from
/// the clock on insert and `updated` is bumped on every write.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    /// Unix timestamp in millis at which the event starts
    pub start_ts: i64,
    /// Optional end of the event, must be >= `start_ts` when present
    pub end_ts: Option<i64>,
    /// Optional display hint for the frontend, e.g. "#FF5733"
    pub color: Option<String>,
    pub status: EventStatus,
    pub location: Option<String>,
    pub created: i64,
    pub updated: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Active,
    Cancelled,
    Finished,
}

impl Default for EventStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
            Self::Finished => "FINISHED",
        }
    }
}

#[derive(Error, Debug)]
#[error("Invalid event status: {0}")]
pub struct InvalidEventStatusError(pub String);

impl FromStr for EventStatus {
    type Err = InvalidEventStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "CANCELLED" => Ok(Self::Cancelled),
            "FINISHED" => Ok(Self::Finished),
            _ => Err(InvalidEventStatusError(s.to_string())),
        }
    }
}

impl CalendarEvent {
    /// Timespan sanity check, only meaningful when an end is given
    pub fn has_valid_timespan(&self) -> bool {
        match self.end_ts {
            Some(end_ts) => end_ts >= self.start_ts,
            None => true,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == EventStatus::Cancelled
    }
}

impl Entity for CalendarEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}
