use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A `Reminder` is a scheduled alert for a `CalendarEvent`: the owner
/// should be notified on `channel` at `fire_at`, which is the event
/// start minus the lead time.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `CalendarEvent` this `Reminder` is associated with
    pub event_id: ID,
    /// The `User` owning the parent event. Kept on the reminder as well
    /// so that "all reminders for the caller" does not need a join.
    pub user_id: ID,
    pub channel: ReminderChannel,
    /// How much lead time before the event start, always > 0
    pub lead_amount: i64,
    pub lead_unit: TimeUnit,
    pub status: DeliveryStatus,
    /// Unix timestamp in millis at which this `Reminder` becomes due
    pub fire_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderChannel {
    Email,
    InApp,
}

impl ReminderChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::InApp => "IN_APP",
        }
    }
}

#[derive(Error, Debug)]
#[error("Invalid reminder channel: {0}")]
pub struct InvalidChannelError(pub String);

impl FromStr for ReminderChannel {
    type Err = InvalidChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMAIL" => Ok(Self::Email),
            "IN_APP" => Ok(Self::InApp),
            _ => Err(InvalidChannelError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// How many minutes one unit corresponds to
    pub fn in_minutes(&self) -> i64 {
        match self {
            Self::Minutes => 1,
            Self::Hours => 60,
            Self::Days => 60 * 24,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minutes => "MINUTES",
            Self::Hours => "HOURS",
            Self::Days => "DAYS",
        }
    }
}

#[derive(Error, Debug)]
#[error("Invalid time unit: {0}")]
pub struct InvalidTimeUnitError(pub String);

impl FromStr for TimeUnit {
    type Err = InvalidTimeUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MINUTES" => Ok(Self::Minutes),
            "HOURS" => Ok(Self::Hours),
            "DAYS" => Ok(Self::Days),
            _ => Err(InvalidTimeUnitError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Failed,
}

impl Default for DeliveryStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Sent => "SENT",
            Self::Failed => "FAILED",
        }
    }
}

#[derive(Error, Debug)]
#[error("Invalid delivery status: {0}")]
pub struct InvalidDeliveryStatusError(pub String);

impl FromStr for DeliveryStatus {
    type Err = InvalidDeliveryStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "SENT" => Ok(Self::Sent),
            "FAILED" => Ok(Self::Failed),
            _ => Err(InvalidDeliveryStatusError(s.to_string())),
        }
    }
}

/// Terminal result of a delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent,
    Failed,
}

impl From<DeliveryOutcome> for DeliveryStatus {
    fn from(outcome: DeliveryOutcome) -> Self {
        match outcome {
            DeliveryOutcome::Sent => Self::Sent,
            DeliveryOutcome::Failed => Self::Failed,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Illegal delivery status transition: {from:?} -> {to:?}")]
pub struct InvalidTransitionError {
    pub from: DeliveryStatus,
    pub to: DeliveryStatus,
}

impl Reminder {
    pub fn is_pending(&self) -> bool {
        self.status == DeliveryStatus::Pending
    }

    /// The tuple that must be unique among the reminders of one event
    pub fn lead_key(&self) -> (ReminderChannel, i64, TimeUnit) {
        (self.channel, self.lead_amount, self.lead_unit)
    }

    /// Commits a delivery attempt. `Sent` and `Failed` are terminal,
    /// so this only succeeds from `Pending` and never reverses.
    pub fn mark_delivered(
        &mut self,
        outcome: DeliveryOutcome,
    ) -> Result<(), InvalidTransitionError> {
        if !self.is_pending() {
            return Err(InvalidTransitionError {
                from: self.status,
                to: outcome.into(),
            });
        }
        self.status = outcome.into();
        Ok(())
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
