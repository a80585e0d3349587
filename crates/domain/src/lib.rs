mod event;
mod reminder;
pub mod scheduler;
mod shared;
mod user;

pub use event::{CalendarEvent, EventStatus, InvalidEventStatusError};
pub use reminder::{
    DeliveryOutcome, DeliveryStatus, InvalidChannelError, InvalidDeliveryStatusError,
    InvalidTimeUnitError, InvalidTransitionError, Reminder, ReminderChannel, TimeUnit,
};
pub use scheduler::InvalidLeadError;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::User;
