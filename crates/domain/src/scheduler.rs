use crate::event::CalendarEvent;
use crate::reminder::{Reminder, TimeUnit};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid lead amount: {0}. It must be positive and give a representable fire time")]
pub struct InvalidLeadError(pub i64);

/// Computes the absolute timestamp in millis at which a `Reminder`
/// with the given lead time becomes due for an event starting at
/// `event_start`. The result is always strictly before `event_start`.
///
/// Fails for non-positive leads and for leads so large that the fire
/// time does not fit in an i64 millis timestamp.
pub fn compute_fire_time(
    event_start: i64,
    lead_amount: i64,
    lead_unit: TimeUnit,
) -> Result<i64, InvalidLeadError> {
    if lead_amount <= 0 {
        return Err(InvalidLeadError(lead_amount));
    }
    lead_amount
        .checked_mul(lead_unit.in_minutes())
        .and_then(|lead_minutes| lead_minutes.checked_mul(60 * 1000))
        .and_then(|lead_millis| event_start.checked_sub(lead_millis))
        .ok_or(InvalidLeadError(lead_amount))
}

/// Selects the `Pending` reminders with `fire_at <= now`, ordered by
/// `(fire_at, id)` ascending so that repeated scans process reminders
/// in the same order.
///
/// The selection is idempotent for a fixed `now` and an unchanged
/// reminder set: a reminder keeps being returned until a delivery
/// attempt commits, after which its status is terminal and it is
/// filtered out forever.
pub fn find_due(now: i64, reminders: &[Reminder]) -> Vec<Reminder> {
    let mut due = reminders
        .iter()
        .filter(|r| r.is_pending() && r.fire_at <= now)
        .cloned()
        .collect::<Vec<_>>();
    due.sort_by(|r1, r2| r1.fire_at.cmp(&r2.fire_at).then_with(|| r1.id.cmp(&r2.id)));
    due
}

/// Recomputes `fire_at` for every `Pending` reminder of `event` after
/// its start time changed. Delivered reminders are history and are
/// left untouched.
pub fn reschedule(event: &CalendarEvent, reminders: &mut [Reminder]) -> Result<(), InvalidLeadError> {
    for reminder in reminders
        .iter_mut()
        .filter(|r| r.event_id == event.id && r.is_pending())
    {
        reminder.fire_at = compute_fire_time(event.start_ts, reminder.lead_amount, reminder.lead_unit)?;
    }
    Ok(())
}
