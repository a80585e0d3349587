use super::update_event::UpdateEventUseCase;
use crate::shared::usecase::Subscriber;
use agenda_domain::{scheduler, CalendarEvent};
use agenda_infra::AgendaContext;
use tracing::error;

/// Recomputes the fire times of all pending reminders of an event
/// whenever the event is updated, so that reminders always track the
/// current event start.
pub struct SyncRemindersOnEventRescheduled;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateEventUseCase> for SyncRemindersOnEventRescheduled {
    async fn notify(&self, event: &CalendarEvent, ctx: &AgendaContext) {
        let mut reminders = ctx.repos.reminders.find_by_event(&event.id).await;
        if let Err(e) = scheduler::reschedule(event, &mut reminders) {
            error!("Unable to reschedule reminders for event: {:?}. Error: {:?}", event.id, e);
            return;
        }
        for reminder in reminders.iter().filter(|r| r.is_pending()) {
            if let Err(e) = ctx.repos.reminders.save(reminder).await {
                error!("Unable to save rescheduled reminder: {:?}. Error: {:?}", reminder.id, e);
            }
        }
    }
}
