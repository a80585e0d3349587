use crate::shared::usecase::UseCase;
use agenda_domain::{CalendarEvent, DeliveryOutcome, ID};
use agenda_infra::{AgendaContext, ReminderNotification};
use std::collections::HashMap;
use tracing::warn;

/// Scans for due reminders and hands them to the notifier. Runs from
/// the minutely job, but can also be executed directly in tests.
///
/// Reminders of cancelled or vanished events are skipped and stay
/// `Pending`, all other due reminders are committed to a terminal
/// status exactly once, even when scans overlap.
#[derive(Debug)]
pub struct SendDueRemindersUseCase;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = DeliveryReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due = ctx.repos.reminders.find_due_before(now).await;

        let mut report = DeliveryReport::default();
        if due.is_empty() {
            return Ok(report);
        }

        let mut event_ids = due.iter().map(|r| r.event_id.clone()).collect::<Vec<_>>();
        event_ids.sort();
        event_ids.dedup();
        let events = ctx
            .repos
            .events
            .find_many(&event_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect::<HashMap<ID, CalendarEvent>>();

        for reminder in due {
            let event = match events.get(&reminder.event_id) {
                Some(event) if !event.is_cancelled() => event,
                // Cancelled or vanished events keep their reminders
                // pending, nothing is delivered for them
                _ => {
                    report.skipped += 1;
                    continue;
                }
            };

            let notification = ReminderNotification::new(&reminder, event);
            let outcome = match ctx.notifier.send(&notification).await {
                Ok(()) => DeliveryOutcome::Sent,
                Err(e) => {
                    warn!(
                        "Unable to deliver reminder: {:?}. Error: {:?}",
                        reminder.id, e
                    );
                    DeliveryOutcome::Failed
                }
            };

            match ctx.repos.reminders.mark_delivered(&reminder.id, outcome).await {
                Ok(Some(_)) => match outcome {
                    DeliveryOutcome::Sent => report.sent += 1,
                    DeliveryOutcome::Failed => report.failed += 1,
                },
                // An overlapping scan committed this reminder first
                Ok(None) => report.skipped += 1,
                Err(_) => return Err(UseCaseError::StorageError),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use agenda_domain::{
        DeliveryStatus, EventStatus, Reminder, ReminderChannel, TimeUnit, User,
    };
    use agenda_infra::{INotifier, ISys};
    use std::sync::{Arc, Mutex};

    struct StaticSys(i64);
    impl ISys for StaticSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<ReminderNotification>>,
    }

    #[async_trait::async_trait]
    impl INotifier for RecordingNotifier {
        async fn send(&self, notification: &ReminderNotification) -> anyhow::Result<()> {
            self.sent.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait::async_trait]
    impl INotifier for FailingNotifier {
        async fn send(&self, _notification: &ReminderNotification) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("smtp gateway unreachable"))
        }
    }

    fn ctx_at(now: i64) -> AgendaContext {
        let mut ctx = AgendaContext::create_inmemory();
        ctx.sys = Arc::new(StaticSys(now));
        ctx
    }

    async fn insert_event(ctx: &AgendaContext, status: EventStatus) -> CalendarEvent {
        let user = User::new("alice".into(), "alice@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let event = CalendarEvent {
            id: Default::default(),
            user_id: user.id.clone(),
            title: "Dentist".into(),
            description: None,
            start_ts: 10_000_000,
            end_ts: None,
            color: None,
            status,
            location: None,
            created: 0,
            updated: 0,
        };
        ctx.repos.events.insert(&event).await.unwrap();
        event
    }

    async fn insert_reminder(ctx: &AgendaContext, event: &CalendarEvent, fire_at: i64) -> Reminder {
        let reminder = Reminder {
            id: Default::default(),
            event_id: event.id.clone(),
            user_id: event.user_id.clone(),
            channel: ReminderChannel::Email,
            // Keyed to the fire time so reminders of one event never
            // collide on the unique lead tuple
            lead_amount: fire_at,
            lead_unit: TimeUnit::Minutes,
            status: Default::default(),
            fire_at,
        };
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    #[actix_web::main]
    #[test]
    async fn delivers_due_reminders_once() {
        let mut ctx = ctx_at(1000);
        let notifier = Arc::new(RecordingNotifier::default());
        ctx.notifier = notifier.clone();

        let event = insert_event(&ctx, EventStatus::Active).await;
        let due = insert_reminder(&ctx, &event, 900).await;
        let not_due = insert_reminder(&ctx, &event, 1001).await;

        let report = SendDueRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(
            report,
            DeliveryReport {
                sent: 1,
                failed: 0,
                skipped: 0
            }
        );
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
        assert_eq!(notifier.sent.lock().unwrap()[0].reminder_id, due.id);

        let committed = ctx.repos.reminders.find(&due.id).await.unwrap();
        assert_eq!(committed.status, DeliveryStatus::Sent);
        assert!(ctx.repos.reminders.find(&not_due.id).await.unwrap().is_pending());

        // A second scan at the same instant finds nothing left to do
        let report = SendDueRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(report, DeliveryReport::default());
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn failed_delivery_is_terminal() {
        let mut ctx = ctx_at(1000);
        ctx.notifier = Arc::new(FailingNotifier);

        let event = insert_event(&ctx, EventStatus::Active).await;
        let reminder = insert_reminder(&ctx, &event, 900).await;

        let report = SendDueRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(
            report,
            DeliveryReport {
                sent: 0,
                failed: 1,
                skipped: 0
            }
        );

        // No automatic retry on later scans
        let committed = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(committed.status, DeliveryStatus::Failed);
        let report = SendDueRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(report, DeliveryReport::default());
    }

    #[actix_web::main]
    #[test]
    async fn skips_reminders_of_cancelled_events() {
        let mut ctx = ctx_at(1000);
        let notifier = Arc::new(RecordingNotifier::default());
        ctx.notifier = notifier.clone();

        let event = insert_event(&ctx, EventStatus::Cancelled).await;
        let reminder = insert_reminder(&ctx, &event, 900).await;

        let report = SendDueRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(
            report,
            DeliveryReport {
                sent: 0,
                failed: 0,
                skipped: 1
            }
        );
        assert!(notifier.sent.lock().unwrap().is_empty());

        // Left pending, so reactivating the event would deliver it
        assert!(ctx.repos.reminders.find(&reminder.id).await.unwrap().is_pending());
    }

    #[actix_web::main]
    #[test]
    async fn already_committed_reminders_are_not_delivered_again() {
        let mut ctx = ctx_at(1000);
        let notifier = Arc::new(RecordingNotifier::default());
        ctx.notifier = notifier.clone();

        let event = insert_event(&ctx, EventStatus::Active).await;
        let reminder = insert_reminder(&ctx, &event, 900).await;
        ctx.repos
            .reminders
            .mark_delivered(&reminder.id, DeliveryOutcome::Sent)
            .await
            .unwrap();

        let report = SendDueRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(report, DeliveryReport::default());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }
}
