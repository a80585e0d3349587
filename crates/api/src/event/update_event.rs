use super::subscribers::SyncRemindersOnEventRescheduled;
use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::update_event::*;
use agenda_domain::{CalendarEvent, EventStatus, User, ID};
use agenda_infra::AgendaContext;

pub async fn update_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateEventUseCase {
        event_id: path_params.event_id.clone(),
        title: body.title,
        description: body.description,
        start_ts: body.start_ts,
        end_ts: body.end_ts,
        color: body.color,
        status: body.status,
        location: body.location,
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(AgendaError::from)
}

/// The outer `Option` on the nullable fields distinguishes "leave
/// unchanged" from "clear the stored value".
#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start_ts: Option<i64>,
    pub end_ts: Option<Option<i64>>,
    pub color: Option<Option<String>>,
    pub status: Option<EventStatus>,
    pub location: Option<Option<String>>,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidTitle,
    InvalidTimespan,
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => {
                Self::NotFound(format!("The event with id: {}, was not found.", event_id))
            }
            UseCaseError::InvalidTitle => {
                Self::BadClientData("Events must have a non empty title".into())
            }
            UseCaseError::InvalidTimespan => Self::BadClientData(
                "The event end cannot be before the event start".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let mut event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) if event.user_id == self.user.id => event,
            _ => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(UseCaseError::InvalidTitle);
            }
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(start_ts) = self.start_ts {
            event.start_ts = start_ts;
        }
        if let Some(end_ts) = self.end_ts {
            event.end_ts = end_ts;
        }
        if let Some(color) = &self.color {
            event.color = color.clone();
        }
        if let Some(status) = self.status {
            event.status = status;
        }
        if let Some(location) = &self.location {
            event.location = location.clone();
        }

        if !event.has_valid_timespan() {
            return Err(UseCaseError::InvalidTimespan);
        }

        event.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .events
            .save(&event)
            .await
            .map(|_| event)
            .map_err(|_| UseCaseError::StorageError)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncRemindersOnEventRescheduled)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use agenda_domain::{
        scheduler::compute_fire_time, DeliveryOutcome, DeliveryStatus, Reminder, ReminderChannel,
        TimeUnit,
    };

    async fn setup() -> (AgendaContext, User, CalendarEvent) {
        let ctx = AgendaContext::create_inmemory();
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
            status: Default::default(),
            location: None,
            created: 0,
            updated: 0,
        };
        ctx.repos.events.insert(&event).await.unwrap();
        (ctx, user, event)
    }

    fn noop_update(event_id: &ID, user: &User) -> UpdateEventUseCase {
        UpdateEventUseCase {
            event_id: event_id.clone(),
            title: None,
            description: None,
            start_ts: None,
            end_ts: None,
            color: None,
            status: None,
            location: None,
            user: user.clone(),
        }
    }

    async fn insert_reminder(
        ctx: &AgendaContext,
        event: &CalendarEvent,
        lead_amount: i64,
    ) -> Reminder {
        let reminder = Reminder {
            id: Default::default(),
            event_id: event.id.clone(),
            user_id: event.user_id.clone(),
            channel: ReminderChannel::Email,
            lead_amount,
            lead_unit: TimeUnit::Minutes,
            status: Default::default(),
            fire_at: compute_fire_time(event.start_ts, lead_amount, TimeUnit::Minutes).unwrap(),
        };
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    #[actix_web::main]
    #[test]
    async fn updates_fields_and_bumps_updated() {
        let (ctx, user, event) = setup().await;

        let mut usecase = UpdateEventUseCase {
            title: Some("Dentist (moved)".into()),
            status: Some(EventStatus::Cancelled),
            ..noop_update(&event.id, &user)
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.title, "Dentist (moved)");
        assert_eq!(updated.status, EventStatus::Cancelled);
        assert_eq!(updated.start_ts, event.start_ts);
        assert!(updated.updated > event.updated);
    }

    #[actix_web::main]
    #[test]
    async fn hides_foreign_events() {
        let (ctx, _, event) = setup().await;
        let other = User::new("bob".into(), "bob@example.com".into(), "hash".into(), 0);

        let mut usecase = noop_update(&event.id, &other);
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(event.id)
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_inverted_timespan() {
        let (ctx, user, event) = setup().await;

        let mut usecase = UpdateEventUseCase {
            end_ts: Some(Some(event.start_ts - 1)),
            ..noop_update(&event.id, &user)
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidTimespan
        );
    }

    #[actix_web::main]
    #[test]
    async fn clears_nullable_fields_with_explicit_null() {
        let (ctx, user, event) = setup().await;

        let mut usecase = UpdateEventUseCase {
            description: Some(Some("Yearly checkup".into())),
            end_ts: Some(Some(event.start_ts + 60_000)),
            location: Some(Some("Main street 1".into())),
            ..noop_update(&event.id, &user)
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.description.as_deref(), Some("Yearly checkup"));

        // An omitted field stays, an explicit null clears
        let mut usecase = UpdateEventUseCase {
            description: Some(None),
            end_ts: Some(None),
            ..noop_update(&event.id, &user)
        };
        let cleared = usecase.execute(&ctx).await.unwrap();
        assert_eq!(cleared.description, None);
        assert_eq!(cleared.end_ts, None);
        assert_eq!(cleared.location.as_deref(), Some("Main street 1"));
    }

    #[actix_web::main]
    #[test]
    async fn rescheduling_moves_pending_reminders() {
        let (ctx, user, event) = setup().await;
        let reminder = insert_reminder(&ctx, &event, 15).await;

        let new_start = event.start_ts + 2 * 60 * 60 * 1000;
        let usecase = UpdateEventUseCase {
            start_ts: Some(new_start),
            ..noop_update(&event.id, &user)
        };
        // Through `execute` so that the reminder sync subscriber runs
        execute(usecase, &ctx).await.unwrap();

        let synced = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(
            synced.fire_at,
            compute_fire_time(new_start, 15, TimeUnit::Minutes).unwrap()
        );
        assert_eq!(synced.status, DeliveryStatus::Pending);
    }

    #[actix_web::main]
    #[test]
    async fn rescheduling_leaves_delivered_reminders_in_place() {
        let (ctx, user, event) = setup().await;
        let reminder = insert_reminder(&ctx, &event, 15).await;
        ctx.repos
            .reminders
            .mark_delivered(&reminder.id, DeliveryOutcome::Sent)
            .await
            .unwrap();

        let usecase = UpdateEventUseCase {
            start_ts: Some(event.start_ts + 60_000),
            ..noop_update(&event.id, &user)
        };
        execute(usecase, &ctx).await.unwrap();

        let untouched = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(untouched.fire_at, reminder.fire_at);
        assert_eq!(untouched.status, DeliveryStatus::Sent);
    }
}
