use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::create_reminder::*;
use agenda_domain::{
    scheduler::compute_fire_time, Reminder, ReminderChannel, TimeUnit, User, ID,
};
use agenda_infra::AgendaContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        event_id: path_params.event_id.clone(),
        channel: body.channel,
        lead_amount: body.lead_amount,
        lead_unit: body.lead_unit,
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub event_id: ID,
    pub channel: ReminderChannel,
    pub lead_amount: i64,
    pub lead_unit: TimeUnit,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EventNotFound(ID),
    InvalidLead(i64),
    DuplicateReminder,
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EventNotFound(event_id) => {
                Self::NotFound(format!("The event with id: {}, was not found.", event_id))
            }
            UseCaseError::InvalidLead(amount) => Self::BadClientData(format!(
                "Invalid reminder lead amount: {}. It must be positive and give a representable fire time",
                amount
            )),
            UseCaseError::DuplicateReminder => Self::Conflict(
                "A reminder with the same channel and lead time already exists for this event"
                    .into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) if event.user_id == self.user.id => event,
            _ => return Err(UseCaseError::EventNotFound(self.event_id.clone())),
        };

        let fire_at = compute_fire_time(event.start_ts, self.lead_amount, self.lead_unit)
            .map_err(|e| UseCaseError::InvalidLead(e.0))?;

        let reminder = Reminder {
            id: Default::default(),
            event_id: event.id.clone(),
            user_id: self.user.id.clone(),
            channel: self.channel,
            lead_amount: self.lead_amount,
            lead_unit: self.lead_unit,
            status: Default::default(),
            fire_at,
        };

        // The (channel, lead amount, lead unit) tuple must be unique
        // per event. The database enforces this as well, but checking
        // here gives the client a proper conflict response.
        let siblings = ctx.repos.reminders.find_by_event(&event.id).await;
        if siblings.iter().any(|r| r.lead_key() == reminder.lead_key()) {
            return Err(UseCaseError::DuplicateReminder);
        }

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use agenda_domain::CalendarEvent;

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

    fn usecase_for(event_id: &ID, user: &User) -> CreateReminderUseCase {
        CreateReminderUseCase {
            event_id: event_id.clone(),
            channel: ReminderChannel::Email,
            lead_amount: 15,
            lead_unit: TimeUnit::Minutes,
            user: user.clone(),
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_reminder_with_computed_fire_time() {
        let (ctx, user, event) = setup().await;

        let reminder = usecase_for(&event.id, &user).execute(&ctx).await.unwrap();
        assert_eq!(reminder.fire_at, event.start_ts - 15 * 60 * 1000);
        assert!(reminder.is_pending());
        assert_eq!(ctx.repos.reminders.find_by_event(&event.id).await.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_duplicate_lead_tuple_for_same_event() {
        let (ctx, user, event) = setup().await;
        usecase_for(&event.id, &user).execute(&ctx).await.unwrap();

        // Same channel and lead time again
        let res = usecase_for(&event.id, &user).execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::DuplicateReminder);

        // A different lead amount is fine
        let mut usecase = usecase_for(&event.id, &user);
        usecase.lead_amount = 30;
        assert!(usecase.execute(&ctx).await.is_ok());

        // And so is another channel with the same lead time
        let mut usecase = usecase_for(&event.id, &user);
        usecase.channel = ReminderChannel::InApp;
        assert!(usecase.execute(&ctx).await.is_ok());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_non_positive_lead() {
        let (ctx, user, event) = setup().await;

        let mut usecase = usecase_for(&event.id, &user);
        usecase.lead_amount = 0;
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidLead(0)
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_lead_whose_fire_time_overflows() {
        let (ctx, user, event) = setup().await;

        let huge = i64::MAX / 1000;
        let mut usecase = usecase_for(&event.id, &user);
        usecase.lead_amount = huge;
        usecase.lead_unit = TimeUnit::Days;
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidLead(huge)
        );
        assert!(ctx.repos.reminders.find_by_event(&event.id).await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn hides_foreign_events() {
        let (ctx, _, event) = setup().await;
        let other = User::new("bob".into(), "bob@example.com".into(), "hash".into(), 0);

        let res = usecase_for(&event.id, &other).execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::EventNotFound(event.id));
    }
}
