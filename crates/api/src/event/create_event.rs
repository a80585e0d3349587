use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::create_event::*;
use agenda_api_structs::dtos::ReminderSettingsDTO;
use agenda_domain::{
    scheduler::compute_fire_time, CalendarEvent, Reminder, ReminderChannel, TimeUnit, User,
};
use agenda_infra::AgendaContext;

pub async fn create_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateEventUseCase {
        title: body.title,
        description: body.description,
        start_ts: body.start_ts,
        end_ts: body.end_ts,
        color: body.color,
        location: body.location,
        reminders: body.reminders,
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.event, res.reminders)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
    pub color: Option<String>,
    pub location: Option<String>,
    pub reminders: Vec<ReminderSettingsDTO>,
    pub user: User,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub event: CalendarEvent,
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTitle,
    InvalidTimespan,
    InvalidLead(i64),
    DuplicateReminder(ReminderChannel, i64, TimeUnit),
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTitle => {
                Self::BadClientData("Events must have a non empty title".into())
            }
            UseCaseError::InvalidTimespan => Self::BadClientData(
                "The event end cannot be before the event start".into(),
            ),
            UseCaseError::InvalidLead(amount) => Self::BadClientData(format!(
                "Invalid reminder lead amount: {}. It must be positive and give a representable fire time",
                amount
            )),
            UseCaseError::DuplicateReminder(channel, amount, unit) => Self::Conflict(format!(
                "Duplicate reminder for channel: {} with lead time: {} {}",
                channel.as_str(),
                amount,
                unit.as_str()
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::InvalidTitle);
        }

        let now = ctx.sys.get_timestamp_millis();
        let event = CalendarEvent {
            id: Default::default(),
            user_id: self.user.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            start_ts: self.start_ts,
            end_ts: self.end_ts,
            color: self.color.clone(),
            status: Default::default(),
            location: self.location.clone(),
            created: now,
            updated: now,
        };
        if !event.has_valid_timespan() {
            return Err(UseCaseError::InvalidTimespan);
        }

        // Validate and schedule the whole batch before touching storage
        let mut reminders = Vec::with_capacity(self.reminders.len());
        for settings in &self.reminders {
            let fire_at =
                compute_fire_time(event.start_ts, settings.lead_amount, settings.lead_unit)
                    .map_err(|e| UseCaseError::InvalidLead(e.0))?;
            reminders.push(Reminder {
                id: Default::default(),
                event_id: event.id.clone(),
                user_id: self.user.id.clone(),
                channel: settings.channel,
                lead_amount: settings.lead_amount,
                lead_unit: settings.lead_unit,
                status: Default::default(),
                fire_at,
            });
        }
        for (i, reminder) in reminders.iter().enumerate() {
            if reminders[..i].iter().any(|r| r.lead_key() == reminder.lead_key()) {
                let (channel, amount, unit) = reminder.lead_key();
                return Err(UseCaseError::DuplicateReminder(channel, amount, unit));
            }
        }

        ctx.repos
            .events
            .insert(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        for reminder in &reminders {
            ctx.repos
                .reminders
                .insert(reminder)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(UseCaseResponse { event, reminders })
    }
}
