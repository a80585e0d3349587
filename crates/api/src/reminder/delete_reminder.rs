use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::delete_reminder::*;
use agenda_domain::{Reminder, User, ID};
use agenda_infra::AgendaContext;

pub async fn delete_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub reminder_id: ID,
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) if reminder.user_id == self.user.id => ctx
                .repos
                .reminders
                .delete(&reminder.id)
                .await
                .ok_or(UseCaseError::StorageError),
            _ => Err(UseCaseError::NotFound(self.reminder_id.clone())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use agenda_domain::{ReminderChannel, TimeUnit};

    fn reminder_for_user(user_id: &ID) -> Reminder {
        Reminder {
            id: Default::default(),
            event_id: Default::default(),
            user_id: user_id.clone(),
            channel: ReminderChannel::Email,
            lead_amount: 15,
            lead_unit: TimeUnit::Minutes,
            status: Default::default(),
            fire_at: 100,
        }
    }

    #[actix_web::main]
    #[test]
    async fn deletes_own_reminder() {
        let ctx = AgendaContext::create_inmemory();
        let user = User::new("alice".into(), "alice@example.com".into(), "hash".into(), 0);
        let reminder = reminder_for_user(&user.id);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = DeleteReminderUseCase {
            reminder_id: reminder.id.clone(),
            user,
        };
        assert_eq!(usecase.execute(&ctx).await.unwrap(), reminder);
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_none());
    }

    #[actix_web::main]
    #[test]
    async fn hides_foreign_reminders() {
        let ctx = AgendaContext::create_inmemory();
        let owner = User::new("alice".into(), "alice@example.com".into(), "hash".into(), 0);
        let other = User::new("bob".into(), "bob@example.com".into(), "hash".into(), 0);
        let reminder = reminder_for_user(&owner.id);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = DeleteReminderUseCase {
            reminder_id: reminder.id.clone(),
            user: other,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(reminder.id.clone())
        );
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_some());
    }
}
