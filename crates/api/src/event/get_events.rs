use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::get_events::*;
use agenda_domain::{CalendarEvent, User};
use agenda_infra::AgendaContext;

pub async fn get_events_controller(
    http_req: HttpRequest,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetEventsUseCase { user };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(APIResponse::new(events)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct GetEventsUseCase {
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventsUseCase {
    type Response = Vec<CalendarEvent>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvents";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.events.find_by_user(&self.user.id).await)
    }
}
