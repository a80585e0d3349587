use crate::error::AgendaError;
use crate::shared::auth::protect_route;
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::get_me::*;
use agenda_infra::AgendaContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user)))
}
