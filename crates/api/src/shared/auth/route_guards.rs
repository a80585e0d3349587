use super::tokens::{decode_token, TokenKind};
use crate::error::AgendaError;
use actix_web::HttpRequest;
use agenda_domain::User;
use agenda_infra::AgendaContext;

fn parse_bearer_token(req: &HttpRequest) -> Result<&str, AgendaError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            AgendaError::Unauthorized("Missing or malformed Authorization header".into())
        })?;
    token.strip_prefix("Bearer ").ok_or_else(|| {
        AgendaError::Unauthorized("The Authorization header must use the Bearer scheme".into())
    })
}

/// Protects routes that can only be accessed by an authenticated,
/// active `User`. The resolved user is the explicit caller identity
/// that all store and scheduler operations receive.
pub async fn protect_route(
    http_req: &HttpRequest,
    ctx: &AgendaContext,
) -> Result<User, AgendaError> {
    let token = parse_bearer_token(http_req)?;
    let user_id = decode_token(token, TokenKind::Access, &ctx.config.jwt_secret)
        .ok_or_else(|| AgendaError::Unauthorized("Invalid or expired access token".into()))?;

    match ctx.repos.users.find(&user_id).await {
        Some(user) if user.is_active => Ok(user),
        _ => Err(AgendaError::Unauthorized(
            "No active user found for the provided access token".into(),
        )),
    }
}
