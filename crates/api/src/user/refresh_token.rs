use crate::error::AgendaError;
use crate::shared::{
    auth::{create_token_pair, decode_token, TokenKind, TokenPair},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use agenda_api_structs::refresh_token::*;
use agenda_infra::AgendaContext;

pub async fn refresh_token_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let usecase = RefreshTokenUseCase {
        refresh_token: body.0.refresh_token,
    };

    execute(usecase, &ctx)
        .await
        .map(|tokens| {
            HttpResponse::Ok().json(APIResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            })
        })
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct RefreshTokenUseCase {
    pub refresh_token: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidRefreshToken,
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidRefreshToken => {
                Self::Unauthorized("Invalid or expired refresh token".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RefreshTokenUseCase {
    type Response = TokenPair;

    type Error = UseCaseError;

    const NAME: &'static str = "RefreshToken";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let user_id = decode_token(
            &self.refresh_token,
            TokenKind::Refresh,
            &ctx.config.jwt_secret,
        )
        .ok_or(UseCaseError::InvalidRefreshToken)?;

        // Deactivated users cannot rotate their tokens
        match ctx.repos.users.find(&user_id).await {
            Some(user) if user.is_active => {
                create_token_pair(&user.id, ctx).map_err(|_| UseCaseError::StorageError)
            }
            _ => Err(UseCaseError::InvalidRefreshToken),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use agenda_domain::User;

    #[actix_web::main]
    #[test]
    async fn rotates_tokens_for_active_user() {
        let ctx = AgendaContext::create_inmemory();
        let user = User::new("alice".into(), "alice@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let pair = create_token_pair(&user.id, &ctx).unwrap();

        let mut usecase = RefreshTokenUseCase {
            refresh_token: pair.refresh_token,
        };
        let res = usecase.execute(&ctx).await;
        assert!(res.is_ok());
        assert_eq!(
            decode_token(
                &res.unwrap().access_token,
                TokenKind::Access,
                &ctx.config.jwt_secret
            ),
            Some(user.id)
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_access_token_as_refresh_token() {
        let ctx = AgendaContext::create_inmemory();
        let user = User::new("alice".into(), "alice@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let pair = create_token_pair(&user.id, &ctx).unwrap();

        let mut usecase = RefreshTokenUseCase {
            refresh_token: pair.access_token,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidRefreshToken
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_token_of_deleted_user() {
        let ctx = AgendaContext::create_inmemory();
        let user = User::new("alice".into(), "alice@example.com".into(), "hash".into(), 0);
        let pair = create_token_pair(&user.id, &ctx).unwrap();

        let mut usecase = RefreshTokenUseCase {
            refresh_token: pair.refresh_token,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidRefreshToken
        );
    }
}
