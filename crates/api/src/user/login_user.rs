use crate::error::AgendaError;
use crate::shared::{
    auth::{create_token_pair, verify_password, TokenPair},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use agenda_api_structs::login_user::*;
use agenda_domain::User;
use agenda_infra::AgendaContext;

pub async fn login_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let body = body.0;
    let usecase = LoginUserUseCase {
        email: body.email,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(
                res.tokens.access_token,
                res.tokens.refresh_token,
                res.user,
            ))
        })
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct LoginUserUseCase {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub user: User,
    pub tokens: TokenPair,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidCredentials,
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            // Same response whether the email is unknown, the password is
            // wrong or the account is deactivated
            UseCaseError::InvalidCredentials => {
                Self::Unauthorized("Invalid email or password".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for LoginUserUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "LoginUser";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let user = match ctx.repos.users.find_by_email(&self.email).await {
            Some(user) if user.is_active => user,
            _ => return Err(UseCaseError::InvalidCredentials),
        };

        if !verify_password(&self.password, &user.password_hash) {
            return Err(UseCaseError::InvalidCredentials);
        }

        let tokens =
            create_token_pair(&user.id, ctx).map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseResponse { user, tokens })
    }
}
