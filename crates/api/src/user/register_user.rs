use crate::error::AgendaError;
use crate::shared::{
    auth::hash_password,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use agenda_api_structs::register_user::*;
use agenda_domain::User;
use agenda_infra::AgendaContext;

pub async fn register_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let body = body.0;
    let usecase = RegisterUserUseCase {
        username: body.username,
        email: body.email,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct RegisterUserUseCase {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidUsername(String),
    InvalidEmail(String),
    PasswordTooShort,
    UsernameTaken(String),
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidUsername(username) => Self::BadClientData(format!(
                "Invalid username: `{}`. Usernames must be 1-150 characters of letters, digits and the symbols @ . + - _",
                username
            )),
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("Invalid email address: `{}`", email))
            }
            UseCaseError::PasswordTooShort => {
                Self::BadClientData("Passwords must be at least 8 characters long".into())
            }
            UseCaseError::UsernameTaken(username) => Self::Conflict(format!(
                "A user with the username: `{}`, already exists.",
                username
            )),
            UseCaseError::EmailTaken(email) => Self::Conflict(format!(
                "A user with the email: `{}`, already exists.",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

fn valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 150
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

fn valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

const MIN_PASSWORD_LEN: usize = 8;

#[async_trait::async_trait(?Send)]
impl UseCase for RegisterUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "RegisterUser";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        if !valid_username(&self.username) {
            return Err(UseCaseError::InvalidUsername(self.username.clone()));
        }
        if !valid_email(&self.email) {
            return Err(UseCaseError::InvalidEmail(self.email.clone()));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(UseCaseError::PasswordTooShort);
        }

        if ctx
            .repos
            .users
            .find_by_username(&self.username)
            .await
            .is_some()
        {
            return Err(UseCaseError::UsernameTaken(self.username.clone()));
        }
        if ctx.repos.users.find_by_email(&self.email).await.is_some() {
            return Err(UseCaseError::EmailTaken(self.email.clone()));
        }

        let password_hash =
            hash_password(&self.password).map_err(|_| UseCaseError::StorageError)?;
        let user = User::new(
            self.username.clone(),
            self.email.clone(),
            password_hash,
            ctx.sys.get_timestamp_millis(),
        );

        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(user)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn valid_usecase() -> RegisterUserUseCase {
        RegisterUserUseCase {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "correct horse battery staple".into(),
        }
    }

    #[actix_web::main]
    #[test]
    async fn registers_user() {
        let ctx = AgendaContext::create_inmemory();

        let res = valid_usecase().execute(&ctx).await;
        assert!(res.is_ok());

        let user = res.unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.is_active);
        assert!(!user.is_staff);
        assert_ne!(user.password_hash, "correct horse battery staple");
        assert!(ctx.repos.users.find(&user.id).await.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_duplicate_username() {
        let ctx = AgendaContext::create_inmemory();
        valid_usecase().execute(&ctx).await.unwrap();

        let mut usecase = RegisterUserUseCase {
            email: "alice2@example.com".into(),
            ..valid_usecase()
        };
        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::UsernameTaken("alice".into()));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_duplicate_email() {
        let ctx = AgendaContext::create_inmemory();
        valid_usecase().execute(&ctx).await.unwrap();

        let mut usecase = RegisterUserUseCase {
            username: "alice2".into(),
            ..valid_usecase()
        };
        let res = usecase.execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::EmailTaken("alice@example.com".into())
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_input() {
        let ctx = AgendaContext::create_inmemory();

        let mut usecase = RegisterUserUseCase {
            username: "alice smith".into(),
            ..valid_usecase()
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidUsername(_))
        ));

        let mut usecase = RegisterUserUseCase {
            email: "not-an-email".into(),
            ..valid_usecase()
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidEmail(_))
        ));

        let mut usecase = RegisterUserUseCase {
            password: "short".into(),
            ..valid_usecase()
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::PasswordTooShort
        );
    }
}
