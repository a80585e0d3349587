mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{DeleteResult, IEventRepo, IReminderRepo, IUserRepo, Repos};
pub use services::{INotifier, ReminderNotification, WebhookNotifier};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct AgendaContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl AgendaContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let notifier = WebhookNotifier::new(config.reminder_webhook_url.clone());
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(notifier),
        }
    }

    /// Context backed by in-memory repos, used in tests
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        let notifier = WebhookNotifier::new(config.reminder_webhook_url.clone());
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(notifier),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> AgendaContext {
    AgendaContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
