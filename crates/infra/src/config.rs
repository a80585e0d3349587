use agenda_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to sign and verify the JWT access and refresh tokens
    pub jwt_secret: String,
    /// How long an access token is valid, in millis
    pub access_token_ttl: i64,
    /// How long a refresh token is valid, in millis
    pub refresh_token_ttl: i64,
    /// Where due reminders are posted by the delivery job. When unset the
    /// job still transitions reminders but delivery is a logged no-op.
    pub reminder_webhook_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find JWT_SECRET environment variable. Going to create one, note that all issued tokens expire when the server restarts.");
                create_random_secret(32)
            }
        };
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        let reminder_webhook_url = std::env::var("REMINDER_WEBHOOK_URL").ok();
        Self {
            port,
            jwt_secret,
            access_token_ttl: 1000 * 60 * 15,                // 15 minutes
            refresh_token_ttl: 1000 * 60 * 60 * 24 * 7,      // 7 days
            reminder_webhook_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
