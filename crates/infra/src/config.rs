use roamio_reminders_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to sign and verify the api json web tokens
    pub api_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// How often the reminder job scans for due reminders, in seconds
    pub reminder_check_interval_secs: u64,
    /// Smtp credentials. When any of the smtp environment variables are
    /// missing this is `None` and email delivery falls back to a log-only
    /// stub transport, so the service stays operable without credentials.
    pub smtp: Option<SmtpConfig>,
    /// The from address used on outgoing reminder emails
    pub smtp_from_address: String,
}

impl Config {
    pub fn new() -> Self {
        let api_secret = match std::env::var("API_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find API_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!(
                    "Api secret was generated and set to: {}. Tokens signed with it will not survive a restart.",
                    secret
                );
                secret
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

        let default_interval = "3600";
        let interval = std::env::var("REMINDER_CHECK_INTERVAL_SECS")
            .unwrap_or_else(|_| default_interval.into());
        let reminder_check_interval_secs = match interval.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                warn!(
                    "The given REMINDER_CHECK_INTERVAL_SECS: {} is not valid, falling back to the default: {}.",
                    interval, default_interval
                );
                default_interval.parse::<u64>().unwrap()
            }
        };

        let smtp = Self::smtp_from_env();
        let smtp_from_address = std::env::var("SMTP_FROM_ADDRESS").unwrap_or_else(|_| {
            smtp.as_ref()
                .map(|smtp| smtp.username.clone())
                .unwrap_or_else(|| "no-reply@roamio.example".into())
        });

        Self {
            api_secret,
            port,
            reminder_check_interval_secs,
            smtp,
            smtp_from_address,
        }
    }

    fn smtp_from_env() -> Option<SmtpConfig> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let port = std::env::var("SMTP_PORT").ok()?;
        let username = std::env::var("SMTP_USERNAME").ok()?;
        let password = std::env::var("SMTP_PASSWORD").ok()?;

        let port = match port.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                warn!("The given SMTP_PORT: {} is not valid, smtp will not be configured.", port);
                return None;
            }
        };

        Some(SmtpConfig {
            host,
            port,
            username,
            password,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
