mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, SmtpConfig};
pub use repos::{IReminderRepo, Repos};
pub use services::{IMailer, ReminderEmail, SmtpMailer, StubMailer};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::{info, warn};

#[derive(Clone)]
pub struct RoamioContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
}

/// Will setup the infrastructure context given the environment.
///
/// Both the store and the mail transport degrade gracefully: without a
/// `MONGODB_URI` the reminders live in memory, and without smtp
/// credentials emails go to a log-only stub. Tests rely on both
/// fallbacks to run without external services.
pub async fn setup_context() -> RoamioContext {
    let config = Config::new();

    let repos = match std::env::var("MONGODB_URI") {
        Ok(uri) => {
            let db_name =
                std::env::var("MONGODB_DB").unwrap_or_else(|_| "roamio-reminders".into());
            Repos::create_mongodb(&uri, &db_name)
                .await
                .expect("Mongodb credentials must be valid")
        }
        Err(_) => {
            warn!("Did not find MONGODB_URI environment variable. Using an in memory store, all reminders are lost on restart.");
            Repos::create_inmemory()
        }
    };

    let mailer = create_mailer(&config);

    RoamioContext {
        repos,
        config,
        sys: Arc::new(RealSys {}),
        mailer,
    }
}

/// The transport choice is made once here and reused for the process
/// lifetime
pub fn create_mailer(config: &Config) -> Arc<dyn IMailer> {
    match &config.smtp {
        Some(smtp) => match SmtpMailer::new(smtp, &config.smtp_from_address) {
            Ok(mailer) => {
                info!("Smtp transport configured for host: {}", smtp.host);
                Arc::new(mailer)
            }
            Err(err) => {
                warn!(
                    "Unable to create smtp transport: {:?}. Falling back to the log-only stub.",
                    err
                );
                Arc::new(StubMailer)
            }
        },
        None => {
            warn!("Smtp is not fully configured. Emails will be logged by the stub transport instead of sent.");
            Arc::new(StubMailer)
        }
    }
}
