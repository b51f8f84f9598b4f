mod base;
mod reminder;
mod status;

pub use base::{APIError, APIErrorVariant, APIResponse};
pub(crate) use base::BaseClient;
use reminder::ReminderClient;
pub use reminder::{CreateReminderInput, GetEventRemindersInput};
use status::StatusClient;
use std::sync::Arc;

pub use roamio_reminders_domain::{ReminderType, ID};

/// Roamio Reminders Server SDK
///
/// The SDK contains methods for interacting with the Roamio reminders
/// server API.
#[derive(Clone)]
pub struct RoamioSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl RoamioSDK {
    pub fn new<T: Into<String>>(address: String, api_token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_token(api_token.into());
        let base = Arc::new(base);
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { reminder, status }
    }
}
