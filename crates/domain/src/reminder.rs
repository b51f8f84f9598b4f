use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

pub const DAY_IN_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// Upper bound for how many days before an event a reminder can fire
pub const MAX_ADVANCE_DAYS: i64 = 14;

/// The channel(s) a `Reminder` should be delivered over.
/// The sms channel is a stub that is only logged, never delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Email,
    Sms,
    Both,
}

impl Default for ReminderType {
    fn default() -> Self {
        Self::Email
    }
}

impl ReminderType {
    pub fn includes_email(&self) -> bool {
        matches!(self, Self::Email | Self::Both)
    }

    pub fn includes_sms(&self) -> bool {
        matches!(self, Self::Sms | Self::Both)
    }
}

/// A `Reminder` is a visitor's request to be notified some number of
/// days before an event on the platform takes place.
///
/// `event_id` is an opaque reference into the platform's event catalog,
/// not a foreign key. After creation the only mutable field is `sent`,
/// which is flipped exactly once when the reminder has been delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub event_id: String,
    pub event_name: String,
    /// The timestamp in millis at which the event takes place
    pub event_date: i64,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    /// Owner of this reminder, present only when the creating request
    /// was authenticated
    pub user_id: Option<ID>,
    pub reminder_type: ReminderType,
    /// How many days before `event_date` the reminder becomes due.
    /// Zero means on the day of the event itself.
    pub advance_days: i64,
    /// Whether this reminder has been delivered
    pub sent: bool,
    /// The timestamp in millis at which this reminder was created
    pub created: i64,
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// The timestamp in millis at which the given `Reminder` becomes due.
///
/// The window is day granular: it opens at midnight utc `advance_days`
/// days before the day of the event, so a zero-day reminder is due from
/// midnight on the event day until the event starts.
pub fn reminder_date(reminder: &Reminder) -> i64 {
    let event_day = reminder.event_date - reminder.event_date.rem_euclid(DAY_IN_MILLIS);
    event_day - reminder.advance_days * DAY_IN_MILLIS
}

/// Whether the `Reminder` should be delivered at the given timestamp.
/// The window opens at `reminder_date` and closes when the event starts,
/// so a reminder for an event that already happened is never due.
pub fn is_due(reminder: &Reminder, now: i64) -> bool {
    !reminder.sent && now >= reminder_date(reminder) && now < reminder.event_date
}

/// Shallow shape check of an email address, enough to catch the
/// obviously broken input before it ever reaches the smtp transport
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}
