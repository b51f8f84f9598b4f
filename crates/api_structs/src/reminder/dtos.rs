use roamio_reminders_domain::{Reminder, ReminderType, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub event_id: String,
    pub event_name: String,
    pub event_date: i64,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub user_id: Option<ID>,
    pub reminder_type: ReminderType,
    pub advance_days: i64,
    pub sent: bool,
    pub created: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            event_id: reminder.event_id,
            event_name: reminder.event_name,
            event_date: reminder.event_date,
            contact_email: reminder.contact_email,
            contact_phone: reminder.contact_phone,
            user_id: reminder.user_id,
            reminder_type: reminder.reminder_type,
            advance_days: reminder.advance_days,
            sent: reminder.sent,
            created: reminder.created,
        }
    }
}
