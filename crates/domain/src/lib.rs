mod reminder;
mod shared;

pub use reminder::{
    is_due, is_valid_email, reminder_date, Reminder, ReminderType, DAY_IN_MILLIS,
    MAX_ADVANCE_DAYS,
};
pub use shared::entity::{Entity, ID};
