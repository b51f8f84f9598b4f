use chrono::{TimeZone, Utc};
use roamio_reminders_domain::Reminder;
use roamio_reminders_infra::{IMailer, ReminderEmail};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Fans a due `Reminder` out to its channels.
///
/// Constructed once at process start with the transport chosen for the
/// process lifetime, and handed to the scheduler. An email failure
/// propagates so the caller skips `mark_sent` and the reminder is
/// retried on a later pass. The sms channel is an explicit stub that
/// only logs and never fails the dispatch.
pub struct ReminderDispatcher {
    mailer: Arc<dyn IMailer>,
}

impl fmt::Debug for ReminderDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ReminderDispatcher")
    }
}

impl ReminderDispatcher {
    pub fn new(mailer: Arc<dyn IMailer>) -> Self {
        Self { mailer }
    }

    pub async fn dispatch(&self, reminder: &Reminder) -> anyhow::Result<()> {
        if reminder.reminder_type.includes_email() {
            self.mailer.send(build_reminder_email(reminder)).await?;
            info!(
                reminder_id = %reminder.id,
                event_id = %reminder.event_id,
                "Reminder email sent to: {}",
                reminder.contact_email
            );
        }

        if reminder.reminder_type.includes_sms() {
            match &reminder.contact_phone {
                // Sms delivery is not wired to a provider, the stub only logs
                Some(phone) => info!(
                    reminder_id = %reminder.id,
                    "Sms reminder for event: {} would be sent to: {}",
                    reminder.event_name,
                    phone
                ),
                None => warn!(
                    reminder_id = %reminder.id,
                    "Sms reminder requested but no contact phone was provided"
                ),
            }
        }

        Ok(())
    }
}

pub fn build_reminder_email(reminder: &Reminder) -> ReminderEmail {
    let event_date = format_event_date(reminder.event_date);

    let subject = format!("Reminder: {} on {}", reminder.event_name, event_date);
    // Venue details are not threaded into reminders yet, so the body
    // points at the event page instead
    let body = format!(
        "Hi,\n\n\
        This is your reminder for {} taking place on {}.\n\n\
        Where: see the event page on the Roamio site for location details.\n\
        What: one of the featured events in our destination calendar.\n\n\
        Enjoy the event!\n\
        The Roamio team",
        reminder.event_name, event_date
    );

    ReminderEmail {
        to: reminder.contact_email.clone(),
        subject,
        body,
    }
}

fn format_event_date(timestamp_millis: i64) -> String {
    match Utc.timestamp_millis_opt(timestamp_millis).single() {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => "an upcoming date".into(),
    }
}
