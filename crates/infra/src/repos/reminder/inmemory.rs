use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use roamio_reminders_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_unsent(&self, event_id: &str, contact_email: &str) -> Option<Reminder> {
        find_one_by(&self.reminders, |r: &Reminder| {
            !r.sent && r.event_id == event_id && r.contact_email == contact_email
        })
    }

    async fn find_due_candidates(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r: &Reminder| {
            !r.sent && r.event_date > now
        }))
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        find_by(&self.reminders, |r: &Reminder| {
            r.user_id.as_ref() == Some(user_id)
        })
    }

    async fn find_by_event(&self, event_id: &str, contact_email: Option<&str>) -> Vec<Reminder> {
        find_by(&self.reminders, |r: &Reminder| {
            r.event_id == event_id
                && match contact_email {
                    Some(email) => r.contact_email == email,
                    None => true,
                }
        })
    }

    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<()> {
        update_many(
            &self.reminders,
            |r: &Reminder| r.id == *reminder_id && !r.sent,
            |r| r.sent = true,
        );
        Ok(())
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        delete(reminder_id, &self.reminders)
    }
}
