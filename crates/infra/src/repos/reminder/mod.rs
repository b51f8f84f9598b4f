mod inmemory;
mod mongo;

pub use inmemory::InMemoryReminderRepo;
pub use mongo::MongoReminderRepo;
use roamio_reminders_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// The unsent reminder for the given event and email, if one is
    /// outstanding. Used to enforce the one-unsent-reminder-per-pair rule
    /// at creation time.
    async fn find_unsent(&self, event_id: &str, contact_email: &str) -> Option<Reminder>;
    /// All unsent reminders whose event has not yet started. This only
    /// prunes the obviously irrelevant records, narrowing to exactly-due
    /// is up to the caller.
    async fn find_due_candidates(&self, now: i64) -> anyhow::Result<Vec<Reminder>>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder>;
    async fn find_by_event(&self, event_id: &str, contact_email: Option<&str>) -> Vec<Reminder>;
    /// Idempotent flip of the sent flag. A reminder that is already sent
    /// or deleted is a silent no-op, not an error.
    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<()>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
}
