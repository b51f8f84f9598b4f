use super::IReminderRepo;
use crate::repos::shared::mongo_repo;
use mongo_repo::MongoDocument;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database,
};
use roamio_reminders_domain::{Reminder, ReminderType, ID};
use serde::{Deserialize, Serialize};
use tracing::error;

pub struct MongoReminderRepo {
    collection: Collection<Document>,
}

impl MongoReminderRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("event-reminders"),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for MongoReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        mongo_repo::insert::<_, ReminderMongo>(&self.collection, reminder).await
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        mongo_repo::find::<_, ReminderMongo>(&self.collection, reminder_id.inner_ref()).await
    }

    async fn find_unsent(&self, event_id: &str, contact_email: &str) -> Option<Reminder> {
        let filter = doc! {
            "event_id": event_id,
            "contact_email": contact_email,
            "sent": false,
        };

        mongo_repo::find_one_by::<_, ReminderMongo>(&self.collection, filter).await
    }

    async fn find_due_candidates(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        let filter = doc! {
            "sent": false,
            "event_date": {
                "$gt": now
            }
        };

        mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter).await
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        let filter = doc! {
            "user_id": user_id.inner_ref()
        };

        match mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter).await {
            Ok(reminders) => reminders,
            Err(err) => {
                error!("Error: {:?}", err);
                vec![]
            }
        }
    }

    async fn find_by_event(&self, event_id: &str, contact_email: Option<&str>) -> Vec<Reminder> {
        let mut filter = doc! {
            "event_id": event_id
        };
        if let Some(email) = contact_email {
            filter.insert("contact_email", email);
        }

        match mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter).await {
            Ok(reminders) => reminders,
            Err(err) => {
                error!("Error: {:?}", err);
                vec![]
            }
        }
    }

    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<()> {
        // Matching on sent == false makes this a no-op for reminders that
        // are already sent or deleted
        let filter = doc! {
            "_id": reminder_id.inner_ref(),
            "sent": false,
        };
        let update = doc! {
            "$set": {
                "sent": true
            }
        };
        self.collection
            .update_one(filter, update, None)
            .await
            .map(|_| ())
            .map_err(anyhow::Error::new)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        mongo_repo::delete::<_, ReminderMongo>(&self.collection, reminder_id.inner_ref()).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReminderMongo {
    _id: ObjectId,
    event_id: String,
    event_name: String,
    event_date: i64,
    contact_email: String,
    contact_phone: Option<String>,
    user_id: Option<ObjectId>,
    reminder_type: ReminderType,
    advance_days: i64,
    sent: bool,
    created: i64,
}

impl MongoDocument<Reminder> for ReminderMongo {
    fn to_domain(self) -> Reminder {
        Reminder {
            id: ID::from(self._id),
            event_id: self.event_id,
            event_name: self.event_name,
            event_date: self.event_date,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            user_id: self.user_id.map(ID::from),
            reminder_type: self.reminder_type,
            advance_days: self.advance_days,
            sent: self.sent,
            created: self.created,
        }
    }

    fn from_domain(reminder: &Reminder) -> Self {
        Self {
            _id: *reminder.id.inner_ref(),
            event_id: reminder.event_id.clone(),
            event_name: reminder.event_name.clone(),
            event_date: reminder.event_date,
            contact_email: reminder.contact_email.clone(),
            contact_phone: reminder.contact_phone.clone(),
            user_id: reminder.user_id.as_ref().map(|id| *id.inner_ref()),
            reminder_type: reminder.reminder_type,
            advance_days: reminder.advance_days,
            sent: reminder.sent,
            created: reminder.created,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": self._id
        }
    }
}
