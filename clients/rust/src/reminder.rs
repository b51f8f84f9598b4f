use crate::base::{APIResponse, BaseClient};
use reqwest::StatusCode;
use roamio_reminders_api_structs::*;
use roamio_reminders_domain::{ReminderType, ID};
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderInput {
    pub event_id: String,
    pub event_name: String,
    pub event_date: i64,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub reminder_type: Option<ReminderType>,
    pub advance_days: Option<i64>,
}

pub struct GetEventRemindersInput {
    pub event_id: String,
    pub email: Option<String>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            event_id: input.event_id,
            event_name: input.event_name,
            event_date: input.event_date,
            contact_email: input.contact_email,
            contact_phone: input.contact_phone,
            reminder_type: input.reminder_type,
            advance_days: input.advance_days,
        };
        self.base
            .post(body, "/events/reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get_for_user(&self) -> APIResponse<get_user_reminders::APIResponse> {
        self.base
            .get("/events/reminders".into(), StatusCode::OK)
            .await
    }

    pub async fn get_for_event(
        &self,
        input: GetEventRemindersInput,
    ) -> APIResponse<get_event_reminders::APIResponse> {
        let path = match input.email {
            Some(email) => format!("/events/{}/reminders?email={}", input.event_id, email),
            None => format!("/events/{}/reminders", input.event_id),
        };
        self.base.get(path, StatusCode::OK).await
    }

    pub async fn delete(&self, reminder_id: ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("/events/reminders/{}", reminder_id), StatusCode::OK)
            .await
    }
}
