use crate::error::ApiError;
use crate::shared::{
    auth::optional_user,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use roamio_reminders_api_structs::create_reminder::*;
use roamio_reminders_domain::{is_valid_email, Reminder, ReminderType, ID, MAX_ADVANCE_DAYS};
use roamio_reminders_infra::RoamioContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<RoamioContext>,
) -> Result<HttpResponse, ApiError> {
    let user = optional_user(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        event_id: body.event_id,
        event_name: body.event_name,
        event_date: body.event_date,
        contact_email: body.contact_email,
        contact_phone: body.contact_phone,
        reminder_type: body.reminder_type.unwrap_or_default(),
        advance_days: body.advance_days.unwrap_or(1),
        user_id: user.map(|user| user.id),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub event_id: String,
    pub event_name: String,
    pub event_date: i64,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub reminder_type: ReminderType,
    pub advance_days: i64,
    pub user_id: Option<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingField(&'static str),
    InvalidEmail(String),
    EventDateNotInFuture(i64),
    InvalidAdvanceDays(i64),
    DuplicateReminder(String, String),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingField(field) => {
                Self::BadClientData(format!("Required field: {} is missing or empty", field))
            }
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("The contact email: {} is not a valid email", email))
            }
            UseCaseError::EventDateNotInFuture(event_date) => Self::BadClientData(format!(
                "The event date: {} is not in the future, the reminder would never fire",
                event_date
            )),
            UseCaseError::InvalidAdvanceDays(days) => Self::BadClientData(format!(
                "Advance days: {} is outside the allowed range 0-{}",
                days, MAX_ADVANCE_DAYS
            )),
            UseCaseError::DuplicateReminder(event_id, email) => Self::DuplicateReminder(format!(
                "An unsent reminder for the event: {} and email: {} already exists",
                event_id, email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &RoamioContext) -> Result<Self::Response, Self::Error> {
        if self.event_id.trim().is_empty() {
            return Err(UseCaseError::MissingField("eventId"));
        }
        if self.event_name.trim().is_empty() {
            return Err(UseCaseError::MissingField("eventName"));
        }
        if self.contact_email.trim().is_empty() {
            return Err(UseCaseError::MissingField("contactEmail"));
        }
        if !is_valid_email(&self.contact_email) {
            return Err(UseCaseError::InvalidEmail(self.contact_email.clone()));
        }
        let now = ctx.sys.get_timestamp_millis();
        if self.event_date <= now {
            return Err(UseCaseError::EventDateNotInFuture(self.event_date));
        }
        if self.advance_days < 0 || self.advance_days > MAX_ADVANCE_DAYS {
            return Err(UseCaseError::InvalidAdvanceDays(self.advance_days));
        }

        if ctx
            .repos
            .reminders
            .find_unsent(&self.event_id, &self.contact_email)
            .await
            .is_some()
        {
            return Err(UseCaseError::DuplicateReminder(
                self.event_id.clone(),
                self.contact_email.clone(),
            ));
        }

        let reminder = Reminder {
            id: Default::default(),
            event_id: self.event_id.clone(),
            event_name: self.event_name.clone(),
            event_date: self.event_date,
            contact_email: self.contact_email.clone(),
            contact_phone: self.contact_phone.clone(),
            user_id: self.user_id.clone(),
            reminder_type: self.reminder_type,
            advance_days: self.advance_days,
            sent: false,
            created: now,
        };

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
