use crate::error::ApiError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use roamio_reminders_api_structs::get_event_reminders::*;
use roamio_reminders_domain::Reminder;
use roamio_reminders_infra::RoamioContext;

pub async fn get_event_reminders_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<RoamioContext>,
) -> Result<HttpResponse, ApiError> {
    // Anyone may look up the reminders tied to their own email address,
    // the unscoped listing for an event is admin only
    let contact_email = match &query_params.email {
        Some(email) => Some(email.clone()),
        None => {
            let user = protect_route(&http_req, &ctx)?;
            if !user.admin {
                return Err(ApiError::Forbidden(
                    "Only admins can list all reminders for an event".into(),
                ));
            }
            None
        }
    };

    let usecase = GetEventRemindersUseCase {
        event_id: path_params.event_id.clone(),
        contact_email,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct GetEventRemindersUseCase {
    pub event_id: String,
    pub contact_email: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEventReminders";

    async fn execute(&mut self, ctx: &RoamioContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx
            .repos
            .reminders
            .find_by_event(&self.event_id, self.contact_email.as_deref())
            .await)
    }
}
