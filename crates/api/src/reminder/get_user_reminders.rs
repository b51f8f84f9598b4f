use crate::error::ApiError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use roamio_reminders_api_structs::get_user_reminders::*;
use roamio_reminders_domain::{Reminder, ID};
use roamio_reminders_infra::RoamioContext;

pub async fn get_user_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<RoamioContext>,
) -> Result<HttpResponse, ApiError> {
    let user = protect_route(&http_req, &ctx)?;

    let usecase = GetUserRemindersUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct GetUserRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserReminders";

    async fn execute(&mut self, ctx: &RoamioContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.reminders.find_by_user(&self.user_id).await)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use roamio_reminders_domain::DAY_IN_MILLIS;
    use roamio_reminders_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn returns_only_the_callers_reminders() {
        let ctx = setup_context().await;
        let owner = ID::new();
        let other = ID::new();
        let now = ctx.sys.get_timestamp_millis();

        for (i, user_id) in [Some(&owner), Some(&other), None].iter().enumerate() {
            let reminder = Reminder {
                id: Default::default(),
                event_id: format!("event-{}", i),
                event_name: format!("Event {}", i),
                event_date: now + DAY_IN_MILLIS,
                contact_email: "visitor@example.com".into(),
                contact_phone: None,
                user_id: user_id.cloned(),
                reminder_type: Default::default(),
                advance_days: 0,
                sent: false,
                created: now,
            };
            ctx.repos
                .reminders
                .insert(&reminder)
                .await
                .expect("Insert to work");
        }

        let mut usecase = GetUserRemindersUseCase {
            user_id: owner.clone(),
        };
        let reminders = usecase.execute(&ctx).await.unwrap();

        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].user_id, Some(owner));
    }
}
