use crate::error::ApiError;
use crate::shared::{
    auth::{protect_route, AuthUser},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use roamio_reminders_api_structs::delete_reminder::*;
use roamio_reminders_domain::{Reminder, ID};
use roamio_reminders_infra::RoamioContext;

pub async fn delete_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<RoamioContext>,
) -> Result<HttpResponse, ApiError> {
    let user = protect_route(&http_req, &ctx)?;

    let usecase = DeleteReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        user,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub reminder_id: ID,
    pub user: AuthUser,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotPermitted,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::NotPermitted => {
                Self::Forbidden("Only the owner or an admin can delete a reminder".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &RoamioContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) => reminder,
            None => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        let is_owner = reminder.user_id.as_ref() == Some(&self.user.id);
        if !is_owner && !self.user.admin {
            return Err(UseCaseError::NotPermitted);
        }

        ctx.repos
            .reminders
            .delete(&self.reminder_id)
            .await
            .ok_or(UseCaseError::NotFound(self.reminder_id.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use roamio_reminders_domain::DAY_IN_MILLIS;
    use roamio_reminders_infra::setup_context;

    async fn insert_reminder(ctx: &RoamioContext, user_id: Option<ID>) -> Reminder {
        let now = ctx.sys.get_timestamp_millis();
        let reminder = Reminder {
            id: Default::default(),
            event_id: "midnight-sun-hike".into(),
            event_name: "Midnight Sun Hike".into(),
            event_date: now + DAY_IN_MILLIS,
            contact_email: "visitor@example.com".into(),
            contact_phone: None,
            user_id,
            reminder_type: Default::default(),
            advance_days: 1,
            sent: false,
            created: now,
        };
        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .expect("Insert to work");
        reminder
    }

    #[actix_web::main]
    #[test]
    async fn owner_can_delete_own_reminder() {
        let ctx = setup_context().await;
        let owner = ID::new();
        let reminder = insert_reminder(&ctx, Some(owner.clone())).await;

        let mut usecase = DeleteReminderUseCase {
            reminder_id: reminder.id.clone(),
            user: AuthUser {
                id: owner,
                admin: false,
            },
        };

        assert!(usecase.execute(&ctx).await.is_ok());
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_none());
    }

    #[actix_web::main]
    #[test]
    async fn non_owner_cannot_delete_reminder() {
        let ctx = setup_context().await;
        let reminder = insert_reminder(&ctx, Some(ID::new())).await;

        let mut usecase = DeleteReminderUseCase {
            reminder_id: reminder.id.clone(),
            user: AuthUser {
                id: ID::new(),
                admin: false,
            },
        };

        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotPermitted
        );
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn admin_can_delete_any_reminder() {
        let ctx = setup_context().await;
        let reminder = insert_reminder(&ctx, Some(ID::new())).await;

        let mut usecase = DeleteReminderUseCase {
            reminder_id: reminder.id.clone(),
            user: AuthUser {
                id: ID::new(),
                admin: true,
            },
        };

        assert!(usecase.execute(&ctx).await.is_ok());
    }

    #[actix_web::main]
    #[test]
    async fn delete_of_unknown_reminder_is_not_found() {
        let ctx = setup_context().await;
        let unknown = ID::new();

        let mut usecase = DeleteReminderUseCase {
            reminder_id: unknown.clone(),
            user: AuthUser {
                id: ID::new(),
                admin: true,
            },
        };

        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(unknown)
        );
    }
}
