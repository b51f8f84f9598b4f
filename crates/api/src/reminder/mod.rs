mod create_reminder;
mod delete_reminder;
pub mod dispatcher;
mod get_event_reminders;
mod get_user_reminders;
pub mod process_due_reminders;

use actix_web::web;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use get_event_reminders::get_event_reminders_controller;
use get_user_reminders::get_user_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/events/reminders",
        web::post().to(create_reminder_controller),
    );
    cfg.route(
        "/events/reminders",
        web::get().to(get_user_reminders_controller),
    );
    cfg.route(
        "/events/{event_id}/reminders",
        web::get().to(get_event_reminders_controller),
    );
    cfg.route(
        "/events/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
}
