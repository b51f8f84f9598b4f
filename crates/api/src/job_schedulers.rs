use crate::reminder::dispatcher::ReminderDispatcher;
use crate::reminder::process_due_reminders::ProcessDueRemindersUseCase;
use crate::shared::usecase::execute;
use roamio_reminders_infra::RoamioContext;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

/// Handle to the running reminder job. Stopping consumes the handle and
/// cancels the timer, an in-flight pass is allowed to finish.
pub struct ReminderJobHandle {
    shutdown: oneshot::Sender<()>,
}

impl ReminderJobHandle {
    pub fn stop(self) {
        // An error here means the job task is already gone
        let _ = self.shutdown.send(());
    }
}

/// Spawns the background job that scans for due reminders and delivers
/// them. The first pass runs immediately, then one pass per configured
/// interval. Passes run inline on the timer task with delayed tick
/// catch-up, so a pass that outlives the interval postpones the next
/// tick instead of overlapping it.
pub fn start_send_reminders_job(ctx: RoamioContext) -> ReminderJobHandle {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

    actix_web::rt::spawn(async move {
        let dispatcher = Arc::new(ReminderDispatcher::new(ctx.mailer.clone()));

        let mut check_interval =
            interval(Duration::from_secs(ctx.config.reminder_check_interval_secs));
        check_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    info!("Reminder job stopped");
                    break;
                }
                _ = check_interval.tick() => {
                    let usecase = ProcessDueRemindersUseCase {
                        dispatcher: dispatcher.clone(),
                    };
                    // A failing pass is logged by execute and must not
                    // take the loop down with it
                    let _ = execute(usecase, &ctx).await;
                }
            }
        }
    });

    ReminderJobHandle {
        shutdown: shutdown_tx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roamio_reminders_domain::{Reminder, DAY_IN_MILLIS};
    use roamio_reminders_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn first_pass_runs_immediately_and_stop_cancels_the_job() {
        let ctx = setup_context().await;
        let now = ctx.sys.get_timestamp_millis();

        let due = Reminder {
            id: Default::default(),
            event_id: "city-walking-tour".into(),
            event_name: "City Walking Tour".into(),
            event_date: now + DAY_IN_MILLIS,
            contact_email: "visitor@example.com".into(),
            contact_phone: None,
            user_id: None,
            reminder_type: Default::default(),
            advance_days: 2,
            sent: false,
            created: now,
        };
        ctx.repos.reminders.insert(&due).await.unwrap();

        let handle = start_send_reminders_job(ctx.clone());

        // Give the immediate first pass a moment to run
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(ctx.repos.reminders.find(&due.id).await.unwrap().sent);

        handle.stop();
    }
}
