use super::dispatcher::ReminderDispatcher;
use crate::error::ApiError;
use crate::shared::usecase::UseCase;
use roamio_reminders_domain::is_due;
use roamio_reminders_infra::RoamioContext;
use std::sync::Arc;
use tracing::{error, info};

/// One pass of the due-scan-and-dispatch cycle. Driven by the scheduler
/// job, never by an http request.
#[derive(Debug)]
pub struct ProcessDueRemindersUseCase {
    pub dispatcher: Arc<ReminderDispatcher>,
}

#[derive(Debug)]
pub struct ProcessedReminders {
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessDueRemindersUseCase {
    type Response = ProcessedReminders;

    type Error = UseCaseError;

    const NAME: &'static str = "ProcessDueReminders";

    async fn execute(&mut self, ctx: &RoamioContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();

        let mut due = ctx
            .repos
            .reminders
            .find_due_candidates(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .filter(|reminder| is_due(reminder, now))
            .collect::<Vec<_>>();

        // Ascending event date keeps the processing order deterministic,
        // the reminders are otherwise independent
        due.sort_by_key(|reminder| reminder.event_date);

        let mut sent = 0;
        let mut failed = 0;
        for reminder in due {
            // One reminder failing must not block the others
            match self.dispatcher.dispatch(&reminder).await {
                Ok(()) => {
                    // A crash between the send above and this write would
                    // duplicate the email on the next pass, an accepted
                    // at-least-once window
                    match ctx.repos.reminders.mark_sent(&reminder.id).await {
                        Ok(()) => sent += 1,
                        Err(e) => {
                            error!(
                                reminder_id = %reminder.id,
                                "Unable to mark reminder as sent: {:?}. It may be delivered again on a later pass.",
                                e
                            );
                            failed += 1;
                        }
                    }
                }
                Err(e) => {
                    error!(
                        reminder_id = %reminder.id,
                        "Unable to deliver reminder: {:?}. It stays unsent and will be retried.",
                        e
                    );
                    failed += 1;
                }
            }
        }

        if sent > 0 || failed > 0 {
            info!(sent, failed, "Finished reminder pass");
        }

        Ok(ProcessedReminders { sent, failed })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use anyhow::anyhow;
    use roamio_reminders_domain::Reminder;
    use roamio_reminders_infra::{
        Config, IMailer, ISys, ReminderEmail, Repos, RoamioContext, StubMailer,
    };
    use std::sync::Mutex;

    struct StaticSys(i64);
    impl ISys for StaticSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    /// Records every send and fails for one configured recipient
    struct RecordingMailer {
        fail_for: Option<String>,
        sent_to: Mutex<Vec<String>>,
    }

    impl RecordingMailer {
        fn new(fail_for: Option<&str>) -> Self {
            Self {
                fail_for: fail_for.map(|s| s.to_string()),
                sent_to: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl IMailer for RecordingMailer {
        async fn send(&self, email: ReminderEmail) -> anyhow::Result<()> {
            if self.fail_for.as_deref() == Some(email.to.as_str()) {
                return Err(anyhow!("Transport rejected recipient: {}", email.to));
            }
            self.sent_to.lock().unwrap().push(email.to);
            Ok(())
        }
    }

    fn test_context(now: i64, mailer: Arc<dyn IMailer>) -> RoamioContext {
        RoamioContext {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(StaticSys(now)),
            mailer,
        }
    }

    fn reminder(event_date: i64, advance_days: i64, email: &str) -> Reminder {
        Reminder {
            id: Default::default(),
            event_id: format!("event-for-{}", email),
            event_name: "Harbor Festival".into(),
            event_date,
            contact_email: email.into(),
            contact_phone: None,
            user_id: None,
            reminder_type: Default::default(),
            advance_days,
            sent: false,
            created: 0,
        }
    }

    const DAY: i64 = roamio_reminders_domain::DAY_IN_MILLIS;
    const NOW: i64 = 1_600_000_000_000;

    #[actix_web::main]
    #[test]
    async fn sends_due_reminders_and_marks_them_sent() {
        let mailer = Arc::new(RecordingMailer::new(None));
        let ctx = test_context(NOW, mailer.clone());

        // Due: window is already open
        let due = reminder(NOW + DAY, 2, "due@example.com");
        // Not due yet: window opens in a couple of days
        let not_due = reminder(NOW + 5 * DAY, 2, "later@example.com");
        ctx.repos.reminders.insert(&due).await.unwrap();
        ctx.repos.reminders.insert(&not_due).await.unwrap();

        let usecase = ProcessDueRemindersUseCase {
            dispatcher: Arc::new(ReminderDispatcher::new(ctx.mailer.clone())),
        };
        let res = execute(usecase, &ctx).await.unwrap();

        assert_eq!(res.sent, 1);
        assert_eq!(res.failed, 0);
        assert_eq!(
            *mailer.sent_to.lock().unwrap(),
            vec!["due@example.com".to_string()]
        );
        assert!(ctx.repos.reminders.find(&due.id).await.unwrap().sent);
        assert!(!ctx.repos.reminders.find(&not_due.id).await.unwrap().sent);
    }

    #[actix_web::main]
    #[test]
    async fn past_events_are_never_candidates() {
        let mailer = Arc::new(RecordingMailer::new(None));
        let ctx = test_context(NOW, mailer.clone());

        let past = reminder(NOW - DAY, 2, "missed@example.com");
        ctx.repos.reminders.insert(&past).await.unwrap();

        let candidates = ctx.repos.reminders.find_due_candidates(NOW).await.unwrap();
        assert!(candidates.is_empty());

        let usecase = ProcessDueRemindersUseCase {
            dispatcher: Arc::new(ReminderDispatcher::new(ctx.mailer.clone())),
        };
        let res = execute(usecase, &ctx).await.unwrap();

        assert_eq!(res.sent, 0);
        assert!(mailer.sent_to.lock().unwrap().is_empty());
        // Skipped silently, not marked sent
        assert!(!ctx.repos.reminders.find(&past.id).await.unwrap().sent);
    }

    #[actix_web::main]
    #[test]
    async fn one_failing_reminder_does_not_block_the_others() {
        let mailer = Arc::new(RecordingMailer::new(Some("broken@example.com")));
        let ctx = test_context(NOW, mailer.clone());

        let first = reminder(NOW + DAY, 2, "first@example.com");
        let second = reminder(NOW + 2 * DAY, 3, "broken@example.com");
        let third = reminder(NOW + 3 * DAY, 4, "third@example.com");
        for r in [&first, &second, &third].iter() {
            ctx.repos.reminders.insert(r).await.unwrap();
        }

        let usecase = ProcessDueRemindersUseCase {
            dispatcher: Arc::new(ReminderDispatcher::new(ctx.mailer.clone())),
        };
        let res = execute(usecase, &ctx).await.unwrap();

        assert_eq!(res.sent, 2);
        assert_eq!(res.failed, 1);
        // Ascending event date order
        assert_eq!(
            *mailer.sent_to.lock().unwrap(),
            vec!["first@example.com".to_string(), "third@example.com".to_string()]
        );
        assert!(ctx.repos.reminders.find(&first.id).await.unwrap().sent);
        assert!(!ctx.repos.reminders.find(&second.id).await.unwrap().sent);
        assert!(ctx.repos.reminders.find(&third.id).await.unwrap().sent);
    }

    #[actix_web::main]
    #[test]
    async fn failed_reminder_is_retried_on_the_next_pass() {
        let flaky = Arc::new(RecordingMailer::new(Some("flaky@example.com")));
        let ctx = test_context(NOW, flaky.clone());

        let r = reminder(NOW + DAY, 2, "flaky@example.com");
        ctx.repos.reminders.insert(&r).await.unwrap();

        let usecase = ProcessDueRemindersUseCase {
            dispatcher: Arc::new(ReminderDispatcher::new(ctx.mailer.clone())),
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.failed, 1);

        // The transport recovers before the next pass
        let recovered = Arc::new(RecordingMailer::new(None));
        let usecase = ProcessDueRemindersUseCase {
            dispatcher: Arc::new(ReminderDispatcher::new(recovered.clone())),
        };
        let res = execute(usecase, &ctx).await.unwrap();

        assert_eq!(res.sent, 1);
        assert!(ctx.repos.reminders.find(&r.id).await.unwrap().sent);
    }

    #[actix_web::main]
    #[test]
    async fn mark_sent_is_idempotent() {
        let ctx = test_context(NOW, Arc::new(StubMailer));

        let r = reminder(NOW + DAY, 2, "visitor@example.com");
        ctx.repos.reminders.insert(&r).await.unwrap();

        ctx.repos.reminders.mark_sent(&r.id).await.unwrap();
        ctx.repos.reminders.mark_sent(&r.id).await.unwrap();
        assert!(ctx.repos.reminders.find(&r.id).await.unwrap().sent);

        // And a no-op for reminders that never existed
        ctx.repos
            .reminders
            .mark_sent(&Default::default())
            .await
            .unwrap();
    }

    #[actix_web::main]
    #[test]
    async fn stub_transport_still_completes_the_pass() {
        // No smtp configured anywhere, the stub must still let the pass
        // mark reminders as sent
        let ctx = test_context(NOW, Arc::new(StubMailer));

        let r = reminder(NOW + DAY, 2, "visitor@example.com");
        ctx.repos.reminders.insert(&r).await.unwrap();

        let usecase = ProcessDueRemindersUseCase {
            dispatcher: Arc::new(ReminderDispatcher::new(ctx.mailer.clone())),
        };
        let res = execute(usecase, &ctx).await.unwrap();

        assert_eq!(res.sent, 1);
        assert!(ctx.repos.reminders.find(&r.id).await.unwrap().sent);
    }
}
