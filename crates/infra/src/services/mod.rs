mod mail;

pub use mail::{IMailer, ReminderEmail, SmtpMailer, StubMailer};
