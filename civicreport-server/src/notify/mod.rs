//! Reporter notification abstractions
//!
//! Notifications are best-effort: handlers log and swallow delivery
//! failures so a mail outage never fails the triggering request.

pub mod console;
pub mod smtp;

pub use console::ConsoleNotifier;
pub use smtp::{SmtpConfig, SmtpNotifier};

/// Trait for notifying a reporter about their issue
pub trait Notifier: Send + Sync {
    /// Tell the reporter their issue's status changed
    fn status_changed(&self, to: &str, issue_title: &str, status: &str) -> Result<(), String>;

    /// Tell the reporter a moderator acted on their issue
    fn post_moderated(&self, to: &str, issue_title: &str, action: &str) -> Result<(), String>;
}

/// Allow using Box<dyn Notifier> as a Notifier
impl Notifier for Box<dyn Notifier> {
    fn status_changed(&self, to: &str, issue_title: &str, status: &str) -> Result<(), String> {
        (**self).status_changed(to, issue_title, status)
    }

    fn post_moderated(&self, to: &str, issue_title: &str, action: &str) -> Result<(), String> {
        (**self).post_moderated(to, issue_title, action)
    }
}
