//! Console-based notifier for development

use super::Notifier;

/// Notifier that logs instead of sending mail (for development)
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ConsoleNotifier {
    fn status_changed(&self, to: &str, issue_title: &str, status: &str) -> Result<(), String> {
        println!();
        println!("========================================");
        println!("  STATUS UPDATE FOR: {}", to);
        println!("  ISSUE: {}", issue_title);
        println!("  NEW STATUS: {}", status);
        println!("========================================");
        println!();

        tracing::info!(to = %to, issue = %issue_title, status = %status, "Status notification sent");

        Ok(())
    }

    fn post_moderated(&self, to: &str, issue_title: &str, action: &str) -> Result<(), String> {
        println!();
        println!("========================================");
        println!("  MODERATION NOTICE FOR: {}", to);
        println!("  ISSUE: {}", issue_title);
        println!("  ACTION: {}", action);
        println!("========================================");
        println!();

        tracing::info!(to = %to, issue = %issue_title, action = %action, "Moderation notification sent");

        Ok(())
    }
}
