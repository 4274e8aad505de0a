//! Alert dispatch for received webhook events.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{error, warn};

/// Sends a "media ready" alert for a title.
#[async_trait]
pub trait Alerter: Send + Sync {
    async fn alert(&self, title: &str);
}

/// Runs the external alert script through `sh -c`.
pub struct ShellAlerter {
    command: String,
}

impl ShellAlerter {
    /// `command` is the script invocation prefix, e.g.
    /// `bash scripts/send_alert.sh`.
    pub fn new(command: String) -> Self {
        Self { command }
    }
}

/// Message body shown in the alert.
pub fn alert_message(title: &str) -> String {
    format!("{} is ready to watch!", title)
}

/// Full shell line handed to `sh -c`.
///
/// The title is interpolated unescaped: a title containing shell
/// metacharacters reaches the shell as-is, so the webhook source must be
/// trusted.
pub fn shell_line(command: &str, title: &str) -> String {
    format!(r#"{} info "Media Ready" "{}""#, command, alert_message(title))
}

#[async_trait]
impl Alerter for ShellAlerter {
    async fn alert(&self, title: &str) {
        let line = shell_line(&self.command, title);
        match Command::new("sh").arg("-c").arg(&line).status().await {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(%status, "Alert command exited with failure"),
            Err(e) => error!(error = %e, "Failed to spawn alert command"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_message() {
        assert_eq!(alert_message("Show A"), "Show A is ready to watch!");
    }

    #[test]
    fn test_shell_line_interpolates_command_and_title() {
        let line = shell_line("bash scripts/send_alert.sh", "Film B");
        assert_eq!(
            line,
            r#"bash scripts/send_alert.sh info "Media Ready" "Film B is ready to watch!""#
        );
    }

    #[test]
    fn test_shell_line_passes_title_through_unescaped() {
        let line = shell_line("notify", "A \"quoted\" title");
        assert!(line.contains("A \"quoted\" title"));
    }
}
