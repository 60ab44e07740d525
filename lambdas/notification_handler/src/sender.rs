use async_trait::async_trait;
use lambda_runtime::tracing;

#[cfg(test)]
use mockall::automock;

// At most one send attempt per call; a missing recipient is the caller's
// problem to skip before getting here.
#[cfg_attr(test, automock)]
#[async_trait]
pub(crate) trait NotificationSender {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), String>;
}

/// Course stub: logs the send instead of calling SES. Recipients are
/// masked to their first three characters in log output.
#[derive(Debug)]
pub(crate) struct LoggingEmailSender {
    from_email: String,
}

impl LoggingEmailSender {
    pub fn new(from_email: String) -> Self {
        Self { from_email }
    }
}

#[async_trait]
impl NotificationSender for LoggingEmailSender {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), String> {
        let recipient = mask_email(recipient);
        tracing::info!(
            from = %self.from_email,
            to = %recipient,
            subject,
            "Sending notification email"
        );
        tracing::debug!(body, "Notification email body");
        tracing::info!(to = %recipient, "Notification email sent");
        Ok(())
    }
}

fn mask_email(email: &str) -> String {
    format!("{}***", email.chars().take(3).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn when_masking_email_should_keep_first_three_characters() {
        assert_eq!(mask_email("customer@example.com"), "cus***");
    }

    #[test]
    fn when_email_shorter_than_mask_should_not_panic() {
        assert_eq!(mask_email("ab"), "ab***");
    }
}
