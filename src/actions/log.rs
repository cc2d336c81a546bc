use async_trait::async_trait;

use super::{ActionError, PasswordNotifier, UserSink};
use crate::models::{UserDraft, UserId};

/// Writes submissions to the log. Stands in for a persistence backend.
pub struct LogSink;

#[async_trait]
impl UserSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    async fn on_valid_submit(&self, draft: &UserDraft) -> Result<(), ActionError> {
        let json = serde_json::to_string(draft)
            .map_err(|e| ActionError::from(format!("Failed to serialize draft: {e}")))?;
        tracing::info!("User submitted: {json}");
        Ok(())
    }
}

/// Logs password notifications when no mailer is configured.
pub struct LogNotifier;

#[async_trait]
impl PasswordNotifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&self, user_id: &UserId, draft: &UserDraft) -> Result<(), ActionError> {
        tracing::info!(
            "Password link for user {user_id} would be sent to {}",
            draft.email
        );
        Ok(())
    }
}
