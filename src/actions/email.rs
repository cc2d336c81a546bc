use std::sync::Arc;

use async_trait::async_trait;

use super::{ActionError, PasswordNotifier};
use crate::email::SystemMailer;
use crate::models::{UserDraft, UserId};

/// Sends the password link through the system SMTP account.
pub struct MailNotifier {
    mailer: Arc<SystemMailer>,
    reset_url: String,
}

impl MailNotifier {
    pub fn new(mailer: Arc<SystemMailer>, reset_url: String) -> Self {
        Self { mailer, reset_url }
    }
}

#[async_trait]
impl PasswordNotifier for MailNotifier {
    fn name(&self) -> &str {
        "email"
    }

    async fn notify(&self, user_id: &UserId, draft: &UserDraft) -> Result<(), ActionError> {
        self.mailer
            .send_password_link(&draft.email, &draft.username, user_id.as_str(), &self.reset_url)
            .await
            .map_err(ActionError::from)?;
        tracing::info!("Password link for user {user_id} sent to {}", draft.email);
        Ok(())
    }
}
