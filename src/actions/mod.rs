//! Side effects of a successful submit. Both are injected into the app state.

pub mod email;
pub mod log;

use async_trait::async_trait;

use crate::models::{UserDraft, UserId};

#[derive(Debug)]
pub struct ActionError {
    pub message: String,
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for ActionError {
    fn from(s: String) -> Self {
        ActionError { message: s }
    }
}

impl From<&str> for ActionError {
    fn from(s: &str) -> Self {
        ActionError {
            message: s.to_string(),
        }
    }
}

/// Receives every validated submission that did not ask for a generated password.
#[async_trait]
pub trait UserSink: Send + Sync {
    fn name(&self) -> &str;
    async fn on_valid_submit(&self, draft: &UserDraft) -> Result<(), ActionError>;
}

/// Delivers the "set your password" link after a confirmed submission.
#[async_trait]
pub trait PasswordNotifier: Send + Sync {
    fn name(&self) -> &str;
    async fn notify(&self, user_id: &UserId, draft: &UserDraft) -> Result<(), ActionError>;
}
