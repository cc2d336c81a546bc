use uuid::Uuid;

use crate::error::AppError;
use crate::form::{self, FieldErrors, FieldUpdate, SubmitOutcome};
use crate::state::SharedState;

/// What happened to a submit, after side effects ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult {
    Emitted,
    ConfirmationPending { email: String },
    Invalid(FieldErrors),
    DialogOpen,
}

impl PipelineResult {
    pub fn outcome(&self) -> &'static str {
        match self {
            PipelineResult::Emitted => "emitted",
            PipelineResult::ConfirmationPending { .. } => "confirmation_pending",
            PipelineResult::Invalid(_) => "invalid",
            PipelineResult::DialogOpen => "dialog_open",
        }
    }
}

/// Apply `updates`, submit the form and dispatch the resulting side effect.
///
/// The form entry is released before the sink or notifier is awaited.
pub async fn run(
    state: &SharedState,
    form_id: Uuid,
    updates: Vec<FieldUpdate>,
) -> Result<PipelineResult, AppError> {
    let today = form::today();

    let (outcome, user_id) = state
        .forms
        .with(form_id, |form| {
            form.apply(updates, today);
            (form.submit(today), form.user_id().clone())
        })
        .ok_or_else(AppError::form_not_found)?;

    match outcome {
        SubmitOutcome::Emit(user) => {
            state
                .sink
                .on_valid_submit(user.draft())
                .await
                .map_err(|e| {
                    AppError::Internal(format!("User sink '{}' failed: {e}", state.sink.name()))
                })?;
            tracing::info!("Form {form_id} submitted user {user_id}");
            Ok(PipelineResult::Emitted)
        }
        SubmitOutcome::ConfirmationPending { email, user } => {
            // The dialog is already shown; a failed delivery is only logged.
            if let Err(e) = state.notifier.notify(&user_id, user.draft()).await {
                tracing::error!(
                    "Password notifier '{}' failed for form {form_id}: {e}",
                    state.notifier.name()
                );
            }
            tracing::info!("Form {form_id} awaiting password confirmation for {email}");
            Ok(PipelineResult::ConfirmationPending { email })
        }
        SubmitOutcome::Invalid(errors) => {
            tracing::debug!(
                "Form {form_id} failed validation: {:?}",
                errors.fields().collect::<Vec<_>>()
            );
            Ok(PipelineResult::Invalid(errors))
        }
        SubmitOutcome::DialogOpen => {
            tracing::debug!("Form {form_id} submitted while dialog open");
            Ok(PipelineResult::DialogOpen)
        }
    }
}
