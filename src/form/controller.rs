use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Field, UserDraft, UserId};

use super::dialog::{ConfirmationDialog, DismissControl};
use super::reducer::{self, FieldUpdate};
use super::schema::{self, FieldErrors, ValidatedUser};

/// What a submit attempt asks the caller to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Hand the validated draft to the user sink.
    Emit(ValidatedUser),
    /// The dialog is now shown for this address; notify the user.
    ConfirmationPending { email: String, user: ValidatedUser },
    Invalid(FieldErrors),
    /// The confirmation dialog is still open.
    DialogOpen,
}

/// State of one create-user form instance.
#[derive(Debug, Clone)]
pub struct FormController {
    user_id: UserId,
    draft: UserDraft,
    /// `None` until the first validation.
    errors: Option<FieldErrors>,
    dialog: ConfirmationDialog,
}

impl FormController {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_user_id(UserId::generate(), today)
    }

    pub fn with_user_id(user_id: UserId, today: NaiveDate) -> Self {
        Self {
            user_id,
            draft: UserDraft::new(today),
            errors: None,
            dialog: ConfirmationDialog::default(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn draft(&self) -> &UserDraft {
        &self.draft
    }

    pub fn dialog(&self) -> &ConfirmationDialog {
        &self.dialog
    }

    pub fn set_field(&mut self, update: FieldUpdate, today: NaiveDate) {
        self.draft = reducer::reduce(self.draft.clone(), update);

        // Once submitted, errors follow the draft so fixed fields clear.
        if self.errors.is_some() {
            self.refresh_errors(today);
        }
    }

    /// Re-run validation only to update the stored errors.
    fn refresh_errors(&mut self, today: NaiveDate) {
        self.errors = Some(schema::validate(&self.draft, today).err().unwrap_or_default());
    }

    /// Apply a batch of updates in order.
    pub fn apply(&mut self, updates: impl IntoIterator<Item = FieldUpdate>, today: NaiveDate) {
        for update in updates {
            self.set_field(update, today);
        }
    }

    pub fn visible_fields(&self) -> Vec<Field> {
        schema::visible_fields(self.draft.role)
    }

    pub fn is_visible(&self, field: Field) -> bool {
        self.visible_fields().contains(&field)
    }

    /// Validate the whole draft and remember the result for display.
    pub fn validate(&mut self, today: NaiveDate) -> Result<ValidatedUser, FieldErrors> {
        let result = schema::validate(&self.draft, today);
        self.errors = Some(match &result {
            Ok(_) => FieldErrors::default(),
            Err(errors) => errors.clone(),
        });
        result
    }

    pub fn submit(&mut self, today: NaiveDate) -> SubmitOutcome {
        if self.dialog.is_shown() {
            return SubmitOutcome::DialogOpen;
        }

        let user = match self.validate(today) {
            Ok(user) => user,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        if user.draft().generate_password {
            let email = user.draft().email.clone();
            self.dialog.show(email.clone());
            SubmitOutcome::ConfirmationPending { email, user }
        } else {
            SubmitOutcome::Emit(user)
        }
    }

    pub fn dismiss_dialog(&mut self, control: DismissControl) -> bool {
        self.dialog.dismiss(control)
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        self.errors.as_ref()
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.errors.as_ref().and_then(|e| e.get(field))
    }

    pub fn general_error(&self) -> Option<&'static str> {
        self.errors.as_ref().and_then(schema::general_error_message)
    }

    pub fn snapshot(&self, id: Uuid) -> FormSnapshot {
        FormSnapshot {
            id,
            user_id: self.user_id.clone(),
            draft: self.draft.clone(),
            visible_fields: self.visible_fields(),
            errors: self.errors().cloned().unwrap_or_default(),
            general_error: self.general_error(),
            dialog: self.dialog.clone(),
        }
    }
}

/// JSON view of a form instance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub id: Uuid,
    pub user_id: UserId,
    pub draft: UserDraft,
    pub visible_fields: Vec<Field>,
    pub errors: FieldErrors,
    pub general_error: Option<&'static str>,
    pub dialog: ConfirmationDialog,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
    }

    fn filled(generate_password: bool) -> FormController {
        let mut form = FormController::new(today());
        form.apply(
            [
                FieldUpdate::Username("Jo".into()),
                FieldUpdate::Email("jo@x.com".into()),
                FieldUpdate::Organization("Acme".into()),
                FieldUpdate::ContactNumber("9876543210".into()),
                FieldUpdate::JoiningDate(today().succ_opt()),
                FieldUpdate::GeneratePassword(generate_password),
            ],
            today(),
        );
        form
    }

    #[test]
    fn defaults() {
        let form = FormController::new(today());
        let draft = form.draft();
        assert_eq!(draft.role, Role::Admin);
        assert_eq!(draft.joining_date, Some(today()));
        assert!(!draft.generate_password && !draft.active && !draft.inactive);
        assert!(form.errors().is_none());
        assert_eq!(form.general_error(), None);
        assert!(!form.dialog().is_shown());
    }

    #[test]
    fn user_id_is_stable_across_edits() {
        let mut form = FormController::new(today());
        let id = form.user_id().clone();
        form.set_field(FieldUpdate::Username("Jo".into()), today());
        form.submit(today());
        assert_eq!(form.user_id(), &id);
    }

    #[test]
    fn valid_submit_without_password_emits_and_keeps_dialog_hidden() {
        let mut form = filled(false);
        match form.submit(today()) {
            SubmitOutcome::Emit(user) => assert_eq!(user.draft(), form.draft()),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!form.dialog().is_shown());
        assert_eq!(form.general_error(), None);
    }

    #[test]
    fn invalid_submit_records_errors() {
        let mut form = filled(false);
        form.set_field(FieldUpdate::Username("J".into()), today());
        assert!(matches!(form.submit(today()), SubmitOutcome::Invalid(_)));
        assert_eq!(
            form.field_error(Field::Username),
            Some("Username must be at least 2 characters.")
        );
        assert_eq!(
            form.general_error(),
            Some("Please enter all fields to proceed ahead")
        );
    }

    #[test]
    fn errors_refresh_after_first_submit() {
        let mut form = filled(false);
        form.set_field(FieldUpdate::Username("J".into()), today());
        form.submit(today());
        form.set_field(FieldUpdate::Username("Jo".into()), today());
        assert_eq!(form.field_error(Field::Username), None);
        assert_eq!(form.general_error(), None);
        assert!(form.errors().is_some_and(FieldErrors::is_empty));

        form.set_field(FieldUpdate::Organization(String::new()), today());
        assert_eq!(
            form.field_error(Field::Organization),
            Some("Organization is required.")
        );
        assert!(form.dialog().email().is_none());
    }

    #[test]
    fn errors_stay_hidden_before_first_submit() {
        let mut form = FormController::new(today());
        form.set_field(FieldUpdate::Username("J".into()), today());
        assert_eq!(form.field_error(Field::Username), None);
    }

    #[test]
    fn password_submit_captures_email_at_submission() {
        let mut form = filled(true);
        match form.submit(today()) {
            SubmitOutcome::ConfirmationPending { email, .. } => assert_eq!(email, "jo@x.com"),
            other => panic!("unexpected outcome: {other:?}"),
        }

        form.set_field(FieldUpdate::Email("changed@x.com".into()), today());
        assert_eq!(form.dialog().email(), Some("jo@x.com"));
        assert_eq!(form.draft().email, "changed@x.com");
    }

    #[test]
    fn submit_is_refused_while_dialog_open() {
        let mut form = filled(true);
        form.submit(today());
        assert_eq!(form.submit(today()), SubmitOutcome::DialogOpen);
    }

    #[test]
    fn dismiss_keeps_draft() {
        for control in [DismissControl::Close, DismissControl::Continue] {
            let mut form = filled(true);
            form.submit(today());
            let before = form.draft().clone();
            assert!(form.dismiss_dialog(control));
            assert!(!form.dialog().is_shown());
            assert_eq!(form.draft(), &before);
        }
    }

    #[test]
    fn non_faculty_submission_ignores_program() {
        let mut form = filled(false);
        form.set_field(FieldUpdate::Program(Some(String::new())), today());
        assert!(!form.is_visible(Field::Program));
        assert!(matches!(form.submit(today()), SubmitOutcome::Emit(_)));

        form.set_field(FieldUpdate::Role(Role::Faculty), today());
        assert!(form.is_visible(Field::Program));
    }

    #[test]
    fn snapshot_reports_state() {
        let mut form = filled(true);
        form.submit(today());
        let id = Uuid::now_v7();
        let json = serde_json::to_value(form.snapshot(id)).unwrap();
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["draft"]["contactNumber"], "9876543210");
        assert_eq!(json["dialog"]["state"], "shown");
        assert_eq!(json["dialog"]["email"], "jo@x.com");
        assert_eq!(json["generalError"], serde_json::Value::Null);
        assert!(json["errors"].as_object().unwrap().is_empty());
    }
}
