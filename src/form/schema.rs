use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::models::{Field, Role, UserDraft};

pub const GENERAL_ERROR: &str = "Please enter all fields to proceed ahead";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$").unwrap()
});

/// First failing message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }
}

/// A draft that passed [`validate`]. Only obtainable through validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUser(UserDraft);

impl ValidatedUser {
    pub fn draft(&self) -> &UserDraft {
        &self.0
    }
}

/// Fields rendered for the given role.
pub fn visible_fields(role: Role) -> Vec<Field> {
    Field::ALL
        .into_iter()
        .filter(|f| *f != Field::Program || role == Role::Faculty)
        .collect()
}

/// The aggregate notice shown below the form when any field failed.
pub fn general_error_message(errors: &FieldErrors) -> Option<&'static str> {
    (!errors.is_empty()).then_some(GENERAL_ERROR)
}

pub fn validate(draft: &UserDraft, today: NaiveDate) -> Result<ValidatedUser, FieldErrors> {
    let mut errors = FieldErrors::default();

    if text_len(&draft.username) < 2 {
        errors.insert(Field::Username, "Username must be at least 2 characters.");
    }

    if !is_valid_email(&draft.email) {
        errors.insert(Field::Email, "Invalid email address.");
    }

    if draft.organization.is_empty() {
        errors.insert(Field::Organization, "Organization is required.");
    }

    if let Some(message) = check_contact_number(&draft.contact_number) {
        errors.insert(Field::ContactNumber, message);
    }

    match draft.joining_date {
        None => errors.insert(Field::JoiningDate, "Joining date is required."),
        Some(date) if date < today => {
            errors.insert(Field::JoiningDate, "Joining date must be today or later.")
        }
        Some(_) => {}
    }

    if errors.is_empty() {
        Ok(ValidatedUser(draft.clone()))
    } else {
        Err(errors)
    }
}

pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

/// Length in UTF-16 code units, the unit browsers report for text inputs.
fn text_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// An empty number fails the minimum-length rule like any short one.
fn check_contact_number(number: &str) -> Option<&'static str> {
    let len = text_len(number);
    if len < 10 {
        Some("Contact number must be at least 10 digits.")
    } else if len > 15 {
        Some("Contact number must be at most 15 digits.")
    } else if !number.chars().all(|c| c.is_ascii_digit()) {
        Some("Contact number must contain digits only.")
    } else {
        None
    }
}
