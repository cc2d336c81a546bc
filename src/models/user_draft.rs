use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Role;

/// In-progress state of the create-user form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub organization: String,
    pub contact_number: String,
    pub joining_date: Option<NaiveDate>,
    pub role: Role,
    pub program: Option<String>,
    pub generate_password: bool,
    pub active: bool,
    pub inactive: bool,
}

impl UserDraft {
    /// A blank draft whose joining date defaults to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            organization: String::new(),
            contact_number: String::new(),
            joining_date: Some(today),
            role: Role::default(),
            program: None,
            generate_password: false,
            active: false,
            inactive: false,
        }
    }
}
