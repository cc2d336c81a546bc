use serde::Deserialize;
use serde_json::Value;

use crate::form::FieldUpdate;
use crate::models::Field;
use crate::widgets::date_input;

/// The create-user page as posted by the browser.
///
/// Text inputs that were not rendered (the hidden program field) are absent
/// and leave the draft untouched. Unchecked checkboxes are absent and mean
/// `false`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFormPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub program: Option<String>,
    pub contact_number: Option<String>,
    pub joining_date: Option<String>,
    pub role: Option<String>,
    pub generate_password: Option<String>,
    pub active: Option<String>,
    pub inactive: Option<String>,
}

impl UserFormPayload {
    /// Turn the post into ordered field updates. The `trigger` field, if
    /// any, is applied last so its change wins the active/inactive
    /// reconciliation; otherwise `active` is applied after `inactive`.
    pub fn into_updates(self, trigger: Option<Field>) -> Result<Vec<FieldUpdate>, String> {
        let mut updates = Vec::new();

        if let Some(v) = self.username {
            updates.push(FieldUpdate::Username(v));
        }
        if let Some(v) = self.email {
            updates.push(FieldUpdate::Email(v));
        }
        if let Some(v) = self.organization {
            updates.push(FieldUpdate::Organization(v));
        }
        if let Some(v) = self.program {
            updates.push(FieldUpdate::parse(Field::Program, &v)?);
        }
        if let Some(v) = self.contact_number {
            updates.push(FieldUpdate::ContactNumber(v));
        }
        if let Some(v) = self.joining_date {
            // Unparseable text leaves the date empty so the schema reports it.
            let date = date_input::parse_date(&v).unwrap_or_else(|e| {
                tracing::debug!("{e}");
                None
            });
            updates.push(FieldUpdate::JoiningDate(date));
        }
        if let Some(v) = self.role {
            updates.push(FieldUpdate::parse(Field::Role, &v)?);
        }

        updates.push(checkbox(Field::GeneratePassword, self.generate_password)?);
        updates.push(checkbox(Field::Inactive, self.inactive)?);
        updates.push(checkbox(Field::Active, self.active)?);

        if let Some(trigger) = trigger {
            if let Some(pos) = updates.iter().position(|u| u.field() == trigger) {
                let update = updates.remove(pos);
                updates.push(update);
            }
        }

        Ok(updates)
    }
}

fn checkbox(field: Field, value: Option<String>) -> Result<FieldUpdate, String> {
    FieldUpdate::parse(field, value.as_deref().unwrap_or("false"))
}

/// Convert a JSON field value into its transport string.
pub fn json_value_to_raw(field: Field, value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(format!("Unsupported value for {field}")),
    }
}
