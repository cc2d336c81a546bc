use chrono::NaiveDate;

use crate::models::{Field, Role, UserDraft};
use crate::widgets::date_input;

/// A single field change coming from the page or the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Username(String),
    Email(String),
    Organization(String),
    ContactNumber(String),
    JoiningDate(Option<NaiveDate>),
    Role(Role),
    Program(Option<String>),
    GeneratePassword(bool),
    Active(bool),
    Inactive(bool),
}

impl FieldUpdate {
    /// Build an update from its transport form (form post or JSON string).
    pub fn parse(field: Field, raw: &str) -> Result<Self, String> {
        let update = match field {
            Field::Username => FieldUpdate::Username(raw.to_string()),
            Field::Email => FieldUpdate::Email(raw.to_string()),
            Field::Organization => FieldUpdate::Organization(raw.to_string()),
            Field::ContactNumber => FieldUpdate::ContactNumber(raw.to_string()),
            Field::JoiningDate => FieldUpdate::JoiningDate(date_input::parse_date(raw)?),
            Field::Role => FieldUpdate::Role(raw.parse()?),
            Field::Program => {
                let raw = raw.trim();
                FieldUpdate::Program((!raw.is_empty()).then(|| raw.to_string()))
            }
            Field::GeneratePassword => FieldUpdate::GeneratePassword(parse_flag(field, raw)?),
            Field::Active => FieldUpdate::Active(parse_flag(field, raw)?),
            Field::Inactive => FieldUpdate::Inactive(parse_flag(field, raw)?),
        };
        Ok(update)
    }

    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::Username(_) => Field::Username,
            FieldUpdate::Email(_) => Field::Email,
            FieldUpdate::Organization(_) => Field::Organization,
            FieldUpdate::ContactNumber(_) => Field::ContactNumber,
            FieldUpdate::JoiningDate(_) => Field::JoiningDate,
            FieldUpdate::Role(_) => Field::Role,
            FieldUpdate::Program(_) => Field::Program,
            FieldUpdate::GeneratePassword(_) => Field::GeneratePassword,
            FieldUpdate::Active(_) => Field::Active,
            FieldUpdate::Inactive(_) => Field::Inactive,
        }
    }
}

fn parse_flag(field: Field, raw: &str) -> Result<bool, String> {
    match raw.trim() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" | "" => Ok(false),
        other => Err(format!("Invalid boolean for {field}: {other}")),
    }
}

/// Apply one update, then restore the active/inactive invariant.
pub fn reduce(mut draft: UserDraft, update: FieldUpdate) -> UserDraft {
    let changed = update.field();

    match update {
        FieldUpdate::Username(v) => draft.username = v,
        FieldUpdate::Email(v) => draft.email = v,
        FieldUpdate::Organization(v) => draft.organization = v,
        FieldUpdate::ContactNumber(v) => draft.contact_number = v,
        FieldUpdate::JoiningDate(v) => draft.joining_date = v,
        FieldUpdate::Role(v) => draft.role = v,
        FieldUpdate::Program(v) => draft.program = v,
        FieldUpdate::GeneratePassword(v) => draft.generate_password = v,
        FieldUpdate::Active(v) => draft.active = v,
        FieldUpdate::Inactive(v) => draft.inactive = v,
    }

    reconcile(draft, changed)
}

/// `active` and `inactive` are never both set. The flag that was just
/// changed keeps its value; any other change lets `active` win.
pub fn reconcile(mut draft: UserDraft, changed: Field) -> UserDraft {
    if draft.active && draft.inactive {
        if changed == Field::Inactive {
            draft.active = false;
        } else {
            draft.inactive = false;
        }
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> UserDraft {
        UserDraft::new(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
    }

    #[test]
    fn setting_active_clears_inactive() {
        let d = reduce(draft(), FieldUpdate::Inactive(true));
        let d = reduce(d, FieldUpdate::Active(true));
        assert!(d.active);
        assert!(!d.inactive);
    }

    #[test]
    fn setting_inactive_clears_active() {
        let d = reduce(draft(), FieldUpdate::Active(true));
        let d = reduce(d, FieldUpdate::Inactive(true));
        assert!(d.inactive);
        assert!(!d.active);
    }

    #[test]
    fn clearing_a_flag_leaves_the_other_alone() {
        let d = reduce(draft(), FieldUpdate::Active(true));
        let d = reduce(d, FieldUpdate::Inactive(false));
        assert!(d.active);
        assert!(!d.inactive);
    }

    #[test]
    fn unrelated_change_resolves_conflict_in_favor_of_active() {
        let mut d = draft();
        d.active = true;
        d.inactive = true;
        let d = reduce(d, FieldUpdate::Username("Jo".into()));
        assert!(d.active);
        assert!(!d.inactive);
    }

    #[test]
    fn role_change_keeps_hidden_program() {
        let d = reduce(draft(), FieldUpdate::Role(Role::Faculty));
        let d = reduce(d, FieldUpdate::Program(Some("physics".into())));
        let d = reduce(d, FieldUpdate::Role(Role::Admin));
        assert_eq!(d.program.as_deref(), Some("physics"));
        let d = reduce(d, FieldUpdate::Role(Role::Faculty));
        assert_eq!(d.program.as_deref(), Some("physics"));
    }

    #[test]
    fn parse_handles_transport_values() {
        assert_eq!(
            FieldUpdate::parse(Field::Active, "on"),
            Ok(FieldUpdate::Active(true))
        );
        assert_eq!(
            FieldUpdate::parse(Field::Role, "Super Admin"),
            Ok(FieldUpdate::Role(Role::SuperAdmin))
        );
        assert_eq!(
            FieldUpdate::parse(Field::Program, "  "),
            Ok(FieldUpdate::Program(None))
        );
        assert_eq!(
            FieldUpdate::parse(Field::JoiningDate, "2030/02/03"),
            Ok(FieldUpdate::JoiningDate(NaiveDate::from_ymd_opt(2030, 2, 3)))
        );
        assert!(FieldUpdate::parse(Field::Role, "Student").is_err());
        assert!(FieldUpdate::parse(Field::Inactive, "maybe").is_err());
    }
}
