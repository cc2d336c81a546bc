use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fields of the create-user form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Username,
    Email,
    Organization,
    Program,
    ContactNumber,
    JoiningDate,
    Role,
    GeneratePassword,
    Active,
    Inactive,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Username,
        Field::Email,
        Field::Organization,
        Field::Program,
        Field::ContactNumber,
        Field::JoiningDate,
        Field::Role,
        Field::GeneratePassword,
        Field::Active,
        Field::Inactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Organization => "organization",
            Field::Program => "program",
            Field::ContactNumber => "contactNumber",
            Field::JoiningDate => "joiningDate",
            Field::Role => "role",
            Field::GeneratePassword => "generatePassword",
            Field::Active => "active",
            Field::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Username => "Full Name",
            Field::Email => "Email Id",
            Field::Organization => "Organization",
            Field::Program => "Assign Program",
            Field::ContactNumber => "Contact",
            Field::JoiningDate => "Joining Date",
            Field::Role => "Assigning Role",
            Field::GeneratePassword => "Generate new password and notify user immediately",
            Field::Active => "Active",
            Field::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("Unknown field: {s}"))
    }
}
