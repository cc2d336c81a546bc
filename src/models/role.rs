use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Admin,
    #[serde(alias = "Super Admin")]
    SuperAdmin,
    Faculty,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::SuperAdmin, Role::Faculty];

    /// Value used in form posts and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::SuperAdmin => "SuperAdmin",
            Role::Faculty => "Faculty",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::SuperAdmin => "Super Admin",
            Role::Faculty => "Faculty",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Admin" => Ok(Role::Admin),
            "SuperAdmin" | "Super Admin" => Ok(Role::SuperAdmin),
            "Faculty" => Ok(Role::Faculty),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}
