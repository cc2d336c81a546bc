use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Password confirmation dialog shown after a successful submit with
/// "generate password" checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ConfirmationDialog {
    #[default]
    Hidden,
    /// Holds the address captured at submission time.
    Shown { email: String },
}

/// The two controls that close the dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DismissControl {
    /// The cross icon in the corner.
    Close,
    /// The "Continue" action button.
    #[default]
    Continue,
}

impl FromStr for DismissControl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "close" => Ok(DismissControl::Close),
            "continue" => Ok(DismissControl::Continue),
            other => Err(format!("Unknown dialog control: {other}")),
        }
    }
}

impl ConfirmationDialog {
    /// Hidden -> Shown. Returns false if the dialog is already open.
    pub fn show(&mut self, email: String) -> bool {
        match self {
            ConfirmationDialog::Hidden => {
                *self = ConfirmationDialog::Shown { email };
                true
            }
            ConfirmationDialog::Shown { .. } => false,
        }
    }

    /// Shown -> Hidden. Returns false if there was nothing to close.
    pub fn dismiss(&mut self, _control: DismissControl) -> bool {
        let was_shown = self.is_shown();
        *self = ConfirmationDialog::Hidden;
        was_shown
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, ConfirmationDialog::Shown { .. })
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            ConfirmationDialog::Shown { email } => Some(email),
            ConfirmationDialog::Hidden => None,
        }
    }
}
