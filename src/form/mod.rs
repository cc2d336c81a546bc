//! The create-user form: draft reducer, validation schema, confirmation
//! dialog and the controller tying them together.

pub mod controller;
pub mod dialog;
pub mod reducer;
pub mod schema;
pub mod store;

use chrono::NaiveDate;

pub use controller::{FormController, FormSnapshot, SubmitOutcome};
pub use dialog::{ConfirmationDialog, DismissControl};
pub use reducer::FieldUpdate;
pub use schema::{FieldErrors, GENERAL_ERROR, ValidatedUser};
pub use store::FormStore;

/// The local calendar date used for default and minimum joining dates.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
