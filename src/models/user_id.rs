use std::fmt;

use rand::Rng;
use serde::Serialize;

const PREFIX: &str = "AB";

/// Display-only identifier shown at the top of the form.
///
/// Generated once per form instance. It is not checked for collisions and is
/// never sent along with the submitted draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn generate() -> Self {
        let suffix: u32 = rand::rng().random_range(0..100_000);
        Self(format!("{PREFIX}{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
