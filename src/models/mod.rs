mod field;
mod role;
mod user_draft;
mod user_id;

pub use field::Field;
pub use role::Role;
pub use user_draft::UserDraft;
pub use user_id::UserId;
