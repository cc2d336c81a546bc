use std::sync::Arc;

use crate::actions::{PasswordNotifier, UserSink};
use crate::config::Config;
use crate::form::FormStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub forms: FormStore,
    pub sink: Arc<dyn UserSink>,
    pub notifier: Arc<dyn PasswordNotifier>,
}
