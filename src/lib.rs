pub mod config;
pub mod error;
pub mod state;
pub mod models;
pub mod form;
pub mod widgets;
pub mod routes;
pub mod views;
pub mod actions;
pub mod email;
pub mod submission;
pub mod worker;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::actions::email::MailNotifier;
use crate::actions::log::{LogNotifier, LogSink};
use crate::actions::{PasswordNotifier, UserSink};
use crate::config::Config;
use crate::email::SystemMailer;
use crate::form::FormStore;
use crate::state::{AppState, SharedState};

/// Build the app with the default collaborators: a logging user sink and,
/// when SMTP is configured, an email password notifier.
pub fn build_app(config: Config) -> (Router, SharedState) {
    let sink: Arc<dyn UserSink> = Arc::new(LogSink);
    let notifier = default_notifier(&config);
    build_app_with(config, sink, notifier)
}

pub fn build_app_with(
    config: Config,
    sink: Arc<dyn UserSink>,
    notifier: Arc<dyn PasswordNotifier>,
) -> (Router, SharedState) {
    tracing::info!(
        "Using user sink '{}' and password notifier '{}'",
        sink.name(),
        notifier.name()
    );

    let state: SharedState = Arc::new(AppState {
        config,
        forms: FormStore::new(),
        sink,
        notifier,
    });

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let app = Router::new()
        .merge(routes::api_routes())
        .merge(views::view_routes())
        .nest_service("/static", ServeDir::new("static"))
        .route("/health", axum::routing::get(health))
        .layer(security_headers)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    (app, state)
}

fn default_notifier(config: &Config) -> Arc<dyn PasswordNotifier> {
    let Some(smtp) = config.smtp.as_ref() else {
        return Arc::new(LogNotifier);
    };

    match SystemMailer::new(smtp) {
        Ok(mailer) => {
            tracing::info!("System SMTP configured");
            Arc::new(MailNotifier::new(
                Arc::new(mailer),
                config.password_reset_url.clone(),
            ))
        }
        Err(e) => {
            tracing::warn!("System SMTP not available: {e}");
            Arc::new(LogNotifier)
        }
    }
}

async fn health() -> &'static str {
    "ok"
}
