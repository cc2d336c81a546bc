use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use lms_admin::actions::{ActionError, PasswordNotifier, UserSink};
use lms_admin::config::Config;
use lms_admin::models::{UserDraft, UserId};
use lms_admin::state::SharedState;

/// Records every draft handed to the sink. Rejects them once `fail` is set.
#[derive(Default)]
pub struct RecordingSink {
    pub drafts: Mutex<Vec<UserDraft>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl UserSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn on_valid_submit(&self, draft: &UserDraft) -> Result<(), ActionError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("user service unavailable".into());
        }
        self.drafts.lock().unwrap().push(draft.clone());
        Ok(())
    }
}

/// Records every (user id, email) notification.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl PasswordNotifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, user_id: &UserId, draft: &UserDraft) -> Result<(), ActionError> {
        self.sent
            .lock()
            .unwrap()
            .push((user_id.to_string(), draft.email.clone()));
        Ok(())
    }
}

/// A running test server instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
    pub sink: Arc<RecordingSink>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Create a form instance over the API, return its snapshot.
    pub async fn create_form(&self) -> Value {
        let resp = self
            .client
            .post(self.url("/api/v1/user-forms"))
            .send()
            .await
            .expect("create form failed");
        assert_eq!(resp.status(), StatusCode::OK, "create form non-200");
        resp.json().await.unwrap()
    }

    /// Set one field, return (body, status).
    pub async fn set_field(&self, form_id: &str, field: &str, value: Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(&format!("/api/v1/user-forms/{form_id}/fields")))
            .json(&json!({ "field": field, "value": value }))
            .send()
            .await
            .expect("set field failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Fill every required field with valid values.
    pub async fn fill_valid(&self, form_id: &str) {
        let values = [
            ("username", json!("Jo")),
            ("email", json!("jo@x.com")),
            ("organization", json!("Acme")),
            ("contactNumber", json!("9876543210")),
            ("joiningDate", json!(tomorrow())),
            ("role", json!("Admin")),
        ];
        for (field, value) in values {
            let (body, status) = self.set_field(form_id, field, value).await;
            assert_eq!(status, StatusCode::OK, "set {field} failed: {body}");
        }
    }

    pub async fn submit(&self, form_id: &str) -> (Value, StatusCode) {
        self.post_json(&format!("/api/v1/user-forms/{form_id}/submit"), None)
            .await
    }

    pub async fn dismiss(&self, form_id: &str, control: &str) -> (Value, StatusCode) {
        self.post_json(
            &format!("/api/v1/user-forms/{form_id}/dialog/dismiss"),
            Some(json!({ "control": control })),
        )
        .await
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_json(&self, path: &str, body: Option<Value>) -> (Value, StatusCode) {
        let mut req = self.client.post(self.url(path));
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req.send().await.expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST a browser-style form, return (html, status).
    pub async fn post_form(
        &self,
        path: &str,
        data: &[(&str, &str)],
        trigger: Option<&str>,
    ) -> (String, StatusCode) {
        let mut req = self.client.post(self.url(path)).form(data);
        if let Some(trigger) = trigger {
            req = req.header("HX-Request", "true").header("HX-Trigger-Name", trigger);
        }
        let resp = req.send().await.expect("form post failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    pub async fn get_html(&self, path: &str) -> (String, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }
}

/// Tomorrow in the server's local calendar, as `YYYY-MM-DD`.
pub fn tomorrow() -> String {
    let today = lms_admin::form::today();
    today.succ_opt().unwrap().format("%Y-%m-%d").to_string()
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        base_url: "http://localhost:0".to_string(),
        password_reset_url: "http://localhost:0/reset-password".to_string(),
        form_ttl: Duration::from_secs(3600),
        sweep_interval: Duration::from_secs(60),
        log_level: "warn".to_string(),
        smtp: None,
    }
}

/// Spawn a test app with recording collaborators on a random port.
pub async fn spawn_app() -> TestApp {
    let sink = Arc::new(RecordingSink::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let (app, state) = lms_admin::build_app_with(test_config(), sink.clone(), notifier.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        state,
        sink,
        notifier,
    }
}
