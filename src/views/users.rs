use askama::Template;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::form::{self, DismissControl, FormController};
use crate::models::{Field, Role};
use crate::state::SharedState;
use crate::submission::{pipeline, UserFormPayload};
use crate::widgets::DateInput;

#[derive(Template)]
#[template(path = "users/new.html")]
struct NewUserTemplate {
    form: FormView,
}

#[derive(Template)]
#[template(path = "users/_fields.html")]
struct FieldsPartial {
    form: FormView,
}

struct TextField {
    name: &'static str,
    label: &'static str,
    value: String,
    error: Option<String>,
}

struct RoleOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

struct FormView {
    id: String,
    sync_url: String,
    user_id: String,
    username: TextField,
    email: TextField,
    organization: TextField,
    program: Option<TextField>,
    contact_number: TextField,
    joining_date_html: String,
    joining_date_error: Option<String>,
    roles: Vec<RoleOption>,
    generate_password: bool,
    active: bool,
    inactive: bool,
    general_error: Option<String>,
    /// Problem with the last post itself, as opposed to a field value.
    notice: Option<String>,
    dialog_email: Option<String>,
}

impl FormView {
    fn new(id: Uuid, form: &FormController) -> Self {
        let draft = form.draft();
        let text = |field: Field, value: &str| TextField {
            name: field.as_str(),
            label: field.label(),
            value: value.to_string(),
            error: form.field_error(field).map(str::to_string),
        };

        let sync_url = format!("/htmx/users/new/{id}/fields");
        let joining_date_html = DateInput::new(Field::JoiningDate.as_str(), draft.joining_date)
            .on_change(sync_url.clone())
            .render()
            .unwrap_or_default();

        Self {
            id: id.to_string(),
            sync_url,
            user_id: form.user_id().to_string(),
            username: text(Field::Username, &draft.username),
            email: text(Field::Email, &draft.email),
            organization: text(Field::Organization, &draft.organization),
            program: form
                .is_visible(Field::Program)
                .then(|| text(Field::Program, draft.program.as_deref().unwrap_or_default())),
            contact_number: text(Field::ContactNumber, &draft.contact_number),
            joining_date_html,
            joining_date_error: form.field_error(Field::JoiningDate).map(str::to_string),
            roles: Role::ALL
                .into_iter()
                .map(|role| RoleOption {
                    value: role.as_str(),
                    label: role.label(),
                    selected: role == draft.role,
                })
                .collect(),
            generate_password: draft.generate_password,
            active: draft.active,
            inactive: draft.inactive,
            general_error: form.general_error().map(str::to_string),
            notice: None,
            dialog_email: form.dialog().email().map(str::to_string),
        }
    }
}

#[derive(Deserialize)]
pub struct DismissForm {
    pub control: Option<String>,
}

pub async fn new_form(State(state): State<SharedState>) -> Redirect {
    let id = state.forms.insert(FormController::new(form::today()));
    tracing::info!("Form {id} created");
    Redirect::to(&format!("/users/new/{id}"))
}

pub async fn show(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    render_page(&state, id, None)
}

/// Browser submit. Failures other than a missing form re-render the page
/// with a notice instead of answering with JSON.
pub async fn submit(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Form(payload): Form<UserFormPayload>,
) -> Result<Response, AppError> {
    let result = match payload.into_updates(None) {
        Ok(updates) => pipeline::run(&state, id, updates).await.map(|_| ()),
        Err(e) => Err(AppError::BadRequest(e)),
    };

    match result {
        Ok(()) => Ok(render_page(&state, id, None)?.into_response()),
        Err(e @ AppError::NotFound(_)) => Err(e),
        Err(e) => {
            let status = e.status();
            let page = render_page(&state, id, Some(notice_for(e)))?;
            Ok((status, page).into_response())
        }
    }
}

/// HTMX partial: apply the current page values and re-render the field block.
pub async fn sync_fields(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Form(payload): Form<UserFormPayload>,
) -> Result<impl IntoResponse, AppError> {
    let trigger = headers
        .get("hx-trigger-name")
        .and_then(|v| v.to_str().ok())
        .and_then(|name| name.parse::<Field>().ok());
    // htmx only swaps 2xx responses, so a rejected post still answers 200
    // and carries the problem as a notice in the field block.
    let (updates, notice) = match payload.into_updates(trigger) {
        Ok(updates) => (updates, None),
        Err(e) => {
            tracing::debug!("Form {id} field sync rejected: {e}");
            (Vec::new(), Some(e))
        }
    };
    let today = form::today();

    let view = state
        .forms
        .with(id, |form| {
            form.apply(updates, today);
            FormView {
                notice,
                ..FormView::new(id, form)
            }
        })
        .ok_or_else(AppError::form_not_found)?;

    let template = FieldsPartial { form: view };
    Ok(Html(template.render().unwrap_or_default()))
}

pub async fn dismiss_dialog(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Form(body): Form<DismissForm>,
) -> Result<Redirect, AppError> {
    let control = match body.control.as_deref() {
        Some(control) => control.parse::<DismissControl>()?,
        None => DismissControl::default(),
    };

    state
        .forms
        .with(id, |form| form.dismiss_dialog(control))
        .ok_or_else(AppError::form_not_found)?;

    Ok(Redirect::to(&format!("/users/new/{id}")))
}

fn notice_for(error: AppError) -> String {
    match error {
        AppError::BadRequest(msg) => msg,
        AppError::Internal(msg) => {
            tracing::error!("Internal error: {msg}");
            "The user could not be saved. Please try again.".to_string()
        }
        other => other.to_string(),
    }
}

fn render_page(
    state: &SharedState,
    id: Uuid,
    notice: Option<String>,
) -> Result<Html<String>, AppError> {
    let view = state
        .forms
        .with(id, |form| FormView {
            notice,
            ..FormView::new(id, form)
        })
        .ok_or_else(AppError::form_not_found)?;

    let template = NewUserTemplate { form: view };
    Ok(Html(template.render().unwrap_or_default()))
}
