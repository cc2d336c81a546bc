use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::form::{self, DismissControl, FieldUpdate, FormController, FormSnapshot};
use crate::models::Field;
use crate::state::SharedState;
use crate::submission::parser::json_value_to_raw;
use crate::submission::{PipelineResult, pipeline};

#[derive(Deserialize)]
pub struct SetField {
    pub field: String,
    pub value: serde_json::Value,
}

#[derive(Deserialize)]
pub struct Dismiss {
    #[serde(default)]
    pub control: DismissControl,
}

pub async fn create(State(state): State<SharedState>) -> Result<Json<FormSnapshot>, AppError> {
    let id = state.forms.insert(FormController::new(form::today()));
    let snapshot = snapshot(&state, id)?;
    tracing::info!("Form {id} created for user {}", snapshot.user_id);
    Ok(Json(snapshot))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FormSnapshot>, AppError> {
    let snapshot = snapshot(&state, id)?;
    Ok(Json(snapshot))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.forms.remove(id) {
        return Err(AppError::form_not_found());
    }
    tracing::info!("Form {id} discarded");
    Ok(Json(json!({ "message": "Deleted" })))
}

pub async fn set_field(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetField>,
) -> Result<Json<FormSnapshot>, AppError> {
    let field: Field = req.field.parse()?;
    let raw = json_value_to_raw(field, &req.value)?;
    let update = FieldUpdate::parse(field, &raw)?;
    let today = form::today();

    let snapshot = state
        .forms
        .with(id, |form| {
            form.set_field(update, today);
            form.snapshot(id)
        })
        .ok_or_else(AppError::form_not_found)?;

    Ok(Json(snapshot))
}

pub async fn submit(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = pipeline::run(&state, id, Vec::new()).await?;

    if let PipelineResult::Invalid(errors) = &result {
        return Err(AppError::Validation(errors.clone()));
    }

    let snapshot = snapshot(&state, id)?;
    Ok(Json(json!({
        "outcome": result.outcome(),
        "form": snapshot,
    })))
}

pub async fn dismiss_dialog(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<FormSnapshot>, AppError> {
    let control = if body.is_empty() {
        DismissControl::default()
    } else {
        serde_json::from_slice::<Dismiss>(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON: {e}")))?
            .control
    };

    let snapshot = state
        .forms
        .with(id, |form| {
            if form.dismiss_dialog(control) {
                tracing::debug!("Form {id} dialog dismissed via {control:?}");
            }
            form.snapshot(id)
        })
        .ok_or_else(AppError::form_not_found)?;

    Ok(Json(snapshot))
}

fn snapshot(state: &SharedState, id: Uuid) -> Result<FormSnapshot, AppError> {
    state
        .forms
        .with(id, |form| form.snapshot(id))
        .ok_or_else(AppError::form_not_found)
}
