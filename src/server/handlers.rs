//! HTTP handlers for the site pages and the lead API

use crate::client::{Outcome, SubmissionClient};
use crate::controller::{FormController, SubmitResult};
use crate::core::{FieldErrors, NotificationBus, RawFormValues, Role, SiteError};
use crate::render::{FormView, PageRenderer};
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::{Form, Json};
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared state for every handler
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<PageRenderer>,
    pub client: SubmissionClient,
    pub notifications: NotificationBus,
}

impl AppState {
    /// A fresh form session for one request
    fn controller(&self, role: Role) -> FormController {
        FormController::new(role, self.client.clone(), self.notifications.clone())
    }
}

fn parse_role(role: &str) -> Result<Role, SiteError> {
    role.parse()
        .map_err(|_| SiteError::UnknownRole(role.to_string()))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "bluecycle"
    }))
}

pub async fn landing(State(state): State<AppState>) -> Result<Html<String>, SiteError> {
    Ok(Html(state.renderer.landing()?))
}

pub async fn about(State(state): State<AppState>) -> Result<Html<String>, SiteError> {
    Ok(Html(state.renderer.about()?))
}

/// Empty form for the selected role
pub async fn form_page(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Html<String>, SiteError> {
    let role = parse_role(&role)?;
    let html = state.renderer.form(FormView {
        role,
        values: &RawFormValues::new(),
        errors: &FieldErrors::new(),
        notification: None,
        submitting: false,
    })?;
    Ok(Html(html))
}

/// Form post: validate, submit, and re-render with the result
pub async fn form_submit(
    State(state): State<AppState>,
    Path(role): Path<String>,
    body: Result<Form<RawFormValues>, FormRejection>,
) -> Result<Html<String>, SiteError> {
    let role = parse_role(&role)?;
    let Form(values) = body?;
    let form = state.controller(role);
    form.load(values);

    let result = form.submit().await;
    let notification = result.notification();

    let html = state.renderer.form(FormView {
        role,
        values: &form.values(),
        errors: &form.errors(),
        notification: notification.as_ref(),
        submitting: form.is_submitting(),
    })?;
    Ok(Html(html))
}

/// JSON lead intake for non-browser clients
pub async fn api_submit(
    State(state): State<AppState>,
    Path(role): Path<String>,
    body: Result<Json<RawFormValues>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), SiteError> {
    let role = parse_role(&role)?;
    let Json(values) = body?;
    let form = state.controller(role);
    form.load(values);

    match form.submit().await {
        SubmitResult::Submitted(Outcome::Sent) => Ok((
            StatusCode::ACCEPTED,
            Json(json!({ "status": Outcome::Sent, "role": role })),
        )),
        SubmitResult::Submitted(Outcome::TransportFailed) => Err(SiteError::SubmissionFailed),
        SubmitResult::Invalid(errors) => Err(SiteError::Validation(errors)),
        // A fresh controller is never mid-submission
        SubmitResult::Ignored => Err(SiteError::BadRequest(
            "a submission is already in progress".to_string(),
        )),
    }
}
