//! Route table for the site

use super::handlers::{
    AppState, about, api_submit, form_page, form_submit, health_check, landing,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build every site route
///
/// - GET  /                   - Landing page with the role selector
/// - GET  /about              - Static About page
/// - GET  /form/{role}        - Empty form for `buyer` or `seller`
/// - POST /form/{role}        - Url-encoded form post, re-renders the form
/// - POST /api/leads/{role}   - JSON lead intake
/// - GET  /health, /healthz   - Health check
pub fn build_site_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/about", get(about))
        .route("/form/{role}", get(form_page).post(form_submit))
        .route("/api/leads/{role}", post(api_submit))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .with_state(state)
}
