//! HTTP routing for the project resource.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::controller::{ProjectsController, Reply};

/// Shared handler state.
pub type AppState = Arc<ProjectsController>;

#[derive(Debug, Default, Deserialize)]
pub struct ActionQuery {
    action: Option<String>,
}

/// Build the service router.
///
/// Every `/project/{name}…` template answers `GET`, `PUT` and `DELETE`.
pub fn router(controller: ProjectsController) -> Router {
    let project = || get(get_project).put(update_project).delete(delete_project);
    Router::new()
        .route("/health", get(health))
        .route("/project", post(create_project))
        .route("/project/{name}", project())
        .route("/project/{name}/status", project())
        .route("/project/{name}/{action}", project())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(controller))
}

/// Minimal health-check handler for Docker / load-balancer probes.
async fn health() -> StatusCode {
    StatusCode::OK
}

fn respond((status, body): Reply) -> Response {
    (status, Json(body)).into_response()
}

fn project_name(params: &HashMap<String, String>) -> &str {
    params.get("name").map_or("", String::as_str)
}

/// Non-JSON bodies are validated as `null`, which the schema rejects.
async fn create_project(State(controller): State<AppState>, body: Bytes) -> Response {
    let data = serde_json::from_slice::<Value>(&body).unwrap_or_else(|err| {
        tracing::debug!(%err, "create body is not JSON");
        Value::Null
    });
    respond(controller.create_project(&data))
}

async fn get_project(
    State(controller): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
) -> Response {
    respond(controller.get_project(project_name(&params)))
}

/// The action comes from the `{action}` path segment, else `?action=`.
async fn update_project(
    State(controller): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    Query(query): Query<ActionQuery>,
) -> Response {
    let action = params
        .get("action")
        .or(query.action.as_ref())
        .map(String::as_str);
    respond(controller.update_project(project_name(&params), action))
}

async fn delete_project(
    State(controller): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
) -> Response {
    respond(controller.delete_project(project_name(&params)))
}
