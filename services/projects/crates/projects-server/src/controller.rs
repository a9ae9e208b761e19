//! Project resource controller.
//!
//! Maps each lifecycle call to a status code and JSON body. No project
//! state is stored; `start` and `stop` are accepted without effect.

use std::fmt;
use std::str::FromStr;

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::schema::SchemaValidator;

/// Status for requests that were accepted for processing.
pub const STATUS_PROCESSED: StatusCode = StatusCode::ACCEPTED;
/// Status for payloads or actions the controller rejects.
pub const STATUS_BAD_REQUEST: StatusCode = StatusCode::BAD_REQUEST;

const INVALID_PAYLOAD_MSG: &str = "Invalid project payload";
const INVALID_ACTION_MSG: &str = "Unsupported action, expected start or stop";

/// A controller answer: HTTP status plus JSON body.
pub type Reply = (StatusCode, Value);

/// Lifecycle actions accepted by `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    Start,
    Stop,
}

impl ProjectAction {
    pub const ALL: [ProjectAction; 2] = [ProjectAction::Start, ProjectAction::Stop];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for ProjectAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|a| a.as_str() == s).ok_or(())
    }
}

pub struct ProjectsController {
    schema: SchemaValidator,
}

impl ProjectsController {
    #[must_use]
    pub fn new(schema: SchemaValidator) -> Self {
        Self { schema }
    }

    /// Validate a create request. The project is not persisted.
    #[must_use]
    pub fn create_project(&self, data: &Value) -> Reply {
        let valid = self.schema.validate_schema(data);
        if valid {
            tracing::info!(name = ?data.get("name"), "project accepted");
            return (STATUS_PROCESSED, json!({ "code": valid }));
        }
        (
            STATUS_BAD_REQUEST,
            json!({ "code": valid, "message": INVALID_PAYLOAD_MSG }),
        )
    }

    #[must_use]
    pub fn get_project(&self, name: &str) -> Reply {
        tracing::debug!(name, "project status requested");
        (
            StatusCode::OK,
            json!({ "status": "running", "error_message": "" }),
        )
    }

    /// Accept `start`/`stop`; anything else, or no action, is a bad request.
    #[must_use]
    pub fn update_project(&self, name: &str, action: Option<&str>) -> Reply {
        let Some(action) = action.and_then(|a| a.parse::<ProjectAction>().ok()) else {
            tracing::debug!(name, ?action, "unsupported project action");
            return (
                STATUS_BAD_REQUEST,
                json!({ "code": 0, "message": INVALID_ACTION_MSG }),
            );
        };
        // TODO: answer 404 once projects are persisted and `name` can be looked up.
        let status = Self::do_action(action);
        tracing::info!(name, %action, "project action accepted");
        (STATUS_PROCESSED, json!({ "status": status }))
    }

    #[must_use]
    pub fn delete_project(&self, name: &str) -> Reply {
        tracing::info!(name, "project delete accepted");
        (STATUS_PROCESSED, json!({}))
    }

    fn do_action(action: ProjectAction) -> u8 {
        match action {
            ProjectAction::Start | ProjectAction::Stop => 1,
        }
    }
}
