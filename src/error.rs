use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

pub type AppResult<T> = Result<T, AppError>;

/// One failed input constraint, rendered as an entry of the 422 `detail` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    /// Where the value came from, e.g. `["body", "price"]` or `["path", "id"]`.
    loc: Vec<String>,
    msg: String,
    #[serde(rename = "type")]
    kind: String,
}

impl FieldViolation {
    pub fn new(
        source: &str,
        field: &str,
        msg: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            loc: vec![source.to_string(), field.to_string()],
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    pub fn missing(source: &str, field: &str) -> Self {
        Self::new(source, field, "Field required", "missing")
    }

    pub fn field(&self) -> &str {
        self.loc.last().map(String::as_str).unwrap_or_default()
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(vec![FieldViolation::new(
            "body",
            "body",
            rejection.body_text(),
            "json_invalid",
        )])
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(vec![FieldViolation::new(
            "path",
            "id",
            rejection.body_text(),
            "int_parsing",
        )])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(violations) => {
                let summary: Vec<String> = violations
                    .iter()
                    .map(|v| format!("{}: {}", v.field(), v.kind()))
                    .collect();
                debug!(?summary, "Rejected request input");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": violations })),
                )
                    .into_response()
            }
            AppError::NotFound(message) => {
                debug!(%message, "Resource not found");
                (StatusCode::NOT_FOUND, Json(json!({ "detail": message }))).into_response()
            }
            AppError::BadRequest(message) => {
                warn!(%message, "Bad request");
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": message }))).into_response()
            }
        }
    }
}
