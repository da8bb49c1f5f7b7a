//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every service error maps to a stable status code and a
//! `{ "success": false, "error": ... }` body. Store failures are logged and
//! answered with a generic message — driver details never reach the caller.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use campus_core::validate::FieldError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// No credential, or a credential that does not verify.
  #[error("authentication required")]
  Unauthenticated,

  #[error("forbidden")]
  Forbidden,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("validation failed")]
  Validation(Vec<FieldError>),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("internal error")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<campus_core::Error> for ApiError {
  fn from(err: campus_core::Error) -> Self {
    use campus_core::Error as E;
    match err {
      E::Unauthenticated => ApiError::Unauthenticated,
      E::Forbidden => ApiError::Forbidden,
      E::CourseNotFound(id) => ApiError::NotFound(format!("course {id}")),
      E::UserNotFound(id) => ApiError::NotFound(format!("user {id}")),
      E::Validation(fields) => ApiError::Validation(fields),
      E::AlreadyEnrolled { course_id, .. } => {
        ApiError::Conflict(format!("already enrolled in course {course_id}"))
      }
      E::EmailTaken(email) => {
        ApiError::Conflict(format!("email already registered: {email}"))
      }
      E::Store(e) => ApiError::Internal(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      ApiError::Unauthenticated => {
        let body = json!({ "success": false, "error": "authentication required" });
        let mut res = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"campus\""),
        );
        return res;
      }
      ApiError::Forbidden => (
        StatusCode::FORBIDDEN,
        json!({ "success": false, "error": "forbidden" }),
      ),
      ApiError::NotFound(what) => (
        StatusCode::NOT_FOUND,
        json!({ "success": false, "error": format!("not found: {what}") }),
      ),
      ApiError::Validation(fields) => (
        StatusCode::BAD_REQUEST,
        json!({
          "success": false,
          "error": "validation failed",
          "fields": fields,
        }),
      ),
      ApiError::Conflict(msg) => (
        StatusCode::CONFLICT,
        json!({ "success": false, "error": msg }),
      ),
      ApiError::BadRequest(msg) => (
        StatusCode::BAD_REQUEST,
        json!({ "success": false, "error": msg }),
      ),
      ApiError::Internal(e) => {
        tracing::error!(error = %e, "internal error while handling request");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({ "success": false, "error": "internal error" }),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}
