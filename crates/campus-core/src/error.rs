//! Error types for `campus-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::validate::FieldError;

#[derive(Debug, Error)]
pub enum Error {
  /// No credential was presented where one is required.
  #[error("authentication required")]
  Unauthenticated,

  /// Valid credential, but the role or ownership check failed.
  #[error("forbidden")]
  Forbidden,

  #[error("course not found: {0}")]
  CourseNotFound(Uuid),

  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  /// Payload failed field validation; every offending field is listed.
  #[error("validation failed: {}", format_fields(.0))]
  Validation(Vec<FieldError>),

  #[error("user {user_id} is already enrolled in course {course_id}")]
  AlreadyEnrolled { user_id: Uuid, course_id: Uuid },

  #[error("email already registered: {0}")]
  EmailTaken(String),

  /// The persistence backend failed. Never retried here; the message is not
  /// forwarded verbatim to API callers.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(err))
  }
}

fn format_fields(fields: &[FieldError]) -> String {
  fields
    .iter()
    .map(|f| f.field.as_str())
    .collect::<Vec<_>>()
    .join(", ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
