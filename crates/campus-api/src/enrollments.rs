//! Handlers for enrollment and certificate endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/courses/:id/enroll` | Any authenticated user; 409 on duplicate |
//! | `POST` | `/api/courses/:id/complete` | Marks the caller's enrollment completed |
//! | `GET`  | `/api/courses/:id/certificate` | Requires a completed enrollment |

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use campus_core::store::CourseStore;
use uuid::Uuid;

use crate::{AppState, auth::MaybeActor, error::ApiError, success};

/// `POST /api/courses/:id/enroll`
pub async fn enroll<S>(
  State(state): State<AppState<S>>,
  MaybeActor(actor): MaybeActor,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let enrollment = state.service.enroll(actor.as_ref(), id).await?;
  Ok((StatusCode::CREATED, success(&enrollment)))
}

/// `POST /api/courses/:id/complete`
pub async fn complete<S>(
  State(state): State<AppState<S>>,
  MaybeActor(actor): MaybeActor,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let enrollment =
    state.service.complete_enrollment(actor.as_ref(), id).await?;
  Ok(success(&enrollment))
}

/// `GET /api/courses/:id/certificate`
pub async fn certificate<S>(
  State(state): State<AppState<S>>,
  MaybeActor(actor): MaybeActor,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let certificate =
    state.service.issue_certificate(actor.as_ref(), id).await?;
  Ok(success(&certificate))
}
