//! Handlers for `/api/courses` CRUD endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/courses` | Optional `category`, `level`, `instructor` filters; no auth |
//! | `POST`   | `/api/courses` | Instructor or admin; 201 with created record |
//! | `GET`    | `/api/courses/:id` | No auth; 404 if absent |
//! | `PUT`    | `/api/courses/:id` | Admin or owning instructor; partial update |
//! | `DELETE` | `/api/courses/:id` | Admin or owning instructor; cascades |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use campus_core::{
  course::Level,
  store::{CourseQuery, CourseStore},
  validate::CoursePayload,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError, auth::MaybeActor, success};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub category:   Option<String>,
  pub level:      Option<Level>,
  pub instructor: Option<Uuid>,
}

/// `GET /api/courses[?category=...][&level=...][&instructor=...]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = CourseQuery {
    category:   params.category,
    level:      params.level,
    instructor: params.instructor,
  };
  let courses = state.service.list_courses(&query).await?;
  Ok(success(&courses))
}

/// `POST /api/courses` — body: [`CoursePayload`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  MaybeActor(actor): MaybeActor,
  Json(payload): Json<CoursePayload>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let course = state
    .service
    .create_course(actor.as_ref(), &payload)
    .await?;
  tracing::info!(course_id = %course.course_id, "course created");
  Ok((StatusCode::CREATED, success(&course)))
}

/// `GET /api/courses/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let course = state.service.get_course(id).await?;
  Ok(success(&course))
}

/// `PUT /api/courses/:id` — partial update; omitted fields are unchanged.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  MaybeActor(actor): MaybeActor,
  Path(id): Path<Uuid>,
  Json(payload): Json<CoursePayload>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let course = state
    .service
    .update_course(actor.as_ref(), id, &payload)
    .await?;
  Ok(success(&course))
}

/// `DELETE /api/courses/:id`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  MaybeActor(actor): MaybeActor,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state.service.delete_course(actor.as_ref(), id).await?;
  tracing::info!(course_id = %id, "course deleted");
  Ok(success(&serde_json::json!({ "deleted": id })))
}
