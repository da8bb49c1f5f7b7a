//! Handlers for `/api/courses/:id/reviews`.
//!
//! Posting a second review for the same course replaces the first (upsert),
//! so a learner's revised opinion never creates a duplicate record.

use axum::{
  Json,
  extract::{Path, State},
  response::IntoResponse,
};
use campus_core::store::CourseStore;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, auth::MaybeActor, error::ApiError, success};

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
  pub rating:  u8,
  pub comment: Option<String>,
}

/// `POST /api/courses/:id/reviews` — body: `{"rating": 1..=5, "comment": "..."}`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  MaybeActor(actor): MaybeActor,
  Path(id): Path<Uuid>,
  Json(body): Json<ReviewBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let review = state
    .service
    .review(actor.as_ref(), id, body.rating, body.comment)
    .await?;
  Ok(success(&review))
}

/// `GET /api/courses/:id/reviews`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let reviews = state.service.list_reviews(id).await?;
  Ok(success(&reviews))
}
