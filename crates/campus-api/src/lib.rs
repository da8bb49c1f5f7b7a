//! JSON REST API for the Campus course platform.
//!
//! Exposes an axum [`Router`] backed by any [`campus_core::store::CourseStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! Success responses wrap their payload in `{ "success": true, "data": ... }`;
//! errors produce `{ "success": false, "error": ... }` with the status codes
//! described in [`error::ApiError`].

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod error;
pub mod reviews;
pub mod users;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  routing::{get, post},
};
use campus_core::{service::CourseService, store::CourseStore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Optional admin account inserted at startup if the email is not yet
  /// registered. The hash is an argon2 PHC string (`server --hash-password`).
  pub admin_email:         Option<String>,
  pub admin_name:          Option<String>,
  pub admin_password_hash: Option<String>,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CourseStore> {
  pub service: CourseService<S>,
  pub config:  Arc<ServerConfig>,
}

// ─── Envelope helper ─────────────────────────────────────────────────────────

/// Wrap a payload in the `{ "success": true, "data": ... }` envelope.
pub(crate) fn success<T: Serialize>(data: &T) -> Json<serde_json::Value> {
  Json(json!({ "success": true, "data": data }))
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Courses
    .route(
      "/api/courses",
      get(courses::list::<S>).post(courses::create::<S>),
    )
    .route(
      "/api/courses/{id}",
      get(courses::get_one::<S>)
        .put(courses::update::<S>)
        .delete(courses::delete::<S>),
    )
    // Enrollment lifecycle
    .route("/api/courses/{id}/enroll", post(enrollments::enroll::<S>))
    .route("/api/courses/{id}/complete", post(enrollments::complete::<S>))
    .route(
      "/api/courses/{id}/certificate",
      get(enrollments::certificate::<S>),
    )
    // Reviews
    .route(
      "/api/courses/{id}/reviews",
      get(reviews::list::<S>).post(reviews::create::<S>),
    )
    // Registration
    .route("/api/auth/register", post(users::register::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
