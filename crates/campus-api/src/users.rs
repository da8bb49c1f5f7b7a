//! Handler for `POST /api/auth/register`.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use campus_core::{
  store::CourseStore,
  user::{NewUser, Role},
  validate::FieldError,
};
use serde::Deserialize;

use crate::{AppState, auth::hash_password, error::ApiError, success};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub name:     String,
  pub email:    String,
  pub password: String,
  /// Defaults to student. Admin accounts are seeded from configuration,
  /// never self-registered.
  pub role:     Option<Role>,
}

fn validate_register(body: &RegisterBody) -> Result<Role, Vec<FieldError>> {
  let mut errors = Vec::new();

  let field = |field: &str, message: &str| FieldError {
    field:   field.into(),
    message: message.into(),
  };

  if body.name.trim().is_empty() {
    errors.push(field("name", "name is required"));
  }
  // Just presence and shape; real mail validation is the mailer's problem.
  if body.email.trim().is_empty() || !body.email.contains('@') {
    errors.push(field("email", "a valid email is required"));
  }
  if body.password.len() < 8 {
    errors.push(field("password", "password must be at least 8 characters"));
  }

  let role = body.role.unwrap_or(Role::Student);
  if role == Role::Admin {
    errors.push(field("role", "admin accounts cannot be self-registered"));
  }

  if errors.is_empty() { Ok(role) } else { Err(errors) }
}

/// `POST /api/auth/register` — body: [`RegisterBody`]; returns 201 + the
/// created user (without the credential hash).
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let role = validate_register(&body).map_err(ApiError::Validation)?;
  let password_hash = hash_password(&body.password)?;

  let user = state
    .service
    .register_user(NewUser {
      name: body.name.trim().to_owned(),
      email: body.email.trim().to_owned(),
      password_hash,
      role,
    })
    .await?;

  tracing::info!(user_id = %user.user_id, role = ?user.role, "user registered");
  Ok((StatusCode::CREATED, success(&user)))
}
