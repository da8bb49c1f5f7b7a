//! HTTP Basic-auth actor resolution.
//!
//! The authentication collaborator of the course service: given a request,
//! yield either a resolved [`Actor`] or "unauthenticated". A missing
//! `Authorization` header resolves to `None` (anonymous reads are legal); a
//! header that is present but does not verify is an error.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use campus_core::{store::CourseStore, user::Actor};
use rand_core::OsRng;

use crate::{AppState, error::ApiError};

/// Produce an argon2 PHC string for a plaintext password.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::Internal(format!("argon2: {e}").into()))
}

fn decode_basic(headers: &HeaderMap) -> Result<Option<(String, String)>, ApiError> {
  let Some(header_val) = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
  else {
    return Ok(None);
  };

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthenticated)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthenticated)?;
  let creds =
    std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthenticated)?;

  let (email, password) =
    creds.split_once(':').ok_or(ApiError::Unauthenticated)?;
  Ok(Some((email.to_owned(), password.to_owned())))
}

/// Resolve the actor for a request, if any.
///
/// `Ok(None)` means no credential was presented. Any presented-but-invalid
/// credential — unknown email included — fails identically, so the response
/// does not reveal which emails are registered.
pub async fn resolve_actor<S>(
  headers: &HeaderMap,
  store:   &S,
) -> Result<Option<Actor>, ApiError>
where
  S: CourseStore,
{
  let Some((email, password)) = decode_basic(headers)? else {
    return Ok(None);
  };

  let user = store
    .get_user_by_email(&email)
    .await
    .map_err(|e| ApiError::Internal(Box::new(e)))?
    .ok_or(ApiError::Unauthenticated)?;

  let parsed_hash = PasswordHash::new(&user.password_hash)
    .map_err(|_| ApiError::Unauthenticated)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthenticated)?;

  Ok(Some(Actor::from(&user)))
}

/// Extractor form of [`resolve_actor`] — `MaybeActor(None)` for anonymous
/// requests, rejection for invalid credentials.
pub struct MaybeActor(pub Option<Actor>);

impl<S> FromRequestParts<AppState<S>> for MaybeActor
where
  S: CourseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let actor =
      resolve_actor(&parts.headers, state.service.store().as_ref()).await?;
    Ok(MaybeActor(actor))
  }
}
