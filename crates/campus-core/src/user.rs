//! User identity and the closed role enumeration.
//!
//! Roles are a closed set so the authorization policy can be written as an
//! exhaustive match rather than string comparisons scattered across handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role a user holds on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Student,
  Instructor,
  Admin,
}

/// A registered user.
///
/// The password hash is an argon2 PHC string. It is deliberately skipped
/// during serialization so it can never leak into an API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:    Uuid,
  pub name:       String,
  pub email:      String,
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub role:       Role,
  pub created_at: DateTime<Utc>,
}

/// Input for registering a user. The store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
  pub role:          Role,
}

/// The resolved identity of a request, passed explicitly through every
/// service call. `Option<Actor>` distinguishes unauthenticated callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
  pub id:   Uuid,
  pub role: Role,
}

impl Actor {
  pub fn new(id: Uuid, role: Role) -> Self { Self { id, role } }
}

impl From<&User> for Actor {
  fn from(user: &User) -> Self {
    Self { id: user.user_id, role: user.role }
  }
}
