//! Course, enrollment, review, and certificate types.
//!
//! A course is owned by exactly one instructor. Enrollments and reviews are
//! dependent records keyed by (user, course); their uniqueness is enforced at
//! the store layer, never by read-then-write in the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use uuid::Uuid;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Difficulty level of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Beginner,
  Intermediate,
  Advanced,
}

/// Publication status of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
  Draft,
  #[default]
  Published,
  Archived,
}

// ─── Course ──────────────────────────────────────────────────────────────────

/// A course record.
///
/// Serialized with `_id` as the identifier field name — the JSON shape the
/// admin console consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
  #[serde(rename = "_id")]
  pub course_id:   Uuid,
  pub title:       String,
  pub description: String,
  pub category:    Option<String>,
  pub level:       Option<Level>,
  pub price:       f64,
  pub duration:    Option<String>,
  pub thumbnail:   Option<String>,
  pub status:      CourseStatus,
  /// The owning instructor. Immutable after creation.
  pub instructor:  Uuid,
  pub created_at:  DateTime<Utc>,
}

/// A validated, normalized course ready for insertion. Produced only by
/// [`crate::validate::validate_create`]; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewCourse {
  pub title:       String,
  pub description: String,
  pub category:    Option<String>,
  pub level:       Option<Level>,
  pub price:       f64,
  pub duration:    Option<String>,
  pub thumbnail:   Option<String>,
  pub status:      CourseStatus,
  pub instructor:  Uuid,
}

/// Field-level changes for a partial update. `None` means "leave unchanged".
/// Identity fields (`_id`, `instructor`) are not representable here, so any
/// attempt to set them is structurally ignored.
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub category:    Option<String>,
  pub level:       Option<Level>,
  pub price:       Option<f64>,
  pub duration:    Option<String>,
  pub thumbnail:   Option<String>,
  pub status:      Option<CourseStatus>,
}

impl CourseChanges {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.description.is_none()
      && self.category.is_none()
      && self.level.is_none()
      && self.price.is_none()
      && self.duration.is_none()
      && self.thumbnail.is_none()
      && self.status.is_none()
  }
}

// ─── Dependent records ───────────────────────────────────────────────────────

/// A user's membership in a course. Unique per (user, course).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
  pub enrollment_id: Uuid,
  pub user_id:       Uuid,
  pub course_id:     Uuid,
  pub enrolled_at:   DateTime<Utc>,
  /// Set once the learner finishes the course; gates certificate issuance.
  pub completed_at:  Option<DateTime<Utc>>,
}

impl Enrollment {
  pub fn is_completed(&self) -> bool { self.completed_at.is_some() }
}

/// Input for recording a review. The store assigns id and timestamp, and
/// replaces any prior review by the same (user, course) pair.
#[derive(Debug, Clone)]
pub struct NewReview {
  pub user_id:   Uuid,
  pub course_id: Uuid,
  pub rating:    u8,
  pub comment:   Option<String>,
}

/// A user's review of a course. Unique per (user, course); re-reviewing
/// replaces the prior record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
  pub review_id:   Uuid,
  pub user_id:     Uuid,
  pub course_id:   Uuid,
  pub rating:      u8,
  pub comment:     Option<String>,
  pub recorded_at: DateTime<Utc>,
}

// ─── Certificate ─────────────────────────────────────────────────────────────

/// A completion certificate — derived on demand, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
  pub user_name:    String,
  pub course_title: String,
  pub completed_at: DateTime<Utc>,
  pub issued_at:    DateTime<Utc>,
  /// Stable hex serial derived from the (user, course, completion) triple.
  pub serial:       String,
}

impl Certificate {
  /// Issue a certificate for a completed enrollment.
  pub fn issue(
    user_id:      Uuid,
    user_name:    &str,
    course_id:    Uuid,
    course_title: &str,
    completed_at: DateTime<Utc>,
  ) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_bytes());
    hasher.update(course_id.as_bytes());
    hasher.update(completed_at.to_rfc3339().as_bytes());
    let serial = hex::encode(hasher.finalize());

    Self {
      user_name: user_name.to_owned(),
      course_title: course_title.to_owned(),
      completed_at,
      issued_at: Utc::now(),
      serial,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn certificate_serial_is_stable() {
    let user = Uuid::new_v4();
    let course = Uuid::new_v4();
    let at = Utc::now();

    let a = Certificate::issue(user, "Alice", course, "Rust 101", at);
    let b = Certificate::issue(user, "Alice", course, "Rust 101", at);
    assert_eq!(a.serial, b.serial);
    assert_eq!(a.serial.len(), 64);
  }

  #[test]
  fn certificate_serial_differs_per_course() {
    let user = Uuid::new_v4();
    let at = Utc::now();

    let a = Certificate::issue(user, "Alice", Uuid::new_v4(), "Rust 101", at);
    let b = Certificate::issue(user, "Alice", Uuid::new_v4(), "Rust 102", at);
    assert_ne!(a.serial, b.serial);
  }

  #[test]
  fn course_serializes_with_underscore_id() {
    let course = Course {
      course_id:   Uuid::new_v4(),
      title:       "Test Course".into(),
      description: "A course".into(),
      category:    None,
      level:       Some(Level::Beginner),
      price:       999.0,
      duration:    Some("4 weeks".into()),
      thumbnail:   None,
      status:      CourseStatus::Published,
      instructor:  Uuid::new_v4(),
      created_at:  Utc::now(),
    };

    let json = serde_json::to_value(&course).unwrap();
    assert!(json.get("_id").is_some());
    assert_eq!(json["price"], 999.0);
    assert_eq!(json["level"], "beginner");
  }
}
