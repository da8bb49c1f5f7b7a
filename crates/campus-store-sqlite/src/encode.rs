//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Closed enumerations (role,
//! level, status) are stored as their lowercase names. UUIDs are stored as
//! hyphenated lowercase strings.

use campus_core::{
  course::{Course, CourseStatus, Enrollment, Level, Review},
  user::{Role, User},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Role ────────────────────────────────────────────────────────────────────

pub fn encode_role(r: Role) -> &'static str {
  match r {
    Role::Student => "student",
    Role::Instructor => "instructor",
    Role::Admin => "admin",
  }
}

pub fn decode_role(s: &str) -> Result<Role> {
  match s {
    "student" => Ok(Role::Student),
    "instructor" => Ok(Role::Instructor),
    "admin" => Ok(Role::Admin),
    other => Err(Error::UnknownEnum { column: "role", value: other.into() }),
  }
}

// ─── Level ───────────────────────────────────────────────────────────────────

pub fn encode_level(l: Level) -> &'static str {
  match l {
    Level::Beginner => "beginner",
    Level::Intermediate => "intermediate",
    Level::Advanced => "advanced",
  }
}

pub fn decode_level(s: &str) -> Result<Level> {
  match s {
    "beginner" => Ok(Level::Beginner),
    "intermediate" => Ok(Level::Intermediate),
    "advanced" => Ok(Level::Advanced),
    other => Err(Error::UnknownEnum { column: "level", value: other.into() }),
  }
}

// ─── CourseStatus ────────────────────────────────────────────────────────────

pub fn encode_status(s: CourseStatus) -> &'static str {
  match s {
    CourseStatus::Draft => "draft",
    CourseStatus::Published => "published",
    CourseStatus::Archived => "archived",
  }
}

pub fn decode_status(s: &str) -> Result<CourseStatus> {
  match s {
    "draft" => Ok(CourseStatus::Draft),
    "published" => Ok(CourseStatus::Published),
    "archived" => Ok(CourseStatus::Archived),
    other => Err(Error::UnknownEnum { column: "status", value: other.into() }),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:       String,
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
  pub role:          String,
  pub created_at:    String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:       decode_uuid(&self.user_id)?,
      name:          self.name,
      email:         self.email,
      password_hash: self.password_hash,
      role:          decode_role(&self.role)?,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `courses` row.
pub struct RawCourse {
  pub course_id:   String,
  pub title:       String,
  pub description: String,
  pub category:    Option<String>,
  pub level:       Option<String>,
  pub price:       f64,
  pub duration:    Option<String>,
  pub thumbnail:   Option<String>,
  pub status:      String,
  pub instructor:  String,
  pub created_at:  String,
}

impl RawCourse {
  pub fn into_course(self) -> Result<Course> {
    Ok(Course {
      course_id:   decode_uuid(&self.course_id)?,
      title:       self.title,
      description: self.description,
      category:    self.category,
      level:       self.level.as_deref().map(decode_level).transpose()?,
      price:       self.price,
      duration:    self.duration,
      thumbnail:   self.thumbnail,
      status:      decode_status(&self.status)?,
      instructor:  decode_uuid(&self.instructor)?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `enrollments` row.
pub struct RawEnrollment {
  pub enrollment_id: String,
  pub user_id:       String,
  pub course_id:     String,
  pub enrolled_at:   String,
  pub completed_at:  Option<String>,
}

impl RawEnrollment {
  pub fn into_enrollment(self) -> Result<Enrollment> {
    Ok(Enrollment {
      enrollment_id: decode_uuid(&self.enrollment_id)?,
      user_id:       decode_uuid(&self.user_id)?,
      course_id:     decode_uuid(&self.course_id)?,
      enrolled_at:   decode_dt(&self.enrolled_at)?,
      completed_at:  self
        .completed_at
        .as_deref()
        .map(decode_dt)
        .transpose()?,
    })
  }
}

/// Raw strings read directly from a `reviews` row.
pub struct RawReview {
  pub review_id:   String,
  pub user_id:     String,
  pub course_id:   String,
  pub rating:      i64,
  pub comment:     Option<String>,
  pub recorded_at: String,
}

impl RawReview {
  pub fn into_review(self) -> Result<Review> {
    Ok(Review {
      review_id:   decode_uuid(&self.review_id)?,
      user_id:     decode_uuid(&self.user_id)?,
      course_id:   decode_uuid(&self.course_id)?,
      // The CHECK constraint keeps the column inside 1..=5.
      rating:      self.rating as u8,
      comment:     self.comment,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}
