//! Payload validation for course create and update.
//!
//! Validation is a pure transformation: a raw payload either normalizes into
//! a store-ready value or fails with *every* offending field listed, so the
//! API can report precise per-field messages instead of failing on the first.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::course::{CourseChanges, CourseStatus, Level, NewCourse};

/// Rating bounds for reviews, inclusive.
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// One offending field with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
  pub field:   String,
  pub message: String,
}

impl FieldError {
  fn new(field: &str, message: &str) -> Self {
    Self { field: field.into(), message: message.into() }
  }
}

/// Raw course payload as received from the API. All fields optional so the
/// same shape serves create (where some are required) and update (where all
/// are optional).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoursePayload {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub category:    Option<String>,
  pub level:       Option<Level>,
  pub price:       Option<f64>,
  pub duration:    Option<String>,
  pub thumbnail:   Option<String>,
  pub status:      Option<CourseStatus>,
}

fn non_empty(value: Option<&String>) -> Option<String> {
  value
    .map(|s| s.trim())
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
}

fn check_price(price: f64, errors: &mut Vec<FieldError>) {
  if !price.is_finite() {
    errors.push(FieldError::new("price", "price must be a finite number"));
  } else if price < 0.0 {
    errors.push(FieldError::new("price", "price must not be negative"));
  }
}

/// Validate a create payload into a [`NewCourse`] owned by `instructor`.
///
/// `title` and `description` are required and must be non-empty after
/// trimming; `price` defaults to 0 when absent. The owning instructor and
/// default status are fixed here, not taken from the payload.
pub fn validate_create(
  payload:    &CoursePayload,
  instructor: Uuid,
) -> Result<NewCourse, Vec<FieldError>> {
  let mut errors = Vec::new();

  let title = non_empty(payload.title.as_ref());
  if title.is_none() {
    errors.push(FieldError::new("title", "title is required"));
  }

  let description = non_empty(payload.description.as_ref());
  if description.is_none() {
    errors.push(FieldError::new("description", "description is required"));
  }

  let price = payload.price.unwrap_or(0.0);
  check_price(price, &mut errors);

  if !errors.is_empty() {
    return Err(errors);
  }

  Ok(NewCourse {
    title: title.unwrap_or_default(),
    description: description.unwrap_or_default(),
    category: non_empty(payload.category.as_ref()),
    level: payload.level,
    price,
    duration: non_empty(payload.duration.as_ref()),
    thumbnail: non_empty(payload.thumbnail.as_ref()),
    status: payload.status.unwrap_or_default(),
    instructor,
  })
}

/// Validate a partial update. Only supplied fields are checked and carried
/// over; a supplied-but-empty `title` or `description` is an error rather
/// than a silent clear.
pub fn validate_update(
  payload: &CoursePayload,
) -> Result<CourseChanges, Vec<FieldError>> {
  let mut errors = Vec::new();

  let title = match payload.title.as_ref() {
    Some(raw) => match non_empty(Some(raw)) {
      Some(t) => Some(t),
      None => {
        errors.push(FieldError::new("title", "title must not be empty"));
        None
      }
    },
    None => None,
  };

  let description = match payload.description.as_ref() {
    Some(raw) => match non_empty(Some(raw)) {
      Some(d) => Some(d),
      None => {
        errors
          .push(FieldError::new("description", "description must not be empty"));
        None
      }
    },
    None => None,
  };

  if let Some(price) = payload.price {
    check_price(price, &mut errors);
  }

  if !errors.is_empty() {
    return Err(errors);
  }

  Ok(CourseChanges {
    title,
    description,
    category: payload.category.clone(),
    level: payload.level,
    price: payload.price,
    duration: payload.duration.clone(),
    thumbnail: payload.thumbnail.clone(),
    status: payload.status,
  })
}

/// Validate a review rating against the inclusive 1–5 range.
pub fn validate_rating(rating: u8) -> Result<u8, Vec<FieldError>> {
  if (RATING_MIN..=RATING_MAX).contains(&rating) {
    Ok(rating)
  } else {
    Err(vec![FieldError::new(
      "rating",
      "rating must be between 1 and 5",
    )])
  }
}
