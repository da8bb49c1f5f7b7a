//! Course service — orchestration of policy, validation, and the store.
//!
//! Every operation follows the same order: fetch the target (absent target
//! wins over a denied actor), consult the policy, validate the payload, then
//! read or write through the injected [`CourseStore`]. The service holds no
//! mutable state of its own, so a single instance is safely shared across
//! concurrent requests.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  course::{Certificate, Course, Enrollment, NewReview, Review},
  error::{Error, Result},
  policy::{Action, Decision, DenyReason, can_perform},
  store::{CourseQuery, CourseStore},
  user::{Actor, NewUser, User},
  validate::{
    CoursePayload, validate_create, validate_rating, validate_update,
  },
};

/// The orchestrator for all course use cases.
///
/// Cloning is cheap — the store is reference-counted.
#[derive(Clone)]
pub struct CourseService<S> {
  store: Arc<S>,
}

impl<S: CourseStore> CourseService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// The underlying store — used by the API layer's auth extractor.
  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Translate a policy decision into the error taxonomy.
  fn check(
    actor:  Option<&Actor>,
    course: Option<&Course>,
    action: Action,
  ) -> Result<()> {
    match can_perform(actor, course, action) {
      Decision::Allow => Ok(()),
      Decision::Deny(DenyReason::Unauthenticated) => {
        Err(Error::Unauthenticated)
      }
      Decision::Deny(DenyReason::Forbidden) => Err(Error::Forbidden),
    }
  }

  async fn fetch_course(&self, id: Uuid) -> Result<Course> {
    self
      .store
      .get_course(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::CourseNotFound(id))
  }

  // ── Users ─────────────────────────────────────────────────────────────

  /// Register a user. The caller supplies an already-hashed credential.
  pub async fn register_user(&self, input: NewUser) -> Result<User> {
    let email = input.email.clone();
    self
      .store
      .create_user(input)
      .await
      .map_err(Error::store)?
      .ok_or(Error::EmailTaken(email))
  }

  // ── Courses ───────────────────────────────────────────────────────────

  /// Create a course owned by `actor`. Requires instructor or admin role.
  pub async fn create_course(
    &self,
    actor:   Option<&Actor>,
    payload: &CoursePayload,
  ) -> Result<Course> {
    Self::check(actor, None, Action::Create)?;
    // The policy guarantees an actor past this point.
    let actor = actor.ok_or(Error::Unauthenticated)?;

    let new_course =
      validate_create(payload, actor.id).map_err(Error::Validation)?;

    self
      .store
      .create_course(new_course)
      .await
      .map_err(Error::store)
  }

  /// List courses. Safe for unauthenticated callers.
  pub async fn list_courses(&self, query: &CourseQuery) -> Result<Vec<Course>> {
    self.store.list_courses(query).await.map_err(Error::store)
  }

  /// Fetch one course. Safe for unauthenticated callers.
  pub async fn get_course(&self, id: Uuid) -> Result<Course> {
    self.fetch_course(id).await
  }

  /// Apply a partial update. Admin, or the owning instructor.
  pub async fn update_course(
    &self,
    actor:   Option<&Actor>,
    id:      Uuid,
    payload: &CoursePayload,
  ) -> Result<Course> {
    let course = self.fetch_course(id).await?;
    Self::check(actor, Some(&course), Action::Update)?;

    let changes = validate_update(payload).map_err(Error::Validation)?;

    self
      .store
      .update_course(id, changes)
      .await
      .map_err(Error::store)?
      // Deleted between fetch and write; surface as the same NotFound.
      .ok_or(Error::CourseNotFound(id))
  }

  /// Delete a course and, atomically, its enrollments and reviews.
  pub async fn delete_course(
    &self,
    actor: Option<&Actor>,
    id:    Uuid,
  ) -> Result<()> {
    let course = self.fetch_course(id).await?;
    Self::check(actor, Some(&course), Action::Delete)?;

    let removed =
      self.store.delete_course(id).await.map_err(Error::store)?;
    if !removed {
      return Err(Error::CourseNotFound(id));
    }
    Ok(())
  }

  // ── Enrollments ───────────────────────────────────────────────────────

  /// Enroll `actor` in a course. Duplicate enrollment is a Conflict, decided
  /// atomically at the store.
  pub async fn enroll(
    &self,
    actor: Option<&Actor>,
    id:    Uuid,
  ) -> Result<Enrollment> {
    let course = self.fetch_course(id).await?;
    Self::check(actor, Some(&course), Action::Enroll)?;
    let actor = actor.ok_or(Error::Unauthenticated)?;

    self
      .store
      .enroll(actor.id, id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::AlreadyEnrolled { user_id: actor.id, course_id: id })
  }

  /// Mark the caller's own enrollment as completed.
  pub async fn complete_enrollment(
    &self,
    actor: Option<&Actor>,
    id:    Uuid,
  ) -> Result<Enrollment> {
    let course = self.fetch_course(id).await?;
    Self::check(actor, Some(&course), Action::Enroll)?;
    let actor = actor.ok_or(Error::Unauthenticated)?;

    self
      .store
      .complete_enrollment(actor.id, id)
      .await
      .map_err(Error::store)?
      // Completing without being enrolled is an ownership failure.
      .ok_or(Error::Forbidden)
  }

  // ── Reviews ───────────────────────────────────────────────────────────

  /// Record or replace the caller's review. Requires a prior enrollment.
  pub async fn review(
    &self,
    actor:   Option<&Actor>,
    id:      Uuid,
    rating:  u8,
    comment: Option<String>,
  ) -> Result<Review> {
    let course = self.fetch_course(id).await?;
    Self::check(actor, Some(&course), Action::Review)?;
    let actor = actor.ok_or(Error::Unauthenticated)?;

    let rating = validate_rating(rating).map_err(Error::Validation)?;

    let enrolled = self
      .store
      .get_enrollment(actor.id, id)
      .await
      .map_err(Error::store)?;
    if enrolled.is_none() {
      return Err(Error::Forbidden);
    }

    self
      .store
      .upsert_review(NewReview {
        user_id: actor.id,
        course_id: id,
        rating,
        comment,
      })
      .await
      .map_err(Error::store)
  }

  /// All reviews for a course. Safe for unauthenticated callers.
  pub async fn list_reviews(&self, id: Uuid) -> Result<Vec<Review>> {
    self.fetch_course(id).await?;
    self.store.list_reviews(id).await.map_err(Error::store)
  }

  // ── Certificates ──────────────────────────────────────────────────────

  /// Issue a completion certificate. Requires an enrollment with a
  /// completion timestamp; anything less is Forbidden.
  pub async fn issue_certificate(
    &self,
    actor: Option<&Actor>,
    id:    Uuid,
  ) -> Result<Certificate> {
    let course = self.fetch_course(id).await?;
    Self::check(actor, Some(&course), Action::DownloadCertificate)?;
    let actor = actor.ok_or(Error::Unauthenticated)?;

    let enrollment = self
      .store
      .get_enrollment(actor.id, id)
      .await
      .map_err(Error::store)?;

    let completed_at = match enrollment {
      Some(ref e) if e.is_completed() => e.completed_at,
      _ => return Err(Error::Forbidden),
    }
    .ok_or(Error::Forbidden)?;

    let user = self
      .store
      .get_user(actor.id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::UserNotFound(actor.id))?;

    Ok(Certificate::issue(
      user.user_id,
      &user.name,
      course.course_id,
      &course.title,
      completed_at,
    ))
  }
}
