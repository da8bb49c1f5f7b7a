//! The `CourseStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `campus-store-sqlite`).
//! Higher layers (`campus-api`, the service) depend on this abstraction, not
//! on any concrete backend, so tests can substitute an in-memory fake.

use std::future::Future;

use uuid::Uuid;

use crate::{
  course::{
    Course, CourseChanges, Enrollment, Level, NewCourse, NewReview, Review,
  },
  user::{NewUser, User},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`CourseStore::list_courses`].
#[derive(Debug, Clone, Default)]
pub struct CourseQuery {
  /// Exact-match filter on category.
  pub category:   Option<String>,
  pub level:      Option<Level>,
  /// Restrict to courses owned by this instructor.
  pub instructor: Option<Uuid>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Campus storage backend.
///
/// Uniqueness invariants — one enrollment and one review per (user, course),
/// one user per email — are the backend's responsibility and must be enforced
/// atomically (a constraint or insert-if-absent), never by read-then-write in
/// a caller. `Option`-returning writes signal "lost to the constraint":
/// `None` from [`enroll`](Self::enroll) means already enrolled, `None` from
/// [`create_user`](Self::create_user) means the email is taken.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CourseStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new user. Returns `None` if the email is already registered.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Look up a user by email — the authentication path.
  fn get_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  // ── Courses ───────────────────────────────────────────────────────────

  /// Persist a validated course and return the stored record, including the
  /// generated identifier and timestamp.
  fn create_course(
    &self,
    input: NewCourse,
  ) -> impl Future<Output = Result<Course, Self::Error>> + Send + '_;

  fn get_course(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Course>, Self::Error>> + Send + '_;

  fn list_courses<'a>(
    &'a self,
    query: &'a CourseQuery,
  ) -> impl Future<Output = Result<Vec<Course>, Self::Error>> + Send + 'a;

  /// Apply the supplied field changes. Returns the updated record, or `None`
  /// if the course does not exist.
  fn update_course(
    &self,
    id: Uuid,
    changes: CourseChanges,
  ) -> impl Future<Output = Result<Option<Course>, Self::Error>> + Send + '_;

  /// Remove a course together with its enrollments and reviews, atomically
  /// with respect to concurrent readers. Returns `false` if absent.
  fn delete_course(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Enrollments ───────────────────────────────────────────────────────

  /// Atomically create an enrollment if none exists for (user, course).
  /// Returns `None` when the pair is already enrolled.
  fn enroll(
    &self,
    user_id: Uuid,
    course_id: Uuid,
  ) -> impl Future<Output = Result<Option<Enrollment>, Self::Error>> + Send + '_;

  fn get_enrollment(
    &self,
    user_id: Uuid,
    course_id: Uuid,
  ) -> impl Future<Output = Result<Option<Enrollment>, Self::Error>> + Send + '_;

  /// Mark an enrollment completed (idempotent — an already-set completion
  /// timestamp is kept). Returns `None` if the pair is not enrolled.
  fn complete_enrollment(
    &self,
    user_id: Uuid,
    course_id: Uuid,
  ) -> impl Future<Output = Result<Option<Enrollment>, Self::Error>> + Send + '_;

  // ── Reviews ───────────────────────────────────────────────────────────

  /// Insert or replace the (user, course) review in one atomic operation.
  fn upsert_review(
    &self,
    input: NewReview,
  ) -> impl Future<Output = Result<Review, Self::Error>> + Send + '_;

  fn list_reviews(
    &self,
    course_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Review>, Self::Error>> + Send + '_;
}
