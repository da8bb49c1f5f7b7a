//! Integration tests for `SqliteStore` against an in-memory database.

use campus_core::{
  course::{CourseChanges, CourseStatus, Level, NewCourse, NewReview},
  store::{CourseQuery, CourseStore},
  user::{NewUser, Role},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_user(email: &str, role: Role) -> NewUser {
  NewUser {
    name:          "Test User".into(),
    email:         email.into(),
    password_hash: "$argon2id$v=19$stub".into(),
    role,
  }
}

fn new_course(instructor: Uuid, title: &str) -> NewCourse {
  NewCourse {
    title:       title.into(),
    description: "A description".into(),
    category:    Some("programming".into()),
    level:       Some(Level::Beginner),
    price:       999.0,
    duration:    Some("4 weeks".into()),
    thumbnail:   None,
    status:      CourseStatus::Published,
    instructor,
  }
}

async fn seeded_instructor(s: &SqliteStore) -> Uuid {
  let n = Uuid::new_v4();
  s.create_user(new_user(&format!("{n}@example.com"), Role::Instructor))
    .await
    .unwrap()
    .unwrap()
    .user_id
}

async fn seeded_student(s: &SqliteStore) -> Uuid {
  let n = Uuid::new_v4();
  s.create_user(new_user(&format!("{n}@example.com"), Role::Student))
    .await
    .unwrap()
    .unwrap()
    .user_id
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_user() {
  let s = store().await;

  let user = s
    .create_user(new_user("alice@example.com", Role::Student))
    .await
    .unwrap()
    .expect("fresh email inserts");
  assert_eq!(user.role, Role::Student);

  let fetched = s.get_user(user.user_id).await.unwrap().unwrap();
  assert_eq!(fetched.email, "alice@example.com");

  let by_email = s
    .get_user_by_email("alice@example.com")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(by_email.user_id, user.user_id);
}

#[tokio::test]
async fn duplicate_email_returns_none() {
  let s = store().await;

  s.create_user(new_user("bob@example.com", Role::Student))
    .await
    .unwrap()
    .expect("first insert");
  let second = s
    .create_user(new_user("bob@example.com", Role::Instructor))
    .await
    .unwrap();
  assert!(second.is_none());
}

// ─── Courses ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get_preserves_fields() {
  let s = store().await;
  let instructor = seeded_instructor(&s).await;

  let created = s
    .create_course(new_course(instructor, "Test Course"))
    .await
    .unwrap();

  let fetched = s.get_course(created.course_id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "Test Course");
  assert_eq!(fetched.price, 999.0);
  assert_eq!(fetched.duration.as_deref(), Some("4 weeks"));
  assert_eq!(fetched.level, Some(Level::Beginner));
  assert_eq!(fetched.instructor, instructor);
}

#[tokio::test]
async fn get_course_missing_returns_none() {
  let s = store().await;
  assert!(s.get_course(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_courses_filters() {
  let s = store().await;
  let a = seeded_instructor(&s).await;
  let b = seeded_instructor(&s).await;

  s.create_course(new_course(a, "Course A")).await.unwrap();
  s.create_course(new_course(a, "Course B")).await.unwrap();
  let mut other = new_course(b, "Course C");
  other.category = Some("design".into());
  other.level = Some(Level::Advanced);
  s.create_course(other).await.unwrap();

  let all = s.list_courses(&CourseQuery::default()).await.unwrap();
  assert_eq!(all.len(), 3);

  let by_instructor = s
    .list_courses(&CourseQuery { instructor: Some(a), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(by_instructor.len(), 2);

  let by_category = s
    .list_courses(&CourseQuery {
      category: Some("design".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(by_category.len(), 1);
  assert_eq!(by_category[0].title, "Course C");

  let by_level = s
    .list_courses(&CourseQuery {
      level: Some(Level::Advanced),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(by_level.len(), 1);
}

#[tokio::test]
async fn update_applies_only_supplied_fields() {
  let s = store().await;
  let instructor = seeded_instructor(&s).await;
  let course = s
    .create_course(new_course(instructor, "Original"))
    .await
    .unwrap();

  let updated = s
    .update_course(
      course.course_id,
      CourseChanges { price: Some(1999.0), ..Default::default() },
    )
    .await
    .unwrap()
    .expect("course exists");

  assert_eq!(updated.price, 1999.0);
  assert_eq!(updated.title, "Original");
  assert_eq!(updated.duration.as_deref(), Some("4 weeks"));
  // The owning instructor is immutable through updates.
  assert_eq!(updated.instructor, instructor);
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let result = s
    .update_course(Uuid::new_v4(), CourseChanges::default())
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn delete_cascades_to_dependents() {
  let s = store().await;
  let instructor = seeded_instructor(&s).await;
  let student = seeded_student(&s).await;
  let course = s
    .create_course(new_course(instructor, "Doomed"))
    .await
    .unwrap();

  s.enroll(student, course.course_id).await.unwrap().unwrap();
  s.upsert_review(NewReview {
    user_id:   student,
    course_id: course.course_id,
    rating:    4,
    comment:   None,
  })
  .await
  .unwrap();

  assert!(s.delete_course(course.course_id).await.unwrap());

  assert!(s.get_course(course.course_id).await.unwrap().is_none());
  assert!(
    s.get_enrollment(student, course.course_id)
      .await
      .unwrap()
      .is_none()
  );
  assert!(s.list_reviews(course.course_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete_course(Uuid::new_v4()).await.unwrap());
}

// ─── Enrollments ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn enroll_is_unique_per_user_course() {
  let s = store().await;
  let instructor = seeded_instructor(&s).await;
  let student = seeded_student(&s).await;
  let course = s
    .create_course(new_course(instructor, "Course"))
    .await
    .unwrap();

  let first = s.enroll(student, course.course_id).await.unwrap();
  assert!(first.is_some());

  // Second insert loses to the UNIQUE constraint.
  let second = s.enroll(student, course.course_id).await.unwrap();
  assert!(second.is_none());

  let stored = s
    .get_enrollment(student, course.course_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(stored.enrollment_id, first.unwrap().enrollment_id);
}

#[tokio::test]
async fn complete_enrollment_is_idempotent() {
  let s = store().await;
  let instructor = seeded_instructor(&s).await;
  let student = seeded_student(&s).await;
  let course = s
    .create_course(new_course(instructor, "Course"))
    .await
    .unwrap();

  s.enroll(student, course.course_id).await.unwrap().unwrap();

  let done = s
    .complete_enrollment(student, course.course_id)
    .await
    .unwrap()
    .unwrap();
  let first_at = done.completed_at.expect("completed");

  // The original completion timestamp is kept.
  let again = s
    .complete_enrollment(student, course.course_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(again.completed_at, Some(first_at));
}

#[tokio::test]
async fn complete_without_enrollment_returns_none() {
  let s = store().await;
  let instructor = seeded_instructor(&s).await;
  let student = seeded_student(&s).await;
  let course = s
    .create_course(new_course(instructor, "Course"))
    .await
    .unwrap();

  let result = s
    .complete_enrollment(student, course.course_id)
    .await
    .unwrap();
  assert!(result.is_none());
}

// ─── Reviews ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_review_replaces_prior() {
  let s = store().await;
  let instructor = seeded_instructor(&s).await;
  let student = seeded_student(&s).await;
  let course = s
    .create_course(new_course(instructor, "Course"))
    .await
    .unwrap();
  s.enroll(student, course.course_id).await.unwrap().unwrap();

  s.upsert_review(NewReview {
    user_id:   student,
    course_id: course.course_id,
    rating:    2,
    comment:   Some("meh".into()),
  })
  .await
  .unwrap();

  s.upsert_review(NewReview {
    user_id:   student,
    course_id: course.course_id,
    rating:    5,
    comment:   Some("much better second time".into()),
  })
  .await
  .unwrap();

  let reviews = s.list_reviews(course.course_id).await.unwrap();
  assert_eq!(reviews.len(), 1);
  assert_eq!(reviews[0].rating, 5);
  assert_eq!(reviews[0].comment.as_deref(), Some("much better second time"));
}

#[tokio::test]
async fn reviews_from_different_users_coexist() {
  let s = store().await;
  let instructor = seeded_instructor(&s).await;
  let course = s
    .create_course(new_course(instructor, "Course"))
    .await
    .unwrap();

  for rating in [3, 4] {
    let student = seeded_student(&s).await;
    s.enroll(student, course.course_id).await.unwrap().unwrap();
    s.upsert_review(NewReview {
      user_id:   student,
      course_id: course.course_id,
      rating,
      comment:   None,
    })
    .await
    .unwrap();
  }

  let reviews = s.list_reviews(course.course_id).await.unwrap();
  assert_eq!(reviews.len(), 2);
}
