//! [`SqliteStore`] — the SQLite implementation of [`CourseStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use campus_core::{
  course::{
    Course, CourseChanges, Enrollment, NewCourse, NewReview, Review,
  },
  store::{CourseQuery, CourseStore},
  user::{NewUser, User},
};

use crate::{
  Error, Result,
  encode::{
    RawCourse, RawEnrollment, RawReview, RawUser, encode_dt, encode_level,
    encode_role, encode_status, encode_uuid,
  },
  schema::SCHEMA,
};

const COURSE_COLUMNS: &str = "course_id, title, description, category, \
   level, price, duration, thumbnail, status, instructor, created_at";

fn course_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCourse> {
  Ok(RawCourse {
    course_id:   row.get(0)?,
    title:       row.get(1)?,
    description: row.get(2)?,
    category:    row.get(3)?,
    level:       row.get(4)?,
    price:       row.get(5)?,
    duration:    row.get(6)?,
    thumbnail:   row.get(7)?,
    status:      row.get(8)?,
    instructor:  row.get(9)?,
    created_at:  row.get(10)?,
  })
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    user_id:       row.get(0)?,
    name:          row.get(1)?,
    email:         row.get(2)?,
    password_hash: row.get(3)?,
    role:          row.get(4)?,
    created_at:    row.get(5)?,
  })
}

fn enrollment_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawEnrollment> {
  Ok(RawEnrollment {
    enrollment_id: row.get(0)?,
    user_id:       row.get(1)?,
    course_id:     row.get(2)?,
    enrolled_at:   row.get(3)?,
    completed_at:  row.get(4)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Campus course store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CourseStore impl ────────────────────────────────────────────────────────

impl CourseStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<Option<User>> {
    let user = User {
      user_id:       Uuid::new_v4(),
      name:          input.name,
      email:         input.email,
      password_hash: input.password_hash,
      role:          input.role,
      created_at:    Utc::now(),
    };

    let id_str   = encode_uuid(user.user_id);
    let name     = user.name.clone();
    let email    = user.email.clone();
    let hash     = user.password_hash.clone();
    let role_str = encode_role(user.role).to_owned();
    let at_str   = encode_dt(user.created_at);

    // The email UNIQUE constraint decides the race, not a prior SELECT.
    let inserted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO users (user_id, name, email, password_hash, role, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT (email) DO NOTHING",
          rusqlite::params![id_str, name, email, hash, role_str, at_str],
        )?)
      })
      .await?;

    Ok((inserted > 0).then_some(user))
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, name, email, password_hash, role, created_at
               FROM users WHERE user_id = ?1",
              rusqlite::params![id_str],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, name, email, password_hash, role, created_at
               FROM users WHERE email = ?1",
              rusqlite::params![email],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  // ── Courses ───────────────────────────────────────────────────────────────

  async fn create_course(&self, input: NewCourse) -> Result<Course> {
    let course = Course {
      course_id:   Uuid::new_v4(),
      title:       input.title,
      description: input.description,
      category:    input.category,
      level:       input.level,
      price:       input.price,
      duration:    input.duration,
      thumbnail:   input.thumbnail,
      status:      input.status,
      instructor:  input.instructor,
      created_at:  Utc::now(),
    };

    let id_str         = encode_uuid(course.course_id);
    let title          = course.title.clone();
    let description    = course.description.clone();
    let category       = course.category.clone();
    let level_str      = course.level.map(encode_level).map(str::to_owned);
    let price          = course.price;
    let duration       = course.duration.clone();
    let thumbnail      = course.thumbnail.clone();
    let status_str     = encode_status(course.status).to_owned();
    let instructor_str = encode_uuid(course.instructor);
    let at_str         = encode_dt(course.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO courses (
             course_id, title, description, category, level,
             price, duration, thumbnail, status, instructor, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id_str,
            title,
            description,
            category,
            level_str,
            price,
            duration,
            thumbnail,
            status_str,
            instructor_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(course)
  }

  async fn get_course(&self, id: Uuid) -> Result<Option<Course>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCourse> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {COURSE_COLUMNS} FROM courses WHERE course_id = ?1"
              ),
              rusqlite::params![id_str],
              course_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCourse::into_course).transpose()
  }

  async fn list_courses(&self, query: &CourseQuery) -> Result<Vec<Course>> {
    let category       = query.category.clone();
    let level_str      = query.level.map(encode_level).map(str::to_owned);
    let instructor_str = query.instructor.map(encode_uuid);

    let raws: Vec<RawCourse> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COURSE_COLUMNS} FROM courses
           WHERE (?1 IS NULL OR category   = ?1)
             AND (?2 IS NULL OR level      = ?2)
             AND (?3 IS NULL OR instructor = ?3)
           ORDER BY created_at"
        ))?;

        let rows = stmt
          .query_map(
            rusqlite::params![
              category.as_deref(),
              level_str.as_deref(),
              instructor_str.as_deref(),
            ],
            course_from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCourse::into_course).collect()
  }

  async fn update_course(
    &self,
    id: Uuid,
    changes: CourseChanges,
  ) -> Result<Option<Course>> {
    let id_str     = encode_uuid(id);
    let level_str  = changes.level.map(encode_level).map(str::to_owned);
    let status_str = changes.status.map(encode_status).map(str::to_owned);
    let CourseChanges {
      title,
      description,
      category,
      price,
      duration,
      thumbnail,
      ..
    } = changes;

    // Read-merge-write inside one transaction so a concurrent delete can
    // never interleave between the fetch and the update.
    let raw: Option<RawCourse> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let existing: Option<RawCourse> = tx
          .query_row(
            &format!(
              "SELECT {COURSE_COLUMNS} FROM courses WHERE course_id = ?1"
            ),
            rusqlite::params![id_str],
            course_from_row,
          )
          .optional()?;

        let Some(mut raw) = existing else {
          return Ok(None);
        };

        // Only supplied fields change; identity columns are never touched.
        if let Some(v) = title {
          raw.title = v;
        }
        if let Some(v) = description {
          raw.description = v;
        }
        if let Some(v) = category {
          raw.category = Some(v);
        }
        if let Some(v) = level_str {
          raw.level = Some(v);
        }
        if let Some(v) = price {
          raw.price = v;
        }
        if let Some(v) = duration {
          raw.duration = Some(v);
        }
        if let Some(v) = thumbnail {
          raw.thumbnail = Some(v);
        }
        if let Some(v) = status_str {
          raw.status = v;
        }

        tx.execute(
          "UPDATE courses SET
             title = ?2, description = ?3, category = ?4, level = ?5,
             price = ?6, duration = ?7, thumbnail = ?8, status = ?9
           WHERE course_id = ?1",
          rusqlite::params![
            raw.course_id,
            raw.title,
            raw.description,
            raw.category,
            raw.level,
            raw.price,
            raw.duration,
            raw.thumbnail,
            raw.status,
          ],
        )?;

        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawCourse::into_course).transpose()
  }

  async fn delete_course(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    // Dependents and the course go in one transaction, so a concurrent read
    // never observes dependents without their course.
    let removed: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM reviews WHERE course_id = ?1",
          rusqlite::params![id_str],
        )?;
        tx.execute(
          "DELETE FROM enrollments WHERE course_id = ?1",
          rusqlite::params![id_str],
        )?;
        let rows = tx.execute(
          "DELETE FROM courses WHERE course_id = ?1",
          rusqlite::params![id_str],
        )?;
        tx.commit()?;
        Ok(rows > 0)
      })
      .await?;

    Ok(removed)
  }

  // ── Enrollments ───────────────────────────────────────────────────────────

  async fn enroll(
    &self,
    user_id: Uuid,
    course_id: Uuid,
  ) -> Result<Option<Enrollment>> {
    let enrollment = Enrollment {
      enrollment_id: Uuid::new_v4(),
      user_id,
      course_id,
      enrolled_at:   Utc::now(),
      completed_at:  None,
    };

    let id_str     = encode_uuid(enrollment.enrollment_id);
    let user_str   = encode_uuid(user_id);
    let course_str = encode_uuid(course_id);
    let at_str     = encode_dt(enrollment.enrolled_at);

    // Atomic insert-if-absent: the UNIQUE pair constraint resolves the race
    // between concurrent duplicate enrolls.
    let inserted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO enrollments (enrollment_id, user_id, course_id, enrolled_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (user_id, course_id) DO NOTHING",
          rusqlite::params![id_str, user_str, course_str, at_str],
        )?)
      })
      .await?;

    Ok((inserted > 0).then_some(enrollment))
  }

  async fn get_enrollment(
    &self,
    user_id: Uuid,
    course_id: Uuid,
  ) -> Result<Option<Enrollment>> {
    let user_str   = encode_uuid(user_id);
    let course_str = encode_uuid(course_id);

    let raw: Option<RawEnrollment> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT enrollment_id, user_id, course_id, enrolled_at, completed_at
               FROM enrollments WHERE user_id = ?1 AND course_id = ?2",
              rusqlite::params![user_str, course_str],
              enrollment_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEnrollment::into_enrollment).transpose()
  }

  async fn complete_enrollment(
    &self,
    user_id: Uuid,
    course_id: Uuid,
  ) -> Result<Option<Enrollment>> {
    let user_str   = encode_uuid(user_id);
    let course_str = encode_uuid(course_id);
    let now_str    = encode_dt(Utc::now());

    let raw: Option<RawEnrollment> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // COALESCE keeps the first completion timestamp on repeat calls.
        tx.execute(
          "UPDATE enrollments
           SET completed_at = COALESCE(completed_at, ?3)
           WHERE user_id = ?1 AND course_id = ?2",
          rusqlite::params![user_str, course_str, now_str],
        )?;

        let row: Option<RawEnrollment> = tx
          .query_row(
            "SELECT enrollment_id, user_id, course_id, enrolled_at, completed_at
             FROM enrollments WHERE user_id = ?1 AND course_id = ?2",
            rusqlite::params![user_str, course_str],
            enrollment_from_row,
          )
          .optional()?;

        tx.commit()?;
        Ok(row)
      })
      .await?;

    raw.map(RawEnrollment::into_enrollment).transpose()
  }

  // ── Reviews ───────────────────────────────────────────────────────────────

  async fn upsert_review(&self, input: NewReview) -> Result<Review> {
    let review = Review {
      review_id:   Uuid::new_v4(),
      user_id:     input.user_id,
      course_id:   input.course_id,
      rating:      input.rating,
      comment:     input.comment,
      recorded_at: Utc::now(),
    };

    let id_str     = encode_uuid(review.review_id);
    let user_str   = encode_uuid(review.user_id);
    let course_str = encode_uuid(review.course_id);
    let rating     = review.rating as i64;
    let comment    = review.comment.clone();
    let at_str     = encode_dt(review.recorded_at);

    // Replace-on-conflict gives one review per (user, course) without a
    // separate existence check.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO reviews (review_id, user_id, course_id, rating, comment, recorded_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT (user_id, course_id) DO UPDATE SET
             review_id   = excluded.review_id,
             rating      = excluded.rating,
             comment     = excluded.comment,
             recorded_at = excluded.recorded_at",
          rusqlite::params![id_str, user_str, course_str, rating, comment, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(review)
  }

  async fn list_reviews(&self, course_id: Uuid) -> Result<Vec<Review>> {
    let course_str = encode_uuid(course_id);

    let raws: Vec<RawReview> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT review_id, user_id, course_id, rating, comment, recorded_at
           FROM reviews WHERE course_id = ?1
           ORDER BY recorded_at",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![course_str], |row| {
            Ok(RawReview {
              review_id:   row.get(0)?,
              user_id:     row.get(1)?,
              course_id:   row.get(2)?,
              rating:      row.get(3)?,
              comment:     row.get(4)?,
              recorded_at: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReview::into_review).collect()
  }
}
