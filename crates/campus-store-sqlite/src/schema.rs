//! SQL schema for the Campus SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    role          TEXT NOT NULL,   -- 'student' | 'instructor' | 'admin'
    created_at    TEXT NOT NULL    -- ISO 8601 UTC
);

CREATE TABLE IF NOT EXISTS courses (
    course_id   TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    category    TEXT,
    level       TEXT,              -- 'beginner' | 'intermediate' | 'advanced'
    price       REAL NOT NULL DEFAULT 0 CHECK (price >= 0),
    duration    TEXT,
    thumbnail   TEXT,
    status      TEXT NOT NULL DEFAULT 'published',
    instructor  TEXT NOT NULL REFERENCES users(user_id),
    created_at  TEXT NOT NULL
);

-- One enrollment per (user, course); duplicate enrolls lose to the
-- constraint rather than to a read-then-write race.
CREATE TABLE IF NOT EXISTS enrollments (
    enrollment_id TEXT PRIMARY KEY,
    user_id       TEXT NOT NULL REFERENCES users(user_id),
    course_id     TEXT NOT NULL REFERENCES courses(course_id),
    enrolled_at   TEXT NOT NULL,
    completed_at  TEXT,
    UNIQUE (user_id, course_id)
);

-- One review per (user, course); re-reviewing replaces the row.
CREATE TABLE IF NOT EXISTS reviews (
    review_id   TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL REFERENCES users(user_id),
    course_id   TEXT NOT NULL REFERENCES courses(course_id),
    rating      INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    comment     TEXT,
    recorded_at TEXT NOT NULL,
    UNIQUE (user_id, course_id)
);

CREATE INDEX IF NOT EXISTS courses_instructor_idx  ON courses(instructor);
CREATE INDEX IF NOT EXISTS courses_category_idx    ON courses(category);
CREATE INDEX IF NOT EXISTS enrollments_course_idx  ON enrollments(course_id);
CREATE INDEX IF NOT EXISTS reviews_course_idx      ON reviews(course_id);

PRAGMA user_version = 1;
";
