//! SQLite backend for the Campus course store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. Uniqueness invariants — one
//! enrollment and one review per (user, course), one user per email — live in
//! the schema as UNIQUE constraints and are exercised through
//! `INSERT ... ON CONFLICT`, never read-then-write.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
