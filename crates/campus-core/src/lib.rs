//! Core types, policy, and service orchestration for the Campus course
//! platform.
//!
//! No HTTP or database dependencies live here: the API and storage crates
//! both build on this one, and backends plug in through
//! [`store::CourseStore`].

// Backends implement the store trait with native `async fn`; suppress the
// advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod course;
pub mod error;
pub mod policy;
pub mod service;
pub mod store;
pub mod user;
pub mod validate;

pub use error::{Error, Result};
