//! # Exercise Tracker
//!
//! A small REST service that records users and the exercise sessions they
//! log, and returns filtered exercise logs per user.
//!
//! ## Architecture
//!
//! - [`models`]: Domain types (users, exercises, identifiers, calendar dates)
//! - [`db`]: Repository traits, storage backends and the service layer
//! - [`http`]: Axum router, handlers and request/response types
//!
//! Storage is chosen at startup through [`db::RepositoryFactory`]; the HTTP
//! layer only ever sees an `Arc<dyn FullRepository>`.

// RepositoryError carries context for debugging.
#![allow(clippy::result_large_err)]

pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
