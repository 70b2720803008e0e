//! HTTP CRUD service for user records backed by Postgres.
//!
//! Requests are decoded by the axum handlers in [`users::handlers`], served by
//! a single [`users::UserStore`] operation, and the typed outcome is mapped to
//! a status code by [`error::ApiError`].

pub mod app;
pub mod config;
pub mod error;
pub mod state;
pub mod users;
