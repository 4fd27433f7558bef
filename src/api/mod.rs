//! HTTP API.

pub mod routes;
pub mod tasks;

pub use routes::{serve, AppState};
