//! # To-Do API
//!
//! A small HTTP backend for a to-do task list.
//!
//! This library provides:
//! - An HTTP API for listing, creating, editing, toggling, and deleting tasks
//! - Input validation and sanitization for task fields
//! - A SQLite-backed task store
//!
//! ## Request Flow
//! 1. Receive request via the axum router
//! 2. Validate and sanitize the body (for create and full edit)
//! 3. Run a single store round trip
//! 4. Render the result as an acknowledgment or an error response
//!
//! ## Modules
//! - `api`: HTTP routes and handlers
//! - `config`: environment-driven server configuration
//! - `task`: the task record and field validation
//! - `store`: SQLite task repository

pub mod api;
pub mod config;
pub mod store;
pub mod task;

pub use config::Config;
