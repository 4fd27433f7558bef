//! Server configuration.
//!
//! All settings come from environment variables with sensible defaults, so the
//! binary runs with no configuration at all during local development.

use std::path::PathBuf;

/// Runtime configuration for the server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the listener to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// The single origin allowed by the CORS layer (the frontend).
    pub frontend_origin: String,
}

impl Config {
    /// Build a config from environment variables.
    ///
    /// - `HOST` - bind address (default `0.0.0.0`)
    /// - `PORT` - listen port (default `5000`)
    /// - `DATABASE_PATH` - SQLite file path (default `tasks.db`)
    /// - `FRONTEND_ORIGIN` - allowed CORS origin (default `http://localhost:3000`)
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            database_path: std::env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("tasks.db")),
            frontend_origin: std::env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }
}
