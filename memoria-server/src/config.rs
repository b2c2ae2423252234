//! Runtime configuration sourced from the environment.

use std::env;

/// Process configuration.
///
/// Every setting has a default, so the server starts with no environment at
/// all and points at a local MongoDB.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port the HTTP server listens on (`PORT`).
    pub port: u16,
    /// MongoDB connection string (`MONGODB_URI`).
    pub mongodb_uri: String,
    /// Database holding the memory post collection (`MONGODB_DATABASE`).
    pub database: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(8000),
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: env::var("MONGODB_DATABASE").unwrap_or_else(|_| "memoria".to_string()),
        }
    }
}
