//! HTTP surface for the memoria document API.
//!
//! This crate maps HTTP verbs and paths onto
//! [`PostStore`](memoria_core::store::PostStore) operations and renders the
//! results as JSON:
//!
//! - **Routing and handlers** ([`routes`]) - One handler per operation,
//!   sharing a single store handle
//! - **Error rendering** ([`error`]) - The per-request error type and its
//!   JSON/status mapping
//! - **Configuration** ([`config`]) - Environment-sourced process settings
//!
//! The binary entrypoint wires a MongoDB store into [`routes::app`]; tests
//! wire in the in-memory store through the same seam.

pub mod config;
pub mod error;
pub mod routes;

pub use config::Config;
pub use error::ApiError;
pub use routes::{SharedStore, app};
