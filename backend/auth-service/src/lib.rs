/// Auth Service Library
///
/// Issues, validates, and revokes session credentials, and drives the
/// one-time-code password reset flow.
///
/// ## Modules
///
/// - `config`: environment-backed settings
/// - `db`: credential and profile repositories
/// - `error`: service error taxonomy
/// - `http`: routes, handlers, and the bearer-token extractor
/// - `models`: data models and request/response shapes
/// - `security`: password hashing, token issuance/validation, one-time codes,
///   token revocation
/// - `services`: session lifecycle orchestration, profiles, email delivery
/// - `validators`: input shape validation
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod security;
pub mod services;
pub mod validators;

// Re-export commonly used types
pub use error::{AuthError, Result};
pub use http::{build_router, AppState};
