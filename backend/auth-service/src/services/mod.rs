/// Service layer for the auth service
///
/// - Session lifecycle orchestration (signup, login, logout, refresh, reset)
/// - Profile reads and updates
/// - SMTP delivery of one-time reset codes
pub mod auth;
pub mod email;
pub mod users;

pub use auth::AuthService;
pub use email::EmailService;
pub use users::UserService;
