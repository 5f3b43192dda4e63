/// Data models for credentials, profiles, and the auth API surface
pub mod auth;
pub mod credential;
pub mod profile;

pub use auth::{
    AuthTokens, LoginRequest, LogoutRequest, RefreshRequest, ResetInitRequest, ResetVerifyRequest,
    SessionPayload, SignupRequest, TokenPayload,
};
pub use credential::Credential;
pub use profile::{UpdateProfileFields, UserProfile};
