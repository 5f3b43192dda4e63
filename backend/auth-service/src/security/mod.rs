/// Security primitives for the auth service
///
/// - Password hashing and verification (Argon2id)
/// - Bearer token issuance and validation (HS256, one secret per class)
/// - Crypto-random numeric one-time codes
/// - Token revocation (blacklist over the ephemeral store)
pub mod otp;
pub mod password;
pub mod token;
pub mod token_revocation;

pub use otp::generate_code;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenClass, TokenKeys, TokenPair};
pub use token_revocation::{is_token_revoked, revoke_token};
