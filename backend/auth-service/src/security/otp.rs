/// One-time numeric code generation for password reset
use crate::error::{AuthError, Result};
use rand::rngs::OsRng;
use rand::RngCore;

/// Length of the code mailed out on reset initiation.
pub const RESET_CODE_LENGTH: usize = 6;

/// Generate a numeric one-time code of `length` digits.
///
/// Every digit is drawn from the OS CSPRNG. An unavailable random source is
/// fatal to the request and never retried.
pub fn generate_code(length: usize) -> Result<String> {
    let mut buffer = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut buffer)
        .map_err(|e| AuthError::Internal(format!("random source unavailable: {}", e)))?;

    Ok(buffer.iter().map(|b| char::from(b'0' + b % 10)).collect())
}
