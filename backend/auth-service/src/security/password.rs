/// Password hashing and verification using Argon2id
use crate::error::{AuthError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using the Argon2id algorithm.
///
/// A random 16-byte salt is generated per call and embedded in the
/// PHC-formatted output, so hashing the same password twice yields different
/// strings while verification stays deterministic. Length policy is enforced
/// by the caller, not here.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its PHC-formatted hash.
///
/// Never errors: a malformed or truncated hash verifies as `false`.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let password = "secret1";
        let hash = hash_password(password).expect("should hash password successfully");
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("secret1").expect("should hash password successfully");
        assert!(!verify_password("secret2", &hash));
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        assert!(!verify_password("secret1", "not-a-phc-string"));
        assert!(!verify_password("secret1", ""));
        assert!(!verify_password("secret1", "$argon2id$truncated"));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "secret1";
        let hash1 = hash_password(password).expect("should hash successfully");
        let hash2 = hash_password(password).expect("should hash successfully");
        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
        assert!(verify_password(password, &hash1));
        assert!(verify_password(password, &hash2));
    }
}
