/// Token revocation management.
///
/// Revoked tokens are marked in the ephemeral store under a SHA-256 digest
/// of the token string, tagged with the token class. The marker's TTL is the
/// class's configured max lifetime, so it always outlives the token it
/// blacklists. Revocation is an overwrite, which makes it idempotent:
/// revoking an already-revoked or already-expired token is a no-op success.
use redis_utils::SharedConnectionManager;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::Result;
use crate::security::token::TokenClass;

const REVOKED_KEY_PREFIX: &str = "revoked:token:";

/// Insert a revocation marker for `token`
pub async fn revoke_token(
    cache: &SharedConnectionManager,
    token: &str,
    class: TokenClass,
    ttl_secs: u64,
) -> Result<()> {
    let key = revocation_key(token);
    redis_utils::set_with_ttl(cache, &key, class.as_str(), ttl_secs).await?;

    info!(
        class = class.as_str(),
        ttl = ttl_secs,
        "token revoked, blacklist entry expires with the token"
    );
    Ok(())
}

/// Check whether `token` carries a live revocation marker
pub async fn is_token_revoked(cache: &SharedConnectionManager, token: &str) -> Result<bool> {
    Ok(redis_utils::exists(cache, &revocation_key(token)).await?)
}

fn revocation_key(token: &str) -> String {
    format!("{}{}", REVOKED_KEY_PREFIX, hash_token(token))
}

/// Hex SHA-256 of the raw token string; keeps bearer tokens out of store dumps
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_consistency() {
        let token = "test_token_12345";
        assert_eq!(hash_token(token), hash_token(token));
    }

    #[test]
    fn test_hash_uniqueness() {
        assert_ne!(hash_token("token1"), hash_token("token2"));
    }

    #[test]
    fn test_hash_length() {
        // SHA-256 produces 64 hex characters
        assert_eq!(hash_token("any_token").len(), 64);
    }

    #[test]
    fn test_key_carries_prefix() {
        assert!(revocation_key("abc").starts_with(REVOKED_KEY_PREFIX));
    }
}
