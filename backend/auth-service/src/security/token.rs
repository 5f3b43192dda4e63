/// Bearer token issuance and validation.
///
/// Access and refresh tokens are distinct classes: each is signed with its
/// own HS256 secret and carries its own configured lifetime, so the classes
/// can be rotated independently and compromise of one secret leaves the
/// other intact.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::TokenSettings;
use crate::error::{AuthError, Result};

const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Token class: short-lived access vs long-lived refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Access,
    Refresh,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Refresh => "refresh",
        }
    }
}

/// Claims embedded in every bearer token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (account id as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Freshly issued access + refresh pair
#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

struct ClassKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    max_age_secs: i64,
}

/// Token issuer/validator holding the per-class keys.
///
/// Built once at startup from `TokenSettings` and handed to the session
/// controller as an explicit dependency.
#[derive(Clone)]
pub struct TokenKeys {
    access: Arc<ClassKeys>,
    refresh: Arc<ClassKeys>,
}

impl TokenKeys {
    pub fn from_settings(settings: &TokenSettings) -> Self {
        Self {
            access: Arc::new(ClassKeys {
                encoding: EncodingKey::from_secret(settings.access_signing_key.as_bytes()),
                decoding: DecodingKey::from_secret(settings.access_signing_key.as_bytes()),
                max_age_secs: settings.access_max_age_secs as i64,
            }),
            refresh: Arc::new(ClassKeys {
                encoding: EncodingKey::from_secret(settings.refresh_signing_key.as_bytes()),
                decoding: DecodingKey::from_secret(settings.refresh_signing_key.as_bytes()),
                max_age_secs: settings.refresh_max_age_secs as i64,
            }),
        }
    }

    fn class_keys(&self, class: TokenClass) -> &ClassKeys {
        match class {
            TokenClass::Access => &self.access,
            TokenClass::Refresh => &self.refresh,
        }
    }

    /// Configured lifetime for a token class, in seconds
    pub fn max_age_secs(&self, class: TokenClass) -> i64 {
        self.class_keys(class).max_age_secs
    }

    /// Mint a token of the given class for `user_id`
    pub fn issue(&self, user_id: Uuid, class: TokenClass) -> Result<String> {
        let keys = self.class_keys(class);
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(keys.max_age_secs)).timestamp(),
        };

        encode(&Header::new(TOKEN_ALGORITHM), &claims, &keys.encoding)
            .map_err(|e| AuthError::Jwt(format!("failed to sign {} token: {}", class.as_str(), e)))
    }

    /// Mint a fresh access + refresh pair for `user_id`
    pub fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenClass::Access)?,
            refresh_token: self.issue(user_id, TokenClass::Refresh)?,
            expires_in: self.access.max_age_secs,
        })
    }

    /// Validate a token against a class and return its subject.
    ///
    /// A pure function of the token and the current time: signature,
    /// algorithm, expiry (no leeway), and subject shape are all checked here.
    /// Revocation is layered on top by the caller consulting the blacklist.
    pub fn validate(&self, token: &str, class: TokenClass) -> Result<Uuid> {
        let keys = self.class_keys(class);

        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &keys.decoding, &validation)
            .map_err(|_| AuthError::InvalidToken)?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys() -> TokenKeys {
        TokenKeys::from_settings(&TokenSettings {
            access_signing_key: "access-test-secret".to_string(),
            refresh_signing_key: "refresh-test-secret".to_string(),
            access_max_age_secs: 900,
            refresh_max_age_secs: 604800,
        })
    }

    #[test]
    fn issue_and_validate_roundtrip() {
        let keys = test_keys();
        let user_id = Uuid::new_v4();

        let token = keys.issue(user_id, TokenClass::Access).unwrap();
        assert_eq!(token.matches('.').count(), 2); // JWT has 3 parts

        let subject = keys.validate(&token, TokenClass::Access).unwrap();
        assert_eq!(subject, user_id);
    }

    #[test]
    fn classes_use_independent_secrets() {
        let keys = test_keys();
        let user_id = Uuid::new_v4();

        let refresh = keys.issue(user_id, TokenClass::Refresh).unwrap();
        assert!(keys.validate(&refresh, TokenClass::Refresh).is_ok());
        // An access-class check must not accept a refresh-class signature
        assert!(keys.validate(&refresh, TokenClass::Access).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let keys = test_keys();
        let token = keys.issue(Uuid::new_v4(), TokenClass::Access).unwrap();

        let tampered = token.replace('a', "b");
        assert!(keys.validate(&tampered, TokenClass::Access).is_err());
    }

    #[test]
    fn malformed_token_is_rejected() {
        let keys = test_keys();
        assert!(keys.validate("not.a.jwt", TokenClass::Access).is_err());
        assert!(keys.validate("", TokenClass::Access).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = test_keys();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: now - 120,
            exp: now - 1,
        };
        let token = encode(
            &Header::new(TOKEN_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(b"access-test-secret"),
        )
        .unwrap();

        assert!(keys.validate(&token, TokenClass::Access).is_err());
    }

    #[test]
    fn token_just_inside_lifetime_is_accepted() {
        let keys = test_keys();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + 2,
        };
        let token = encode(
            &Header::new(TOKEN_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(b"access-test-secret"),
        )
        .unwrap();

        assert!(keys.validate(&token, TokenClass::Access).is_ok());
    }

    #[test]
    fn unexpected_algorithm_is_rejected() {
        let keys = test_keys();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + 900,
        };
        // Same secret, different HMAC variant
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"access-test-secret"),
        )
        .unwrap();

        assert!(keys.validate(&token, TokenClass::Access).is_err());
    }

    #[test]
    fn missing_subject_is_rejected() {
        let keys = test_keys();
        let now = Utc::now().timestamp();
        let claims = serde_json::json!({ "iat": now, "exp": now + 900 });
        let token = encode(
            &Header::new(TOKEN_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(b"access-test-secret"),
        )
        .unwrap();

        assert!(keys.validate(&token, TokenClass::Access).is_err());
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let keys = test_keys();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            iat: now,
            exp: now + 900,
        };
        let token = encode(
            &Header::new(TOKEN_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(b"access-test-secret"),
        )
        .unwrap();

        assert!(keys.validate(&token, TokenClass::Access).is_err());
    }

    #[test]
    fn refresh_pair_has_longer_lived_refresh() {
        let keys = test_keys();
        assert!(
            keys.max_age_secs(TokenClass::Refresh) > keys.max_age_secs(TokenClass::Access)
        );
        let pair = keys.issue_pair(Uuid::new_v4()).unwrap();
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_eq!(pair.expires_in, 900);
    }
}
