/// Session lifecycle orchestration.
///
/// Pure coordination over the credential store, password hasher, token
/// issuer, and the ephemeral key-value store. No per-request state lives
/// here; every collaborator is injected at construction and all shared state
/// sits in the backing stores.
use redis_utils::SharedConnectionManager;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db;
use crate::error::{AuthError, Result};
use crate::models::{
    AuthTokens, LoginRequest, LogoutRequest, RefreshRequest, ResetInitRequest, ResetVerifyRequest,
    SessionPayload, SignupRequest,
};
use crate::security::{self, otp, TokenClass, TokenKeys};
use crate::services::EmailService;
use crate::validators;

/// Lifetime of a reset ticket, seconds.
const RESET_TICKET_TTL_SECS: u64 = 120;

const RESET_KEY_PREFIX: &str = "reset_otp:";

#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    cache: SharedConnectionManager,
    email: EmailService,
    tokens: TokenKeys,
}

impl AuthService {
    pub fn new(
        db: PgPool,
        cache: SharedConnectionManager,
        email: EmailService,
        tokens: TokenKeys,
    ) -> Self {
        Self {
            db,
            cache,
            email,
            tokens,
        }
    }

    /// Create credential + profile and hand back a first token pair.
    pub async fn signup(&self, input: SignupRequest) -> Result<SessionPayload> {
        if input.email.is_empty()
            || input.password.is_empty()
            || input.first_name.is_empty()
            || input.last_name.is_empty()
        {
            return Err(AuthError::Validation("missing required fields".into()));
        }
        if !validators::validate_email(&input.email) {
            return Err(AuthError::InvalidEmail);
        }
        if !validators::validate_password(&input.password) {
            return Err(AuthError::Validation(format!(
                "password must be at least {} characters",
                validators::MIN_PASSWORD_LEN
            )));
        }

        let password_hash = security::hash_password(&input.password)?;
        let user_id = Uuid::new_v4();

        db::accounts::create_account(
            &self.db,
            user_id,
            &input.email,
            &password_hash,
            &input.first_name,
            &input.last_name,
        )
        .await?;

        let pair = self.tokens.issue_pair(user_id)?;

        info!(user_id = %user_id, "signup completed");
        Ok(SessionPayload {
            user_id,
            tokens: AuthTokens {
                access: pair.access_token,
                refresh: pair.refresh_token,
            },
        })
    }

    /// Authenticate with email + password and issue a fresh pair.
    pub async fn login(&self, input: LoginRequest) -> Result<SessionPayload> {
        if !validators::validate_email(&input.email) {
            return Err(AuthError::InvalidEmail);
        }

        let credential = db::credentials::find_by_email(&self.db, &input.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !security::verify_password(&input.password, &credential.password_hash) {
            warn!("login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.tokens.issue_pair(credential.id)?;

        info!(user_id = %credential.id, "login succeeded");
        Ok(SessionPayload {
            user_id: credential.id,
            tokens: AuthTokens {
                access: pair.access_token,
                refresh: pair.refresh_token,
            },
        })
    }

    /// Blacklist whichever tokens the caller still holds.
    ///
    /// Each marker's TTL is its class's configured max lifetime: a
    /// conservative upper bound on the token's remaining validity, chosen so
    /// revocation never has to decode the token first. Revoking an
    /// already-revoked or already-expired token is a no-op success.
    pub async fn logout(&self, input: LogoutRequest) -> Result<()> {
        if input.access_token.is_empty() && input.refresh_token.is_empty() {
            return Err(AuthError::Validation("no tokens provided".into()));
        }

        if !input.access_token.is_empty() {
            security::revoke_token(
                &self.cache,
                &input.access_token,
                TokenClass::Access,
                self.tokens.max_age_secs(TokenClass::Access) as u64,
            )
            .await?;
        }
        if !input.refresh_token.is_empty() {
            security::revoke_token(
                &self.cache,
                &input.refresh_token,
                TokenClass::Refresh,
                self.tokens.max_age_secs(TokenClass::Refresh) as u64,
            )
            .await?;
        }

        info!("logout completed");
        Ok(())
    }

    /// Exchange a refresh token for a brand-new pair.
    ///
    /// The blacklist is consulted before any cryptographic work. The consumed
    /// refresh token keeps its natural validity window after rotation.
    pub async fn refresh(&self, input: RefreshRequest) -> Result<AuthTokens> {
        if security::is_token_revoked(&self.cache, &input.refresh_token).await? {
            warn!("refresh rejected: blacklisted token used");
            return Err(AuthError::TokenRevoked);
        }

        let user_id = self
            .tokens
            .validate(&input.refresh_token, TokenClass::Refresh)?;
        let pair = self.tokens.issue_pair(user_id)?;

        info!(user_id = %user_id, "tokens refreshed");
        Ok(AuthTokens {
            access: pair.access_token,
            refresh: pair.refresh_token,
        })
    }

    /// Resolve a bearer access token to an account id, honoring revocation.
    ///
    /// The revocation check runs first so a blacklisted token is rejected as
    /// Unauthorized even while its signature and expiry are still valid.
    pub async fn authenticate(&self, access_token: &str) -> Result<Uuid> {
        if security::is_token_revoked(&self.cache, access_token).await? {
            warn!("request rejected: blacklisted token used");
            return Err(AuthError::TokenRevoked);
        }

        self.tokens.validate(access_token, TokenClass::Access)
    }

    /// Start a password reset: mint a one-time code, store it under the
    /// email with a fixed TTL, and mail it out.
    ///
    /// At most one ticket is live per email; a second initiation while one
    /// exists is rejected until the ticket expires.
    pub async fn reset_init(&self, input: ResetInitRequest) -> Result<()> {
        if !validators::validate_email(&input.email) {
            return Err(AuthError::InvalidEmail);
        }

        db::credentials::find_by_email(&self.db, &input.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let key = reset_key(&input.email);
        if redis_utils::exists(&self.cache, &key).await? {
            return Err(AuthError::ResetAlreadyInitiated);
        }

        let code = otp::generate_code(otp::RESET_CODE_LENGTH)?;
        redis_utils::set_with_ttl(&self.cache, &key, &code, RESET_TICKET_TTL_SECS).await?;

        // Delivery is fire-and-forget: a failed send is logged, not surfaced.
        if let Err(err) = self.email.send_reset_code(&input.email, &code).await {
            warn!(error = %err, "failed to deliver reset code mail");
        }

        info!("password reset initiated");
        Ok(())
    }

    /// Complete a password reset with the mailed code.
    ///
    /// A mismatching code leaves the ticket in place, so the caller can retry
    /// until the TTL runs out. On a match the credential is updated and the
    /// ticket is left to expire naturally.
    pub async fn reset_verify(&self, input: ResetVerifyRequest) -> Result<()> {
        if input.otp.is_empty() || input.new_password.is_empty() {
            return Err(AuthError::Validation("missing required fields".into()));
        }
        if !validators::validate_email(&input.email) {
            return Err(AuthError::InvalidEmail);
        }
        if !validators::validate_otp(&input.otp, otp::RESET_CODE_LENGTH) {
            return Err(AuthError::Validation("invalid verification code format".into()));
        }
        if !validators::validate_password(&input.new_password) {
            return Err(AuthError::Validation(format!(
                "password must be at least {} characters",
                validators::MIN_PASSWORD_LEN
            )));
        }

        let key = reset_key(&input.email);
        let stored = redis_utils::get(&self.cache, &key)
            .await?
            .ok_or(AuthError::OtpNotFound)?;

        if stored != input.otp {
            warn!("reset rejected: one-time code mismatch");
            return Err(AuthError::OtpMismatch);
        }

        let new_hash = security::hash_password(&input.new_password)?;
        // UserNotFound here means the account vanished mid-flow
        db::credentials::update_password_hash(&self.db, &input.email, &new_hash).await?;

        info!("password reset completed");
        Ok(())
    }

    /// Remove the credential and the profile in a single transaction.
    pub async fn delete_account(&self, user_id: Uuid) -> Result<()> {
        db::accounts::delete_account(&self.db, user_id).await?;
        info!(user_id = %user_id, "account deleted");
        Ok(())
    }
}

fn reset_key(email: &str) -> String {
    format!("{}{}", RESET_KEY_PREFIX, email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_key_is_scoped_by_email() {
        assert_eq!(reset_key("a@x.com"), "reset_otp:a@x.com");
        assert_ne!(reset_key("a@x.com"), reset_key("b@x.com"));
    }
}
