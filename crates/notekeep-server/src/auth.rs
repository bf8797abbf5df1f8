use crate::config::AuthConfig;
use anyhow::{bail, Context, Result};
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use notekeep_common::models::{Claims, UserId};
use notekeep_db::{StoreError, UserRepo};
use sqlx::PgPool;
use thiserror::Error;

const MIN_SALT_LEN: usize = 8;
const MAX_SALT_LEN: usize = 48;
const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("username is already taken")]
    UsernameTaken,

    #[error("invalid username or password")]
    NotFound,

    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    Expired,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UsernameTaken => AuthError::UsernameTaken,
            StoreError::NotFound => AuthError::NotFound,
            other => AuthError::Internal(other.into()),
        }
    }
}

/// Password digests, credential checks and bearer tokens.
///
/// Both the signing secret and the password salt come from configuration.
/// The salt is fixed, so the same password always yields the same digest and
/// login can match on `(username, digest)` directly.
pub struct Identity {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    salt: SaltString,
    token_ttl: Duration,
}

impl Identity {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        if config.jwt_secret.is_empty() {
            bail!("auth.jwt_secret must not be empty");
        }
        let salt_len = config.password_salt.len();
        if !(MIN_SALT_LEN..=MAX_SALT_LEN).contains(&salt_len) {
            bail!(
                "auth.password_salt must be between {} and {} bytes, got {}",
                MIN_SALT_LEN,
                MAX_SALT_LEN,
                salt_len
            );
        }
        let salt = SaltString::encode_b64(config.password_salt.as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid password salt: {}", e))?;
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&config.token_ttl_secs) {
            bail!(
                "auth.token_ttl_secs must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_SECS,
                config.token_ttl_secs
            );
        }
        let token_ttl = i64::try_from(config.token_ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .context("auth.token_ttl_secs is out of range")?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            salt,
            token_ttl,
        })
    }

    /// Salted one-way digest of a password (argon2id, PHC string format)
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &self.salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Create a user and return its id
    pub async fn register(
        &self,
        pool: &PgPool,
        username: &str,
        password: &str,
    ) -> Result<UserId, AuthError> {
        validate_credentials(username, password)?;
        let digest = self.hash_password(password)?;
        let id = UserRepo::create(pool, username, &digest).await?;
        Ok(UserId(id))
    }

    /// Resolve a username/password pair to its user. Unknown users and wrong
    /// passwords are both `AuthError::NotFound`.
    pub async fn authenticate(
        &self,
        pool: &PgPool,
        username: &str,
        password: &str,
    ) -> Result<UserId, AuthError> {
        let digest = self.hash_password(password)?;
        match UserRepo::get_by_credentials(pool, username, &digest).await? {
            Some(user) => Ok(UserId(user.id)),
            None => Err(AuthError::NotFound),
        }
    }

    /// Create an access token (HS256 JWT) valid for the configured TTL
    pub fn issue_token(&self, user_id: UserId) -> Result<String> {
        self.issue_token_at(user_id, Utc::now())
    }

    pub fn issue_token_at(&self, user_id: UserId, issued_at: DateTime<Utc>) -> Result<String> {
        let expires_at = issued_at
            .checked_add_signed(self.token_ttl)
            .context("Token expiry is out of range")?;
        let claims = Claims {
            user_id: user_id.get(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("Failed to create access token")
    }

    /// Validate an access token and return the user it was issued to
    pub fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(UserId(data.claims.user_id)),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(AuthError::Expired),
                _ => Err(AuthError::InvalidToken),
            },
        }
    }
}

fn validate_credentials(username: &str, password: &str) -> Result<(), AuthError> {
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidInput("invalid username or password"));
    }
    Ok(())
}
