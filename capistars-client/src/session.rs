//! Operator session
//!
//! Credentials are verified against an argon2 hash taken from configuration
//! and a successful login yields an HS256 JWT. The token is persisted so a
//! later run can restore the session, and it is re-verified (signature and
//! expiry) every time it is loaded.
//!
//! Gating on the client is cosmetic; the backend must validate the bearer
//! token on every request.

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ClientConfig;

/// File holding the persisted session token
pub const SESSION_FILE: &str = "session.json";

const SESSION_EXPIRY_HOURS: i64 = 12;

/// Session error type
#[derive(Debug, Error)]
pub enum SessionError {
    /// Email or password did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No operator account is configured
    #[error("Operator credentials are not configured")]
    NotConfigured,

    /// Token signature or expiry check failed
    #[error("Invalid session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Hash(String),

    /// Session file could not be read or written
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Hash a password for `CAPISTARS_ADMIN_PASSWORD_HASH`
pub fn hash_password(password: &str) -> SessionResult<String> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SessionError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check `password` against an argon2 PHC string
pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// The operator account allowed to sign in
#[derive(Debug, Clone)]
pub struct OperatorCredentials {
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
}

impl OperatorCredentials {
    pub fn from_config(config: &ClientConfig) -> Option<Self> {
        Some(Self {
            email: config.admin_email.clone()?,
            password_hash: config.admin_password_hash.clone()?,
        })
    }

    fn verify(&self, email: &str, password: &str) -> bool {
        // Emails compare case-insensitively, passwords exactly
        self.email.trim().eq_ignore_ascii_case(email.trim())
            && verify_password(password, &self.password_hash)
    }
}

/// JWT claims of an operator session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Operator email
    pub sub: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Create a signed session token for `email`
pub fn create_token(email: &str, secret: &str) -> SessionResult<String> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: email.to_string(),
        exp: (now + chrono::Duration::hours(SESSION_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Verify a session token and return its claims
pub fn verify_token(token: &str, secret: &str) -> SessionResult<SessionClaims> {
    let data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// JSON file persisting the session token
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            path: base_path.into().join(SESSION_FILE),
        }
    }

    pub fn save(&self, token: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&StoredSession {
            token: token.to_string(),
        })?;
        fs::write(&self.path, json)
    }

    pub fn load(&self) -> Option<String> {
        let json = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str::<StoredSession>(&json)
            .ok()
            .map(|stored| stored.token)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Operator session context, passed explicitly to whoever needs it
#[derive(Debug)]
pub struct Session {
    store: SessionStore,
    secret: String,
    credentials: Option<OperatorCredentials>,
    token: Option<String>,
    operator: Option<String>,
}

impl Session {
    /// Restore the persisted session, keeping the token only if it verifies
    pub fn restore(
        store: SessionStore,
        secret: impl Into<String>,
        credentials: Option<OperatorCredentials>,
    ) -> Self {
        let mut session = Self {
            store,
            secret: secret.into(),
            credentials,
            token: None,
            operator: None,
        };

        if let Some(token) = session.store.load() {
            match verify_token(&token, &session.secret) {
                Ok(claims) => {
                    tracing::info!(operator = %claims.sub, "Session restored");
                    session.operator = Some(claims.sub);
                    session.token = Some(token);
                }
                Err(e) => {
                    tracing::info!("Discarding persisted session: {}", e);
                    if let Err(e) = session.store.delete() {
                        tracing::warn!("Failed to remove stale session file: {}", e);
                    }
                }
            }
        }
        session
    }

    /// Restore the session described by `config`
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::restore(
            SessionStore::new(&config.data_dir),
            config.session_secret.clone(),
            OperatorCredentials::from_config(config),
        )
    }

    /// Verify credentials, then issue and persist a session token
    pub fn login(&mut self, email: &str, password: &str) -> SessionResult<&str> {
        let credentials = self.credentials.as_ref().ok_or(SessionError::NotConfigured)?;
        if !credentials.verify(email, password) {
            tracing::warn!(email, "Operator login rejected");
            return Err(SessionError::InvalidCredentials);
        }

        let operator = credentials.email.clone();
        let token = create_token(&operator, &self.secret)?;
        self.store.save(&token)?;
        tracing::info!(operator = %operator, "Operator logged in");

        self.operator = Some(operator);
        Ok(self.token.insert(token).as_str())
    }

    /// Clear the session in memory and on disk
    pub fn logout(&mut self) -> SessionResult<()> {
        self.store.delete()?;
        if let Some(operator) = self.operator.take() {
            tracing::info!(operator = %operator, "Operator logged out");
        }
        self.token = None;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }
}
