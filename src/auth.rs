//! Bearer-token authentication with an in-memory credential list.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("An authorization header is required")]
    MissingHeader,
    #[error("Cannot parse authorization header")]
    MalformedHeader,
    #[error("Invalid user username/password")]
    InvalidCredentials,
    #[error("Invalid authorization token")]
    Unauthorized,
    #[error("{0}")]
    Payload(#[from] serde_json::Error),
    #[error("{0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub authorized: bool,
    pub exp: i64,
    pub jti: String,
}

/// Token signing and verification.
pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: &Claims) -> Result<String, AuthError>;
    fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

/// HS256 tokens keyed by a shared secret.
pub struct HmacSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl HmacSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl TokenSigner for HmacSigner {
    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        Ok(encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.encoding_key,
        )?)
    }

    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

pub struct AuthManager {
    signer: Box<dyn TokenSigner>,
    users: Vec<Credentials>,
}

impl AuthManager {
    pub fn new(signer: Box<dyn TokenSigner>) -> Self {
        Self {
            signer,
            users: default_users(),
        }
    }

    pub fn with_hmac_secret(secret: &str) -> Self {
        Self::new(Box::new(HmacSigner::new(secret)))
    }

    /// Checks a JSON `{"username", "password"}` body and issues a token valid
    /// for 24 hours.
    pub fn authenticate(&self, body: &[u8]) -> Result<String, AuthError> {
        let creds: Credentials = serde_json::from_slice(body)?;
        info!("Authenticating user with username: {}", creds.username);

        let known = self
            .users
            .iter()
            .any(|u| u.username == creds.username && u.password == creds.password);
        if !known {
            return Err(AuthError::InvalidCredentials);
        }

        let claims = Claims {
            username: creds.username,
            authorized: true,
            exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = self.signer.sign(&claims)?;
        info!("Successfully generated JWT token");

        Ok(token)
    }

    /// Validates an `Authorization` header value of the form `<scheme> <token>`.
    pub fn validate_header(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let header = match header {
            Some(h) if !h.is_empty() => h,
            _ => return Err(AuthError::MissingHeader),
        };

        let parts: Vec<&str> = header.split(' ').collect();
        let [_, token] = parts.as_slice() else {
            return Err(AuthError::MalformedHeader);
        };

        let claims = self.signer.verify(token)?;
        if !claims.authorized {
            return Err(AuthError::Unauthorized);
        }

        Ok(claims)
    }
}

// Stand-in credentials until there is a user store.
fn default_users() -> Vec<Credentials> {
    vec![
        Credentials {
            username: "user123".to_string(),
            password: "pass123".to_string(),
        },
        Credentials {
            username: "useruser".to_string(),
            password: "passpass".to_string(),
        },
    ]
}
