use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::prelude::{AppError, Result};

/// Claims carried by the session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub name: Option<String>,
}

/// HS256 signing material plus the cookie the token travels in.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    pub cookie_name: String,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_hours: i64, cookie_name: &str) -> Self {
        TokenKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
            cookie_name: cookie_name.to_string(),
        }
    }

    pub fn sign(&self, request: &TokenRequest) -> Result<String> {
        let now = Utc::now();
        let expiry = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal("Failed to calculate token expiration".into()))?;
        let identity = Identity {
            email: request.email.clone(),
            name: request.name.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };
        self.sign_identity(&identity)
    }

    pub fn sign_identity(&self, identity: &Identity) -> Result<String> {
        Ok(encode(&Header::new(Algorithm::HS256), identity, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Identity> {
        decode::<Identity>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("rejecting token: {}", e);
                AppError::Unauthorized
            })
    }

    pub fn cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), token))
            .http_only(true)
            .secure(true)
            .same_site(SameSite::None)
            .path("/")
            .build()
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), ""))
            .http_only(true)
            .secure(true)
            .same_site(SameSite::None)
            .path("/")
            .build()
    }
}
