//! Service-account token minting (OAuth2 JWT-bearer grant).
//!
//! A short-lived RS256 assertion is signed with the key file's private key
//! and exchanged for a bearer token at the token endpoint.

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::client::check_status;
use crate::config::ServiceAccountKey;
use crate::error::SourceError;

pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Assertion lifetime in seconds.
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Claims of the signed assertion.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ServiceAccountKey {
    fn token_endpoint(&self) -> &str {
        self.token_uri
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(TOKEN_URL)
    }
}

/// Sign a JWT-bearer assertion for `scope`, issued at `now` (Unix seconds).
pub fn sign_assertion(
    key: &ServiceAccountKey,
    scope: &str,
    now: i64,
) -> Result<String, SourceError> {
    key.validate()?;
    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        scope: scope.to_string(),
        aud: key.token_endpoint().to_string(),
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };
    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(encode(&Header::new(Algorithm::RS256), &claims, &signing_key)?)
}

/// Exchange a freshly signed assertion for an access token.
pub async fn fetch_access_token(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
    scope: &str,
) -> Result<String, SourceError> {
    let assertion = sign_assertion(key, scope, chrono::Utc::now().timestamp())?;

    let resp = http
        .post(key.token_endpoint())
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;
    let resp = check_status(resp).await?;

    let token: TokenResponse = resp.json().await?;
    if token.access_token.is_empty() {
        return Err(SourceError::InvalidCredentials(
            "token endpoint returned an empty access token".to_string(),
        ));
    }
    Ok(token.access_token)
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
