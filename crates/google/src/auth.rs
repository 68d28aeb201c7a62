//! Service-account OAuth for Google APIs.
//!
//! A signed RS256 assertion is exchanged for a short-lived bearer token.
//! Tokens are minted per request and never cached.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use ledgerbot_core::sheet::SheetError;
use ledgerbot_shared::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Read-only Sheets scope.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
/// Read-only Drive scope, needed for PDF export.
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Fields of a service-account JSON key that token minting needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Service account identity.
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: String,
    /// OAuth token endpoint.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"[hidden]")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    /// Reads a key file.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Credentials` if the file is unreadable or malformed.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| AppError::Credentials(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Parses key JSON.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Credentials` if required fields are missing.
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::Credentials(e.to_string()))
    }
}

/// Claims of the signed token request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Issuer (service account email).
    pub iss: String,
    /// Space-separated scopes.
    pub scope: String,
    /// Audience (token endpoint).
    pub aud: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl AssertionClaims {
    /// Creates claims valid for one hour from `issued_at`.
    #[must_use]
    pub fn new(key: &ServiceAccountKey, scope: &str, issued_at: DateTime<Utc>) -> Self {
        let expires_at = issued_at + Duration::seconds(ASSERTION_LIFETIME_SECS);
        Self {
            iss: key.client_email.clone(),
            scope: scope.to_string(),
            aud: key.token_uri.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Mints bearer tokens for a service account.
pub struct TokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http: reqwest::Client,
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("key", &self.key)
            .field("encoding_key", &"[hidden]")
            .finish_non_exhaustive()
    }
}

impl TokenProvider {
    /// Creates a provider, parsing the private key up front.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Credentials` if the private key is not valid PEM.
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> AppResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| AppError::Credentials(format!("invalid private key: {e}")))?;
        Ok(Self {
            key,
            encoding_key,
            http,
        })
    }

    /// Service account identity.
    #[must_use]
    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Signs a token request for `scope`.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Auth` if signing fails.
    pub fn assertion(&self, scope: &str) -> Result<String, SheetError> {
        let claims = AssertionClaims::new(&self.key, scope, Utc::now());
        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| SheetError::auth(e.to_string()))
    }

    /// Exchanges a fresh assertion for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Auth` if the token endpoint rejects the request.
    pub async fn access_token(&self, scope: &str) -> Result<String, SheetError> {
        let assertion = self.assertion(scope)?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| SheetError::auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetError::auth(format!("{} {body}", status.as_u16())));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SheetError::auth(e.to_string()))?;
        debug!(scope, "Obtained access token");
        Ok(token.access_token)
    }
}
