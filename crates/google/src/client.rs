//! Authenticated HTTP client shared by the Sheets and export adapters.

use std::sync::Arc;
use std::time::Duration;

use ledgerbot_core::sheet::SheetError;
use ledgerbot_shared::{AppError, AppResult, GoogleConfig};
use tracing::debug;

use crate::auth::{ServiceAccountKey, TokenProvider};

/// HTTP client bound to one spreadsheet and one service account.
#[derive(Debug)]
pub struct GoogleClient {
    http: reqwest::Client,
    tokens: TokenProvider,
    spreadsheet_id: String,
}

impl GoogleClient {
    /// Creates a client from configuration, reading the key file.
    ///
    /// # Errors
    ///
    /// Returns an error if the key file is invalid or the HTTP client cannot be built.
    pub fn from_config(config: &GoogleConfig) -> AppResult<Arc<Self>> {
        let key = ServiceAccountKey::from_file(&config.credentials_path)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Arc::new(Self::new(http, key, config.spreadsheet_id.clone())?))
    }

    /// Creates a client from parts.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Credentials` if the private key is invalid.
    pub fn new(
        http: reqwest::Client,
        key: ServiceAccountKey,
        spreadsheet_id: String,
    ) -> AppResult<Self> {
        let tokens = TokenProvider::new(key, http.clone())?;
        Ok(Self {
            http,
            tokens,
            spreadsheet_id,
        })
    }

    /// The spreadsheet this client reads.
    #[must_use]
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Service account identity.
    #[must_use]
    pub fn client_email(&self) -> &str {
        self.tokens.client_email()
    }

    /// Sends an authorized GET with a token for `scope`.
    ///
    /// The response is returned whatever its status; callers decide how a
    /// failure status maps to an error.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Auth` if no token can be minted, or
    /// `SheetError::Http` if the request cannot be sent.
    pub async fn get(&self, url: &str, scope: &str) -> Result<reqwest::Response, SheetError> {
        let token = self.tokens.access_token(scope).await?;
        debug!(url, "GET");
        self.http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SheetError::http(e.to_string()))
    }
}
