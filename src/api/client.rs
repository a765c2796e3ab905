//! HTTP-Client für den Join-Parameter-Endpoint
//!
//! Der opake Initialisierungs-Payload des Host-Containers wandert
//! unverändert in den Authorization-Header. Transportfehler und
//! 5xx-Antworten werden mit begrenztem Backoff wiederholt; 4xx
//! schlägt sofort fehl.

use super::messages::JoinRoomParams;
use super::JoinApi;
use async_trait::async_trait;
use reqwest::{header, StatusCode};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Pfad des Join-Parameter-Endpoints
pub const JOIN_PARAMS_PATH: &str = "api/1/room-info";

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid API url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(StatusCode),
}

impl ApiError {
    /// Lohnt sich ein weiterer Versuch?
    fn is_retryable(&self) -> bool {
        match self {
            ApiError::Request(_) => true,
            ApiError::Status(status) => status.is_server_error(),
            ApiError::InvalidUrl(_) => false,
        }
    }
}

// ============================================================================
// API CLIENT
// ============================================================================

/// REST-Client des Backends
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    /// Erstellt den Client mit der Basis-URL aus der Umgebung
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(&Self::default_base_url())
    }

    /// Basis-URL des Backends (`VOICE_ROOM_API_URL` mit Fallback)
    pub fn default_base_url() -> String {
        std::env::var("VOICE_ROOM_API_URL")
            .unwrap_or_else(|_| "https://imperscriptible-fe-tectricial.ngrok-free.dev".to_string())
    }

    async fn fetch_join_params(
        &self,
        url: &Url,
        init_data: &str,
    ) -> Result<JoinRoomParams, ApiError> {
        let response = self
            .http
            .get(url.clone())
            .header(header::AUTHORIZATION, format!("Bearer {init_data}"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl JoinApi for ApiClient {
    async fn join_params(&self, init_data: &str) -> Result<JoinRoomParams, ApiError> {
        let url = self.base_url.join(JOIN_PARAMS_PATH)?;
        retry_with_backoff(|| self.fetch_join_params(&url, init_data)).await
    }
}

// ============================================================================
// RETRY
// ============================================================================

/// Wiederholt eine Operation bei wiederholbaren Fehlern
///
/// Maximal drei Versuche, Backoff 500 ms mit Verdopplung. Nicht
/// wiederholbare Fehler (4xx, ungültige URL) brechen sofort ab.
async fn retry_with_backoff<T, F, Fut>(mut operation: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0;
    let mut backoff = INITIAL_BACKOFF;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < MAX_ATTEMPTS && err.is_retryable() => {
                tracing::warn!(
                    "join params request failed (attempt {}/{}): {}",
                    attempt,
                    MAX_ATTEMPTS,
                    err
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(err) => {
                tracing::error!("failed to fetch join params: {}", err);
                return Err(err);
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
