//! Timetable archive download with endpoint fallback.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{info, warn};

use super::error::TimetableError;

/// Candidate endpoints, tried in order. The portal has published the
/// timetable under several interface versions and which one is live
/// varies by account subscription, so the client walks the list until
/// one answers.
const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://opendata.nationalrail.co.uk/api/staticfeeds/3.0/timetable",
    "https://opendata.nationalrail.co.uk/api/staticfeeds/2.0/timetable",
    "https://opendata.nationalrail.co.uk/api/staticfeeds/4.0/timetable",
];

/// Default request timeout. The archive is large; allow a few minutes.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for the timetable download client.
#[derive(Debug, Clone)]
pub struct TimetableConfig {
    /// Portal auth token sent as `X-Auth-Token`
    pub token: String,
    /// Candidate endpoints in the order to try them
    pub endpoints: Vec<String>,
    /// Request timeout in seconds, applied per candidate
    pub timeout_secs: u64,
}

impl TimetableConfig {
    /// Create a new config with the given auth token and the default
    /// endpoint candidates.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoints: DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Replace the candidate endpoint list (for testing).
    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the timetable archive endpoints.
#[derive(Debug, Clone)]
pub struct TimetableClient {
    http: reqwest::Client,
    endpoints: Vec<String>,
}

impl TimetableClient {
    /// Create a new timetable client.
    pub fn new(config: TimetableConfig) -> Result<Self, TimetableError> {
        let mut headers = HeaderMap::new();

        let token = HeaderValue::from_str(&config.token).map_err(|_| TimetableError::Api {
            status: 0,
            message: "Invalid auth token format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-auth-token"), token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoints: config.endpoints,
        })
    }

    /// Download the timetable archive, trying each candidate exactly once.
    ///
    /// Returns `None` when every candidate fails; the caller builds in
    /// degraded mode with owning-operator data only. Individual failures
    /// are logged, never propagated.
    pub async fn fetch_archive(&self) -> Option<Vec<u8>> {
        for url in &self.endpoints {
            match self.try_endpoint(url).await {
                Ok(bytes) => {
                    info!(url, bytes = bytes.len(), "downloaded timetable archive");
                    return Some(bytes);
                }
                Err(e) => {
                    warn!(url, error = %e, "timetable endpoint failed, trying next");
                }
            }
        }
        None
    }

    async fn try_endpoint(&self, url: &str) -> Result<Vec<u8>, TimetableError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TimetableError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TimetableError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
