//! Knowledgebase stations feed client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::error::KbError;

/// Default URL for the Knowledgebase stations feed.
const DEFAULT_BASE_URL: &str = "https://opendata.nationalrail.co.uk/api/staticfeeds/4.0/stations";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the knowledgebase client.
#[derive(Debug, Clone)]
pub struct KbConfig {
    /// Portal auth token sent as `X-Auth-Token`
    pub token: String,
    /// Feed URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl KbConfig {
    /// Create a new config with the given auth token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom feed URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the Knowledgebase stations feed.
#[derive(Debug, Clone)]
pub struct KbClient {
    http: reqwest::Client,
    base_url: String,
}

impl KbClient {
    /// Create a new knowledgebase client.
    pub fn new(config: KbConfig) -> Result<Self, KbError> {
        let mut headers = HeaderMap::new();

        let token = HeaderValue::from_str(&config.token).map_err(|_| KbError::Api {
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
            base_url: config.base_url,
        })
    }

    /// Fetch the raw stations XML document.
    pub async fn fetch_stations_xml(&self) -> Result<String, KbError> {
        let response = self.http.get(&self.base_url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(KbError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KbError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}
