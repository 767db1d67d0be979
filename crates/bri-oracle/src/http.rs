//! HTTP Oracle Implementation
//!
//! Sends one window at a time to a tagging service that hosts the sequence
//! labeling model, and reads back labeled spans.
//!
//! # Wire format
//!
//! `POST {endpoint}/label` with body
//!
//! ```json
//! {"text": "...", "tokens": [{"text": "Choice", "start_position": 0, "whitespace_after": true}]}
//! ```
//!
//! The service answers with spans as accepted by [`crate::parse_spans`].
//!
//! # Failure semantics
//!
//! The client is synchronous and never retries: any transport error,
//! non-success status or malformed body is returned to the caller as fatal
//! for the current input. The request timeout is the only caller-imposed
//! limit.

use crate::response::parse_spans;
use crate::OracleError;
use bri_domain::{LabelOracle, LabeledSpan, Token};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Default tagging service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8500";

/// Default timeout for one labeling request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Request body for the label endpoint
#[derive(Serialize)]
struct LabelRequest<'a> {
    text: &'a str,
    tokens: &'a [Token],
}

/// Blocking client for a remote tagging service
pub struct HttpOracle {
    endpoint: String,
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpOracle {
    /// Create a new HTTP oracle
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Service base URL (e.g., "http://localhost:8500")
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bri_oracle::HttpOracle;
    ///
    /// let oracle = HttpOracle::new("http://localhost:8500").unwrap();
    /// ```
    pub fn new(endpoint: impl Into<String>) -> Result<Self, OracleError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new HTTP oracle with a specific request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, OracleError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    /// Create a new HTTP oracle against [`DEFAULT_ENDPOINT`]
    pub fn default_endpoint() -> Result<Self, OracleError> {
        Self::new(DEFAULT_ENDPOINT)
    }

    /// Service base URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl LabelOracle for HttpOracle {
    type Error = OracleError;

    fn label(&self, text: &str, tokens: &[Token]) -> Result<Vec<LabeledSpan>, Self::Error> {
        let url = format!("{}/label", self.endpoint);
        debug!("Labeling {} tokens ({} bytes) via {}", tokens.len(), text.len(), url);

        let response = self
            .client
            .post(&url)
            .json(&LabelRequest { text, tokens })
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout
                } else {
                    OracleError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Err(OracleError::Unavailable(format!("{} returned HTTP {}", url, status)));
        }

        let body = response
            .text()
            .map_err(|e| OracleError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(OracleError::Communication(format!("HTTP {}: {}", status, body)));
        }

        parse_spans(&body, text)
    }
}
