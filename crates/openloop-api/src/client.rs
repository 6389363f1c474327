//! HTTP client for the two bandwidth endpoints
//!
//! One `GET /bandwidth/info` to read the point balance, one
//! `POST /bandwidth/share` to submit a quality score. Both carry the
//! account's bearer token and answer with the same balance envelope.
//!
//! The transport timeout lives on the injected `reqwest::Client`, so the
//! binary decides the policy (see the `api.timeout_secs` config field) and
//! tests can use an unbounded client against a local mock.

use tracing::debug;

use crate::constants::{API_BASE_URL, INFO_PATH, SHARE_PATH};
use crate::error::{Error, Result};
use crate::types::{BandwidthResponse, ShareRequest};

/// Client bound to one API base URL.
///
/// Cheap to clone (reqwest clients share their connection pool).
#[derive(Debug, Clone)]
pub struct OpenLoopClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenLoopClient {
    /// Client against the production API.
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, API_BASE_URL)
    }

    /// Client against an alternate base URL (tests, staging).
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url }
    }

    /// Fetch the account's current point balance.
    pub async fn bandwidth_info(&self, token: &str) -> Result<f64> {
        let url = format!("{}{INFO_PATH}", self.base_url);
        debug!(%url, "fetching bandwidth info");
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::Http(format!("bandwidth info request failed: {e}")))?;
        read_balance(response).await
    }

    /// Submit a bandwidth share with the given quality score.
    ///
    /// Returns the updated point balance from the response envelope.
    pub async fn share_bandwidth(&self, token: &str, quality: u8) -> Result<f64> {
        let url = format!("{}{SHARE_PATH}", self.base_url);
        debug!(%url, quality, "submitting bandwidth share");
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&ShareRequest { quality })
            .send()
            .await
            .map_err(|e| Error::Http(format!("bandwidth share request failed: {e}")))?;
        read_balance(response).await
    }
}

/// Extract the point balance, or capture the body of a non-2xx response.
async fn read_balance(response: reqwest::Response) -> Result<f64> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<no body>"));
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }

    let parsed = response
        .json::<BandwidthResponse>()
        .await
        .map_err(|e| Error::Parse(format!("invalid bandwidth response: {e}")))?;
    Ok(parsed.data.balances.point)
}
