//! Wire types for the bandwidth endpoints
//!
//! Both endpoints answer with the same envelope; the only field the rotator
//! reads is the point balance at `data.balances.POINT`. Unknown fields are
//! ignored so upstream additions don't break parsing.

use serde::{Deserialize, Serialize};

/// Response envelope shared by `/bandwidth/info` and `/bandwidth/share`.
#[derive(Debug, Deserialize)]
pub struct BandwidthResponse {
    pub data: BandwidthData,
}

#[derive(Debug, Deserialize)]
pub struct BandwidthData {
    pub balances: Balances,
}

/// Account balances keyed by currency; only POINT is consumed.
#[derive(Debug, Deserialize)]
pub struct Balances {
    #[serde(rename = "POINT")]
    pub point: f64,
}

/// Body posted to `/bandwidth/share`.
#[derive(Debug, Serialize)]
pub struct ShareRequest {
    /// Quality score in 1..=100
    pub quality: u8,
}
