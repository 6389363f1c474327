//! OpenLoop bandwidth API surface
//!
//! Wraps the two upstream endpoints the rotator consumes and the local
//! token storage that feeds them. This crate is a standalone library with
//! no dependency on the rotator binary — it can be tested and used
//! independently.
//!
//! Request flow per account cycle:
//! 1. Driver resolves a token from `store::TokenStore::list()`
//! 2. `client::OpenLoopClient::bandwidth_info()` fetches the point balance
//! 3. Driver computes a quality score from a latency probe
//! 4. `client::OpenLoopClient::share_bandwidth()` submits the score
//!
//! The upstream is treated as an opaque two-endpoint service: any non-2xx
//! response or transport error surfaces as `Error::Api` / `Error::Http`
//! and is handled at the cycle boundary by the caller.

pub mod client;
pub mod constants;
pub mod error;
pub mod store;
pub mod types;

pub use client::OpenLoopClient;
pub use constants::*;
pub use error::{Error, Result};
pub use store::TokenStore;
pub use types::{Balances, BandwidthData, BandwidthResponse, ShareRequest};
