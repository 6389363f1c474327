//! Account cycle driver for the OpenLoop rotator
//!
//! Drives an unending, single-threaded round-robin over a fixed list of
//! bearer tokens. Exactly one account is in flight at any time; the only
//! mutable state is the rotating index, advanced unconditionally after
//! every cycle.
//!
//! One account cycle:
//! 1. `Driver` resolves the current token and 1-based account id
//! 2. Balance fetched via the injected `BandwidthApi`
//! 3. Quality estimated from a fresh latency probe (`quality::estimate`)
//! 4. Share submitted with the score
//! 5. Countdown wait, then rotate to the next account
//!
//! Failures at any step are logged with the structured API body when one
//! is present, delay the rotation, and never halt the driver.

pub mod driver;
pub mod error;
pub mod logger;
pub mod quality;
pub mod wait;

pub use driver::{
    BandwidthApi, CycleOutcome, CycleReport, Driver, FAILURE_DELAY_SECS, STEP_DELAY_SECS,
};
pub use error::{Error, Result};
pub use logger::{AccountLogger, Level};
pub use quality::{FALLBACK_QUALITY, LatencyProbe, TcpLatencyProbe, estimate, score_from_rtt};
pub use wait::{CountdownWaiter, NoopWaiter, Waiter};
