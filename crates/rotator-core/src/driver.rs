//! Round-robin account cycle driver
//!
//! Holds the token list (read-only after load) and the rotating index (the
//! only mutable state). Each cycle runs one account's
//! fetch → measure → report sequence to completion, then rotates through
//! the explicit loop in `run`; exactly one account is ever in flight, so
//! no continuation or callback chaining is involved.
//!
//! State machine for one cycle:
//! `FETCH_BALANCE → MEASURE_QUALITY → SUBMIT_SHARE → {SUCCESS | FAILURE} → ROTATE`
//! with ROTATE unconditional — failures delay the rotation, they never
//! stop it, and an account is never retried before the list wraps back
//! around to it.

use common::Secret;
use openloop_api::OpenLoopClient;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::logger::{AccountLogger, Level};
use crate::quality::{self, LatencyProbe};
use crate::wait::Waiter;

/// Delay after the balance fetch and after a successful share submission.
pub const STEP_DELAY_SECS: u64 = 5;

/// Delay before rotating away from a failed cycle.
pub const FAILURE_DELAY_SECS: u64 = 10;

/// The two upstream calls a cycle makes, as a seam for test doubles.
///
/// No Send bound on the returned futures: the driver runs on a single
/// task and is never spawned across threads.
#[allow(async_fn_in_trait)]
pub trait BandwidthApi {
    async fn bandwidth_info(&self, token: &str) -> openloop_api::Result<f64>;
    async fn share_bandwidth(&self, token: &str, quality: u8) -> openloop_api::Result<f64>;
}

impl BandwidthApi for OpenLoopClient {
    async fn bandwidth_info(&self, token: &str) -> openloop_api::Result<f64> {
        OpenLoopClient::bandwidth_info(self, token).await
    }

    async fn share_bandwidth(&self, token: &str, quality: u8) -> openloop_api::Result<f64> {
        OpenLoopClient::share_bandwidth(self, token, quality).await
    }
}

/// What one successful cycle observed.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub opening_balance: f64,
    pub quality: u8,
    pub closing_balance: f64,
}

/// Result of one cycle, surfaced for tests and observability.
///
/// Both variants rotate; the driver itself never acts on this value.
#[derive(Debug)]
pub enum CycleOutcome {
    Success(CycleReport),
    Failure(openloop_api::Error),
}

/// Round-robin driver over a non-empty token list.
///
/// Collaborators are injected so cycles are testable without a network,
/// terminal, or clock: a `BandwidthApi` for the two upstream calls, a
/// `LatencyProbe` for quality, a `Waiter` for the countdowns, and the
/// account logger.
pub struct Driver<A, P, W> {
    tokens: Vec<Secret<String>>,
    api: A,
    probe: P,
    waiter: W,
    logger: AccountLogger,
    index: usize,
}

impl<A, P, W> Driver<A, P, W>
where
    A: BandwidthApi,
    P: LatencyProbe,
    W: Waiter,
{
    /// Build a driver. Refuses an empty token list before any network
    /// call is made.
    pub fn new(
        tokens: Vec<Secret<String>>,
        api: A,
        probe: P,
        waiter: W,
        logger: AccountLogger,
    ) -> Result<Self> {
        if tokens.is_empty() {
            return Err(Error::NoTokens);
        }
        info!(accounts = tokens.len(), "driver initialized");
        Ok(Self {
            tokens,
            api,
            probe,
            waiter,
            logger,
            index: 0,
        })
    }

    /// Index of the account the next cycle will run.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Number of loaded accounts.
    pub fn account_count(&self) -> usize {
        self.tokens.len()
    }

    /// Run cycles forever. Terminates only with the process.
    pub async fn run(&mut self) {
        info!(accounts = self.tokens.len(), "starting account rotation");
        loop {
            self.cycle().await;
        }
    }

    /// Run one account's cycle, then rotate unconditionally.
    pub async fn cycle(&mut self) -> CycleOutcome {
        let account_id = self.index + 1;
        let token = self.tokens[self.index].clone();
        debug!(index = self.index, account_id, "cycle starting");

        let outcome = match self.process_account(account_id, token.expose()).await {
            Ok(report) => {
                self.logger
                    .log(account_id, Level::Info, "next requests cycle");
                CycleOutcome::Success(report)
            }
            Err(err) => {
                self.logger
                    .log(account_id, Level::Error, "cycle failed, rotating to next account");
                self.logger.log(account_id, Level::Error, &err.detail());
                self.waiter.wait(FAILURE_DELAY_SECS, account_id).await;
                CycleOutcome::Failure(err)
            }
        };

        self.index = (self.index + 1) % self.tokens.len();
        outcome
    }

    /// One account's fetch → wait → measure → report → wait sequence.
    async fn process_account(
        &self,
        account_id: usize,
        token: &str,
    ) -> openloop_api::Result<CycleReport> {
        self.logger
            .log(account_id, Level::Warning, "fetching bandwidth info");
        let opening_balance = self.api.bandwidth_info(token).await?;
        self.logger
            .log(account_id, Level::Success, "bandwidth info retrieved");
        self.logger.log(
            account_id,
            Level::Info,
            &format!("balance: {opening_balance:.2}"),
        );
        self.waiter.wait(STEP_DELAY_SECS, account_id).await;

        self.logger
            .log(account_id, Level::Warning, "measuring network quality");
        let quality = quality::estimate(&self.probe).await;
        self.logger
            .log(account_id, Level::Info, &format!("quality score: {quality}"));

        self.logger
            .log(account_id, Level::Warning, "submitting bandwidth share");
        let closing_balance = self.api.share_bandwidth(token, quality).await?;
        self.logger
            .log(account_id, Level::Success, "bandwidth share accepted");
        self.logger.log(
            account_id,
            Level::Info,
            &format!("points: {closing_balance:.2}"),
        );
        self.waiter.wait(STEP_DELAY_SECS, account_id).await;

        Ok(CycleReport {
            opening_balance,
            quality,
            closing_balance,
        })
    }
}
