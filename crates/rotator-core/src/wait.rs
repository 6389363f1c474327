//! Countdown waits between cycle steps
//!
//! The driver's timing contract is expressed through the `Waiter` trait so
//! tests can substitute a no-op and exercise cycles without a real clock
//! or terminal. The real implementation overwrites a single status line
//! once per second with the remaining time.

use std::io::Write;
use std::time::Duration;

/// Suspending wait with per-second progress.
#[allow(async_fn_in_trait)]
pub trait Waiter {
    async fn wait(&self, seconds: u64, account_id: usize);
}

/// Terminal countdown: one overwritten line ticking down once per second.
///
/// No cancellation is exposed; the wait always runs to completion.
pub struct CountdownWaiter;

impl Waiter for CountdownWaiter {
    async fn wait(&self, seconds: u64, account_id: usize) {
        for remaining in (1..=seconds).rev() {
            print!("\r[Account {account_id}] waiting ({remaining:02}s)");
            let _ = std::io::stdout().flush();
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        if seconds > 0 {
            // Clear the countdown line before the next log output
            print!("\r{:40}\r", "");
            let _ = std::io::stdout().flush();
        }
    }
}

/// No-op waiter for tests.
pub struct NoopWaiter;

impl Waiter for NoopWaiter {
    async fn wait(&self, _seconds: u64, _account_id: usize) {}
}
