#![cfg(test)]

use std::net::Ipv4Addr;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rakpdump_common::config::ScanConfig;
use rakpdump_core::hash::HashRecord;
use rakpdump_core::sink::ResultSink;
use rakpdump_core::sweep::{self, SweepSummary};

use super::mock::{self, MockBmc};

const LOOPBACK: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 1);

/// Collects records the way the CLI's reporter would, minus the printing.
#[derive(Default)]
struct CollectSink {
    records: Mutex<Vec<HashRecord>>,
}

impl ResultSink for CollectSink {
    fn hash_found(&self, record: &HashRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

fn config(port: u16, usernames: &[&str]) -> ScanConfig {
    ScanConfig {
        port,
        timeout: Duration::from_millis(500),
        workers: 4,
        usernames: usernames.iter().map(|u| u.to_string()).collect(),
    }
}

async fn run_sweep(cfg: &ScanConfig) -> (SweepSummary, Vec<HashRecord>) {
    let sink = Arc::new(CollectSink::default());
    let summary = sweep::perform_sweep(
        vec![LOOPBACK],
        cfg,
        sink.clone(),
        Arc::new(AtomicBool::new(false)),
    )
    .await;
    let records = sink.records.lock().unwrap().clone();
    (summary, records)
}

#[tokio::test]
async fn hash_retrieved_end_to_end() {
    let bmc = MockBmc::spawn(&["admin"]).await.unwrap();
    let cfg = config(bmc.port, &["admin"]);

    let (summary, records) = run_sweep(&cfg).await;

    assert_eq!(summary.hashes, 1, "expected exactly one HashFound");
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.username, "admin");
    assert_eq!(record.request_id, mock::REQUEST_ID);
    assert_eq!(record.bmc_salt, mock::BMC_SALT);
    assert_eq!(record.hmac, mock::HMAC);

    let john = record.john_line();
    assert!(john.contains("$rakp$"), "john line missing tag: {john}");
    assert!(john.contains("aabbccdd"), "john line missing request ID: {john}");
}

#[tokio::test]
async fn invalid_users_advance_to_the_next_candidate() {
    let bmc = MockBmc::spawn(&["USERID"]).await.unwrap();
    let cfg = config(bmc.port, &["admin", "root", "USERID"]);

    let (summary, records) = run_sweep(&cfg).await;

    assert_eq!(summary.hashes, 1);
    assert_eq!(records[0].username, "USERID");
}

#[tokio::test]
async fn first_hash_halts_username_iteration() {
    let bmc = MockBmc::spawn(&["admin", "root"]).await.unwrap();
    let cfg = config(bmc.port, &["admin", "root"]);

    let (summary, records) = run_sweep(&cfg).await;

    assert_eq!(summary.hashes, 1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].username, "admin");
    // probe + one attempt's two messages, nothing for "root"
    assert_eq!(bmc.datagrams(), 3);
}

#[tokio::test]
async fn exhausting_candidates_yields_no_records() {
    let bmc = MockBmc::spawn(&[]).await.unwrap();
    let cfg = config(bmc.port, &["admin", "root"]);

    let (summary, records) = run_sweep(&cfg).await;

    assert_eq!(summary.hashes, 0);
    assert_eq!(summary.reachable, 1);
    assert_eq!(summary.scanned, 1);
    assert!(records.is_empty());
}

#[tokio::test]
async fn unreachable_host_skips_all_usernames() {
    let bmc = MockBmc::silent().await.unwrap();
    let cfg = config(bmc.port, &["admin", "root"]);

    let (summary, records) = run_sweep(&cfg).await;

    assert_eq!(summary.hashes, 0);
    assert_eq!(summary.reachable, 0);
    assert!(records.is_empty());
    // only the reachability probe ever went out
    assert_eq!(bmc.datagrams(), 1);
}

#[tokio::test]
async fn session_ids_are_fresh_per_attempt() {
    let bmc = MockBmc::spawn(&[]).await.unwrap();
    let cfg = config(bmc.port, &["admin", "root"]);

    let _ = run_sweep(&cfg).await;

    // probe + two username attempts, each with its own random ID
    let ids = bmc.session_ids_seen.lock().unwrap().clone();
    assert_eq!(ids.len(), 3);
    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), ids.len(), "console session IDs repeated: {ids:?}");
}

#[tokio::test]
async fn cancelled_sweep_stops_between_attempts() {
    let bmc = MockBmc::spawn(&[]).await.unwrap();
    let cfg = config(bmc.port, &["admin", "root"]);

    let cancel = Arc::new(AtomicBool::new(true));
    let sink = Arc::new(CollectSink::default());
    let summary =
        sweep::perform_sweep(vec![LOOPBACK], &cfg, sink.clone(), cancel).await;

    assert_eq!(summary.hashes, 0);
    assert!(sink.records.lock().unwrap().is_empty());
    // pre-set flag means the worker bails before probing
    assert_eq!(bmc.datagrams(), 0);
}
