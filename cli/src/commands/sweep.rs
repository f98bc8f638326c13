use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use rakpdump_common::config::ScanConfig;
use rakpdump_core::sink::ResultSink;
use rakpdump_core::sweep::{self, SweepSummary};

use crate::commands::CommandLine;
use crate::{input, output};

pub async fn run(args: CommandLine) -> anyhow::Result<()> {
    let usernames = match &args.list {
        Some(path) => input::load_usernames(path)?,
        None => ScanConfig::default().usernames,
    };
    let config = ScanConfig {
        port: args.port,
        timeout: Duration::from_secs(args.timeout),
        workers: args.workers,
        usernames,
    };

    let addrs = input::resolve_targets(&args.target)?;
    info!(
        "Scanning {} addresses using up to {} workers",
        addrs.len(),
        config.workers
    );

    let sink: Arc<dyn ResultSink> = Arc::new(output::HashReporter::new(args.output)?);
    let cancel = Arc::new(AtomicBool::new(false));
    spawn_interrupt_handler(cancel.clone());

    let start_time = Instant::now();
    let summary = sweep::perform_sweep(addrs, &config, sink, cancel).await;
    report(&summary, start_time.elapsed());

    Ok(())
}

/// First Ctrl-C flips the cancel flag so in-flight attempts can finish and
/// results already found still get reported.
fn spawn_interrupt_handler(cancel: Arc<AtomicBool>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing in-flight attempts");
            cancel.store(true, Ordering::Relaxed);
        }
    });
}

fn report(summary: &SweepSummary, total_time: Duration) {
    info!(
        "Sweep complete: {} hashes from {} reachable hosts ({} scanned) in {:.2}s",
        summary.hashes,
        summary.reachable,
        summary.scanned,
        total_time.as_secs_f64()
    );
}
