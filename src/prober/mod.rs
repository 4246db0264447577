pub mod http;
pub mod outcome;
pub mod ping_loop;

pub use outcome::RunOutcome;

use tokio::sync::{mpsc, watch};

use crate::config::ProbeConfig;
use crate::deadline::DeadlineGuard;
use crate::error::ProbeError;
use crate::stats::LatencyStats;
use crate::util::parse_endpoint;

/// Message sent by the deadline guard or the ping loop. The first one to
/// arrive decides the run.
#[derive(Debug)]
pub enum Signal {
    Slow,
    Failed(ProbeError),
    Finished(Vec<u64>),
}

/// Validate the inputs, then probe `endpoint`.
pub async fn probe_endpoint(endpoint: &str, ping_times: u32, max_sec_pinging_time: u64) -> RunOutcome {
    match ProbeConfig::new(endpoint, ping_times, max_sec_pinging_time) {
        Ok(config) => probe(&config).await,
        Err(e) => RunOutcome::Error(e),
    }
}

/// Race the ping loop against the deadline and classify the result.
pub async fn probe(config: &ProbeConfig) -> RunOutcome {
    if let Err(e) = config.validate() {
        return RunOutcome::Error(e);
    }
    let url = match parse_endpoint(&config.endpoint) {
        Ok(url) => url,
        Err(e) => return RunOutcome::Error(e),
    };
    let client = match http::build_client() {
        Ok(client) => client,
        Err(e) => return RunOutcome::Error(e),
    };

    tracing::info!(
        endpoint = %url,
        ping_times = config.ping_times,
        max_secs = config.max_sec_pinging_time,
        "Starting probe"
    );

    let (done_tx, mut done_rx) = mpsc::channel(1);
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let guard = DeadlineGuard::new(config.deadline()).spawn(done_tx.clone());
    tokio::spawn(ping_loop::run_pings(
        client,
        url.clone(),
        config.ping_times,
        cancel_rx,
        done_tx,
    ));

    // The guard always sends unless aborted, so a closed channel means slow.
    let signal = done_rx.recv().await.unwrap_or(Signal::Slow);
    done_rx.close();
    let _ = cancel_tx.send(true);
    guard.abort();

    let outcome = match signal {
        Signal::Slow => RunOutcome::SlowWarning {
            threshold_secs: config.max_sec_pinging_time,
        },
        Signal::Failed(e) => RunOutcome::Error(e),
        Signal::Finished(latencies) => finished(latencies),
    };

    match &outcome {
        RunOutcome::Ok { stats, .. } => tracing::info!(
            endpoint = %url,
            mean_ms = stats.mean_ms,
            max_ms = stats.max_ms,
            "Probe finished"
        ),
        RunOutcome::SlowWarning { threshold_secs } => {
            tracing::warn!(endpoint = %url, threshold_secs, "Probe exceeded deadline")
        }
        RunOutcome::Error(e) => {
            tracing::error!(endpoint = %url, kind = e.kind(), error = %e, "Probe failed")
        }
    }

    outcome
}

/// Summarize a completed loop. Validation keeps `ping_times` positive, so an
/// empty log only appears if that check is bypassed.
fn finished(latencies: Vec<u64>) -> RunOutcome {
    match LatencyStats::from_samples(&latencies) {
        Some(stats) => RunOutcome::Ok { latencies, stats },
        None => RunOutcome::Error(ProbeError::EmptyRun),
    }
}
