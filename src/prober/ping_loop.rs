use reqwest::{Client, Url};
use tokio::sync::{mpsc, watch};

use super::Signal;
use super::http::probe_http;

/// Issue up to `ping_times` sequential pings and report the result once.
///
/// The log stays local until it is moved into [`Signal::Finished`]. If the
/// run is cancelled, the loop stops without sending anything, dropping any
/// request that is still in flight.
pub async fn run_pings(
    client: Client,
    url: Url,
    ping_times: u32,
    mut cancel: watch::Receiver<bool>,
    done: mpsc::Sender<Signal>,
) {
    let mut latencies = Vec::with_capacity(ping_times as usize);

    for attempt in 1..=ping_times {
        if *cancel.borrow() {
            tracing::debug!(attempt, "Ping loop cancelled");
            return;
        }

        let result = tokio::select! {
            biased;
            _ = cancel.changed() => {
                tracing::debug!(attempt, "Ping loop cancelled mid-request");
                return;
            }
            result = probe_http(&client, &url) => result,
        };

        match result {
            Ok(latency_ms) => {
                tracing::debug!(attempt, latency_ms, "Ping succeeded");
                latencies.push(latency_ms);
            }
            Err(e) => {
                let _ = done.send(Signal::Failed(e)).await;
                return;
            }
        }
    }

    let _ = done.send(Signal::Finished(latencies)).await;
}
