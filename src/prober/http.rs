use reqwest::header::{CONNECTION, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use tokio::time::Instant;

use crate::error::ProbeError;
use crate::timestamp::elapsed_millis;

/// Client used for every request in a run.
///
/// Idle connections are never kept, so each ping opens a fresh connection.
/// Certificate verification is disabled so endpoints with self-signed or
/// expired certificates can still be probed; nothing read through this client
/// should be trusted.
pub fn build_client() -> Result<Client, ProbeError> {
    Client::builder()
        .danger_accept_invalid_certs(true)
        .pool_max_idle_per_host(0)
        .no_proxy()
        .user_agent(concat!("http-latency-probe/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProbeError::RequestConstruction(e.to_string()))
}

/// One timed GET. Returns the round trip in whole milliseconds, measured
/// until the body has been fully read.
pub async fn probe_http(client: &Client, url: &Url) -> Result<u64, ProbeError> {
    let start = Instant::now();
    let resp = client
        .get(url.clone())
        .header(CONNECTION, HeaderValue::from_static("close"))
        .send()
        .await
        .inspect_err(|e| tracing::warn!(endpoint = %url, error = %e, "Unable to request"))?;

    let status = resp.status();
    if status != StatusCode::OK {
        tracing::warn!(endpoint = %url, status = %status, "Ping returned unexpected status");
        return Err(ProbeError::UnexpectedStatus(status));
    }

    resp.bytes()
        .await
        .inspect_err(|e| tracing::warn!(endpoint = %url, error = %e, "Unable to read response body"))?;
    Ok(elapsed_millis(start))
}
