// Endpoint parsing helpers.

use reqwest::Url;

use crate::error::ProbeError;

/// Parse an endpoint into an absolute http or https URL.
pub fn parse_endpoint(s: &str) -> Result<Url, ProbeError> {
    let url = Url::parse(s.trim())
        .map_err(|e| ProbeError::RequestConstruction(format!("{}: {}", s, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ProbeError::RequestConstruction(format!(
                "unsupported scheme '{}' in {}",
                other, s
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(ProbeError::RequestConstruction(format!("missing host in {}", s)));
    }

    Ok(url)
}
