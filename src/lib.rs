//! HTTP reachability and latency probe.
//!
//! A run issues up to `ping_times` sequential GET requests against one
//! endpoint while a deadline timer runs alongside. Whichever finishes first
//! decides the [`RunOutcome`].

pub mod config;
pub mod deadline;
pub mod error;
pub mod metrics;
pub mod prober;
pub mod stats;
pub mod timestamp;
pub mod util;

pub use config::ProbeConfig;
pub use error::ProbeError;
pub use prober::{RunOutcome, probe, probe_endpoint};
pub use stats::LatencyStats;
