use crate::error::ProbeError;
use crate::stats::LatencyStats;

/// How a probe run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every ping succeeded before the deadline.
    Ok {
        latencies: Vec<u64>,
        stats: LatencyStats,
    },
    /// The deadline passed before the pings finished.
    SlowWarning { threshold_secs: u64 },
    /// A ping failed, or the run could not start.
    Error(ProbeError),
}

impl RunOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ok { .. } => "ok",
            Self::SlowWarning { .. } => "slow",
            Self::Error(_) => "error",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn stats(&self) -> Option<&LatencyStats> {
        match self {
            Self::Ok { stats, .. } => Some(stats),
            _ => None,
        }
    }

    /// Recorded samples; empty unless the run succeeded.
    pub fn latencies(&self) -> &[u64] {
        match self {
            Self::Ok { latencies, .. } => latencies,
            _ => &[],
        }
    }

    /// Lines for the terminal summary.
    pub fn summary_lines(&self) -> Vec<String> {
        match self {
            Self::Ok { stats, .. } => stats.summary_lines().to_vec(),
            Self::SlowWarning { threshold_secs } => vec![format!(
                "[WARNING] pinging was longer than {} second",
                threshold_secs
            )],
            Self::Error(e) => vec![format!("[ERROR] {}", e)],
        }
    }

    /// Process exit status: 0 ok, 1 slow, 2 error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Ok { .. } => 0,
            Self::SlowWarning { .. } => 1,
            Self::Error(_) => 2,
        }
    }
}
