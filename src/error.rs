use reqwest::StatusCode;
use thiserror::Error;

/// Reasons a probe run can fail.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid probe config: {0}")]
    InvalidConfig(String),

    #[error("unable to create request: {0}")]
    RequestConstruction(String),

    #[error("unable to request: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("ping status: {0}")]
    UnexpectedStatus(StatusCode),

    #[error("run finished without latency samples")]
    EmptyRun,
}

impl ProbeError {
    /// Short label used for log fields and the outcome metric.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "invalid_config",
            Self::RequestConstruction(_) => "request_construction",
            Self::Transport { .. } => "transport",
            Self::UnexpectedStatus(_) => "unexpected_status",
            Self::EmptyRun => "empty_run",
        }
    }
}
