use thiserror::Error;

use crate::stages::Stage;

/// Startup configuration problems. Fatal: the analyzer never starts.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("credential pool is empty (set GOOGLE_API_KEYS or GOOGLE_API_KEY)")]
    EmptyCredentialPool,

    #[error("invalid value for {name}: {reason}")]
    InvalidSetting { name: String, reason: String },
}

/// Failures reported by the inference backend or the transport to it.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to inference backend failed: {0}")]
    Transport(String),

    #[error("inference backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("inference backend returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.to_string())
    }
}

/// The structuring stage produced text that is not the expected JSON object.
#[derive(Debug, Error)]
#[error("structured output is not valid: {0}")]
pub struct ParseError(#[from] pub serde_json::Error);

/// A single stage failed. Recovered at the cycle boundary.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("{stage} stage failed: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: UpstreamError,
    },

    #[error("{stage} stage output unusable: {source}")]
    Unparsable {
        stage: Stage,
        #[source]
        source: ParseError,
    },
}

impl StageError {
    pub fn stage(&self) -> Stage {
        match self {
            StageError::Upstream { stage, .. } | StageError::Unparsable { stage, .. } => *stage,
        }
    }
}

/// Every cycle of a batch failed.
#[derive(Debug, Error)]
#[error("all {total} analysis cycles failed")]
pub struct NoSuccessfulCyclesError {
    pub total: usize,
}

/// Errors that reach the caller of `analyze`.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    NoSuccessfulCycles(#[from] NoSuccessfulCyclesError),

    #[error("input text is empty")]
    EmptyInput,

    #[error("could not set up the inference client: {0}")]
    ClientSetup(#[source] UpstreamError),
}
