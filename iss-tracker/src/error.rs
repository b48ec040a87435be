//! Error taxonomy shared by every resolver stage

use std::fmt;
use thiserror::Error;

use crate::http::TransportError;

/// Pipeline stage a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ip,
    Coordinates,
    PassTimes,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Stage::Ip => "IP",
            Stage::Coordinates => "coordinates for IP",
            Stage::PassTimes => "ISS pass times",
        };
        f.write_str(what)
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP collaborator failed before a response arrived.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Upstream answered with something other than 200.
    #[error("Status Code {status} when fetching {stage}. Response: {body}")]
    UpstreamStatus {
        stage: Stage,
        status: u16,
        body: String,
    },

    /// Body is not JSON or lacks the expected fields.
    #[error("Malformed response when fetching {stage}: {source}")]
    MalformedResponse {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Stage that produced the error, `None` for transport failures
    pub fn stage(&self) -> Option<Stage> {
        match self {
            FetchError::Transport(_) => None,
            FetchError::UpstreamStatus { stage, .. } => Some(*stage),
            FetchError::MalformedResponse { stage, .. } => Some(*stage),
        }
    }
}
