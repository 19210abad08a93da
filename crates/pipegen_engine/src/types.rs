use std::fmt;

pub type GenerationId = u64;

/// Message used for every transport-level failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Failed to connect to the generation service.";
/// Message used when the service signals an error without saying why.
pub const REMOTE_ERROR_FALLBACK: &str = "Something went wrong.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GenerationCompleted {
        generation_id: GenerationId,
        result: Result<String, GenerationError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerationError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No credential configured; nothing was sent.
    MissingCredential,
    /// No response was obtained.
    Network,
    /// A response was obtained but reported an error or could not be read.
    Remote,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingCredential => write!(f, "missing credential"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Remote => write!(f, "remote error"),
        }
    }
}
