use std::fmt;

/// Default name offered when saving the generated pipeline.
pub const DEFAULT_OUTPUT_FILENAME: &str = ".gitlab-ci.yml";
/// MIME type of the saved pipeline.
pub const OUTPUT_MIME_TYPE: &str = "text/yaml";
/// Prefix that marks failure text in the output area.
pub const ERROR_MARKER: &str = "❌ Error: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingCredential,
    NetworkError,
    RemoteError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingCredential => write!(f, "missing credential"),
            FailureKind::NetworkError => write!(f, "network error"),
            FailureKind::RemoteError => write!(f, "remote error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success(String),
    Failure { kind: FailureKind, message: String },
}

impl GenerationResult {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success(_))
    }
}

/// Holds the latest generation result. Only successful text is exportable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputSink {
    current: Option<GenerationResult>,
}

impl OutputSink {
    pub fn set(&mut self, result: GenerationResult) {
        self.current = Some(result);
    }

    pub fn current(&self) -> Option<&GenerationResult> {
        self.current.as_ref()
    }

    /// Text to copy or save; `None` unless the latest result is a success.
    pub fn exportable(&self) -> Option<&str> {
        match &self.current {
            Some(GenerationResult::Success(text)) => Some(text),
            _ => None,
        }
    }

    /// Text for the output area, failures tagged with [`ERROR_MARKER`].
    pub fn display_text(&self) -> String {
        match &self.current {
            None => String::new(),
            Some(GenerationResult::Success(text)) => text.clone(),
            Some(GenerationResult::Failure { message, .. }) => format!("{ERROR_MARKER}{message}"),
        }
    }
}
