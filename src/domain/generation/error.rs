use std::io;

use thiserror::Error;

/// Failures of a remote generation call.
///
/// None of these are retried; each is reported to the user as a single message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No API key is configured, so no request was attempted.
    #[error("Gemini API key is not set. Run 'storygrid key set <KEY>' or export GEMINI_API_KEY.")]
    CredentialMissing,

    /// Network or HTTP failure from the external call.
    #[error("{}", transport_message(.message, .status))]
    Transport { message: String, status: Option<u16> },

    /// The response arrived but did not match the expected structure.
    #[error("Malformed response from Gemini: {0}")]
    MalformedResponse(String),
}

fn transport_message(message: &str, status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("Gemini API request failed (HTTP {}): {}", code, message),
        None => format!("Gemini API request failed: {}", message),
    }
}

impl GenerationError {
    pub fn transport(message: impl Into<String>, status: Option<u16>) -> Self {
        GenerationError::Transport { message: message.into(), status }
    }

    pub fn malformed(details: impl Into<String>) -> Self {
        GenerationError::MalformedResponse(details.into())
    }

    pub fn kind(&self) -> io::ErrorKind {
        match self {
            GenerationError::CredentialMissing => io::ErrorKind::PermissionDenied,
            GenerationError::Transport { .. } => io::ErrorKind::Other,
            GenerationError::MalformedResponse(_) => io::ErrorKind::InvalidData,
        }
    }
}
