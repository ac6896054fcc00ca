use std::io;

use thiserror::Error;

use crate::domain::generation::GenerationError;

/// Library-wide error type for storygrid operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Invalid user input or a failed interactive prompt.
    #[error("{0}")]
    Validation(String),

    /// Storyboard already exists at the target location.
    #[error(".storygrid/ storyboard already exists")]
    StoryboardExists,

    /// No .storygrid/ storyboard found in the current directory.
    #[error("No .storygrid/ storyboard found in current directory. Run 'storygrid init' first.")]
    StoryboardNotFound,

    /// Grid label is not part of the catalog.
    #[error("Unknown grid '{label}'. Available: {available}")]
    UnknownGrid { label: String, available: String },

    /// Custom grid shape has a side outside `1..=MAX_CUSTOM_SIDE`.
    #[error("Invalid grid shape {rows}x{cols}: rows and columns must be between 1 and 10")]
    InvalidGridShape { rows: u32, cols: u32 },

    /// Shot type is not part of the vocabulary.
    #[error("Unknown shot type '{name}'. Available: {available}")]
    UnknownShotType { name: String, available: String },

    /// Language code is not supported.
    #[error("Unknown language '{0}': must be 'zh' or 'en'")]
    UnknownLanguage(String),

    /// Font size is not supported.
    #[error("Unknown font size '{0}': must be 'small', 'medium', or 'large'")]
    UnknownFontSize(String),

    /// No slot with the given id exists in the grid.
    #[error("Shot {0} not found in the current grid")]
    SlotNotFound(u32),

    /// A request targeting some of the same slots is still running.
    #[error("Generation already in progress for shot(s) {}", format_ids(.slots))]
    GenerationInFlight { slots: Vec<u32> },

    /// Remote generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Prompt template rendering failed.
    #[error("Failed to render prompt '{template}': {details}")]
    PromptRender { template: String, details: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

fn format_ids(ids: &[u32]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn parse_error(what: impl Into<String>, details: impl ToString) -> Self {
        AppError::ParseError { what: what.into(), details: details.to_string() }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::Validation(_)
            | AppError::UnknownGrid { .. }
            | AppError::InvalidGridShape { .. }
            | AppError::UnknownShotType { .. }
            | AppError::UnknownLanguage(_)
            | AppError::UnknownFontSize(_)
            | AppError::PromptRender { .. }
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::StoryboardNotFound | AppError::SlotNotFound(_) => io::ErrorKind::NotFound,
            AppError::StoryboardExists => io::ErrorKind::AlreadyExists,
            AppError::GenerationInFlight { .. } => io::ErrorKind::ResourceBusy,
            AppError::Generation(err) => err.kind(),
        }
    }
}
