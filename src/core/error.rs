use std::fmt;

use crate::reporting::ReportError;

/// Comprehensive error types for esgdash operations
#[derive(Debug)]
pub enum EsgError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Malformed CSV input
    Csv(csv::Error),

    /// Configuration error
    Config(String),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Input dataset not found
    FileNotFound(String),

    /// A required column is absent from the dataset header
    MissingColumn { column: String, path: String },

    /// Invalid argument error
    InvalidArgument(String),

    /// Interactive prompt failure
    Dialog(dialoguer::Error),

    /// Report or dashboard rendering failure
    Render(ReportError),
}

impl fmt::Display for EsgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EsgError::Io(err) => write!(f, "IO error: {err}"),
            EsgError::Csv(err) => write!(f, "CSV error: {err}"),
            EsgError::Config(msg) => write!(f, "Configuration error: {msg}"),
            EsgError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            EsgError::FileNotFound(path) => write!(f, "File not found: {path}"),
            EsgError::MissingColumn { column, path } => write!(
                f,
                "Missing column: '{column}' is required but was not found in '{path}'"
            ),
            EsgError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            EsgError::Dialog(err) => write!(f, "Prompt error: {err}"),
            EsgError::Render(err) => write!(f, "Render error: {err}"),
        }
    }
}

impl std::error::Error for EsgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EsgError::Io(err) => Some(err),
            EsgError::Csv(err) => Some(err),
            EsgError::TomlParsing(err) => Some(err),
            EsgError::Dialog(err) => Some(err),
            EsgError::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EsgError {
    fn from(err: std::io::Error) -> Self {
        EsgError::Io(err)
    }
}

impl From<csv::Error> for EsgError {
    fn from(err: csv::Error) -> Self {
        EsgError::Csv(err)
    }
}

impl From<toml::de::Error> for EsgError {
    fn from(err: toml::de::Error) -> Self {
        EsgError::TomlParsing(err)
    }
}

impl From<dialoguer::Error> for EsgError {
    fn from(err: dialoguer::Error) -> Self {
        EsgError::Dialog(err)
    }
}

impl From<ReportError> for EsgError {
    fn from(err: ReportError) -> Self {
        EsgError::Render(err)
    }
}

/// Type alias for Results using EsgError
pub type Result<T> = std::result::Result<T, EsgError>;
