//! Custom error types for dataset descriptor processing

use std::fmt;
use std::io;

/// Dataset descriptor error types
#[derive(Debug)]
pub enum ErddapError {
    /// I/O error
    IoError(io::Error),
    /// Malformed XML input or a failed XML write
    XmlError(String),
    /// Invalid or incomplete configuration file
    ConfigError(String),
    /// The generated template lacks an element or attribute we must edit
    TemplateShape(String),
    /// The dataset ID has no entry in the dataset details
    UnknownDataset(String),
    /// GenerateDatasetsXml exited unsuccessfully
    GeneratorFailed { code: Option<i32>, stderr: String },
    /// A path argument does not point where it should
    InvalidPath(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for ErddapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErddapError::IoError(e) => write!(f, "I/O error: {}", e),
            ErddapError::XmlError(msg) => write!(f, "XML error: {}", msg),
            ErddapError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ErddapError::TemplateShape(what) => write!(f, "{} not found in dataset template", what),
            ErddapError::UnknownDataset(id) => write!(f, "Unknown dataset ID: {}", id),
            ErddapError::GeneratorFailed { code, stderr } => match code {
                Some(c) => write!(f, "Dataset template generation failed, exit-code={} error = {}", c, stderr),
                None => write!(f, "Dataset template generation terminated by signal, error = {}", stderr),
            },
            ErddapError::InvalidPath(msg) => write!(f, "Invalid path: {}", msg),
            ErddapError::GenericError(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for ErddapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ErddapError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ErddapError {
    fn from(error: io::Error) -> Self {
        ErddapError::IoError(error)
    }
}

impl From<serde_yaml::Error> for ErddapError {
    fn from(error: serde_yaml::Error) -> Self {
        ErddapError::ConfigError(error.to_string())
    }
}

/// Result type for descriptor operations
pub type ErddapResult<T> = Result<T, ErddapError>;

impl From<String> for ErddapError {
    fn from(msg: String) -> Self {
        ErddapError::GenericError(msg)
    }
}
