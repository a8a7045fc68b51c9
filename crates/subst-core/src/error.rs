use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubstError {
    // Config errors
    #[error("CONFIG_PARSE_ERROR: failed to parse substitute options: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_READ_ERROR: failed to read '{path}': {reason}")]
    ConfigReadError { path: PathBuf, reason: String },

    #[error("CONFIG_WRITE_ERROR: {0}")]
    ConfigWriteError(String),

    // Engine errors
    #[error("COMPLETION_LOST: substitution finished without delivering a result")]
    CompletionLost,

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<toml::de::Error> for SubstError {
    fn from(err: toml::de::Error) -> Self {
        SubstError::ConfigParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for SubstError {
    fn from(err: toml::ser::Error) -> Self {
        SubstError::ConfigWriteError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SubstError>;
