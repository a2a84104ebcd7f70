//! Error types for Dirverify
//!
//! These are configuration faults and programmer errors. Routine verification
//! outcomes (unknown user, bad password, ...) are [`crate::ErrorCode`] values,
//! never errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Configuration Errors
    #[error("'{0}' configuration cannot be empty")]
    MissingConfiguration(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Search parameter '{attribute}' refers to unknown input '{input}'")]
    MissingSearchInput { attribute: String, input: String },

    #[error("Failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // Session Errors
    #[error("Directory session is {actual}, expected {expected}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingConfiguration(_) => "MissingConfiguration",
            Error::InvalidConfiguration(_) => "InvalidConfiguration",
            Error::MissingSearchInput { .. } => "MissingSearchInput",
            Error::ConfigRead(_) => "ConfigRead",
            Error::ConfigParse(_) => "ConfigParse",
            Error::InvalidState { .. } => "InvalidState",
        }
    }

    /// Whether the error comes from the configuration rather than from misuse
    /// of the session API
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::InvalidState { .. })
    }
}
