//! Verification outcome classification

use serde::{Deserialize, Serialize};
use std::fmt;

const MESSAGE_NONE: &str = "The user was verified successfully.";
const MESSAGE_AMBIGUOUS_MATCH: &str =
    "More than one directory entry matches this username. Please contact an administrator.";
const MESSAGE_UNKNOWN_USER: &str = "The username could not be found in the directory.";
const MESSAGE_INVALID_PASSWORD: &str = "The password is incorrect.";
const MESSAGE_SERVICE_UNAVAILABLE: &str =
    "The directory service is unavailable. Please try again later.";
const MESSAGE_GENERIC: &str = "An unknown error occurred. Please contact an administrator.";

/// Outcome of the last step a verification reached.
///
/// Numeric codes are stable and may be handed to other systems; use
/// [`ErrorCode::message_for`] to render a code of unknown provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Every step succeeded
    #[default]
    None,
    /// The search matched more than one entry
    AmbiguousMatch,
    /// The search matched no entry
    UnknownUser,
    /// The user's credentials were rejected
    InvalidPassword,
    /// The directory could not be reached or refused the service identity
    ServiceUnavailable,
    /// Reserved; no verification path produces it
    UnknownIdentity,
}

impl ErrorCode {
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::None => 0,
            ErrorCode::AmbiguousMatch => 1,
            ErrorCode::UnknownUser => 2,
            ErrorCode::InvalidPassword => 3,
            ErrorCode::ServiceUnavailable => 4,
            ErrorCode::UnknownIdentity => 100,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(ErrorCode::None),
            1 => Some(ErrorCode::AmbiguousMatch),
            2 => Some(ErrorCode::UnknownUser),
            3 => Some(ErrorCode::InvalidPassword),
            4 => Some(ErrorCode::ServiceUnavailable),
            100 => Some(ErrorCode::UnknownIdentity),
            _ => None,
        }
    }

    /// Human-readable message for this outcome
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::None => MESSAGE_NONE,
            ErrorCode::AmbiguousMatch => MESSAGE_AMBIGUOUS_MATCH,
            ErrorCode::UnknownUser => MESSAGE_UNKNOWN_USER,
            ErrorCode::InvalidPassword => MESSAGE_INVALID_PASSWORD,
            ErrorCode::ServiceUnavailable => MESSAGE_SERVICE_UNAVAILABLE,
            ErrorCode::UnknownIdentity => MESSAGE_GENERIC,
        }
    }

    /// Message for a raw numeric code; unrecognised codes get the generic one
    pub fn message_for(code: u16) -> &'static str {
        Self::from_code(code)
            .map(|c| c.message())
            .unwrap_or(MESSAGE_GENERIC)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ErrorCode::None)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::None => "none",
            ErrorCode::AmbiguousMatch => "ambiguous_match",
            ErrorCode::UnknownUser => "unknown_user",
            ErrorCode::InvalidPassword => "invalid_password",
            ErrorCode::ServiceUnavailable => "service_unavailable",
            ErrorCode::UnknownIdentity => "unknown_identity",
        };
        f.write_str(name)
    }
}
