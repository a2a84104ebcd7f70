//! Verification results and session states

use dirverify_core::{ErrorCode, NormalizedAttributes};
use serde::Serialize;
use std::fmt;

// ============================================================================
// Verification Result
// ============================================================================

/// Outcome of one lookup or authentication
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verification {
    /// Classification of the step the verification ended on
    pub code: ErrorCode,

    /// DN of the uniquely matched entry, if the search got that far
    pub user_dn: Option<String>,

    /// Attributes gathered by the search step.
    /// Kept even when the password check fails afterwards.
    pub attributes: NormalizedAttributes,
}

impl Verification {
    pub fn success(user_dn: String, attributes: NormalizedAttributes) -> Self {
        Self {
            code: ErrorCode::None,
            user_dn: Some(user_dn),
            attributes,
        }
    }

    pub fn failure(
        code: ErrorCode,
        user_dn: Option<String>,
        attributes: NormalizedAttributes,
    ) -> Self {
        Self {
            code,
            user_dn,
            attributes,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    pub fn attributes(&self) -> &NormalizedAttributes {
        &self.attributes
    }

    pub fn error_message(&self) -> &'static str {
        self.code.message()
    }
}

// ============================================================================
// Session State
// ============================================================================

/// Lifecycle of a directory session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unconnected,
    Connected,
    ServiceBound,
    SearchComplete,
    UserVerified,
    Failed(ErrorCode),
    Closed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Unconnected => "unconnected",
            SessionState::Connected => "connected",
            SessionState::ServiceBound => "service_bound",
            SessionState::SearchComplete => "search_complete",
            SessionState::UserVerified => "user_verified",
            SessionState::Failed(_) => "failed",
            SessionState::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
