//! Dirverify Core Library
//!
//! Configuration, error and shared types for the dirverify directory
//! verification service.

pub mod config;
pub mod error;
pub mod types;

pub use config::{DirectoryConfig, DirverifyConfig, RequestedAttribute, SearchParameter};
pub use error::{Error, Result};
pub use types::{AttributeValue, Cardinality, DirectoryEntry, ErrorCode, NormalizedAttributes};

/// Dirverify version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default LDAP port
pub const DEFAULT_LDAP_PORT: u16 = 389;

/// Default connection timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Name of the call input holding the username
pub const USERNAME_INPUT: &str = "username";
