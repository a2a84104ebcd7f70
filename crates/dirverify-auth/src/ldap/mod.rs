//! LDAP directory verification
//!
//! Verifies users against an LDAP directory:
//! - service bind, then a search for exactly one matching entry
//! - extraction of requested attributes from that entry
//! - optional re-bind as the user to check the password
//!
//! Every call opens and closes its own connection.

mod attributes;
mod client;
mod directory;
mod filter;
mod service;
mod session;
mod types;

#[cfg(test)]
mod testing;

pub use attributes::extract;
pub use client::{Ldap3Connection, Ldap3Connector};
pub use directory::{DirectoryConnection, DirectoryConnector, DirectoryError};
pub use filter::{build_filter, CLAUSE_SEPARATOR};
pub use service::VerificationService;
pub use session::{DirectorySession, SessionError};
pub use types::*;
