//! Directory-backed user verification for Dirverify

pub mod ldap;

pub use ldap::{
    DirectoryConnection, DirectoryConnector, DirectoryError, DirectorySession, Ldap3Connector,
    SessionError, SessionState, Verification, VerificationService,
};
