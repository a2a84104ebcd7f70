//! Directory client seam
//!
//! The verification core issues exactly four primitives against the
//! directory: connect, simple bind, search and unbind.

use async_trait::async_trait;
use dirverify_core::DirectoryEntry;
use thiserror::Error;

/// Failure reported by the directory client
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("Bind rejected with result code {rc}: {message}")]
    Bind { rc: u32, message: String },

    #[error("Search failed with result code {rc}: {message}")]
    Search { rc: u32, message: String },

    #[error("Connection is closed")]
    Closed,

    #[error(transparent)]
    Protocol(#[from] ldap3::LdapError),
}

/// Opens connections to a directory server
#[async_trait]
pub trait DirectoryConnector: Send + Sync {
    async fn connect(
        &self,
        host: &str,
        port: u16,
    ) -> Result<Box<dyn DirectoryConnection>, DirectoryError>;
}

/// One open connection. Its bound identity changes with every bind.
#[async_trait]
pub trait DirectoryConnection: Send {
    async fn simple_bind(&mut self, dn: &str, password: &str) -> Result<(), DirectoryError>;

    /// Subtree search under `base`
    async fn search(
        &mut self,
        base: &str,
        filter: &str,
        attrs: &[&str],
    ) -> Result<Vec<DirectoryEntry>, DirectoryError>;

    async fn unbind(&mut self) -> Result<(), DirectoryError>;
}
