//! LDAP client implementation
//!
//! Implements the directory seam over `ldap3`. Each `connect` opens a fresh
//! connection; nothing is pooled or cached.

use crate::ldap::directory::{DirectoryConnection, DirectoryConnector, DirectoryError};
use async_trait::async_trait;
use dirverify_core::{DirectoryConfig, DirectoryEntry};
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, Scope, SearchEntry, SearchResult};
use std::time::Duration;
use tracing::debug;

/// Opens `ldap3` connections
#[derive(Debug, Clone)]
pub struct Ldap3Connector {
    timeout: Duration,
    start_tls: bool,
}

impl Ldap3Connector {
    pub fn new(timeout: Duration, start_tls: bool) -> Self {
        Self { timeout, start_tls }
    }

    /// Client settings taken from the directory configuration
    pub fn from_config(config: &DirectoryConfig) -> Self {
        Self::new(Duration::from_secs(config.timeout_seconds), config.start_tls)
    }

    fn url(host: &str, port: u16) -> String {
        format!("ldap://{}:{}", host, port)
    }
}

#[async_trait]
impl DirectoryConnector for Ldap3Connector {
    async fn connect(
        &self,
        host: &str,
        port: u16,
    ) -> Result<Box<dyn DirectoryConnection>, DirectoryError> {
        let url = Self::url(host, port);
        let settings = LdapConnSettings::new()
            .set_conn_timeout(self.timeout)
            .set_starttls(self.start_tls);

        debug!("Connecting to LDAP server: {}", url);

        let (conn, ldap) = LdapConnAsync::with_settings(settings, &url)
            .await
            .map_err(|e| DirectoryError::Connect {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        ldap3::drive!(conn);

        Ok(Box::new(Ldap3Connection { ldap: Some(ldap) }))
    }
}

/// An open `ldap3` connection
pub struct Ldap3Connection {
    ldap: Option<Ldap>,
}

impl Ldap3Connection {
    fn handle(&mut self) -> Result<&mut Ldap, DirectoryError> {
        self.ldap.as_mut().ok_or(DirectoryError::Closed)
    }
}

#[async_trait]
impl DirectoryConnection for Ldap3Connection {
    async fn simple_bind(&mut self, dn: &str, password: &str) -> Result<(), DirectoryError> {
        let result = self.handle()?.simple_bind(dn, password).await?;

        if result.rc != 0 {
            return Err(DirectoryError::Bind {
                rc: result.rc,
                message: result.text,
            });
        }

        Ok(())
    }

    async fn search(
        &mut self,
        base: &str,
        filter: &str,
        attrs: &[&str],
    ) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        let attrs = attrs.to_vec();
        let SearchResult(rs, result) = self
            .handle()?
            .search(base, Scope::Subtree, filter, attrs)
            .await?;

        if result.rc != 0 {
            return Err(DirectoryError::Search {
                rc: result.rc,
                message: result.text,
            });
        }

        Ok(rs
            .into_iter()
            .map(SearchEntry::construct)
            .map(|entry| DirectoryEntry {
                dn: entry.dn,
                attrs: entry.attrs,
            })
            .collect())
    }

    async fn unbind(&mut self) -> Result<(), DirectoryError> {
        match self.ldap.take() {
            Some(mut ldap) => Ok(ldap.unbind().await?),
            None => Ok(()),
        }
    }
}
