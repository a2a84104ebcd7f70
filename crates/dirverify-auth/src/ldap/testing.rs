//! In-memory directory for tests
//!
//! Understands the filters produced by `build_filter` (comma separated
//! `attribute=value` clauses, all of which must match) and counts every
//! connection it hands out so tests can check nothing is left open.

use crate::ldap::directory::{DirectoryConnection, DirectoryConnector, DirectoryError};
use async_trait::async_trait;
use dirverify_core::DirectoryEntry;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const RC_OPERATIONS_ERROR: u32 = 1;
const RC_INVALID_CREDENTIALS: u32 = 49;
const RC_INSUFFICIENT_ACCESS: u32 = 50;

/// Connection counters shared between a fake directory and its connections
#[derive(Debug, Default)]
pub struct ConnectionStats {
    attempts: AtomicUsize,
    opened: AtomicUsize,
    closed: AtomicUsize,
    binds: AtomicUsize,
    searches: AtomicUsize,
}

impl ConnectionStats {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn binds(&self) -> usize {
        self.binds.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    /// Connections handed out and never unbound
    pub fn open(&self) -> usize {
        self.opened() - self.closed()
    }
}

#[derive(Debug, Clone)]
struct DirectoryData {
    service_dn: String,
    service_password: String,
    users: Vec<(DirectoryEntry, String)>,
    unreachable: bool,
    reject_service: bool,
    fail_search: bool,
}

/// A directory server held in memory
#[derive(Debug, Clone)]
pub struct FakeDirectory {
    data: Arc<DirectoryData>,
    stats: Arc<ConnectionStats>,
}

impl FakeDirectory {
    pub fn new(service_dn: &str, service_password: &str) -> Self {
        Self {
            data: Arc::new(DirectoryData {
                service_dn: service_dn.to_string(),
                service_password: service_password.to_string(),
                users: Vec::new(),
                unreachable: false,
                reject_service: false,
                fail_search: false,
            }),
            stats: Arc::new(ConnectionStats::default()),
        }
    }

    pub fn with_user(mut self, entry: DirectoryEntry, password: &str) -> Self {
        Arc::make_mut(&mut self.data)
            .users
            .push((entry, password.to_string()));
        self
    }

    /// Refuse every connection
    pub fn unreachable(mut self) -> Self {
        Arc::make_mut(&mut self.data).unreachable = true;
        self
    }

    /// Reject the service identity's bind
    pub fn reject_service(mut self) -> Self {
        Arc::make_mut(&mut self.data).reject_service = true;
        self
    }

    /// Fail every search with an operations error
    pub fn fail_search(mut self) -> Self {
        Arc::make_mut(&mut self.data).fail_search = true;
        self
    }

    pub fn stats(&self) -> Arc<ConnectionStats> {
        Arc::clone(&self.stats)
    }
}

#[async_trait]
impl DirectoryConnector for FakeDirectory {
    async fn connect(
        &self,
        host: &str,
        port: u16,
    ) -> Result<Box<dyn DirectoryConnection>, DirectoryError> {
        self.stats.attempts.fetch_add(1, Ordering::SeqCst);

        if self.data.unreachable {
            return Err(DirectoryError::Connect {
                url: format!("ldap://{}:{}", host, port),
                reason: "connection refused".to_string(),
            });
        }

        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeConnection {
            data: Arc::clone(&self.data),
            stats: Arc::clone(&self.stats),
            bound: false,
            closed: false,
        }))
    }
}

struct FakeConnection {
    data: Arc<DirectoryData>,
    stats: Arc<ConnectionStats>,
    bound: bool,
    closed: bool,
}

impl FakeConnection {
    fn matches(entry: &DirectoryEntry, base: &str, filter: &str) -> bool {
        let in_scope = entry
            .dn
            .to_ascii_lowercase()
            .ends_with(&base.to_ascii_lowercase());

        in_scope
            && filter.split(',').all(|clause| match clause.split_once('=') {
                Some((attr, value)) => entry
                    .values(attr)
                    .map(|values| values.iter().any(|v| v == value))
                    .unwrap_or(false),
                None => false,
            })
    }

    fn project(entry: &DirectoryEntry, attrs: &[&str]) -> DirectoryEntry {
        if attrs.is_empty() {
            return entry.clone();
        }

        DirectoryEntry {
            dn: entry.dn.clone(),
            attrs: entry
                .attrs
                .iter()
                .filter(|(name, _)| attrs.iter().any(|a| a.eq_ignore_ascii_case(name)))
                .map(|(name, values)| (name.clone(), values.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl DirectoryConnection for FakeConnection {
    async fn simple_bind(&mut self, dn: &str, password: &str) -> Result<(), DirectoryError> {
        if self.closed {
            return Err(DirectoryError::Closed);
        }
        self.stats.binds.fetch_add(1, Ordering::SeqCst);

        let service = !self.data.reject_service
            && dn == self.data.service_dn
            && password == self.data.service_password;
        let user = self
            .data
            .users
            .iter()
            .any(|(entry, pw)| entry.dn == dn && pw == password);

        // A failed bind leaves the connection anonymous
        self.bound = service || user;
        if self.bound {
            Ok(())
        } else {
            Err(DirectoryError::Bind {
                rc: RC_INVALID_CREDENTIALS,
                message: "invalidCredentials".to_string(),
            })
        }
    }

    async fn search(
        &mut self,
        base: &str,
        filter: &str,
        attrs: &[&str],
    ) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        if self.closed {
            return Err(DirectoryError::Closed);
        }
        self.stats.searches.fetch_add(1, Ordering::SeqCst);

        if self.data.fail_search {
            return Err(DirectoryError::Search {
                rc: RC_OPERATIONS_ERROR,
                message: "operationsError".to_string(),
            });
        }
        if !self.bound {
            return Err(DirectoryError::Search {
                rc: RC_INSUFFICIENT_ACCESS,
                message: "insufficientAccessRights".to_string(),
            });
        }

        Ok(self
            .data
            .users
            .iter()
            .map(|(entry, _)| entry)
            .filter(|entry| Self::matches(entry, base, filter))
            .map(|entry| Self::project(entry, attrs))
            .collect())
    }

    async fn unbind(&mut self) -> Result<(), DirectoryError> {
        if !self.closed {
            self.closed = true;
            self.stats.closed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
