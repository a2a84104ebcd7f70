//! Directory session
//!
//! Owns one connection through connect, service bind, search and user
//! re-bind. Any runtime failure tears the connection down before the error
//! is returned, and `close` must be called before control goes back to the
//! caller.

use crate::ldap::attributes::extract;
use crate::ldap::directory::{DirectoryConnection, DirectoryConnector};
use crate::ldap::types::SessionState;
use dirverify_core::{Error, ErrorCode, NormalizedAttributes, RequestedAttribute};
use tracing::{debug, info, warn};

/// Why a session step stopped
#[derive(Debug)]
pub enum SessionError {
    /// Configuration fault or API misuse; nothing was sent to the directory
    Fault(Error),
    /// Routine outcome; the connection is already torn down
    Failed(ErrorCode),
}

impl From<Error> for SessionError {
    fn from(err: Error) -> Self {
        SessionError::Fault(err)
    }
}

/// One connection's worth of verification work
pub struct DirectorySession<'c> {
    connector: &'c dyn DirectoryConnector,
    connection: Option<Box<dyn DirectoryConnection>>,
    state: SessionState,
    user_dn: Option<String>,
    attributes: NormalizedAttributes,
}

impl<'c> DirectorySession<'c> {
    pub fn new(connector: &'c dyn DirectoryConnector) -> Self {
        Self {
            connector,
            connection: None,
            state: SessionState::Unconnected,
            user_dn: None,
            attributes: NormalizedAttributes::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a connection is currently held
    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    pub fn user_dn(&self) -> Option<&str> {
        self.user_dn.as_deref()
    }

    pub fn attributes(&self) -> &NormalizedAttributes {
        &self.attributes
    }

    /// Hand over what the search step found, leaving the session empty
    pub fn take_findings(&mut self) -> (Option<String>, NormalizedAttributes) {
        (self.user_dn.take(), std::mem::take(&mut self.attributes))
    }

    pub async fn connect(&mut self, host: &str, port: u16) -> Result<(), SessionError> {
        if host.is_empty() {
            return Err(Error::MissingConfiguration("connection_hostname").into());
        }
        if port == 0 {
            return Err(Error::MissingConfiguration("connection_port").into());
        }
        self.expect(SessionState::Unconnected)?;

        match self.connector.connect(host, port).await {
            Ok(connection) => {
                debug!(host, port, "Connected to directory");
                self.connection = Some(connection);
                self.state = SessionState::Connected;
                Ok(())
            }
            Err(e) => {
                warn!(host, port, error = %e, "Directory unreachable");
                Err(self.fail(ErrorCode::ServiceUnavailable).await)
            }
        }
    }

    pub async fn bind_service(&mut self, dn: &str, password: &str) -> Result<(), SessionError> {
        if dn.is_empty() {
            return Err(Error::MissingConfiguration("service_dn").into());
        }
        if password.is_empty() {
            return Err(Error::MissingConfiguration("service_password").into());
        }
        self.expect(SessionState::Connected)?;

        let result = self.connection()?.simple_bind(dn, password).await;
        match result {
            Ok(()) => {
                debug!(dn, "Bound as service identity");
                self.state = SessionState::ServiceBound;
                Ok(())
            }
            Err(e) => {
                warn!(dn, error = %e, "Service bind failed");
                Err(self.fail(ErrorCode::ServiceUnavailable).await)
            }
        }
    }

    /// Search for exactly one entry and extract the requested attributes.
    ///
    /// Returns the DN of the matched entry.
    pub async fn search(
        &mut self,
        base: &str,
        filter: &str,
        requested: &[RequestedAttribute],
    ) -> Result<String, SessionError> {
        if base.is_empty() {
            return Err(Error::MissingConfiguration("search_base_dn").into());
        }
        self.expect(SessionState::ServiceBound)?;

        let ids: Vec<&str> = requested.iter().map(|a| a.id.as_str()).collect();

        debug!("Searching for user with filter: {}", filter);

        let result = self.connection()?.search(base, filter, &ids).await;
        let mut entries = match result {
            Ok(entries) => entries,
            Err(e) => {
                warn!(base, error = %e, "User search failed");
                return Err(self.fail(ErrorCode::ServiceUnavailable).await);
            }
        };

        if entries.len() > 1 {
            info!(base, filter, count = entries.len(), "Search is not selective enough");
            return Err(self.fail(ErrorCode::AmbiguousMatch).await);
        }

        let Some(entry) = entries.pop() else {
            debug!(base, filter, "No entry matched");
            return Err(self.fail(ErrorCode::UnknownUser).await);
        };

        debug!("Found user DN: {}", entry.dn);

        self.attributes = extract(&entry, requested);
        self.user_dn = Some(entry.dn.clone());
        self.state = SessionState::SearchComplete;
        Ok(entry.dn)
    }

    /// Re-bind as the matched user.
    ///
    /// A rejected bind is an expected outcome: the protocol error is logged
    /// and reported as `InvalidPassword`.
    pub async fn verify_password(&mut self, user_dn: &str, password: &str) -> Result<(), SessionError> {
        self.expect(SessionState::SearchComplete)?;

        // An empty password would be an unauthenticated bind, which servers accept
        if user_dn.is_empty() || password.is_empty() {
            debug!("Refusing bind with empty credentials");
            return Err(self.fail(ErrorCode::InvalidPassword).await);
        }

        let result = self.connection()?.simple_bind(user_dn, password).await;
        match result {
            Ok(()) => {
                debug!(dn = user_dn, "User credentials accepted");
                self.state = SessionState::UserVerified;
                Ok(())
            }
            Err(e) => {
                debug!(dn = user_dn, error = %e, "User bind rejected");
                Err(self.fail(ErrorCode::InvalidPassword).await)
            }
        }
    }

    /// Release the connection. Safe to call in any state, any number of times.
    pub async fn close(&mut self) {
        self.teardown().await;
        self.state = SessionState::Closed;
    }

    fn expect(&self, expected: SessionState) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState {
                expected: expected.as_str(),
                actual: self.state.as_str(),
            }
            .into())
        }
    }

    fn connection(&mut self) -> Result<&mut Box<dyn DirectoryConnection>, SessionError> {
        let actual = self.state.as_str();
        self.connection.as_mut().ok_or_else(|| {
            Error::InvalidState {
                expected: "connected",
                actual,
            }
            .into()
        })
    }

    async fn fail(&mut self, code: ErrorCode) -> SessionError {
        self.teardown().await;
        self.state = SessionState::Failed(code);
        SessionError::Failed(code)
    }

    async fn teardown(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            if let Err(e) = connection.unbind().await {
                debug!(error = %e, "Unbind failed");
            }
        }
    }
}
