//! Verification service
//!
//! Runs lookups and authentications, each on its own directory session.
//! The service keeps no per-call state, so one instance can be shared.

use crate::ldap::client::Ldap3Connector;
use crate::ldap::directory::DirectoryConnector;
use crate::ldap::filter::build_filter;
use crate::ldap::session::{DirectorySession, SessionError};
use crate::ldap::types::Verification;
use dirverify_core::{DirectoryConfig, ErrorCode, Result, USERNAME_INPUT};
use std::collections::HashMap;
use tracing::info;

/// Verifies users against a directory
pub struct VerificationService<C = Ldap3Connector> {
    config: DirectoryConfig,
    connector: C,
}

impl VerificationService<Ldap3Connector> {
    /// Create a service talking to a real LDAP server
    pub fn ldap(config: DirectoryConfig) -> Self {
        let connector = Ldap3Connector::from_config(&config);
        Self::new(config, connector)
    }
}

impl<C: DirectoryConnector> VerificationService<C> {
    pub fn new(config: DirectoryConfig, connector: C) -> Self {
        Self { config, connector }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Find the single entry matching `username`
    pub async fn lookup_user(&self, username: &str) -> Result<Verification> {
        self.verify(username, None).await
    }

    /// Find the single entry matching `username` and check its password
    pub async fn authenticate_user(&self, username: &str, password: &str) -> Result<Verification> {
        self.verify(username, Some(password)).await
    }

    /// Check that the directory is reachable and accepts the service identity
    pub async fn probe(&self) -> Result<ErrorCode> {
        let mut session = DirectorySession::new(&self.connector);
        let outcome = self.open(&mut session).await;
        session.close().await;

        match outcome {
            Ok(()) => Ok(ErrorCode::None),
            Err(SessionError::Failed(code)) => Ok(code),
            Err(SessionError::Fault(e)) => Err(e),
        }
    }

    async fn verify(&self, username: &str, password: Option<&str>) -> Result<Verification> {
        self.config.validate()?;

        let inputs = HashMap::from([(USERNAME_INPUT, username)]);
        let filter = build_filter(&self.config.search_parameters, &inputs)?;

        let mut session = DirectorySession::new(&self.connector);
        let outcome = self.run(&mut session, &filter, password).await;
        session.close().await;
        let (user_dn, attributes) = session.take_findings();

        match outcome {
            Ok(dn) => {
                info!(username, dn = %dn, "User verified");
                Ok(Verification::success(dn, attributes))
            }
            Err(SessionError::Failed(code)) => {
                info!(username, code = %code, "User verification failed");
                Ok(Verification::failure(code, user_dn, attributes))
            }
            Err(SessionError::Fault(e)) => Err(e),
        }
    }

    async fn run(
        &self,
        session: &mut DirectorySession<'_>,
        filter: &str,
        password: Option<&str>,
    ) -> std::result::Result<String, SessionError> {
        self.open(session).await?;

        let dn = session
            .search(
                &self.config.search_base_dn,
                filter,
                &self.config.requested_attributes,
            )
            .await?;

        if let Some(password) = password {
            session.verify_password(&dn, password).await?;
        }

        Ok(dn)
    }

    async fn open(&self, session: &mut DirectorySession<'_>) -> std::result::Result<(), SessionError> {
        session
            .connect(&self.config.connection_hostname, self.config.connection_port)
            .await?;
        session
            .bind_service(&self.config.service_dn, &self.config.service_password)
            .await
    }
}
