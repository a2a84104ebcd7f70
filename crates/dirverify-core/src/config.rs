//! Configuration for Dirverify
//!
//! Example config:
//! ```toml
//! [directory]
//! connection_hostname = "ldap.example.com"
//! connection_port = 389
//! service_dn = "cn=reader,dc=example,dc=com"
//! service_password = "secret"
//! search_base_dn = "ou=people,dc=example,dc=com"
//!
//! [[directory.search_parameters]]
//! attribute = "uid"
//! input = "username"
//!
//! [[directory.requested_attributes]]
//! name = "email"
//! id = "mail"
//! cardinality = "single"
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::types::Cardinality;
use crate::{Error, Result, DEFAULT_LDAP_PORT, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirverifyConfig {
    #[serde(default)]
    pub directory: DirectoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DirverifyConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration");
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// Override settings with `DIRVERIFY_*` environment variables
    pub fn apply_env(mut self) -> Self {
        if let Ok(host) = std::env::var("DIRVERIFY_LDAP_HOST") {
            self.directory.connection_hostname = host;
        }
        if let Ok(port) = std::env::var("DIRVERIFY_LDAP_PORT") {
            if let Ok(p) = port.parse() {
                self.directory.connection_port = p;
            }
        }
        if let Ok(dn) = std::env::var("DIRVERIFY_SERVICE_DN") {
            self.directory.service_dn = dn;
        }
        if let Ok(password) = std::env::var("DIRVERIFY_SERVICE_PASSWORD") {
            self.directory.service_password = password;
        }
        if let Ok(base) = std::env::var("DIRVERIFY_SEARCH_BASE") {
            self.directory.search_base_dn = base;
        }
        if std::env::var("DIRVERIFY_START_TLS")
            .map(|v| v == "true")
            .unwrap_or(false)
        {
            self.directory.start_tls = true;
        }
        if let Ok(level) = std::env::var("DIRVERIFY_LOG_LEVEL") {
            self.logging.level = level;
        }

        self
    }
}

/// Directory connection and search configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Directory server hostname
    #[serde(default)]
    pub connection_hostname: String,

    /// Directory server port
    #[serde(default = "default_port")]
    pub connection_port: u16,

    /// Service account DN used to search
    /// Example: "cn=reader,dc=example,dc=com"
    #[serde(default)]
    pub service_dn: String,

    /// Service account password
    #[serde(default)]
    pub service_password: String,

    /// Base DN for user searches
    /// Example: "ou=people,dc=example,dc=com"
    #[serde(default)]
    pub search_base_dn: String,

    /// Filter clauses, in order
    #[serde(default)]
    pub search_parameters: Vec<SearchParameter>,

    /// Attributes to extract from the matched entry, in order
    #[serde(default)]
    pub requested_attributes: Vec<RequestedAttribute>,

    /// Upgrade the connection with STARTTLS
    #[serde(default)]
    pub start_tls: bool,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_port() -> u16 {
    DEFAULT_LDAP_PORT
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            connection_hostname: String::new(),
            connection_port: default_port(),
            service_dn: String::new(),
            service_password: String::new(),
            search_base_dn: String::new(),
            search_parameters: Vec::new(),
            requested_attributes: Vec::new(),
            start_tls: false,
            timeout_seconds: default_timeout(),
        }
    }
}

impl DirectoryConfig {
    /// Check every field a verification needs before touching the network
    pub fn validate(&self) -> Result<()> {
        if self.connection_hostname.is_empty() {
            return Err(Error::MissingConfiguration("connection_hostname"));
        }
        if self.connection_port == 0 {
            return Err(Error::MissingConfiguration("connection_port"));
        }
        if self.service_dn.is_empty() {
            return Err(Error::MissingConfiguration("service_dn"));
        }
        if self.service_password.is_empty() {
            return Err(Error::MissingConfiguration("service_password"));
        }
        if self.search_base_dn.is_empty() {
            return Err(Error::MissingConfiguration("search_base_dn"));
        }
        if self.search_parameters.is_empty() {
            return Err(Error::MissingConfiguration("search_parameters"));
        }

        for parameter in &self.search_parameters {
            if parameter.attribute.is_empty() || parameter.input.is_empty() {
                return Err(Error::InvalidConfiguration(format!(
                    "search parameter '{}={}' needs both an attribute and an input",
                    parameter.attribute, parameter.input
                )));
            }
        }

        for attribute in &self.requested_attributes {
            if attribute.name.is_empty() || attribute.id.is_empty() {
                return Err(Error::InvalidConfiguration(format!(
                    "requested attribute '{}' needs both a name and an id",
                    attribute.name
                )));
            }
        }

        Ok(())
    }

    /// Directory attribute ids to fetch during the search
    pub fn requested_ids(&self) -> Vec<&str> {
        self.requested_attributes
            .iter()
            .map(|a| a.id.as_str())
            .collect()
    }
}

/// One `attribute=<input>` clause of the search filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameter {
    /// Directory attribute id, e.g. "uid"
    pub attribute: String,
    /// Name of the call input supplying the value, e.g. "username"
    pub input: String,
}

impl SearchParameter {
    pub fn new(attribute: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            input: input.into(),
        }
    }
}

/// An attribute to extract from the matched entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedAttribute {
    /// Output name
    pub name: String,
    /// Directory attribute id
    pub id: String,
    #[serde(default)]
    pub cardinality: Cardinality,
}

impl RequestedAttribute {
    pub fn single(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            cardinality: Cardinality::Single,
        }
    }

    pub fn multi(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            cardinality: Cardinality::Multi,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
