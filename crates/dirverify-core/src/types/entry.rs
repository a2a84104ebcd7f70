//! Directory entries and normalized attribute values

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A single record returned by a directory search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Distinguished name
    pub dn: String,

    /// Raw attribute values keyed by directory attribute id
    pub attrs: HashMap<String, Vec<String>>,
}

impl DirectoryEntry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attrs: HashMap::new(),
        }
    }

    /// Add raw values for an attribute
    pub fn with_attr<I, S>(mut self, id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attrs
            .insert(id.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Raw values for an attribute id.
    ///
    /// Attribute names are case-insensitive in LDAP, so an exact match is
    /// tried first and then a case-insensitive one.
    pub fn values(&self, id: &str) -> Option<&[String]> {
        self.attrs
            .get(id)
            .or_else(|| {
                self.attrs
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(id))
                    .map(|(_, values)| values)
            })
            .map(Vec::as_slice)
    }
}

/// How many values of a requested attribute the caller wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Keep the first value only
    Single,
    /// Keep every value
    #[default]
    Multi,
}

/// A normalized attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(String),
    Multi(Vec<String>),
}

impl AttributeValue {
    /// Value used when an attribute is missing from the entry
    pub fn empty() -> Self {
        AttributeValue::Single(String::new())
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            AttributeValue::Single(value) => Some(value),
            AttributeValue::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            AttributeValue::Single(_) => None,
            AttributeValue::Multi(values) => Some(values),
        }
    }
}

/// Output attributes keyed by caller-defined name
pub type NormalizedAttributes = BTreeMap<String, AttributeValue>;
