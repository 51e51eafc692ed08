//! WHOIS data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A field registrars report either once or several times.
///
/// Serialized as a bare value when single, as an array otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// `None` for an empty list, `One` for a single element.
    pub fn from_vec(mut values: Vec<T>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(OneOrMany::One),
            _ => Some(OneOrMany::Many(values)),
        }
    }

    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.first(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// WHOIS lookup result returned to clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisRecord {
    pub domain_name: Option<OneOrMany<String>>,
    pub registrar: Option<String>,
    pub creation_date: Option<OneOrMany<DateTime<Utc>>>,
    pub expiration_date: Option<OneOrMany<DateTime<Utc>>>,
    pub updated_date: Option<OneOrMany<DateTime<Utc>>>,
    pub name_servers: Option<Vec<String>>,
    pub status: Option<OneOrMany<String>>,
    pub emails: Option<OneOrMany<String>>,
    /// Registrant organization
    pub org: Option<String>,
    /// Registrant country
    pub country: Option<String>,
    /// Raw WHOIS text
    pub raw_text: Option<String>,
}

/// Fields handed back by the upstream client, before normalization.
#[derive(Debug, Clone, Default)]
pub struct UpstreamRecord {
    pub domain: String,
    pub raw_text: String,
    pub registrar: Option<String>,
    pub creation_date: Option<String>,
    pub expiration_date: Option<String>,
    pub updated_date: Option<String>,
    pub name_servers: Vec<String>,
    pub status: Vec<String>,
    pub registrant_name: Option<String>,
    /// Registrant, admin and tech contact addresses, in that order.
    pub emails: Vec<String>,
}
