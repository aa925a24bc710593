//! Header storage for [`ResponseRecord`](crate::http::response::ResponseRecord) and
//! [`EmbeddedHeaderInfo`](crate::http::embedded::EmbeddedHeaderInfo)
//!
//! Headers are multi-valued and looked up case-insensitively. Two ordered
//! structures are kept:
//! - the header names with the casing they were first seen with,
//! - the values of each header, keyed by the lowercased name, in arrival order.
//!
//! The store is filled through [`HeaderStore::add_header`] while a message is
//! being populated and only exposes read-only views afterwards. No validation
//! is applied to names or values.

use std::time::SystemTime;

use indexmap::{IndexMap, IndexSet};

use crate::error::HeaderError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderStore {
    names: IndexSet<String>,
    values: IndexMap<String, Vec<String>>,
}

impl HeaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` under `name`. The first casing seen for a name is the
    /// one reported by [`header_names`](Self::header_names).
    pub fn add_header(&mut self, name: &str, value: &str) {
        let key = name.to_ascii_lowercase();
        if !self.values.contains_key(&key) {
            self.names.insert(name.to_string());
        }
        self.values.entry(key).or_default().push(value.to_string());
    }

    pub fn header_names(&self) -> &IndexSet<String> {
        &self.names
    }

    /// All values keyed by lowercased header name.
    pub fn all_values(&self) -> HeaderValues<'_> {
        HeaderValues { map: &self.values }
    }

    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.values
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn first_value(&self, name: &str) -> Result<&str, HeaderError> {
        self.values(name)
            .and_then(|values| values.first())
            .map(String::as_str)
            .ok_or_else(|| HeaderError::MissingHeader(name.to_string()))
    }

    pub fn first_value_as_integer(&self, name: &str) -> Result<i64, HeaderError> {
        let value = self.first_value(name)?;
        value
            .parse::<i64>()
            .map_err(|_| HeaderError::MalformedHeaderValue {
                name: name.to_string(),
                value: value.to_string(),
            })
    }

    /// Parses the first value as an HTTP-date (`Date`, `Last-Modified`, ...).
    pub fn first_value_as_date(&self, name: &str) -> Result<SystemTime, HeaderError> {
        let value = self.first_value(name)?;
        httpdate::parse_http_date(value).map_err(|_| HeaderError::MalformedHeaderValue {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Whether any value of `name` contains `fragment`. An absent header is
    /// simply `false`.
    pub fn contains_value_substring(&self, name: &str, fragment: &str) -> bool {
        self.values(name)
            .is_some_and(|values| values.iter().any(|v| v.contains(fragment)))
    }
}

/// Read-only view over every header of a [`HeaderStore`].
///
/// Keys are stored lowercased, but [`get`](Self::get) and
/// [`contains_key`](Self::contains_key) accept any casing.
#[derive(Debug, Clone, Copy)]
pub struct HeaderValues<'a> {
    map: &'a IndexMap<String, Vec<String>>,
}

impl<'a> HeaderValues<'a> {
    pub fn get(&self, name: &str) -> Option<&'a [String]> {
        self.map
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Lowercased names, in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.map.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a [String])> + use<'a> {
        self.map
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}
