//! Conversions from typed inputs to their wire form.
//!
//! Optional inputs that were not provided leave no trace: the query builder
//! skips `None` entirely instead of writing `null` or a default. JSON bodies
//! get the same treatment from `skip_serializing_if` in `params`.

use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, Utc};

use super::request::Query;

/// Whole seconds since the Unix epoch, rounded down.
pub fn to_unix_seconds(date: &DateTime<Utc>) -> i64 {
    date.timestamp_millis().div_euclid(1000)
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn to_iso8601(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds an ordered query multimap.
///
/// Keys may repeat: list values become one pair per element
/// (`channel=1&channel=2`), never a bracketed or comma-joined value.
#[derive(Debug, Default)]
pub struct QueryBuilder {
    pairs: Query,
}

impl QueryBuilder {
    /// Start with no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key=value` if the value was provided.
    pub fn opt<T: Display>(mut self, key: &'static str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Add `key=value` once per element.
    pub fn many<I>(mut self, key: &'static str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.pairs
            .extend(values.into_iter().map(|value| (key, value.to_string())));
        self
    }

    /// Add a date as Unix seconds.
    pub fn unix_seconds(self, key: &'static str, date: Option<&DateTime<Utc>>) -> Self {
        self.opt(key, date.map(to_unix_seconds))
    }

    /// Add a date as an ISO-8601 string.
    pub fn iso8601(self, key: &'static str, date: Option<&DateTime<Utc>>) -> Self {
        self.opt(key, date.map(to_iso8601))
    }

    /// Returns the collected pairs in insertion order.
    pub fn build(self) -> Query {
        self.pairs
    }
}
