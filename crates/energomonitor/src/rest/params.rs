//! Optional operation parameters and their wire encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::marshal::QueryBuilder;
use super::request::Query;
use crate::error::{Error, TransportError};

/// Access scope requested for a token.
///
/// Serialized as `{"type": .., "name": .., "permissions": [..]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource type, e.g. `feed`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource identifier, e.g. a feed id.
    pub name: String,
    /// Granted permissions, e.g. `r` and `w`.
    pub permissions: Vec<String>,
}

impl Resource {
    /// Create a resource scope from its type, name and permissions.
    pub fn new<P>(kind: impl Into<String>, name: impl Into<String>, permissions: P) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            kind: kind.into(),
            name: name.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Optional fields of an authorize request.
///
/// # Example
///
/// ```
/// use energomonitor::{AuthorizeOptions, Resource};
///
/// let options = AuthorizeOptions {
///     note: Some("dashboard".into()),
///     resources: Some(vec![Resource::new("feed", "emabcd", ["r"])]),
///     ..Default::default()
/// };
/// assert_eq!(options.to_body().unwrap()["resources"][0]["type"], "feed");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AuthorizeOptions {
    /// Free-form label stored with the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Scopes the token is limited to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Resource>>,
    /// Token lifetime in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_minutes: Option<u32>,
}

impl AuthorizeOptions {
    /// JSON body of the request; `{}` when nothing is set.
    pub fn to_body(&self) -> Result<Value, Error> {
        Ok(serde_json::to_value(self).map_err(TransportError::from)?)
    }
}

/// Filters for listing the streams of a feed.
///
/// An empty list means "not filtered". A single value is a one-element list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamsQuery {
    /// Stream types, sent as repeated `type` parameters.
    pub types: Vec<String>,
    /// Channel numbers, sent as repeated `channel` parameters.
    pub channels: Vec<u32>,
    /// Only streams with data at or after this time.
    pub data_time_from: Option<DateTime<Utc>>,
    /// Only streams with data before this time.
    pub data_time_to: Option<DateTime<Utc>>,
}

impl StreamsQuery {
    /// Query parameters; dates go out as Unix seconds.
    pub fn to_query(&self) -> Query {
        QueryBuilder::new()
            .many("type", &self.types)
            .many("channel", &self.channels)
            .unix_seconds("data_time_from", self.data_time_from.as_ref())
            .unix_seconds("data_time_to", self.data_time_to.as_ref())
            .build()
    }
}

/// Range and size of a stream data request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamDataQuery {
    /// Start of the range.
    pub time_from: Option<DateTime<Utc>>,
    /// End of the range.
    pub time_to: Option<DateTime<Utc>>,
    /// Maximum number of data points.
    pub limit: Option<u32>,
}

impl StreamDataQuery {
    /// Query parameters; dates go out as Unix seconds.
    pub fn to_query(&self) -> Query {
        QueryBuilder::new()
            .unix_seconds("time_from", self.time_from.as_ref())
            .unix_seconds("time_to", self.time_to.as_ref())
            .opt("limit", self.limit)
            .build()
    }
}

/// Filters for listing notifications.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationsQuery {
    /// Sent as an ISO-8601 string, unlike the stream date filters which use
    /// Unix seconds. The API expects exactly this.
    pub created_at_from: Option<DateTime<Utc>>,
}

impl NotificationsQuery {
    /// Query parameters.
    pub fn to_query(&self) -> Query {
        QueryBuilder::new()
            .iso8601("created_at_from", self.created_at_from.as_ref())
            .build()
    }
}

/// Flags for a notification PATCH body.
///
/// The update operations take any JSON object; this only builds the common
/// one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NotificationUpdate {
    /// Mark as read or unread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    /// Move into or out of the archive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl NotificationUpdate {
    /// JSON body with only the flags that are set.
    pub fn to_body(&self) -> Result<Value, Error> {
        Ok(serde_json::to_value(self).map_err(TransportError::from)?)
    }
}
