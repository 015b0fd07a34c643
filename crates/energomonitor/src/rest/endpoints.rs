//! Endpoint paths.
//!
//! Identifiers are interpolated as given; they are neither validated nor
//! percent-encoded.

/// POST: exchange Basic credentials for a token.
pub const AUTHORIZATIONS: &str = "/authorizations";

/// `/users/{id}`
pub fn user(user_id: &str) -> String {
    format!("/users/{}", user_id)
}

/// `/users/{id}/feeds`
pub fn user_feeds(user_id: &str) -> String {
    format!("/users/{}/feeds", user_id)
}

/// `/feeds/{id}`
pub fn feed(feed_id: &str) -> String {
    format!("/feeds/{}", feed_id)
}

/// `/feeds/{id}/streams`
pub fn feed_streams(feed_id: &str) -> String {
    format!("/feeds/{}/streams", feed_id)
}

/// `/feeds/{feed}/streams/{stream}`
pub fn feed_stream(feed_id: &str, stream_id: &str) -> String {
    format!("/feeds/{}/streams/{}", feed_id, stream_id)
}

/// `/feeds/{feed}/streams/{stream}/data`
pub fn stream_data(feed_id: &str, stream_id: &str) -> String {
    format!("/feeds/{}/streams/{}/data", feed_id, stream_id)
}

/// `/feeds/{id}/related_streams`
pub fn related_streams(feed_id: &str) -> String {
    format!("/feeds/{}/related_streams", feed_id)
}

/// `/users/{id}/notifications`
pub fn notifications(user_id: &str) -> String {
    format!("/users/{}/notifications", user_id)
}

/// `/users/{user}/notifications/{id}`
pub fn notification(user_id: &str, notification_id: &str) -> String {
    format!("/users/{}/notifications/{}", user_id, notification_id)
}

/// `/users/{id}/notification_count`
pub fn notification_count(user_id: &str) -> String {
    format!("/users/{}/notification_count", user_id)
}
