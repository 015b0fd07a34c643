//! energomonitor - Client for the Energomonitor REST API
//!
//! All operations go through a [`Session`], which holds the API token and
//! the HTTP [`Transport`]. A token comes either from construction or from
//! [`Session::authorize`]; every other operation fails with
//! [`Error::NotAuthorized`] until one is set.
//!
//! # Example
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//! use energomonitor::{AuthorizeOptions, Credentials, Session, StreamDataQuery};
//!
//! # async fn example() -> Result<(), energomonitor::Error> {
//! let session = Session::new();
//! session
//!     .authorize(
//!         Credentials::new("alice", "secret"),
//!         AuthorizeOptions { valid_minutes: Some(15), ..Default::default() },
//!     )
//!     .await?;
//!
//! let query = StreamDataQuery {
//!     time_from: Some(Utc.with_ymd_and_hms(2015, 10, 12, 5, 10, 0).unwrap()),
//!     limit: Some(100),
//!     ..Default::default()
//! };
//! let data = session.get_stream_data("emabcd", "stream1", &query).await?;
//! println!("{data}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, AuthState, Credentials, Session, SessionBuilder};
pub use error::{Error, NOT_AUTHORIZED_MESSAGE, TransportError};
pub use rest::{
    AuthorizeOptions, NotificationUpdate, NotificationsQuery, Resource, StreamDataQuery,
    StreamsQuery, Transport, TransportBuilder,
};
pub use types::{ApiUrl, DEFAULT_API_URL};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
