//! REST plumbing: request descriptors, the HTTP transport, endpoint paths
//! and parameter marshaling.

pub mod endpoints;
pub mod marshal;
mod params;
mod request;
mod transport;

pub use params::{
    AuthorizeOptions, NotificationUpdate, NotificationsQuery, Resource, StreamDataQuery,
    StreamsQuery,
};
pub use request::{Method, Query, Request};
pub use transport::{Transport, TransportBuilder};
