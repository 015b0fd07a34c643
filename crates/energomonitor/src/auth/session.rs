//! Session: credential state plus one method per API operation.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::error::{Error, TransportError};
use crate::rest::{
    AuthorizeOptions, NotificationsQuery, Request, StreamDataQuery, StreamsQuery, Transport,
    endpoints,
};
use crate::types::ApiUrl;

use super::credentials::Credentials;
use super::gate::{AuthState, authorization_headers, guard};
use super::tokens::AccessToken;

/// A session with the Energomonitor API.
///
/// Holds the API token (if any) and the [`Transport`]. Every operation
/// except [`Session::authorize`] fails with [`Error::NotAuthorized`], without
/// touching the network, until a token is set.
///
/// # Thread Safety
///
/// Sessions are cheap to clone (they use internal `Arc`) and clones share
/// the token. Concurrent calls each read the token once when invoked; a call
/// racing an in-flight `authorize` sees whichever token was set at the time.
///
/// # Example
///
/// ```no_run
/// use energomonitor::{AuthorizeOptions, Credentials, Session};
///
/// # async fn example() -> Result<(), energomonitor::Error> {
/// let session = Session::new();
/// session
///     .authorize(Credentials::new("alice", "secret"), AuthorizeOptions::default())
///     .await?;
///
/// let feeds = session.get_feeds("alice").await?;
/// println!("{feeds}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    transport: Transport,
    auth: RwLock<AuthState>,
}

/// Configures a [`Session`].
///
/// Whatever transport is used, its base URL is set to the configured API URL
/// (the public API unless overridden).
#[derive(Debug, Default)]
pub struct SessionBuilder {
    token: Option<AccessToken>,
    transport: Option<Transport>,
    api_url: Option<ApiUrl>,
}

impl SessionBuilder {
    /// Start authorized with an existing token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(AccessToken::new(token));
        self
    }

    /// Use this transport instead of creating one.
    pub fn transport(mut self, transport: Transport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Send requests to this base URL instead of the public API.
    pub fn api_url(mut self, api_url: ApiUrl) -> Self {
        self.api_url = Some(api_url);
        self
    }

    /// Build the session.
    ///
    /// # Errors
    ///
    /// Fails if the token contains characters that cannot be sent in an
    /// HTTP header.
    pub fn build(self) -> Result<Session, Error> {
        if let Some(token) = &self.token {
            authorization_headers(token)?;
        }

        let api_url = self.api_url.unwrap_or_default();
        let transport = match self.transport {
            Some(mut transport) => {
                transport.set_api_url(api_url);
                transport
            }
            None => Transport::new(api_url),
        };

        Ok(Session::from_parts(transport, AuthState::from(self.token)))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Unauthorized session against the public API.
    pub fn new() -> Self {
        Self::from_parts(Transport::new(ApiUrl::default()), AuthState::Unauthorized)
    }

    /// Authorized session against the public API.
    ///
    /// # Errors
    ///
    /// Fails if the token cannot be sent in an HTTP header.
    pub fn with_token(token: impl Into<String>) -> Result<Self, Error> {
        Self::builder().token(token).build()
    }

    /// Start configuring a session.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    fn from_parts(transport: Transport, auth: AuthState) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                transport,
                auth: RwLock::new(auth),
            }),
        }
    }

    /// Returns the transport in use.
    pub fn transport(&self) -> &Transport {
        &self.inner.transport
    }

    /// Returns the API base URL.
    pub fn api_url(&self) -> &ApiUrl {
        self.inner.transport.api_url()
    }

    /// Returns true once a token is set.
    pub async fn is_authorized(&self) -> bool {
        self.inner.auth.read().await.is_authorized()
    }

    /// Headers attached to authenticated requests.
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthorized`] while no token is set.
    pub async fn authorization_headers(&self) -> Result<HeaderMap, Error> {
        let state = self.inner.auth.read().await;
        guard(&state, authorization_headers)
    }

    /// Export the current token for persistence.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It grants access to the account.
    pub async fn export_token(&self) -> Option<String> {
        let state = self.inner.auth.read().await;
        state.token().map(|token| token.as_str().to_string())
    }

    /// Exchange a username and password for a token.
    ///
    /// Credentials go out as HTTP Basic auth; `options` form the JSON body.
    /// On success the returned token becomes the session's token and the
    /// decoded response body is returned. This is the only operation that
    /// works without a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the credentials or the response
    /// carries no token. The session state is unchanged on failure.
    #[instrument(skip(self, credentials, options), fields(username = %credentials.username()))]
    pub async fn authorize(
        &self,
        credentials: Credentials,
        options: AuthorizeOptions,
    ) -> Result<Value, Error> {
        debug!("Requesting authorization");

        let request = Request::post(endpoints::AUTHORIZATIONS)
            .with_body(options.to_body()?)
            .with_basic_auth(credentials);

        let response = self.inner.transport.send(request).await?;

        let token = response
            .get("token")
            .and_then(Value::as_str)
            .map(AccessToken::new)
            .ok_or_else(|| TransportError::Decode {
                message: "authorization response has no token".to_string(),
            })?;

        // Reject tokens that could never be sent before storing them
        authorization_headers(&token)?;

        *self.inner.auth.write().await = AuthState::Authorized(token);

        info!("Session authorized");
        Ok(response)
    }

    /// Pass the gate, then build and send the request.
    async fn send_authorized(&self, build: impl FnOnce() -> Request) -> Result<Value, Error> {
        let request = self.authorized_request(build).await?;
        self.inner.transport.send(request).await
    }

    /// Pass the gate, then build the request with the auth headers attached.
    ///
    /// `build` only runs once the token check has succeeded.
    async fn authorized_request(&self, build: impl FnOnce() -> Request) -> Result<Request, Error> {
        let headers = {
            let state = self.inner.auth.read().await;
            guard(&state, authorization_headers)
        };

        let headers = headers.inspect_err(|err| {
            if err.is_not_authorized() {
                warn!("Rejected call without authorization token");
            }
        })?;

        Ok(build().with_headers(headers))
    }

    // ========================================================================
    // Users and feeds
    // ========================================================================

    /// Fetch a user.
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: &str) -> Result<Value, Error> {
        debug!("Getting user");
        self.send_authorized(|| Request::get(endpoints::user(user_id)))
            .await
    }

    /// List the feeds a user has access to.
    #[instrument(skip(self))]
    pub async fn get_feeds(&self, user_id: &str) -> Result<Value, Error> {
        debug!("Listing feeds");
        self.send_authorized(|| Request::get(endpoints::user_feeds(user_id)))
            .await
    }

    /// Fetch a feed.
    #[instrument(skip(self))]
    pub async fn get_feed(&self, feed_id: &str) -> Result<Value, Error> {
        debug!("Getting feed");
        self.send_authorized(|| Request::get(endpoints::feed(feed_id)))
            .await
    }

    // ========================================================================
    // Streams
    // ========================================================================

    /// List the streams of a feed.
    ///
    /// # Arguments
    ///
    /// * `feed_id` - The feed identifier
    /// * `query` - Optional type, channel and data time filters
    #[instrument(skip(self, query))]
    pub async fn get_streams(&self, feed_id: &str, query: &StreamsQuery) -> Result<Value, Error> {
        debug!(?query, "Listing streams");
        self.send_authorized(|| {
            Request::get(endpoints::feed_streams(feed_id)).with_query(query.to_query())
        })
        .await
    }

    /// Fetch one stream of a feed.
    #[instrument(skip(self))]
    pub async fn get_stream(&self, feed_id: &str, stream_id: &str) -> Result<Value, Error> {
        debug!("Getting stream");
        self.send_authorized(|| Request::get(endpoints::feed_stream(feed_id, stream_id)))
            .await
    }

    /// Fetch the data points of a stream.
    ///
    /// # Arguments
    ///
    /// * `feed_id` - The feed identifier
    /// * `stream_id` - The stream identifier
    /// * `query` - Optional time range (sent as Unix seconds) and limit
    #[instrument(skip(self, query))]
    pub async fn get_stream_data(
        &self,
        feed_id: &str,
        stream_id: &str,
        query: &StreamDataQuery,
    ) -> Result<Value, Error> {
        debug!(?query, "Getting stream data");
        self.send_authorized(|| {
            Request::get(endpoints::stream_data(feed_id, stream_id)).with_query(query.to_query())
        })
        .await
    }

    /// List streams related to a feed.
    #[instrument(skip(self))]
    pub async fn get_related_streams(&self, feed_id: &str) -> Result<Value, Error> {
        debug!("Listing related streams");
        self.send_authorized(|| Request::get(endpoints::related_streams(feed_id)))
            .await
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// List a user's notifications.
    ///
    /// `created_at_from` is sent as an ISO-8601 string.
    #[instrument(skip(self, query))]
    pub async fn get_notifications(
        &self,
        user_id: &str,
        query: &NotificationsQuery,
    ) -> Result<Value, Error> {
        debug!(?query, "Listing notifications");
        self.send_authorized(|| {
            Request::get(endpoints::notifications(user_id)).with_query(query.to_query())
        })
        .await
    }

    /// Fetch one notification.
    #[instrument(skip(self))]
    pub async fn get_notification(
        &self,
        user_id: &str,
        notification_id: &str,
    ) -> Result<Value, Error> {
        debug!("Getting notification");
        self.send_authorized(|| Request::get(endpoints::notification(user_id, notification_id)))
            .await
    }

    /// Update all of a user's notifications, e.g. `{"read": true}`.
    ///
    /// `data` is sent verbatim; `None` sends a PATCH with no body. Whatever
    /// the API answers is discarded.
    #[instrument(skip(self, data))]
    pub async fn update_notifications(
        &self,
        user_id: &str,
        data: Option<&Value>,
    ) -> Result<(), Error> {
        debug!("Updating notifications");
        let request = self
            .authorized_request(|| {
                Request::patch(endpoints::notifications(user_id)).with_optional_body(data.cloned())
            })
            .await?;
        self.inner.transport.send_no_response(request).await
    }

    /// Update one notification, e.g. `{"read": true, "archived": false}`.
    ///
    /// `data` is sent verbatim. Returns the decoded response body.
    #[instrument(skip(self, data))]
    pub async fn update_notification(
        &self,
        user_id: &str,
        notification_id: &str,
        data: &Value,
    ) -> Result<Value, Error> {
        debug!("Updating notification");
        self.send_authorized(|| {
            Request::patch(endpoints::notification(user_id, notification_id))
                .with_body(data.clone())
        })
        .await
    }

    /// Fetch the number of a user's notifications.
    #[instrument(skip(self))]
    pub async fn get_notification_count(&self, user_id: &str) -> Result<Value, Error> {
        debug!("Getting notification count");
        self.send_authorized(|| Request::get(endpoints::notification_count(user_id)))
            .await
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("api_url", self.inner.transport.api_url())
            .field("token", &"[REDACTED]")
            .finish()
    }
}
