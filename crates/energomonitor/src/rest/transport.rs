//! HTTP transport.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::error::{Error, InvalidInputError, TransportError};
use crate::types::ApiUrl;

use super::request::Request;

/// User agent sent unless overridden.
pub const USER_AGENT: &str = concat!("energomonitor/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to an API base URL.
///
/// Sends [`Request`] descriptors and decodes JSON responses. Retries,
/// pooling, TLS and timeouts are whatever the wrapped `reqwest::Client` is
/// configured to do.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    api_url: ApiUrl,
}

impl Transport {
    /// Create a transport with a default HTTP client.
    pub fn new(api_url: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        Self { client, api_url }
    }

    /// Wrap a caller-configured HTTP client.
    pub fn from_client(client: reqwest::Client, api_url: ApiUrl) -> Self {
        Self { client, api_url }
    }

    /// Configure the HTTP client before creating a transport.
    pub fn builder() -> TransportBuilder {
        TransportBuilder::default()
    }

    /// Returns the base URL requests are sent to.
    pub fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the underlying HTTP client.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub(crate) fn set_api_url(&mut self, api_url: ApiUrl) {
        self.api_url = api_url;
    }

    /// Send a request and decode the response body.
    ///
    /// A 2xx response with an empty body decodes as `Value::Null`, and one
    /// that is not JSON comes back as `Value::String`. Any other status fails
    /// with [`TransportError::Status`].
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: Request) -> Result<Value, Error> {
        let response = self.execute(request).await?;
        self.handle_response(response).await
    }

    /// Send a request whose response body is of no interest.
    ///
    /// Only the status is checked; whatever the body holds is discarded.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send_no_response(&self, request: Request) -> Result<(), Error> {
        let response = self.execute(request).await?;

        let status = response.status();
        trace!(status = %status, "API response (body discarded)");

        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
                body: response.text().await?,
            }
            .into())
        }
    }

    async fn execute(&self, request: Request) -> Result<reqwest::Response, Error> {
        let url = self.api_url.endpoint_url(&request.path);
        debug!(%url, "API request");
        trace!(query = ?request.query, "query parameters");

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .headers(request.headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(credentials) = &request.basic_auth {
            builder = builder.basic_auth(credentials.username(), Some(credentials.password()));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        Ok(builder.send().await?)
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Value, Error> {
        let status = response.status();
        trace!(status = %status, "API response");

        let text = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                trace!(error = %e, "Response body is not JSON");
                Ok(Value::String(text))
            }
        }
    }
}

/// Configures the HTTP client behind a [`Transport`].
#[derive(Debug, Default)]
pub struct TransportBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TransportBuilder {
    /// Total time allowed for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Time allowed to establish a connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Replace the default `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the HTTP client and bind it to `api_url`.
    pub fn build(self, api_url: ApiUrl) -> Result<Transport, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()));

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder.build().map_err(|e| InvalidInputError::Transport {
            message: e.to_string(),
        })?;

        Ok(Transport::from_client(client, api_url))
    }
}
