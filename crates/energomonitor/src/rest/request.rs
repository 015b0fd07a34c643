//! Request descriptor.

use std::fmt;

use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::auth::Credentials;

/// Ordered query multimap. Keys may repeat.
pub type Query = Vec<(&'static str, String)>;

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// One API call, built fresh for each invocation and consumed by
/// [`Transport::send`](super::Transport::send).
#[derive(Clone, Debug)]
pub struct Request {
    pub method: Method,
    /// Path relative to the API base URL, e.g. `/feeds/abc`.
    pub path: String,
    pub query: Query,
    /// JSON body. `None` sends no body at all.
    pub body: Option<Value>,
    pub headers: HeaderMap,
    /// HTTP Basic credentials, used instead of a bearer token.
    pub basic_auth: Option<Credentials>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            body: None,
            headers: HeaderMap::new(),
            basic_auth: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_optional_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Merge `headers` into the request, replacing existing values.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_basic_auth(mut self, credentials: Credentials) -> Self {
        self.basic_auth = Some(credentials);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{AUTHORIZATION, HeaderValue};
    use serde_json::json;

    #[test]
    fn builds_descriptor() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer t"));

        let request = Request::patch("/users/u1/notifications")
            .with_body(json!({"read": true}))
            .with_headers(headers);

        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "/users/u1/notifications");
        assert!(request.query.is_empty());
        assert_eq!(request.body, Some(json!({"read": true})));
        assert_eq!(request.headers[AUTHORIZATION], "Bearer t");
        assert!(request.basic_auth.is_none());
    }

    #[test]
    fn optional_body_stays_absent() {
        let request = Request::patch("/x").with_optional_body(None);
        assert!(request.body.is_none());
    }

    #[test]
    fn debug_redacts_basic_auth_password() {
        let request =
            Request::post("/authorizations").with_basic_auth(Credentials::new("user", "pw-secret"));
        let debug = format!("{:?}", request);
        assert!(debug.contains("user"));
        assert!(!debug.contains("pw-secret"));
    }

    #[test]
    fn method_names() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(reqwest::Method::from(Method::Patch), reqwest::Method::PATCH);
    }
}
