//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Base URL of the public Energomonitor API.
pub const DEFAULT_API_URL: &str = "https://api.energomonitor.com/v1";

/// A validated API base URL.
///
/// The URL must be absolute, use HTTP or HTTPS, and name a host. Endpoint
/// paths are appended to it verbatim.
///
/// # Example
///
/// ```
/// use energomonitor::ApiUrl;
///
/// let api = ApiUrl::new("https://api.energomonitor.com/v1/").unwrap();
/// assert_eq!(api.endpoint_url("/feeds/abc"),
///            "https://api.energomonitor.com/v1/feeds/abc");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::ApiUrl {
                value: s.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        // Normalize: drop trailing slash from non-root paths
        let normalized = if url.path().len() > 1 && url.path().ends_with('/') {
            let mut u = url.clone();
            let trimmed = u.path().trim_end_matches('/').to_string();
            u.set_path(&trimmed);
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the full URL for an endpoint path such as `/users/42`.
    pub fn endpoint_url(&self, path: &str) -> String {
        // Url keeps a trailing slash on root paths
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}{}", base, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTP or HTTPS".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_API_URL).expect("default API URL is valid"))
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_api() {
        let api = ApiUrl::default();
        assert_eq!(api.as_str(), DEFAULT_API_URL);
        assert_eq!(api.host(), Some("api.energomonitor.com"));
        assert_eq!(
            api.endpoint_url("/authorizations"),
            "https://api.energomonitor.com/v1/authorizations"
        );
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(api.host(), Some("127.0.0.1"));
        assert_eq!(
            api.endpoint_url("/users/u1"),
            "http://127.0.0.1:8080/users/u1"
        );
    }

    #[test]
    fn normalizes_trailing_slash() {
        let api = ApiUrl::new("https://example.com/api/v2/").unwrap();
        assert_eq!(api.as_str(), "https://example.com/api/v2");
        assert_eq!(
            api.endpoint_url("/feeds/f1"),
            "https://example.com/api/v2/feeds/f1"
        );
    }

    #[test]
    fn plain_http_on_any_host() {
        let api = ApiUrl::new("http://10.0.0.5:8080/v1").unwrap();
        assert_eq!(api.host(), Some("10.0.0.5"));
        assert_eq!(
            api.endpoint_url("/feeds/f1"),
            "http://10.0.0.5:8080/v1/feeds/f1"
        );
    }

    #[test]
    fn invalid_scheme() {
        assert!(ApiUrl::new("ftp://example.com").is_err());
        assert!(ApiUrl::new("file:///tmp/api").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/v1").is_err());
    }

    #[test]
    fn rejects_query_string() {
        assert!(ApiUrl::new("https://example.com/v1?x=1").is_err());
    }

    #[test]
    fn serde_roundtrip_validates() {
        let api: ApiUrl = serde_json::from_str(r#""https://example.com/v1""#).unwrap();
        assert_eq!(serde_json::to_string(&api).unwrap(), r#""https://example.com/v1""#);
        assert!(serde_json::from_str::<ApiUrl>(r#""ftp://example.com""#).is_err());
    }
}
