//! Authorization gate.
//!
//! A session is either [`AuthState::Unauthorized`] or
//! [`AuthState::Authorized`]. The only transition is Unauthorized to
//! Authorized, taken when an authorize call succeeds or when a token is
//! supplied at construction; there is no way back. Every authenticated
//! operation passes through [`guard`] before its request is built.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::{Error, InvalidInputError};

use super::tokens::AccessToken;

/// Credential state of a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No token has been set.
    #[default]
    Unauthorized,
    /// A token is set and attached to every authenticated request.
    Authorized(AccessToken),
}

impl AuthState {
    /// Returns the token if one is set.
    pub fn token(&self) -> Option<&AccessToken> {
        match self {
            AuthState::Unauthorized => None,
            AuthState::Authorized(token) => Some(token),
        }
    }

    /// Returns true once a token is set.
    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthState::Authorized(_))
    }
}

impl From<Option<AccessToken>> for AuthState {
    fn from(token: Option<AccessToken>) -> Self {
        token.map_or(AuthState::Unauthorized, AuthState::Authorized)
    }
}

/// Run `operation` with the current token, or fail with [`Error::NotAuthorized`].
///
/// The operation's result is returned unchanged, success or failure. The
/// gate itself does no I/O and never retries.
pub fn guard<T>(
    state: &AuthState,
    operation: impl FnOnce(&AccessToken) -> Result<T, Error>,
) -> Result<T, Error> {
    match state {
        AuthState::Authorized(token) => operation(token),
        AuthState::Unauthorized => Err(Error::NotAuthorized),
    }
}

/// Derive the header set sent with authenticated requests.
///
/// # Errors
///
/// Fails if the token contains characters not allowed in a header value.
pub fn authorization_headers(token: &AccessToken) -> Result<HeaderMap, Error> {
    let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(
        |e| InvalidInputError::Token {
            reason: e.to_string(),
        },
    )?;
    auth_value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(AUTHORIZATION, auth_value);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_state_rejects_without_running_operation() {
        let mut ran = false;
        let result = guard(&AuthState::Unauthorized, |_| {
            ran = true;
            Ok(())
        });

        let err = result.unwrap_err();
        assert!(err.is_not_authorized());
        assert_eq!(err.to_string(), crate::error::NOT_AUTHORIZED_MESSAGE);
        assert!(!ran);
    }

    #[test]
    fn authorized_state_passes_token_through() {
        let state = AuthState::Authorized(AccessToken::new("abc"));
        let value = guard(&state, |token| Ok(token.as_str().len())).unwrap();
        assert_eq!(value, 3);
    }

    #[test]
    fn operation_failure_is_returned_unchanged() {
        let state = AuthState::Authorized(AccessToken::new("abc"));
        let err = guard::<()>(&state, |_| {
            Err(crate::error::TransportError::Status {
                status: 503,
                body: String::new(),
            }
            .into())
        })
        .unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn header_set_carries_bearer_token_and_json_content_type() {
        let headers = authorization_headers(&AccessToken::new("t0k3n")).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[AUTHORIZATION], "Bearer t0k3n");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn header_set_rejects_control_characters() {
        let err = authorization_headers(&AccessToken::new("bad\ntoken")).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Token { .. })
        ));
    }

    #[test]
    fn state_from_optional_token() {
        assert_eq!(AuthState::from(None), AuthState::Unauthorized);
        let state = AuthState::from(Some(AccessToken::new("x")));
        assert!(state.is_authorized());
        assert_eq!(state.token().map(AccessToken::as_str), Some("x"));
    }
}
