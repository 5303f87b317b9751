//! # Session
//!
//! The console has no session store of its own: the backend issues a token
//! at login and the browser keeps it in a cookie. Every request to the
//! backend forwards it as a bearer token.
//!
//! ```text
//! Cookie: theme=dark; refreshToken=eyJhbGciOi...
//!                                  │
//!                                  ▼
//! Authorization: Bearer eyJhbGciOi...
//! ```

use std::fmt;

use cookie::{Cookie, SameSite};
use time::OffsetDateTime;

/// Token carried by the incoming request, if any.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Session with a known token. A blank token counts as no session.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Session {
            token: (!token.trim().is_empty()).then_some(token),
        }
    }

    /// Request without a session cookie.
    pub fn anonymous() -> Self {
        Session { token: None }
    }

    /// Reads the session from a raw `Cookie` header.
    pub fn from_cookie_header(header: &str, cookie_name: &str) -> Self {
        cookie_value(header, cookie_name)
            .map(Session::new)
            .unwrap_or_default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }
}

// Tokens never end up in logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Finds a cookie by name in a `Cookie` header. Malformed pairs are
/// skipped.
///
/// ```rust
/// use farol_console::session::cookie_value;
///
/// let header = "theme=dark; refreshToken=abc.def.ghi";
/// assert_eq!(cookie_value(header, "refreshToken").as_deref(), Some("abc.def.ghi"));
/// assert_eq!(cookie_value(header, "missing"), None);
/// ```
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().trim_matches('"').to_string())
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn expired_cookie(name: &str) -> String {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
        .to_string()
}
