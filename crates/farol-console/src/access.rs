//! # Route Guard
//!
//! Decides, for every page request, whether the console serves it or sends
//! the browser elsewhere.
//!
//! ## Decision Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Path              Token            Decision                            │
//! │  ────────────────  ───────────────  ──────────────────────────────────  │
//! │  /api, /_next/...  any              Continue (not guarded)              │
//! │  /login            none             Continue                            │
//! │  /login            present          Redirect /                          │
//! │  private           none             Redirect /login                     │
//! │  private           undecodable      Redirect /login + clear cookie      │
//! │  private           exp < now        Redirect /login + clear cookie      │
//! │  /admin/usuarios*  role ≠ SUPER_    Redirect /nao-autorizado            │
//! │                    ADMIN                                                │
//! │  private           valid            Continue                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Claims are read without checking the signature. The backend verifies
//! the token on every API call; the guard only routes.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use tracing::{debug, warn};

use farol_core::Role;

use crate::session::expired_cookie;

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where authenticated users land when they open the login page.
pub const HOME_PATH: &str = "/";

/// Where users without the required role are sent.
pub const FORBIDDEN_PATH: &str = "/nao-autorizado";

/// Pages reachable without a session.
const PUBLIC_ROUTES: &[&str] = &[LOGIN_PATH];

/// Path prefixes and the role they require.
const ROLE_PROTECTED_ROUTES: &[(&str, Role)] = &[("/admin/usuarios", Role::SuperAdmin)];

/// Paths (after the leading `/`) the guard never looks at.
const UNGUARDED_PREFIXES: &[&str] = &[
    "api",
    "_next/static",
    "_next/image",
    "favicon.ico",
    "sitemap.xml",
    "robots.txt",
];

/// Outcome of the guard for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Serve the requested page.
    Continue,
    /// Send the browser to `to`; drop the session cookie when `clear_session`.
    Redirect {
        to: &'static str,
        clear_session: bool,
    },
}

impl AccessDecision {
    fn redirect(to: &'static str) -> Self {
        AccessDecision::Redirect {
            to,
            clear_session: false,
        }
    }

    fn logout() -> Self {
        AccessDecision::Redirect {
            to: LOGIN_PATH,
            clear_session: true,
        }
    }

    /// `Set-Cookie` header to send with the redirect, if the session cookie
    /// has to go.
    pub fn set_cookie(&self, cookie_name: &str) -> Option<String> {
        match self {
            AccessDecision::Redirect {
                clear_session: true,
                ..
            } => Some(expired_cookie(cookie_name)),
            _ => None,
        }
    }
}

/// Claims the guard cares about. Everything else in the token is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionClaims {
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub role: Option<String>,
}

impl SessionClaims {
    /// A token without `exp` never expires.
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp < now)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role.as_deref() == Some(role.as_str())
    }
}

/// Reads the claims of a JWT without verifying its signature.
pub fn decode_claims(token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
}

/// Whether the guard applies to `path` at all.
pub fn is_guarded(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    !UNGUARDED_PREFIXES
        .iter()
        .any(|prefix| rest.starts_with(prefix))
}

/// Runs the guard for a request path.
///
/// ## Arguments
/// * `path` - request path, without query string
/// * `token` - session token from the cookie, if any
/// * `now` - current time, seconds since the epoch
pub fn evaluate(path: &str, token: Option<&str>, now: i64) -> AccessDecision {
    if !is_guarded(path) {
        return AccessDecision::Continue;
    }

    let is_public = PUBLIC_ROUTES.contains(&path);

    let token = match token {
        None if is_public => return AccessDecision::Continue,
        None => {
            debug!(path, "no session, redirecting to login");
            return AccessDecision::redirect(LOGIN_PATH);
        }
        Some(_) if is_public => return AccessDecision::redirect(HOME_PATH),
        Some(token) => token,
    };

    let claims = match decode_claims(token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!(path, error = %e, "malformed session token");
            return AccessDecision::logout();
        }
    };

    if claims.is_expired(now) {
        debug!(path, exp = ?claims.exp, "session expired");
        return AccessDecision::logout();
    }

    let required = ROLE_PROTECTED_ROUTES
        .iter()
        .find(|(prefix, _)| path.starts_with(prefix))
        .map(|(_, role)| *role);

    if let Some(role) = required {
        if !claims.has_role(role) {
            warn!(path, role = ?claims.role, "role not allowed");
            return AccessDecision::redirect(FORBIDDEN_PATH);
        }
    }

    AccessDecision::Continue
}

/// [`evaluate`] against the wall clock.
pub fn evaluate_now(path: &str, token: Option<&str>) -> AccessDecision {
    evaluate(path, token, chrono::Utc::now().timestamp())
}
