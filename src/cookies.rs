// ABOUTME: Cookie codec: request Cookie header parsing and Set-Cookie serialization
// ABOUTME: Enforces the CSRF wire contract (SameSite=Strict, __Host- prefix, forced Secure)
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cookie codec for the CSRF wire contract
//!
//! Two cookies carry the credential between round-trips: the
//! JavaScript-readable signed token and the `HttpOnly` secret. Their names
//! and attributes are part of the wire contract. The serializer emits
//! directives in a stable order and refuses to weaken the `__Host-`
//! browser mandates (`Secure`, `Path=/`, no `Domain`).

use crate::config::types::Environment;
use axum::http::{header, HeaderMap};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Cookie carrying the signed token (`token.signature`); readable by JS
pub const SIGNED_TOKEN_COOKIE: &str = "csrf_token";

/// `HttpOnly` cookie carrying the raw secret; the `__Host-` prefix makes the
/// browser itself enforce `Secure`, `Path=/`, and no `Domain`
pub const SECRET_COOKIE: &str = "__Host-csrf_secret";

/// Request header the client must echo the signed token into
pub const CSRF_TOKEN_HEADER: &str = "x-csrf-token";

/// `SameSite` cookie policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSitePolicy {
    /// Strict: cookie only sent in first-party context
    Strict,
    /// Lax: cookie sent on top-level navigation
    Lax,
    /// None: cookie sent in all contexts (requires Secure=true)
    None,
}

impl SameSitePolicy {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

/// Attributes applied to an outgoing `Set-Cookie` directive
#[derive(Debug, Clone)]
pub struct CookieAttributes {
    /// `HttpOnly` flag (prevents JavaScript access)
    pub http_only: bool,
    /// Cookie path
    pub path: String,
    /// `SameSite` policy
    pub same_site: SameSitePolicy,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// Max-Age in seconds
    pub max_age_secs: i64,
}

impl CookieAttributes {
    /// Attributes shared by both CSRF cookies in the given environment
    ///
    /// `Secure` is on whenever the environment is production, regardless of
    /// caller intent (fail-secure: no accidental downgrade path).
    #[must_use]
    pub fn for_environment(environment: Environment, max_age_secs: i64) -> Self {
        Self {
            http_only: false,
            path: "/".to_owned(),
            same_site: SameSitePolicy::Strict,
            secure: environment.is_production(),
            max_age_secs,
        }
    }

    /// Same attributes with the `HttpOnly` flag set (secret cookie)
    #[must_use]
    pub fn http_only(mut self) -> Self {
        self.http_only = true;
        self
    }
}

/// Serialize a `Set-Cookie` header value
///
/// Directives are assembled in a stable order: `Name=Value`, `Path`,
/// `SameSite`, `Max-Age`, then conditionally `Secure` and `HttpOnly`.
/// Cookies named with the `__Host-` prefix always get `Secure` and
/// `Path=/`, whatever the caller passed.
#[must_use]
pub fn serialize_cookie(name: &str, value: &str, attrs: &CookieAttributes) -> String {
    let host_prefixed = name.starts_with("__Host-");
    let path = if host_prefixed { "/" } else { attrs.path.as_str() };

    let mut cookie = format!("{name}={value}");
    let _ = write!(cookie, "; Path={path}");
    let _ = write!(cookie, "; SameSite={}", attrs.same_site.as_str());
    let _ = write!(cookie, "; Max-Age={}", attrs.max_age_secs);

    if attrs.secure || host_prefixed {
        cookie.push_str("; Secure");
    }
    if attrs.http_only {
        cookie.push_str("; HttpOnly");
    }

    cookie
}

/// Parse a request `Cookie` header into a name → value map
///
/// Splits on `;`, trims each pair, and splits each pair on the first `=`
/// only — values may themselves contain `=` (base64). Duplicate names are
/// last-write-wins; an empty or absent header yields an empty map. Pairs
/// with no `=` contribute nothing.
#[must_use]
pub fn parse_cookies(header: Option<&str>) -> HashMap<String, String> {
    let Some(header) = header else {
        return HashMap::new();
    };

    header
        .split(';')
        .filter_map(|pair| {
            let mut parts = pair.trim().splitn(2, '=');
            let name = parts.next()?.trim();
            let value = parts.next()?.trim();
            if name.is_empty() {
                None
            } else {
                Some((name.to_owned(), value.to_owned()))
            }
        })
        .collect()
}

/// Extract a single cookie value from request headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let header = headers.get(header::COOKIE)?.to_str().ok()?;
    parse_cookies(Some(header)).remove(cookie_name)
}
