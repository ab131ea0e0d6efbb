// ABOUTME: Request policy gate deciding which method/path combinations need CSRF validation
// ABOUTME: Immutable exemption and protected-prefix lists built once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request policy gate
//!
//! Decides from HTTP method and path whether a request must present a valid
//! CSRF credential. Safe methods (GET, HEAD, OPTIONS) never require one.
//! Exempt paths cover endpoints authenticated out-of-band, e.g. third-party
//! webhook callbacks that cannot supply a CSRF header. The lists are frozen
//! at construction and read-only for the process lifetime.

use crate::config::CsrfConfig;
use axum::http::Method;

/// Immutable CSRF enforcement policy
#[derive(Debug, Clone)]
pub struct RequestPolicy {
    exempt_paths: Vec<String>,
    protected_prefixes: Vec<String>,
}

impl RequestPolicy {
    /// Build the policy from startup configuration
    #[must_use]
    pub fn from_config(config: &CsrfConfig) -> Self {
        Self {
            exempt_paths: config.exempt_paths.clone(),
            protected_prefixes: config.protected_prefixes.clone(),
        }
    }

    /// Check if a method is in the unsafe (state-changing) set
    #[must_use]
    pub fn is_unsafe_method(method: &Method) -> bool {
        matches!(
            *method,
            Method::POST | Method::PUT | Method::PATCH | Method::DELETE
        )
    }

    /// Check if a path equals or is prefixed by an exemption entry
    #[must_use]
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_paths
            .iter()
            .any(|exempt| path.starts_with(exempt.as_str()))
    }

    /// Check if a request must present a valid CSRF credential
    ///
    /// True iff the method is unsafe, the path is not exempt, and the path
    /// falls under a protected prefix. Non-API, non-mutating pages skip the
    /// check entirely.
    #[must_use]
    pub fn requires_protection(&self, method: &Method, path: &str) -> bool {
        Self::is_unsafe_method(method)
            && !self.is_exempt(path)
            && self
                .protected_prefixes
                .iter()
                .any(|prefix| path.starts_with(prefix.as_str()))
    }
}
