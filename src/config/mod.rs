// ABOUTME: CSRF protection configuration loaded from environment variables at startup
// ABOUTME: Path lists, rotation policy, and cookie lifetime with fail-fast validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration for the CSRF protection layer
//!
//! All knobs are read once at process startup. Present-but-invalid values
//! are fatal configuration errors: the process refuses to start rather than
//! running with silently weakened protection. The resulting config is an
//! immutable value for the process lifetime.

pub mod types;

pub use types::{Environment, LogLevel};

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Default `Max-Age` for both CSRF cookies (24 hours)
pub const DEFAULT_TOKEN_MAX_AGE_SECS: i64 = 86_400;

/// Default path prefixes that require CSRF enforcement
const DEFAULT_PROTECTED_PREFIXES: &[&str] = &["/api"];

/// Default exempt paths (webhook callbacks authenticate out-of-band)
const DEFAULT_EXEMPT_PATHS: &[&str] = &["/api/webhooks"];

/// CSRF protection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfConfig {
    /// Deployment environment; production forces the `Secure` cookie flag
    pub environment: Environment,
    /// Paths exempt from CSRF enforcement (literal-or-prefix match)
    pub exempt_paths: Vec<String>,
    /// Path prefixes in scope for enforcement
    pub protected_prefixes: Vec<String>,
    /// `Max-Age` in seconds for both CSRF cookies
    pub token_max_age_secs: i64,
    /// Mint a fresh token pair on every safe-method request (forward secrecy)
    ///
    /// When disabled, a still-valid incoming pair is preserved and re-sent.
    pub rotate_every_request: bool,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            exempt_paths: to_owned_vec(DEFAULT_EXEMPT_PATHS),
            protected_prefixes: to_owned_vec(DEFAULT_PROTECTED_PREFIXES),
            token_max_age_secs: DEFAULT_TOKEN_MAX_AGE_SECS,
            rotate_every_request: true,
        }
    }
}

impl CsrfConfig {
    /// Load CSRF configuration from environment variables
    ///
    /// Reads `ENVIRONMENT`, `CSRF_EXEMPT_PATHS`, `CSRF_PROTECTED_PREFIXES`,
    /// `CSRF_TOKEN_MAX_AGE_SECS`, and `CSRF_ROTATE_EVERY_REQUEST`. Absent
    /// variables fall back to defaults; present-but-invalid values fail.
    ///
    /// # Errors
    ///
    /// Returns an error if a CSRF environment variable is set to a value
    /// that cannot be parsed, or if the max-age is not positive.
    pub fn from_env() -> AppResult<Self> {
        let environment = env::var("ENVIRONMENT")
            .map(|s| Environment::from_str_or_default(&s))
            .unwrap_or_default();

        let exempt_paths = env::var("CSRF_EXEMPT_PATHS").map_or_else(
            |_| to_owned_vec(DEFAULT_EXEMPT_PATHS),
            |s| parse_path_list(&s),
        );

        let protected_prefixes = env::var("CSRF_PROTECTED_PREFIXES").map_or_else(
            |_| to_owned_vec(DEFAULT_PROTECTED_PREFIXES),
            |s| parse_path_list(&s),
        );

        let token_max_age_secs = match env::var("CSRF_TOKEN_MAX_AGE_SECS") {
            Ok(raw) => raw.parse::<i64>().map_err(|e| {
                AppError::config_invalid(format!("Invalid CSRF_TOKEN_MAX_AGE_SECS value: {e}"))
            })?,
            Err(_) => DEFAULT_TOKEN_MAX_AGE_SECS,
        };

        let rotate_every_request = match env::var("CSRF_ROTATE_EVERY_REQUEST") {
            Ok(raw) => raw.parse::<bool>().map_err(|e| {
                AppError::config_invalid(format!("Invalid CSRF_ROTATE_EVERY_REQUEST value: {e}"))
            })?,
            Err(_) => true,
        };

        let config = Self {
            environment,
            exempt_paths,
            protected_prefixes,
            token_max_age_secs,
            rotate_every_request,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie lifetime is not positive or a path
    /// entry does not start with `/`.
    pub fn validate(&self) -> AppResult<()> {
        if self.token_max_age_secs <= 0 {
            return Err(AppError::config_invalid(format!(
                "CSRF_TOKEN_MAX_AGE_SECS must be positive, got {}",
                self.token_max_age_secs
            )));
        }
        for path in self.exempt_paths.iter().chain(&self.protected_prefixes) {
            if !path.starts_with('/') {
                return Err(AppError::config_invalid(format!(
                    "CSRF path entries must start with '/', got {path:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Split a comma-separated path list, dropping empty entries
fn parse_path_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn to_owned_vec(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|&s| s.to_owned()).collect()
}
