// ABOUTME: CSRF orchestrator middleware for state-changing HTTP requests
// ABOUTME: Gates unsafe methods on a validated double-submit credential, mints cookies on safe ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSRF orchestrator middleware
//!
//! Per-request state machine at the router boundary:
//!
//! - **Safe method** (GET/HEAD/OPTIONS and other non-mutating verbs): the
//!   request proceeds unconditionally; a signed token/secret pair is issued
//!   (or preserved, when still valid and per-request rotation is off) and
//!   both `Set-Cookie` headers are attached to the response.
//! - **Unsafe, exempt or unprotected path**: the request proceeds untouched;
//!   exempt endpoints perform their own out-of-band integrity check.
//! - **Unsafe, protected path**: the `X-CSRF-Token` header is validated
//!   against the secret cookie. Failure is a hard 403 before downstream
//!   logic runs; the specific reason goes to the logs only, never to the
//!   caller, and no cookies are mutated on rejection.

use crate::config::CsrfConfig;
use crate::cookies::{
    get_cookie_value, serialize_cookie, CookieAttributes, CSRF_TOKEN_HEADER, SECRET_COOKIE,
    SIGNED_TOKEN_COOKIE,
};
use crate::errors::{AppError, AppResult};
use crate::policy::RequestPolicy;
use crate::token::{create_pair, validate, ValidationFailure};
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Shared CSRF protection state, constructed once at startup
///
/// # Example
///
/// ```rust,no_run
/// use axum::{middleware, routing::get, Router};
/// use csrf_guard::config::CsrfConfig;
/// use csrf_guard::middleware::{csrf_protection_middleware, CsrfProtection};
/// use std::sync::Arc;
///
/// # async fn handler() -> &'static str { "" }
/// # fn example() -> csrf_guard::errors::AppResult<()> {
/// let protection = Arc::new(CsrfProtection::new(CsrfConfig::default())?);
/// let app: Router = Router::new()
///     .route("/", get(handler))
///     .layer(middleware::from_fn_with_state(
///         protection,
///         csrf_protection_middleware,
///     ));
/// # let _ = app;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsrfProtection {
    config: CsrfConfig,
    policy: RequestPolicy,
}

impl CsrfProtection {
    /// Create CSRF protection state from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid. Configuration
    /// errors are fatal at initialization: refuse to start rather than run
    /// with silently disabled protection.
    pub fn new(config: CsrfConfig) -> AppResult<Self> {
        config.validate()?;
        let policy = RequestPolicy::from_config(&config);
        Ok(Self { config, policy })
    }

    /// Create CSRF protection state from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a CSRF environment variable holds an invalid
    /// value.
    pub fn from_env() -> AppResult<Self> {
        Self::new(CsrfConfig::from_env()?)
    }

    /// Access the enforcement policy
    #[must_use]
    pub const fn policy(&self) -> &RequestPolicy {
        &self.policy
    }

    /// Access the loaded configuration
    #[must_use]
    pub const fn config(&self) -> &CsrfConfig {
        &self.config
    }
}

/// CSRF validation and token issuance middleware
///
/// Wire with `axum::middleware::from_fn_with_state` around every route the
/// protection should cover; downstream handlers never see a request that
/// failed validation.
pub async fn csrf_protection_middleware(
    State(protection): State<Arc<CsrfProtection>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    if !RequestPolicy::is_unsafe_method(&method) {
        return handle_safe_method(&protection, req, next).await;
    }

    if !protection.policy.requires_protection(&method, &path) {
        debug!(
            method = %method,
            path = %path,
            "unsafe method on exempt or unprotected path, skipping CSRF validation"
        );
        return next.run(req).await;
    }

    // UNSAFE_PROTECTED: validate before downstream logic runs
    let submitted = req
        .headers()
        .get(CSRF_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let secret = get_cookie_value(req.headers(), SECRET_COOKIE).unwrap_or_default();

    match validate(&submitted, &secret).failure() {
        None => {
            debug!(method = %method, path = %path, "CSRF token validated");
            next.run(req).await
        }
        Some(failure) => {
            log_rejection(&method, &path, failure);
            // Generic 403; the reason stays out of the response and no
            // cookies are touched.
            AppError::csrf_rejected().into_response()
        }
    }
}

/// Issue or preserve the token pair and attach both cookies to the response
async fn handle_safe_method(
    protection: &CsrfProtection,
    req: Request,
    next: Next,
) -> Response {
    let preserved = if protection.config.rotate_every_request {
        None
    } else {
        incoming_valid_pair(&req)
    };

    let (signed_token, secret) = match preserved {
        Some(pair) => pair,
        None => match create_pair() {
            Ok(pair) => (pair.signed_token, pair.secret),
            Err(e) => {
                // CSPRNG failure is fatal, never downgraded
                error!(error = %e, "CSRF token minting failed");
                return e.into_response();
            }
        },
    };

    let mut response = next.run(req).await;
    attach_token_cookies(protection, &mut response, &signed_token, &secret);
    response
}

/// Re-use the incoming pair when it still validates
fn incoming_valid_pair(req: &Request) -> Option<(String, String)> {
    let signed_token = get_cookie_value(req.headers(), SIGNED_TOKEN_COOKIE)?;
    let secret = get_cookie_value(req.headers(), SECRET_COOKIE)?;
    validate(&signed_token, &secret)
        .is_valid()
        .then_some((signed_token, secret))
}

/// Append both `Set-Cookie` headers for the next round-trip
fn attach_token_cookies(
    protection: &CsrfProtection,
    response: &mut Response,
    signed_token: &str,
    secret: &str,
) {
    let attrs = CookieAttributes::for_environment(
        protection.config.environment,
        protection.config.token_max_age_secs,
    );

    let token_cookie = serialize_cookie(SIGNED_TOKEN_COOKIE, signed_token, &attrs);
    let secret_cookie = serialize_cookie(SECRET_COOKIE, secret, &attrs.http_only());

    for cookie in [token_cookie, secret_cookie] {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
}

/// Log a rejection with the concrete reason (diagnostics only)
fn log_rejection(method: &Method, path: &str, failure: ValidationFailure) {
    match failure {
        ValidationFailure::MissingInput => warn!(
            method = %method,
            path = %path,
            reason = %failure,
            "CSRF credential missing for state-changing request"
        ),
        ValidationFailure::MalformedSignedToken => warn!(
            method = %method,
            path = %path,
            reason = %failure,
            "malformed CSRF token submitted (client bug or probe)"
        ),
        ValidationFailure::SignatureMismatch => warn!(
            method = %method,
            path = %path,
            reason = %failure,
            "CSRF signature mismatch, potential forgery attempt"
        ),
    }
}
