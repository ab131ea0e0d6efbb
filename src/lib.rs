// ABOUTME: Main library entry point for the stateless CSRF protection layer
// ABOUTME: Double-submit cookie pattern with HMAC-SHA256 signed tokens for Axum services
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # csrf-guard
//!
//! Stateless CSRF protection implementing the double-submit cookie pattern
//! with cryptographically signed tokens, for edge-compatible Axum services
//! with no server-side session store.
//!
//! ## How it works
//!
//! On safe (read) methods the middleware mints a random token and an
//! independent random secret, signs the token with HMAC-SHA256 keyed by the
//! secret, and sets two cookies: the JavaScript-readable signed token and
//! the `HttpOnly` secret. On state-changing requests to protected paths the
//! client echoes the signed token in the `X-CSRF-Token` header; the
//! middleware re-verifies the signature against the secret cookie in
//! constant time and rejects the request with a generic 403 before any
//! downstream logic runs if it does not hold. A cross-origin attacker can
//! neither read the `HttpOnly` secret nor set the custom header, so a pure
//! cookie-replay cannot forge a valid pair.
//!
//! Validity is entirely reconstructable from the two cookies plus the
//! header: no token store, no coordination, horizontal scaling for free.
//!
//! ## Architecture
//!
//! - **`crypto`**: CSPRNG token generation, HMAC-SHA256 signing,
//!   constant-time verification
//! - **`token`**: signed token/secret pair lifecycle and validation taxonomy
//! - **`cookies`**: `Cookie` header parsing and `Set-Cookie` serialization
//! - **`policy`**: method/path gating with exemption and protected-prefix
//!   lists
//! - **`middleware`**: the Axum orchestrator wiring it all together
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use csrf_guard::middleware::{csrf_protection_middleware, CsrfProtection};
//! use std::sync::Arc;
//!
//! # async fn handler() -> &'static str { "" }
//! # fn main() -> csrf_guard::errors::AppResult<()> {
//! csrf_guard::logging::init_from_env()?;
//!
//! let protection = Arc::new(CsrfProtection::from_env()?);
//! let app: Router = Router::new()
//!     .route("/", get(handler))
//!     .layer(middleware::from_fn_with_state(
//!         protection,
//!         csrf_protection_middleware,
//!     ));
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod cookies;
pub mod crypto;
pub mod errors;
pub mod logging;
pub mod middleware;
pub mod policy;
pub mod token;

pub use config::CsrfConfig;
pub use errors::{AppError, AppResult};
pub use middleware::{csrf_protection_middleware, CsrfProtection};
pub use token::{validate, TokenPair, ValidationFailure, ValidationResult};
