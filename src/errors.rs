// ABOUTME: Unified error handling for CSRF validation, configuration, and crypto failures
// ABOUTME: Defines error codes, HTTP response formatting, and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Unified Error Handling System
//!
//! Centralized error types for the CSRF protection layer. Defines standard
//! error codes and HTTP response formatting so that every rejection sent to
//! a client goes through the same generic envelope, while the precise
//! failure cause stays available for structured logging.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // CSRF validation (1000-1999)
    /// Header token or secret cookie absent from the request
    #[serde(rename = "CSRF_MISSING_INPUT")]
    CsrfMissingInput = 1000,
    /// Signed token does not split into exactly two non-empty parts
    #[serde(rename = "CSRF_MALFORMED_TOKEN")]
    CsrfMalformedToken = 1001,
    /// Well-formed signed token with a cryptographically invalid signature
    #[serde(rename = "CSRF_SIGNATURE_MISMATCH")]
    CsrfSignatureMismatch = 1002,
    /// Generic rejection surfaced to clients (the specific cause is logged only)
    #[serde(rename = "CSRF_REJECTED")]
    CsrfRejected = 1003,

    // Configuration (6000-6999)
    /// Configuration error encountered at startup
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// Required configuration is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// Configuration value present but invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Internal error (e.g. the CSPRNG is unavailable)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 403 Forbidden: every CSRF failure collapses to the same status
            Self::CsrfMissingInput
            | Self::CsrfMalformedToken
            | Self::CsrfSignatureMismatch
            | Self::CsrfRejected => 403,

            // 500 Internal Server Error
            Self::ConfigError | Self::ConfigMissing | Self::ConfigInvalid | Self::InternalError => {
                500
            }
        }
    }

    /// Get a user-facing description of this error
    ///
    /// CSRF variants deliberately share one generic description: the
    /// response body must not reveal which part of the credential failed.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::CsrfMissingInput
            | Self::CsrfMalformedToken
            | Self::CsrfSignatureMismatch
            | Self::CsrfRejected => "Request blocked by CSRF protection",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

/// Unified error type for the crate
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message (logs only, never serialized to clients)
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details envelope
    pub error: ErrorResponseDetails,
}

/// Error payload carried inside an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Stable machine-readable error code
    pub code: ErrorCode,
    /// Generic human-readable message
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                // Only the generic per-code description goes on the wire;
                // `error.message` may name the concrete validation failure.
                message: error.code.description().to_owned(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::from(&self);
        (status, Json(body)).into_response()
    }
}

/// Convenience constructors for common errors
impl AppError {
    /// Header token or secret cookie absent
    #[must_use]
    pub fn csrf_missing_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CsrfMissingInput, message)
    }

    /// Signed token format error
    #[must_use]
    pub fn csrf_malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CsrfMalformedToken, message)
    }

    /// Signature verification failure
    #[must_use]
    pub fn csrf_signature_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CsrfSignatureMismatch, message)
    }

    /// Generic client-facing rejection
    #[must_use]
    pub fn csrf_rejected() -> Self {
        Self::new(ErrorCode::CsrfRejected, "CSRF validation failed")
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Invalid configuration value
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}
