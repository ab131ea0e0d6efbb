// ABOUTME: CSRF token lifecycle: signed token/secret pair creation and validation
// ABOUTME: Implements the stateless double-submit pairing via HMAC-SHA256 signatures
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSRF token lifecycle
//!
//! A pair is two independent 32-byte random values: a visible token and an
//! `HttpOnly` secret. The pairing is established by signing the token with the
//! secret; the signed token `token.signature` is what clients echo back in
//! the `X-CSRF-Token` header. No server-side state is kept — validity is
//! entirely reconstructable from the submitted value and the secret cookie.

use crate::crypto::{generate_random_token, sign, verify, TOKEN_LENGTH_BYTES};
use crate::errors::AppResult;
use std::fmt;

/// Separator between the token and signature halves of a signed token
const SIGNED_TOKEN_SEPARATOR: char = '.';

/// A freshly minted CSRF credential
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Visible random token (64 hex chars), readable by client-side script
    pub token: String,
    /// `token.signature` as delivered in the JavaScript-readable cookie
    pub signed_token: String,
    /// Random secret (64 hex chars); must only ever live in an `HttpOnly` cookie
    pub secret: String,
}

/// Why validation rejected a submitted token
///
/// The distinction is for structured logging only; clients always receive
/// the same generic rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    /// Submitted token or stored secret absent/empty
    MissingInput,
    /// Token does not split into exactly two non-empty parts
    MalformedSignedToken,
    /// Well-formed token with a signature that does not verify
    SignatureMismatch,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput => write!(f, "missing-input"),
            Self::MalformedSignedToken => write!(f, "malformed-signed-token"),
            Self::SignatureMismatch => write!(f, "signature-mismatch"),
        }
    }
}

/// Outcome of validating a submitted signed token against a secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Signature verified; carries the token half
    Valid(String),
    /// Rejected for the given reason
    Invalid(ValidationFailure),
}

impl ValidationResult {
    /// Check whether validation succeeded
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Get the failure reason, if any
    #[must_use]
    pub const fn failure(&self) -> Option<ValidationFailure> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(failure) => Some(*failure),
        }
    }
}

/// Create a fresh token/secret pair
///
/// Token and secret come from two independent CSPRNG draws; the secret is
/// never derived from the token or vice versa. The signed token is
/// `token + "." + hmac_sha256(token, secret)`.
///
/// # Errors
///
/// Returns an error if the system CSPRNG is unavailable (fatal, never
/// downgraded to a non-cryptographic generator).
pub fn create_pair() -> AppResult<TokenPair> {
    let token = generate_random_token(TOKEN_LENGTH_BYTES)?;
    let secret = generate_random_token(TOKEN_LENGTH_BYTES)?;
    let signature = sign(&token, &secret)?;

    let signed_token = format!("{token}{SIGNED_TOKEN_SEPARATOR}{signature}");
    Ok(TokenPair {
        token,
        signed_token,
        secret,
    })
}

/// Validate a submitted signed token against the stored secret
///
/// Pure single-pass decision function: no I/O, no retry, no fallback.
/// Format errors are distinguished from cryptographic failures so operators
/// can tell client bugs from forgery attempts in the logs.
#[must_use]
pub fn validate(signed_token: &str, secret: &str) -> ValidationResult {
    if signed_token.is_empty() || secret.is_empty() {
        return ValidationResult::Invalid(ValidationFailure::MissingInput);
    }

    let parts: Vec<&str> = signed_token.split(SIGNED_TOKEN_SEPARATOR).collect();
    let [token, signature] = parts.as_slice() else {
        return ValidationResult::Invalid(ValidationFailure::MalformedSignedToken);
    };
    if token.is_empty() || signature.is_empty() {
        return ValidationResult::Invalid(ValidationFailure::MalformedSignedToken);
    }

    if verify(token, signature, secret) {
        ValidationResult::Valid((*token).to_owned())
    } else {
        ValidationResult::Invalid(ValidationFailure::SignatureMismatch)
    }
}
