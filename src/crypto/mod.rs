// ABOUTME: Cryptographic primitives for CSRF tokens: CSPRNG generation and HMAC-SHA256 signing
// ABOUTME: Provides constant-time signature verification to prevent timing side channels
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crypto primitives for the CSRF protection layer
//!
//! Pure functions over the operating system CSPRNG and HMAC-SHA256. A true
//! HMAC construction is used (never a bare hash of message + key), and
//! signature comparison is constant time via `subtle`. CSPRNG failure is a
//! fatal error; there is no fallback to a weaker generator.

use crate::errors::{AppError, AppResult};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Token and secret length in bytes (32 bytes = 256 bits, 64 hex chars)
pub const TOKEN_LENGTH_BYTES: usize = 32;

/// Generate a hex-encoded random token from the operating system CSPRNG
///
/// Produces `length_bytes * 2` lowercase hex characters, zero-padded.
///
/// # Errors
///
/// Returns an error if the operating system CSPRNG is unavailable. This is
/// treated as fatal by callers; no weaker generator is ever substituted.
pub fn generate_random_token(length_bytes: usize) -> AppResult<String> {
    let mut bytes = vec![0u8; length_bytes];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::internal("System CSPRNG unavailable").with_source(e))?;
    Ok(hex::encode(bytes))
}

/// Compute the hex-encoded HMAC-SHA256 of `message` keyed by `secret`
///
/// # Errors
///
/// Returns an error if the HMAC instance cannot be initialized. HMAC-SHA256
/// accepts keys of any length, so this is unreachable in practice; it is
/// surfaced rather than swallowed to keep the no-panic policy intact.
pub fn sign(message: &str, secret: &str) -> AppResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::internal("HMAC initialization failed").with_source(e))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a hex-encoded HMAC-SHA256 signature in constant time
///
/// Recomputes the expected signature and compares with a constant-time
/// routine that never exits early on a differing byte. Only a length
/// mismatch short-circuits before the comparison loop; token length is
/// fixed and public, so that leak is acceptable.
#[must_use]
pub fn verify(message: &str, signature: &str, secret: &str) -> bool {
    let Ok(expected) = sign(message, secret) else {
        return false;
    };
    if signature.len() != expected.len() {
        return false;
    }
    signature.as_bytes().ct_eq(expected.as_bytes()).into()
}
