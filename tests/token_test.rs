// Integration tests for the CSRF token lifecycle
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(missing_docs)]

use csrf_guard::crypto::sign;
use csrf_guard::token::{create_pair, validate, ValidationFailure, ValidationResult};

#[test]
fn test_fresh_pair_round_trips() -> anyhow::Result<()> {
    let pair = create_pair()?;

    assert_eq!(
        validate(&pair.signed_token, &pair.secret),
        ValidationResult::Valid(pair.token.clone()),
        "a freshly created pair must validate"
    );
    Ok(())
}

#[test]
fn test_signed_token_shape() -> anyhow::Result<()> {
    let pair = create_pair()?;

    let parts: Vec<&str> = pair.signed_token.split('.').collect();
    assert_eq!(parts.len(), 2, "signed token is token.signature");
    assert_eq!(parts[0], pair.token);
    assert_eq!(parts[1].len(), 64, "signature is 64 hex chars");
    assert!(
        !pair.signed_token.contains(&pair.secret),
        "the secret must never appear in the signed token"
    );
    Ok(())
}

#[test]
fn test_secret_independence() -> anyhow::Result<()> {
    let pair = create_pair()?;
    let other = create_pair()?;

    assert_eq!(
        validate(&pair.signed_token, &other.secret).failure(),
        Some(ValidationFailure::SignatureMismatch),
        "a pair must only validate against the exact secret that signed it"
    );
    Ok(())
}

#[test]
fn test_tamper_sensitivity_in_both_halves() -> anyhow::Result<()> {
    let pair = create_pair()?;

    for i in 0..pair.signed_token.len() {
        let mut chars: Vec<char> = pair.signed_token.chars().collect();
        if chars[i] == '.' {
            continue;
        }
        chars[i] = if chars[i] == '0' { '1' } else { '0' };
        let tampered: String = chars.into_iter().collect();
        if tampered == pair.signed_token {
            continue;
        }

        assert!(
            !validate(&tampered, &pair.secret).is_valid(),
            "single character flip at position {i} should invalidate the token"
        );
    }
    Ok(())
}

#[test]
fn test_format_robustness_never_panics() {
    let secret = "b".repeat(64);
    let malformed = [
        "",
        "nodotatall",
        "ends-with-dot.",
        ".starts-with-dot",
        "too.many.dots",
        "...",
        ".",
    ];

    for input in malformed {
        let result = validate(input, &secret);
        assert!(
            !result.is_valid(),
            "malformed input {input:?} must be rejected"
        );
        assert_ne!(
            result.failure(),
            Some(ValidationFailure::SignatureMismatch),
            "format errors are distinguished from signature failures for {input:?}"
        );
    }
}

#[test]
fn test_missing_input_reason() {
    assert_eq!(
        validate("", "secret").failure(),
        Some(ValidationFailure::MissingInput)
    );
    assert_eq!(
        validate("token.sig", "").failure(),
        Some(ValidationFailure::MissingInput)
    );
}

// Concrete scenario: a fixed token signed with a fixed secret validates with
// that secret and fails with any other.
#[test]
fn test_known_token_and_secret_scenario() -> anyhow::Result<()> {
    let token = "a".repeat(64);
    let secret = "b".repeat(64);
    let wrong_secret = "c".repeat(64);

    let signature = sign(&token, &secret)?;
    let signed_token = format!("{token}.{signature}");

    assert_eq!(
        validate(&signed_token, &secret),
        ValidationResult::Valid(token.clone())
    );
    assert_eq!(
        validate(&signed_token, &wrong_secret).failure(),
        Some(ValidationFailure::SignatureMismatch)
    );
    Ok(())
}

#[test]
fn test_validation_failure_log_labels() {
    assert_eq!(ValidationFailure::MissingInput.to_string(), "missing-input");
    assert_eq!(
        ValidationFailure::MalformedSignedToken.to_string(),
        "malformed-signed-token"
    );
    assert_eq!(
        ValidationFailure::SignatureMismatch.to_string(),
        "signature-mismatch"
    );
}
