// Integration tests for crypto primitives
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(missing_docs)]

use csrf_guard::crypto::{generate_random_token, sign, verify, TOKEN_LENGTH_BYTES};

#[test]
fn test_generate_random_token_hex_encoding() -> anyhow::Result<()> {
    let token = generate_random_token(TOKEN_LENGTH_BYTES)?;

    // 32 bytes hex encoded, 2 chars per byte
    assert_eq!(token.len(), 64, "token should be 64 hex characters");
    assert!(
        token.chars().all(|c| c.is_ascii_hexdigit()),
        "token should be valid hex"
    );
    Ok(())
}

#[test]
fn test_generate_random_token_respects_length() -> anyhow::Result<()> {
    assert_eq!(generate_random_token(16)?.len(), 32);
    assert_eq!(generate_random_token(1)?.len(), 2);
    assert_eq!(generate_random_token(0)?.len(), 0);
    Ok(())
}

#[test]
fn test_tokens_do_not_repeat() -> anyhow::Result<()> {
    let mut tokens = std::collections::HashSet::new();
    for _ in 0..100 {
        assert!(
            tokens.insert(generate_random_token(TOKEN_LENGTH_BYTES)?),
            "CSPRNG output should never collide in practice"
        );
    }
    Ok(())
}

#[test]
fn test_sign_is_deterministic_per_key() -> anyhow::Result<()> {
    let first = sign("message", "secret")?;
    let second = sign("message", "secret")?;
    assert_eq!(first, second, "HMAC is deterministic for a fixed key");

    let other_key = sign("message", "another-secret")?;
    assert_ne!(first, other_key, "changing the key must change the MAC");

    let other_message = sign("other message", "secret")?;
    assert_ne!(first, other_message, "changing the message must change the MAC");
    Ok(())
}

#[test]
fn test_sign_output_shape() -> anyhow::Result<()> {
    let signature = sign("", "")?;
    // HMAC-SHA256 digest is 32 bytes regardless of input
    assert_eq!(signature.len(), 64);
    assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    Ok(())
}

#[test]
fn test_verify_accepts_only_the_matching_signature() -> anyhow::Result<()> {
    let signature = sign("message", "secret")?;

    assert!(verify("message", &signature, "secret"));
    assert!(!verify("message", &signature, "wrong-secret"));
    assert!(!verify("tampered", &signature, "secret"));
    Ok(())
}

#[test]
fn test_verify_tamper_sensitivity() -> anyhow::Result<()> {
    let signature = sign("message", "secret")?;

    // Flipping any single hex character must invalidate the signature
    for i in 0..signature.len() {
        let mut tampered: Vec<char> = signature.chars().collect();
        tampered[i] = if tampered[i] == '0' { '1' } else { '0' };
        let tampered: String = tampered.into_iter().collect();
        if tampered == signature {
            continue;
        }
        assert!(
            !verify("message", &tampered, "secret"),
            "flip at position {i} should fail verification"
        );
    }
    Ok(())
}

#[test]
fn test_verify_length_mismatch_is_false_not_panic() {
    assert!(!verify("message", "", "secret"));
    assert!(!verify("message", "abc", "secret"));
    assert!(!verify("message", &"f".repeat(128), "secret"));
}
