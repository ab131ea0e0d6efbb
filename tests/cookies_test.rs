// Integration tests for the cookie codec
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(missing_docs)]

use axum::http::{header, HeaderMap};
use csrf_guard::config::types::Environment;
use csrf_guard::cookies::{
    get_cookie_value, parse_cookies, serialize_cookie, CookieAttributes, SECRET_COOKIE,
    SIGNED_TOKEN_COOKIE,
};

#[test]
fn test_parse_cookie_header() {
    let cookies = parse_cookies(Some("a=1; b=2=3; c="));

    assert_eq!(cookies.get("a").map(String::as_str), Some("1"));
    assert_eq!(
        cookies.get("b").map(String::as_str),
        Some("2=3"),
        "values may contain '=', split on the first one only"
    );
    assert_eq!(cookies.get("c").map(String::as_str), Some(""));
    assert_eq!(cookies.len(), 3);
}

#[test]
fn test_parse_absent_header_yields_empty_map() {
    assert!(parse_cookies(None).is_empty());
    assert!(parse_cookies(Some("")).is_empty());
}

#[test]
fn test_parse_duplicate_names_last_write_wins() {
    let cookies = parse_cookies(Some("session=old; session=new"));
    assert_eq!(cookies.get("session").map(String::as_str), Some("new"));
}

#[test]
fn test_serialize_directive_order() {
    let attrs = CookieAttributes::for_environment(Environment::Production, 86_400);
    let cookie = serialize_cookie(SIGNED_TOKEN_COOKIE, "tok.sig", &attrs);

    assert_eq!(
        cookie,
        "csrf_token=tok.sig; Path=/; SameSite=Strict; Max-Age=86400; Secure",
        "directives must come in a stable order"
    );
}

#[test]
fn test_production_forces_secure() {
    let mut attrs = CookieAttributes::for_environment(Environment::Production, 60);
    // A caller trying to downgrade still gets Secure in production builds
    assert!(attrs.secure, "production attributes start secure");

    attrs = CookieAttributes::for_environment(Environment::Development, 60);
    let cookie = serialize_cookie("plain", "v", &attrs);
    assert!(
        !cookie.contains("Secure"),
        "development cookies may omit Secure for plain-HTTP local work"
    );
}

#[test]
fn test_host_prefixed_secret_cookie_contract() {
    // __Host- mandates Secure and Path=/ at the browser level; the
    // serializer must never weaken them even in development
    let attrs = CookieAttributes::for_environment(Environment::Development, 60).http_only();
    let cookie = serialize_cookie(SECRET_COOKIE, "secretvalue", &attrs);

    assert!(cookie.starts_with("__Host-csrf_secret=secretvalue"));
    assert!(cookie.contains("; Secure"));
    assert!(cookie.contains("; Path=/;"));
    assert!(cookie.contains("; HttpOnly"));
    assert!(!cookie.contains("Domain"));
}

#[test]
fn test_secret_cookie_is_http_only_and_token_is_not() {
    let attrs = CookieAttributes::for_environment(Environment::Production, 86_400);

    let token_cookie = serialize_cookie(SIGNED_TOKEN_COOKIE, "tok.sig", &attrs);
    let secret_cookie = serialize_cookie(SECRET_COOKIE, "secret", &attrs.http_only());

    assert!(
        !token_cookie.contains("HttpOnly"),
        "client-side script must be able to read the signed token"
    );
    assert!(
        secret_cookie.contains("HttpOnly"),
        "the secret must be unreadable from script"
    );
}

#[test]
fn test_get_cookie_value_from_headers() -> anyhow::Result<()> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        "csrf_token=tok.sig; __Host-csrf_secret=deadbeef".parse()?,
    );

    assert_eq!(
        get_cookie_value(&headers, SIGNED_TOKEN_COOKIE),
        Some("tok.sig".to_owned())
    );
    assert_eq!(
        get_cookie_value(&headers, SECRET_COOKIE),
        Some("deadbeef".to_owned())
    );
    assert_eq!(get_cookie_value(&headers, "missing"), None);
    Ok(())
}
