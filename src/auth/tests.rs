//! Tests for the auth module

use super::*;

fn request() -> reqwest::RequestBuilder {
    reqwest::Client::new().get("https://example.com/api?language=en-US")
}

#[test]
fn test_no_auth() {
    let built = AuthConfig::None.apply(request()).build().unwrap();
    assert!(built.headers().get("Authorization").is_none());
    assert_eq!(built.url().query(), Some("language=en-US"));
    assert!(!AuthConfig::None.is_configured());
}

#[test]
fn test_api_key_query() {
    let auth = AuthConfig::ApiKey {
        location: Location::Query,
        name: "api_key".to_string(),
        value: "secret123".to_string(),
    };

    let built = auth.apply(request()).build().unwrap();
    let query = built.url().query().unwrap();
    assert!(query.contains("language=en-US"));
    assert!(query.contains("api_key=secret123"));
    assert!(auth.is_configured());
}

#[test]
fn test_api_key_header() {
    let auth = AuthConfig::ApiKey {
        location: Location::Header,
        name: "X-API-Key".to_string(),
        value: "test-key-123".to_string(),
    };

    let built = auth.apply(request()).build().unwrap();
    assert_eq!(built.headers().get("X-API-Key").unwrap(), "test-key-123");
}

#[test]
fn test_bearer_auth() {
    let auth = AuthConfig::Bearer {
        token: "my-token".to_string(),
    };

    let built = auth.apply(request()).build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-token"
    );
}

#[test]
fn test_debug_masks_secrets() {
    let auth = AuthConfig::ApiKey {
        location: Location::Query,
        name: "api_key".to_string(),
        value: "secret123".to_string(),
    };
    let printed = format!("{auth:?}");
    assert!(!printed.contains("secret123"));
    assert!(printed.contains("***"));

    let bearer = AuthConfig::Bearer {
        token: "tok".to_string(),
    };
    assert!(!format!("{bearer:?}").contains("tok\""));
}
