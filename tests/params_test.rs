use std::collections::HashMap;

use lfmproxy::error::ProxyError;
use lfmproxy::lastfm::Signature;
use lfmproxy::params::*;
use lfmproxy::types::RequestIntent;

// Helper function to build a parameter set from literal pairs
fn params_of(pairs: &[(&str, &str)]) -> ParamSet {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

#[test]
fn test_signature_base_concatenates_sorted_pairs() {
    let params = params_of(&[("token", "abc"), ("method", "auth.getSession")]);

    assert_eq!(
        params.signature_base("s3cr3t"),
        "methodauth.getSessiontokenabcs3cr3t"
    );
}

#[test]
fn test_signature_concrete_vector() {
    let mut params = params_of(&[("method", "auth.getSession"), ("token", "abc")]);
    let signature = params.sign("s3cr3t");

    // md5("methodauth.getSessiontokenabcs3cr3t")
    assert_eq!(signature.as_str(), "6dd49bdf801f8a904a7675eb5e3cc3dd");
    assert_eq!(params.get(API_SIG), Some("6dd49bdf801f8a904a7675eb5e3cc3dd"));
}

#[test]
fn test_signature_is_lowercase_hex() {
    let signature = Signature::compute("anything at all");

    assert_eq!(signature.as_str().len(), Signature::LEN);
    assert!(
        signature
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    );
}

#[test]
fn test_signature_is_deterministic() {
    let params = params_of(&[("method", "track.love"), ("artist", "Cher")]);

    let first = Signature::compute(&params.signature_base("secret"));
    let second = Signature::compute(&params.signature_base("secret"));
    assert_eq!(first, second);

    // A different secret must change the result
    let other = Signature::compute(&params.signature_base("other"));
    assert_ne!(first, other);
}

#[test]
fn test_signature_ignores_insertion_order() {
    let mut forward = ParamSet::new();
    forward.set("artist", "Cher");
    forward.set("method", "track.love");
    forward.set("track", "Believe");
    forward.set("sk", "SESSION");

    let mut backward = ParamSet::new();
    backward.set("sk", "SESSION");
    backward.set("track", "Believe");
    backward.set("method", "track.love");
    backward.set("artist", "Cher");

    assert_eq!(forward.sign("s3cr3t"), backward.sign("s3cr3t"));
}

#[test]
fn test_format_is_excluded_from_signature() {
    let mut without_format = params_of(&[("method", "auth.getSession"), ("token", "abc")]);
    let mut with_format = without_format.clone();
    with_format.set(FORMAT, "json");

    assert_eq!(
        with_format.signature_base("s3cr3t"),
        "methodauth.getSessiontokenabcs3cr3t"
    );
    assert_eq!(without_format.sign("s3cr3t"), with_format.sign("s3cr3t"));

    // format stays in the set itself
    assert_eq!(with_format.get(FORMAT), Some("json"));
}

#[test]
fn test_resigning_ignores_previous_api_sig() {
    let mut params = params_of(&[("method", "auth.getSession"), ("token", "abc")]);

    let first = params.sign("s3cr3t");
    let second = params.sign("s3cr3t");
    assert_eq!(first, second);
}

#[test]
fn test_is_signed_key() {
    assert!(ParamSet::is_signed_key("method"));
    assert!(ParamSet::is_signed_key(API_KEY));
    assert!(!ParamSet::is_signed_key(FORMAT));
    assert!(!ParamSet::is_signed_key(API_SIG));
}

#[test]
fn test_from_query_keeps_values_verbatim() {
    let mut query = HashMap::new();
    query.insert("method".to_string(), "artist.getInfo".to_string());
    query.insert("limit".to_string(), "007".to_string());

    let params = ParamSet::from_query(query);
    assert!(!params.is_empty());
    assert_eq!(params.len(), 2);
    assert_eq!(params.method(), Some("artist.getInfo"));
    assert_eq!(params.get("limit"), Some("007"));
}

#[test]
fn test_from_json_coerces_scalar_values() {
    let body = r#"{"method":"auth.getSession","token":"abc","limit":10,"ratio":1.5,
        "scrobbled":true,"extra":null}"#;
    let params = ParamSet::from_json(body).unwrap();

    assert_eq!(params.get("method"), Some("auth.getSession"));
    assert_eq!(params.get("limit"), Some("10"));
    assert_eq!(params.get("ratio"), Some("1.5"));
    assert_eq!(params.get("scrobbled"), Some("true"));
    assert_eq!(params.get("extra"), Some("null"));
}

#[test]
fn test_from_json_stringifies_nested_values() {
    let body = r#"{"tags":["rock","pop"],"meta":{"a":1}}"#;
    let params = ParamSet::from_json(body).unwrap();

    assert_eq!(params.get("tags"), Some(r#"["rock","pop"]"#));
    assert_eq!(params.get("meta"), Some(r#"{"a":1}"#));
}

#[test]
fn test_coerced_values_enter_signature_as_text() {
    let body = r#"{"method":"auth.getSession","token":"abc","limit":10,"scrobbled":true}"#;
    let mut params = ParamSet::from_json(body).unwrap();

    assert_eq!(
        params.signature_base("s3cr3t"),
        "limit10methodauth.getSessionscrobbledtruetokenabcs3cr3t"
    );
    assert_eq!(
        params.sign("s3cr3t").as_str(),
        "6e44fa5bbe003f1d7211a2810b47473b"
    );
}

#[test]
fn test_from_json_rejects_invalid_json() {
    let result = ParamSet::from_json("{not json");
    assert!(matches!(result, Err(ProxyError::MalformedInput(_))));

    let result = ParamSet::from_json("");
    assert!(matches!(result, Err(ProxyError::MalformedInput(_))));
}

#[test]
fn test_from_json_rejects_non_objects() {
    for body in [r#"["method","track.love"]"#, r#""track.love""#, "42", "null"] {
        let result = ParamSet::from_json(body);
        assert!(
            matches!(result, Err(ProxyError::MalformedInput(_))),
            "body {} should be rejected",
            body
        );
    }
}

#[test]
fn test_to_query_string_percent_encodes_values() {
    let params = params_of(&[("artist", "Simon & Garfunkel"), ("method", "artist.getInfo")]);

    assert_eq!(
        params.to_query_string(),
        "artist=Simon%20%26%20Garfunkel&method=artist.getInfo"
    );
}

#[test]
fn test_to_query_string_encodes_non_ascii() {
    let params = params_of(&[("artist", "Björk")]);
    assert_eq!(params.to_query_string(), "artist=Bj%C3%B6rk");
}

#[test]
fn test_to_form_pairs_contains_every_parameter() {
    let mut params = params_of(&[("method", "auth.getSession"), ("token", "abc")]);
    params.set(API_KEY, "K123");
    params.set(FORMAT, "json");
    params.sign("s3cr3t");

    let pairs = params.to_form_pairs();
    let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["api_key", "api_sig", "format", "method", "token"]);
}

#[test]
fn test_intent_classification() {
    assert_eq!(
        params_of(&[("method", "auth.getSession")]).intent(),
        RequestIntent::Signed
    );
    assert_eq!(
        params_of(&[("method", "track.love")]).intent(),
        RequestIntent::Signed
    );

    for method in ["artist.getInfo", "user.getRecentTracks", "track.unlove", "Track.Love", ""] {
        assert_eq!(
            params_of(&[("method", method)]).intent(),
            RequestIntent::Unsigned,
            "{} must not be signed",
            method
        );
    }

    assert!(ParamSet::new().is_empty());
    assert_eq!(ParamSet::new().intent(), RequestIntent::Unsigned);
}
