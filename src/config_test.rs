use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults_when_unset() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.token_path, PathBuf::from(DEFAULT_TOKEN_PATH));
    assert!(cfg.bearer_fallback);
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("AUTH_API_BASE_URL", "https://auth.example.test/"),
        ("AUTH_TOKEN_PATH", "/tmp/tok.json"),
        ("AUTH_BEARER_FALLBACK", "off"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "https://auth.example.test");
    assert_eq!(cfg.token_path, PathBuf::from("/tmp/tok.json"));
    assert!(!cfg.bearer_fallback);
}

#[test]
fn from_lookup_rejects_bad_bool() {
    let err = ClientConfig::from_lookup(lookup_from(&[("AUTH_BEARER_FALLBACK", "maybe")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidBool { var: "AUTH_BEARER_FALLBACK", value: "maybe".to_owned() });
}

#[test]
fn from_lookup_rejects_empty_values() {
    let err = ClientConfig::from_lookup(lookup_from(&[("AUTH_API_BASE_URL", " / ")])).unwrap_err();
    assert_eq!(err, ConfigError::Empty { var: "AUTH_API_BASE_URL" });
    let err = ClientConfig::from_lookup(lookup_from(&[("AUTH_TOKEN_PATH", "   ")])).unwrap_err();
    assert_eq!(err, ConfigError::Empty { var: "AUTH_TOKEN_PATH" });
}

#[test]
fn parse_bool_variants() {
    for val in ["1", "true", "YES", " On "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
    for val in ["0", "false", "No", "OFF"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
    assert_eq!(parse_bool(""), None);
    assert_eq!(parse_bool("maybe"), None);
}
