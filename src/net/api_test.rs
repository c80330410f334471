use super::*;
use serde_json::json;

#[test]
fn editor_decision_endpoint_formats_expected_paths() {
    assert_eq!(
        editor_decision_endpoint("u123", EditorDecision::Approve),
        "/api/users/editor-requests/u123/approve"
    );
    assert_eq!(
        editor_decision_endpoint("u123", EditorDecision::Reject),
        "/api/users/editor-requests/u123/reject"
    );
}

#[test]
fn editor_decision_endpoint_encodes_user_id() {
    assert_eq!(
        editor_decision_endpoint("a/b c", EditorDecision::Approve),
        "/api/users/editor-requests/a%2Fb%20c/approve"
    );
}

#[test]
fn error_message_from_body_reads_error_key() {
    assert_eq!(error_message_from_body(r#"{"error":"bad credentials"}"#).as_deref(), Some("bad credentials"));
}

#[test]
fn error_message_from_body_ignores_other_shapes() {
    assert_eq!(error_message_from_body(""), None);
    assert_eq!(error_message_from_body("Internal Server Error"), None);
    assert_eq!(error_message_from_body(r#"{"message":"nope"}"#), None);
    assert_eq!(error_message_from_body(r#"{"error":{"code":7}}"#), None);
}

#[test]
fn parse_success_body_handles_empty_json_and_text() {
    assert_eq!(parse_success_body(""), Value::Null);
    assert_eq!(parse_success_body("  \n"), Value::Null);
    assert_eq!(parse_success_body(r#"{"status":"pending"}"#), json!({ "status": "pending" }));
    assert_eq!(parse_success_body("OK"), json!("OK"));
}

#[test]
fn new_trims_trailing_slash() {
    let api = HttpAuthApi::new("http://localhost:5000/").unwrap();
    assert_eq!(api.base_url(), "http://localhost:5000");
    assert_eq!(api.url(ME_ENDPOINT), "http://localhost:5000/api/auth/me");
}

#[test]
fn new_rejects_unparseable_base_url() {
    assert!(matches!(HttpAuthApi::new("not a url"), Err(ApiError::InvalidBaseUrl(_))));
    assert!(matches!(HttpAuthApi::new("mailto:someone@example.com"), Err(ApiError::InvalidBaseUrl(_))));
}

#[test]
fn with_bearer_token_drops_empty_token() {
    let api = HttpAuthApi::new("http://localhost:5000").unwrap().with_bearer_token(Some(String::new()));
    assert!(api.bearer.is_none());
    let api = api.with_bearer_token(Some("tok".to_owned()));
    assert_eq!(api.bearer.as_deref(), Some("tok"));
}
