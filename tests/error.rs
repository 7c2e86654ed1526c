use std::path::PathBuf;

use serde_json::Value;
use taskboard::error::{exit_codes, Error, ErrorBody};

#[test]
fn exit_code_user_error() {
    for err in [
        Error::InvalidArgument("bad input".to_string()),
        Error::TaskNotFound("abc".to_string()),
        Error::MalformedImport("not an array".to_string()),
        Error::InvalidConfig("bad".to_string()),
    ] {
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR, "{err}");
        assert_eq!(err.kind(), "user_error");
    }
}

#[test]
fn exit_code_operation_failed() {
    let err = Error::Persistence("disk full".to_string());
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
    assert_eq!(err.kind(), "operation_failed");

    let err = Error::LockFailed(PathBuf::from("/tmp/tasks.json.lock"));
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn details_include_task_id() {
    let err = Error::TaskNotFound("01hx".to_string());
    let details = err.details().expect("details");
    assert_eq!(details["id"], Value::String("01hx".to_string()));
}

#[test]
fn hints_point_at_a_next_command() {
    assert_eq!(
        Error::TaskNotFound("01hx".to_string()).hint().as_deref(),
        Some("tb list")
    );
    let lock = Error::LockFailed(PathBuf::from("/tmp/tasks.json.lock")).hint();
    assert!(lock.expect("hint").contains("/tmp/tasks.json.lock"));
    assert!(Error::Persistence("disk full".to_string()).hint().is_none());
}

#[test]
fn error_body_carries_code_kind_and_details() {
    let err = Error::InvalidConfig("bad config".to_string());
    let body = serde_json::to_value(ErrorBody::from(&err)).expect("json");
    assert_eq!(body["code"], exit_codes::USER_ERROR);
    assert_eq!(body["kind"], "user_error");
    assert!(body["message"]
        .as_str()
        .expect("message")
        .contains("Invalid configuration"));
    assert_eq!(body["details"]["message"], "bad config");
}

#[test]
fn error_body_omits_missing_details() {
    let err = Error::Io(std::io::Error::other("boom"));
    let body = serde_json::to_value(ErrorBody::from(&err)).expect("json");
    assert!(body.get("details").is_none());
}
