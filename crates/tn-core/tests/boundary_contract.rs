//! Integration tests for the boundary contract through the public API.
//!
//! These walk the scenarios a real startup goes through: the host builds a
//! result, encodes a reply, and the shell decodes it and classifies the
//! outcome.

use tn_core::{
    decode_reply, decode_request, encode_reply, encode_request, FileCheckOutcome,
    FileCheckResult, FileErrorKind, HostReply, ProtocolError, RequestCounter, ShellRequest,
};

/// Encodes a reply as the host would and decodes it as the shell would.
fn across_boundary(result: FileCheckResult) -> FileCheckResult {
    let reply = HostReply::ConfigChecked {
        request_id: 1,
        result,
    };
    let text = encode_reply(&reply).expect("host must be able to encode");
    match decode_reply(&text).expect("shell must be able to decode") {
        HostReply::ConfigChecked { result, .. } => result,
        other => panic!("unexpected reply: {other:?}"),
    }
}

#[test]
fn test_absent_file_arrives_as_absent() {
    let result = across_boundary(FileCheckResult::absent());
    assert_eq!(result.outcome(), FileCheckOutcome::Absent);
}

#[test]
fn test_loaded_file_arrives_with_exact_content() {
    // Content with characters that need JSON escaping.
    let content = "{\n  \"channel\": \"rustlang\",\n  \"notify\": true\n}\t\u{1F980}";
    let result = across_boundary(FileCheckResult::loaded(content));
    assert_eq!(result.outcome(), FileCheckOutcome::Loaded(content));
}

#[test]
fn test_every_error_kind_crosses_the_boundary() {
    for kind in FileErrorKind::ALL {
        let result = across_boundary(FileCheckResult::unreadable(kind, format!("{kind} failure")));
        assert_eq!(
            result.outcome(),
            FileCheckOutcome::Unreadable {
                kind,
                message: &format!("{kind} failure"),
            }
        );
    }
}

#[test]
fn test_request_ids_from_counter_are_echoed_in_request() {
    // Arrange
    let ids = RequestCounter::new();
    let request = ShellRequest::CheckConfig {
        request_id: ids.next(),
        file_name: Some("config.json".to_string()),
    };

    // Act
    let decoded = decode_request(&encode_request(&request).unwrap()).unwrap();

    // Assert
    assert_eq!(decoded.request_id(), 1);
    assert_eq!(decoded, request);
}

#[test]
fn test_loosely_typed_payloads_are_rejected_not_defaulted() {
    let payloads = [
        // exists as a string
        r#"{"type":"ConfigChecked","request_id":1,"result":{"exists":"true","content":"","error":"","errorType":""}}"#,
        // result serialized as a JSON string
        r#"{"type":"ConfigChecked","request_id":1,"result":"{\"exists\":true}"}"#,
        // result missing entirely
        r#"{"type":"ConfigChecked","request_id":1}"#,
        // not JSON
        "exists=true",
    ];

    for payload in payloads {
        assert!(
            matches!(decode_reply(payload), Err(ProtocolError::Malformed(_))),
            "payload must be rejected: {payload}"
        );
    }
}
