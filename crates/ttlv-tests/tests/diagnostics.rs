//! End-to-end tests for the diagnostics produced by failed decodes.
//!
//! A failure deep inside a message must come out with three things a
//! reader needs to find it: the failing field's name at the front of the
//! message, the path of enclosing structures, and the call site that
//! detected it. These tests check all three on real encoded messages,
//! plus the rendering of [`details`] for hand-built chains.

use ttlv_errors::{
    CodecError, Error, ErrorContext, ResultReason, Tag, details, get_error_context,
    get_result_reason, tag_error, with_result_reason,
};
use ttlv_tests::{encoded, header_offset, symmetric_key};
use ttlv_wire::decode;

fn line_index(text: &str, pred: impl Fn(&str) -> bool) -> usize {
    text.lines()
        .position(pred)
        .unwrap_or_else(|| panic!("no matching line in:\n{text}"))
}

// ── Hand-built chains ─────────────────────────────────────────────────────────

#[test]
fn nested_field_details_are_ordered() {
    let err = tag_error(CodecError::InvalidLen, Tag::new(0x42_000A), &())
        .push_path("Value")
        .push_path("KeyBlock");

    let text = details(Some(&err));
    let message = line_index(&text, |l| l.starts_with("AttributeName: invalid length"));
    let path = line_index(&text, |l| l == "Path: KeyBlock.Value");
    let trace = line_index(&text, |l| l.starts_with("at "));

    assert_eq!(message, 0);
    assert!(message < path, "{text}");
    assert!(path < trace, "{text}");
    assert!(text.contains("diagnostics.rs"), "{text}");
}

#[test]
fn details_of_none_is_empty() {
    assert_eq!(details(None), "");
    assert_eq!(get_error_context(None), None);
    assert_eq!(get_result_reason(None), ResultReason::Unset);
}

#[test]
fn details_without_trace() {
    let err = Error::from(CodecError::NoTag)
        .with_error_context(ErrorContext::new(Tag::UNIQUE_IDENTIFIER).with_path(["RequestPayload"]))
        .with_user_message("the request names no object");

    insta::assert_snapshot!(details(Some(&err)), @r"
    no tag
    User Message: the request names no object
    Tag: UniqueIdentifier
    Path: RequestPayload
    ");
}

#[test]
fn last_result_reason_wins() {
    let inner = with_result_reason(CodecError::InvalidType, ResultReason::InvalidField);
    let outer = with_result_reason(tag_error(inner, Tag::OPERATION, &()), ResultReason::OperationNotSupported);
    assert_eq!(get_result_reason(Some(&outer)), ResultReason::OperationNotSupported);
}

// ── Decoded messages ──────────────────────────────────────────────────────────

#[test]
fn corrupted_key_material_length() {
    let mut bytes = encoded(&symmetric_key());
    let at = header_offset(&bytes, Tag::KEY_MATERIAL).unwrap();
    bytes[at + 4..at + 8].copy_from_slice(&0x100_u32.to_be_bytes());

    let err = decode(&bytes).unwrap_err();
    assert!(err.is(&[CodecError::ValueTruncated]));
    assert_eq!(err.result_reason(), ResultReason::InvalidMessage);

    let ctx = err.error_context().unwrap();
    assert_eq!(ctx.tag, Tag::KEY_MATERIAL);
    assert_eq!(ctx.path, vec!["SymmetricKey", "KeyBlock", "KeyValue"]);

    let text = err.details();
    let message = line_index(&text, |l| l == "KeyMaterial: value truncated");
    let path = line_index(&text, |l| l == "Path: SymmetricKey.KeyBlock.KeyValue");
    let trace = line_index(&text, |l| l.starts_with("at "));
    assert!(message < path && path < trace, "{text}");
    assert!(text.contains("decoder.rs"), "{text}");
}

#[test]
fn unknown_type_byte_in_nested_field() {
    let mut bytes = encoded(&symmetric_key());
    let at = header_offset(&bytes, Tag::CRYPTOGRAPHIC_LENGTH).unwrap();
    bytes[at + 3] = 0x7F;

    let err = decode(&bytes).unwrap_err();
    assert!(err.is(&[CodecError::InvalidType]));
    assert_eq!(err.result_reason(), ResultReason::InvalidField);

    let ctx = err.error_context().unwrap();
    insta::assert_snapshot!(ctx.render(), @r"
    Tag: CryptographicLength
    Type: u8
    Kind: uint
    Path: SymmetricKey.KeyBlock
    ");
}

#[test]
fn debug_output_is_details() {
    let err = decode(&[0x42, 0x00]).unwrap_err();
    assert_eq!(format!("{err:?}"), err.details());
    assert!(format!("{err:?}").starts_with("header truncated\nType: "));
}

#[test]
fn display_is_message_only() {
    let err = decode(&[0x42, 0x00]).unwrap_err();
    assert_eq!(err.to_string(), "header truncated");
}
