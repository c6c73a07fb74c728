/*!
 * Tests for the translation backend implementations
 *
 * Network behavior is covered through the mock backends; these tests cover
 * the pure request-building helpers.
 */

use loctrans::providers::youdao::{decode_error, sign_request, truncate_for_sign};

/// Test that short texts are signed whole
#[test]
fn test_truncate_for_sign_withShortText_shouldKeepText() {
    assert_eq!(truncate_for_sign(""), "");
    assert_eq!(truncate_for_sign("short text"), "short text");
    assert_eq!(truncate_for_sign("exactly twenty chars"), "exactly twenty chars");
}

/// Test the head/count/tail form for long texts
#[test]
fn test_truncate_for_sign_withLongText_shouldUseHeadCountTail() {
    let text = "abcdefghijKLMNOPQRSTuvwxyz012345";
    assert_eq!(truncate_for_sign(text), "abcdefghij32wxyz012345");
}

/// Test that truncation counts characters, not bytes
#[test]
fn test_truncate_for_sign_withMultibyteText_shouldCountChars() {
    let text = "一二三四五六七八九十甲乙丙丁戊己庚辛壬癸子丑";
    // 22 chars: first 10, the count, last 10
    assert_eq!(truncate_for_sign(text), "一二三四五六七八九十22丙丁戊己庚辛壬癸子丑");
}

/// Test that the signature is deterministic and hex-shaped
#[test]
fn test_sign_request_shouldBeDeterministicHex() {
    let a = sign_request("key", "hello", "salt", "1700000000", "secret");
    let b = sign_request("key", "hello", "salt", "1700000000", "secret");
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
}

/// Test that any input component changes the signature
#[test]
fn test_sign_request_withDifferentInputs_shouldDiffer() {
    let base = sign_request("key", "hello", "salt", "1700000000", "secret");
    assert_ne!(base, sign_request("key2", "hello", "salt", "1700000000", "secret"));
    assert_ne!(base, sign_request("key", "other", "salt", "1700000000", "secret"));
    assert_ne!(base, sign_request("key", "hello", "salt2", "1700000000", "secret"));
    assert_ne!(base, sign_request("key", "hello", "salt", "1700000001", "secret"));
    assert_ne!(base, sign_request("key", "hello", "salt", "1700000000", "secret2"));
}

/// Test the error code table
#[test]
fn test_decode_error_withKnownCodes_shouldDescribe() {
    assert_eq!(decode_error("108"), "invalid application key");
    assert_eq!(decode_error("401"), "account balance exhausted");
    assert_eq!(decode_error("411"), "access frequency limited");
    assert_eq!(decode_error("999"), "unknown error");
}
