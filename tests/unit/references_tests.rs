/*!
 * Tests for cross-reference resolution
 */

use loctrans::translation::references::{resolve, MAX_ROUNDS};
use loctrans::translation::GlobalTranslationMap;

fn map_with(entries: &[(&str, &str)]) -> GlobalTranslationMap {
    let map = GlobalTranslationMap::new();
    for (key, line) in entries {
        map.insert(key, line);
    }
    map
}

/// Test the canonical substitution: `Hello $VAR$` with VAR -> World
#[test]
fn test_resolve_withKnownReference_shouldSubstituteValue() {
    let map = map_with(&[("VAR", " VAR:0 \"World\"")]);
    let (resolved, count) = resolve("greeting:0 \"Hello $VAR$\"", &map);
    assert_eq!(resolved, "greeting:0 \"Hello World\"");
    assert_eq!(count, 1);
}

/// Test that unknown references stay untouched
#[test]
fn test_resolve_withUnknownReference_shouldLeaveTokenInPlace() {
    let map = GlobalTranslationMap::new();
    let input = "greeting:0 \"Hello $UNKNOWN$\"";
    let (resolved, count) = resolve(input, &map);
    assert_eq!(resolved, input);
    assert_eq!(count, 0);
}

/// Test transitive references across rounds: A -> $B$, B -> text
#[test]
fn test_resolve_withTransitiveReference_shouldResolveAcrossRounds() {
    let map = map_with(&[
        ("A", " A:0 \"link $B$\""),
        ("B", " B:0 \"base\""),
    ]);
    let (resolved, count) = resolve("x:0 \"start $A$ end\"", &map);
    assert_eq!(resolved, "x:0 \"start link base end\"");
    assert_eq!(count, 2);
}

/// Test that circular references terminate within the round budget
#[test]
fn test_resolve_withCircularReference_shouldTerminate() {
    let map = map_with(&[
        ("A", " A:0 \"to $B$\""),
        ("B", " B:0 \"to $A$\""),
    ]);
    let (resolved, count) = resolve("x:0 \"begin $A$\"", &map);
    // one substitution per round, bounded by the round budget
    assert!(count <= MAX_ROUNDS + 1);
    assert!(resolved.starts_with("x:0 \"begin to to"));
}

/// Test that resolution is idempotent once everything is substituted
#[test]
fn test_resolve_twice_shouldBeIdempotent() {
    let map = map_with(&[("VAR", " VAR:0 \"World\"")]);
    let (first, _) = resolve("a:0 \"Hi $VAR$\"", &map);
    let (second, count) = resolve(&first, &map);
    assert_eq!(second, first);
    assert_eq!(count, 0);
}

/// Test multiple occurrences of one reference in a single round
#[test]
fn test_resolve_withRepeatedReference_shouldCountEachOccurrence() {
    let map = map_with(&[("V", " V:0 \"x\"")]);
    let (resolved, count) = resolve("a:0 \"$V$ and $V$\"", &map);
    assert_eq!(resolved, "a:0 \"x and x\"");
    assert_eq!(count, 2);
}

/// Test that a map entry whose line does not parse is skipped
#[test]
fn test_resolve_withUnparseableMapLine_shouldSkipKey() {
    let map = map_with(&[("V", "not a parseable line")]);
    let input = "a:0 \"$V$\"";
    let (resolved, count) = resolve(input, &map);
    assert_eq!(resolved, input);
    assert_eq!(count, 0);
}

/// Test insert_line key extraction
#[test]
fn test_insert_line_shouldIndexByExtractedKey() {
    let map = GlobalTranslationMap::new();
    map.insert_line(" my_key:0 \"value\"");
    assert_eq!(map.get("my_key").as_deref(), Some(" my_key:0 \"value\""));
    assert_eq!(map.len(), 1);
}
