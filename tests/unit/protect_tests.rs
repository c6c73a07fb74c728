/*!
 * Tests for the placeholder codec
 */

use loctrans::glossary::{Glossary, ProtectedTerms};
use loctrans::protect::{leaked_tokens, mask, unmask, variable_tokens};

fn empty_setup() -> (Glossary, ProtectedTerms) {
    (Glossary::new(), ProtectedTerms::from_terms(vec![]))
}

/// Test the round-trip law: unmask(mask(text)) == text for variable-only input
#[test]
fn test_roundtrip_withVariables_shouldRestoreOriginal() {
    let (glossary, terms) = empty_setup();
    let samples = [
        "plain text, nothing to mask",
        "Attack $TARGET$ with §Y%bonus%§! now",
        "$A$$B$ back to back",
        "country tag GER_ARMY_GROUP here",
        "",
    ];
    for sample in samples {
        let outcome = mask(sample, &glossary, &terms);
        let restored = unmask(&outcome.text, &outcome.recovery, &glossary, &terms);
        assert_eq!(restored, sample, "round trip failed for {:?}", sample);
    }
}

/// Test that masked variables disappear from the outgoing text
#[test]
fn test_mask_withVariables_shouldRemoveRawVariables() {
    let (glossary, terms) = empty_setup();
    let outcome = mask("Use $VAR$ and %other% here", &glossary, &terms);
    assert!(!outcome.text.contains("$VAR$"));
    assert!(!outcome.text.contains("%other%"));
    assert_eq!(outcome.recovery.len(), 2);
}

/// Test protected terms: masked, counted, restored verbatim
#[test]
fn test_roundtrip_withProtectedTerm_shouldRestoreVerbatim() {
    let glossary = Glossary::new();
    let terms = ProtectedTerms::from_terms(vec!["Bf 109".to_string()]);
    let outcome = mask("Upgrade the Bf 109 fleet", &glossary, &terms);
    assert_eq!(outcome.protected_hits, 1);
    assert!(!outcome.text.contains("Bf 109"));

    let restored = unmask(&outcome.text, &outcome.recovery, &glossary, &terms);
    assert_eq!(restored, "Upgrade the Bf 109 fleet");
}

/// Test that a term never matches inside a longer word
#[test]
fn test_mask_withOverlappingTerms_shouldNotCorruptLongerWord() {
    let glossary = Glossary::new();
    let terms = ProtectedTerms::from_terms(vec![
        "Armored Division".to_string(),
        "Armor".to_string(),
    ]);
    let outcome = mask("Armored Division uses Armor plating", &glossary, &terms);
    assert_eq!(outcome.protected_hits, 2);

    let restored = unmask(&outcome.text, &outcome.recovery, &glossary, &terms);
    assert_eq!(restored, "Armored Division uses Armor plating");
    assert!(leaked_tokens(&restored).is_empty());
}

/// Test that glossary keys unmask to the approved translation
#[test]
fn test_unmask_withGlossaryKey_shouldUseApprovedTranslation() {
    let glossary = Glossary::new();
    glossary.insert_if_absent("army_experience", "陆军经验");
    let terms = ProtectedTerms::from_terms(vec![]);

    let outcome = mask("Gain army_experience now", &glossary, &terms);
    assert!(outcome.text.contains("__KEY_army_experience__"));

    let restored = unmask(&outcome.text, &outcome.recovery, &glossary, &terms);
    assert_eq!(restored, "Gain 陆军经验 now");
}

/// Test color codes and country variables inside them
#[test]
fn test_mask_withColorCodes_shouldMaskEachToken() {
    let (glossary, terms) = empty_setup();
    // color-on, the ALL-CAPS variable, and color-off are three separate masks
    let outcome = mask("§HGER_INVASION_FORCE§!", &glossary, &terms);
    assert_eq!(outcome.recovery.len(), 3);
    let restored = unmask(&outcome.text, &outcome.recovery, &glossary, &terms);
    assert_eq!(restored, "§HGER_INVASION_FORCE§!");
}

/// Test that leaked_tokens spots placeholders surviving a bad translation
#[test]
fn test_leaked_tokens_withSurvivingPlaceholder_shouldReport() {
    assert_eq!(leaked_tokens("clean text"), Vec::<String>::new());
    let leaked = leaked_tokens("text with __VAR_0__ inside");
    assert_eq!(leaked, vec!["__VAR_0__".to_string()]);
}

/// Test that placeholder numbering is stable and ordered
#[test]
fn test_mask_withManyVariables_shouldNumberInOrder() {
    let (glossary, terms) = empty_setup();
    let text = (0..12)
        .map(|i| format!("$V{}$", i))
        .collect::<Vec<_>>()
        .join(" ");
    let outcome = mask(&text, &glossary, &terms);
    assert_eq!(outcome.recovery.len(), 12);
    assert!(outcome.text.contains("__VAR_0__"));
    assert!(outcome.text.contains("__VAR_11__"));

    // __VAR_1__ and __VAR_11__ must not collide during restoration
    let restored = unmask(&outcome.text, &outcome.recovery, &glossary, &terms);
    assert_eq!(restored, text);
}

/// Test that variable_tokens supports before/after comparisons
#[test]
fn test_variable_tokens_withMixedText_shouldListVariables() {
    let tokens = variable_tokens("Give $UNIT$ a %boost% and §R style");
    assert_eq!(tokens, vec!["$UNIT$", "%boost%", "§R"]);
}
