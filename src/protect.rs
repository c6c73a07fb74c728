/*!
 * Placeholder codec: masks protected substrings before a text goes to the
 * translation API and restores them afterwards.
 *
 * Masking order is glossary keys, then protected terms, then variable-like
 * patterns. Unmasking reverses that order. Glossary and protected-term
 * matching is whole-word and longest-first; a term that is a substring of a
 * longer word ("Armor" inside "Armored") must never be masked partially.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::glossary::{Glossary, ProtectedTerms};

// @const: Game variables: $VAR$, color codes §H / §name, %VAR%, CAPS_WITH_UNDERSCORE
static VAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\$[A-Za-z0-9_.|]+\$|§[A-Za-z0-9!]|%[A-Za-z0-9_]+%|[A-Z]{3,}_[A-Z0-9_]+)",
    )
    .unwrap()
});

// @const: Any placeholder token produced by this codec
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"__(?:KEY|TERM|VAR)_.+?__").unwrap()
});

/// Ephemeral placeholder-to-original mapping for one mask/unmask round trip
#[derive(Debug, Default, Clone)]
pub struct RecoveryMap {
    /// Placeholder token and the original text it replaced, in mask order
    entries: Vec<(String, String)>,
}

impl RecoveryMap {
    /// Number of masked variables
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no variables were masked
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of masking one text
#[derive(Debug)]
pub struct MaskOutcome {
    /// Text with every protected substring replaced by a placeholder
    pub text: String,

    /// Recovery map for the numeric variable placeholders
    pub recovery: RecoveryMap,

    /// Number of protected-term replacements, for reporting
    pub protected_hits: usize,
}

/// Mask glossary keys, protected terms, and variables in `text`.
pub fn mask(text: &str, glossary: &Glossary, terms: &ProtectedTerms) -> MaskOutcome {
    let mut masked = text.to_string();
    let mut protected_hits = 0;

    // Glossary keys first: restored to their approved translation later.
    // A key inside a `$key$` reference is left for the resolver.
    for key in glossary.keys_by_length() {
        let token = format!("__KEY_{}__", key);
        let (replaced, _) = replace_whole_word(&masked, &key, &token, blocks_key);
        masked = replaced;
    }

    // Protected terms: restored verbatim
    for term in terms.iter() {
        let token = format!("__TERM_{}__", term);
        let (replaced, hits) = replace_whole_word(&masked, term, &token, is_word_char);
        masked = replaced;
        protected_hits += hits;
    }

    // Variables last, numbered in order of appearance
    let mut recovery = RecoveryMap::default();
    let token_spans = token_spans(&masked);
    let mut out = String::with_capacity(masked.len());
    let mut cursor = 0;
    for m in VAR_REGEX.find_iter(&masked) {
        if overlaps(&token_spans, m.start(), m.end()) {
            continue;
        }
        let placeholder = format!("__VAR_{}__", recovery.entries.len());
        out.push_str(&masked[cursor..m.start()]);
        out.push_str(&placeholder);
        recovery
            .entries
            .push((placeholder, m.as_str().to_string()));
        cursor = m.end();
    }
    out.push_str(&masked[cursor..]);

    MaskOutcome {
        text: out,
        recovery,
        protected_hits,
    }
}

/// Restore every placeholder in `text`.
///
/// Variables come back from the recovery map, protected terms verbatim, and
/// glossary keys as the glossary's translated value. After unmasking, no
/// codec token may remain in the text.
pub fn unmask(
    text: &str,
    recovery: &RecoveryMap,
    glossary: &Glossary,
    terms: &ProtectedTerms,
) -> String {
    let mut restored = text.to_string();

    for (placeholder, original) in &recovery.entries {
        restored = restored.replace(placeholder, original);
    }

    for term in terms.iter() {
        let token = format!("__TERM_{}__", term);
        if restored.contains(&token) {
            restored = restored.replace(&token, term);
        }
    }

    for key in glossary.keys_by_length() {
        let token = format!("__KEY_{}__", key);
        if restored.contains(&token) {
            if let Some(translation) = glossary.get(&key) {
                restored = restored.replace(&token, &translation);
            }
        }
    }

    restored
}

/// Codec tokens still present in a text. Non-empty output after unmasking
/// means a placeholder leaked through translation.
pub fn leaked_tokens(text: &str) -> Vec<String> {
    TOKEN_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Variable-like tokens present in a text, for before/after comparison
pub fn variable_tokens(text: &str) -> Vec<String> {
    VAR_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Boundary blocker for glossary keys: `$` counts as a word character so a
/// key inside a `$key$` reference is not masked
fn blocks_key(c: char) -> bool {
    is_word_char(c) || c == '$'
}

/// Replace whole-word occurrences of `term` with `token`.
///
/// A match only counts when `blocker` rejects the characters on both sides,
/// so "Armor" never fires inside "Armored" or inside an already-placed
/// `__TERM_Armored__` token.
fn replace_whole_word(
    text: &str,
    term: &str,
    token: &str,
    blocker: impl Fn(char) -> bool,
) -> (String, usize) {
    if term.is_empty() || !text.contains(term) {
        return (text.to_string(), 0);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut count = 0;

    while let Some(pos) = rest.find(term) {
        let before_ok = rest[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !blocker(c));
        let after_ok = rest[pos + term.len()..]
            .chars()
            .next()
            .map_or(true, |c| !blocker(c));

        out.push_str(&rest[..pos]);
        if before_ok && after_ok {
            out.push_str(token);
            count += 1;
        } else {
            out.push_str(term);
        }
        rest = &rest[pos + term.len()..];
    }
    out.push_str(rest);

    (out, count)
}

fn token_spans(text: &str) -> Vec<(usize, usize)> {
    TOKEN_REGEX
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect()
}

fn overlaps(spans: &[(usize, usize)], start: usize, end: usize) -> bool {
    spans.iter().any(|&(s, e)| start < e && end > s)
}
