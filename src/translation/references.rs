/*!
 * Cross-reference resolution.
 *
 * Entry values may embed `$KEY$` references to other entries. After a file
 * is translated, every reference whose key is present in the run-wide
 * translation map is replaced by that entry's translated value. Resolution
 * runs for a bounded number of rounds so transitive references resolve and
 * circular references terminate.
 */

use std::collections::HashMap;
use std::sync::Arc;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;

use crate::localization::{LocLine, extract_key};

/// Maximum substitution rounds; covers references up to three levels deep
pub const MAX_ROUNDS: usize = 3;

// @const: Inline reference token, e.g. `$army_experience$`
static REF_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$([^\s$]+)\$").unwrap()
});

/// Run-wide map from entry key to its translated line, shared by all workers
pub struct GlobalTranslationMap {
    /// Guarded storage; workers insert while other files resolve against it
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl GlobalTranslationMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Record a translated line under its key
    pub fn insert(&self, key: &str, line: &str) {
        self.inner
            .write()
            .insert(key.to_string(), line.to_string());
    }

    /// Record a translated line, extracting the key from the line itself
    pub fn insert_line(&self, line: &str) {
        if let Some(key) = extract_key(line) {
            self.insert(&key, line);
        }
    }

    /// Translated line for a key
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.read().get(key).cloned()
    }

    /// Number of recorded keys
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl Default for GlobalTranslationMap {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for GlobalTranslationMap {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Resolve `$KEY$` references in `content` against the translation map.
///
/// Each round collects the distinct reference tokens present, substitutes
/// those whose key is known, and stops early once a round changes nothing.
/// Unknown references stay in place. Returns the resolved content and the
/// total number of substitutions performed.
pub fn resolve(content: &str, map: &GlobalTranslationMap) -> (String, usize) {
    let mut content = content.to_string();
    let mut total_substitutions = 0;

    for _ in 0..MAX_ROUNDS {
        let keys: Vec<String> = {
            let mut seen: Vec<String> = REF_REGEX
                .captures_iter(&content)
                .map(|caps| caps[1].to_string())
                .collect();
            seen.sort();
            seen.dedup();
            seen
        };

        let mut round_substitutions = 0;
        for key in keys {
            let Some(line) = map.get(&key) else {
                continue;
            };
            let Some(value) = translated_value(&line) else {
                continue;
            };

            let token = format!("${}$", key);
            let occurrences = content.matches(&token).count();
            if occurrences > 0 {
                content = content.replace(&token, &value);
                round_substitutions += occurrences;
            }
        }

        total_substitutions += round_substitutions;
        if round_substitutions == 0 {
            break;
        }
    }

    (content, total_substitutions)
}

/// Quoted value of a recorded translated line, if the line parses as an entry
fn translated_value(line: &str) -> Option<String> {
    match LocLine::classify(line) {
        LocLine::Entry(entry) => Some(entry.value),
        _ => None,
    }
}
