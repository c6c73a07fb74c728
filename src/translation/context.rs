/*!
 * Context-tag heuristics.
 *
 * A short bracketed tag prepended to the outgoing text nudges the API toward
 * the right register for game text. The tag is stripped from the result when
 * it survives translation verbatim.
 */

/// All known context tags, used both for tagging and for stripping
const CONTEXT_TAGS: [&str; 6] = [
    "[military event]",
    "[national focus]",
    "[decision]",
    "[military unit]",
    "[national spirit]",
    "[technology]",
];

/// Pick a context tag from keyword heuristics on the raw line.
///
/// Checks run in a fixed order; the first family that matches wins.
pub fn context_hint(line: &str) -> Option<&'static str> {
    let lower = line.to_lowercase();
    let contains_any = |terms: &[&str]| terms.iter().any(|t| lower.contains(t));

    if contains_any(&["event", "option", "desc"]) {
        Some("[military event]")
    } else if lower.contains("focus") {
        Some("[national focus]")
    } else if contains_any(&["decision", "allowed", "effect"]) {
        Some("[decision]")
    } else if contains_any(&["division", "battalion", "army", "navy", "air"]) {
        Some("[military unit]")
    } else if contains_any(&["idea", "trait", "spirit"]) {
        Some("[national spirit]")
    } else if contains_any(&["technology", "research", "doctrine"]) {
        Some("[technology]")
    } else {
        None
    }
}

/// Prefix a text with a context tag
pub fn apply_hint(hint: &str, text: &str) -> String {
    format!("{} {}", hint, text)
}

/// Remove a leading known context tag, when the API echoed it back
pub fn strip_hint(text: &str) -> &str {
    for tag in CONTEXT_TAGS {
        if let Some(rest) = text.strip_prefix(tag) {
            return rest.trim_start();
        }
    }
    text
}
