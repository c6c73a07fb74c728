use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;

// @module: Localization line parsing and repair

// @const: Translatable entry, e.g. `my_key:0 "Some text"`
static ENTRY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\s*)([^\s:]+?)(?::(\d+))?\s+"(.*)"\s*$"#).unwrap()
});

// @const: Key token at the start of a line
static KEY_EXTRACT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([^\s:]+)").unwrap()
});

// @const: Entry missing its numeric version marker
static MISSING_VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\s*)([A-Za-z0-9_.]+):?\s+"(.*)"\s*$"#).unwrap()
});

// @const: Entry with a version marker but an unquoted value
static MISSING_QUOTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)([A-Za-z0-9_.]+):(\d+)\s+(\S.*)$").unwrap()
});

/// A single translatable localization entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocEntry {
    /// Leading whitespace, preserved on re-serialization
    pub indent: String,

    /// Entry key, unique within a file
    pub key: String,

    /// Numeric version marker (the `:0` suffix)
    pub version: u32,

    /// Quoted value without the surrounding quotes
    pub value: String,
}

impl LocEntry {
    /// Replace the value, keeping key/version/indent intact
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        LocEntry {
            indent: self.indent.clone(),
            key: self.key.clone(),
            version: self.version,
            value: value.into(),
        }
    }
}

impl fmt::Display for LocEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}:{} \"{}\"", self.indent, self.key, self.version, self.value)
    }
}

/// A classified line of a localization file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocLine {
    /// Comment line (first non-whitespace character is `#`)
    Comment(String),

    /// Structural line: language tags, braces, blank lines, anything unparseable
    Structural(String),

    /// Translatable key/value entry
    Entry(LocEntry),
}

impl LocLine {
    /// Classify a raw line into its tagged variant
    pub fn classify(line: &str) -> Self {
        if line.trim_start().starts_with('#') {
            return LocLine::Comment(line.to_string());
        }

        if let Some(caps) = ENTRY_REGEX.captures(line) {
            let version = caps
                .get(3)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(0);
            return LocLine::Entry(LocEntry {
                indent: caps[1].to_string(),
                key: caps[2].to_string(),
                version,
                value: caps[4].to_string(),
            });
        }

        LocLine::Structural(line.to_string())
    }

    /// Whether the line carries translatable text
    pub fn is_translatable(&self) -> bool {
        matches!(self, LocLine::Entry(_))
    }

    /// Raw textual form of the line
    pub fn raw(&self) -> String {
        match self {
            LocLine::Comment(s) | LocLine::Structural(s) => s.clone(),
            LocLine::Entry(e) => e.to_string(),
        }
    }
}

/// Extract the key token from a raw line, if any
pub fn extract_key(line: &str) -> Option<String> {
    KEY_EXTRACT_REGEX
        .captures(line)
        .map(|caps| caps[1].to_string())
}

/// Repair common format defects in a raw line.
///
/// Two repairs are attempted: a missing `:0` version marker is inserted
/// before the opening quote, and an unquoted value after the version marker
/// is wrapped in quotes. Returns `Some(fixed)` when a repair was applied.
pub fn repair_line(line: &str) -> Option<String> {
    if line.trim_start().starts_with('#') {
        return None;
    }

    // Already well-formed with a version marker
    if let Some(caps) = ENTRY_REGEX.captures(line) {
        if caps.get(3).is_some() {
            return None;
        }
    }

    if let Some(caps) = MISSING_VERSION_REGEX.captures(line) {
        return Some(format!("{}{}:0 \"{}\"", &caps[1], &caps[2], &caps[3]));
    }

    if !line.contains('"') {
        if let Some(caps) = MISSING_QUOTE_REGEX.captures(line) {
            return Some(format!(
                "{}{}:{} \"{}\"",
                &caps[1],
                &caps[2],
                &caps[3],
                caps[4].trim_end()
            ));
        }
    }

    None
}

/// Priority for a filename or an entry key; lower means translated earlier
/// so that later entries can reference it. Unknown names get the default.
pub fn priority_for(name: &str) -> i32 {
    match name {
        "l_english.yml" => 0,
        "focuses.yml" => 10,
        "events.yml" => 20,
        "ideas.yml" => 30,
        "decisions.yml" => 40,
        "l_simp_chinese.yml" => 100,
        _ => DEFAULT_PRIORITY,
    }
}

/// Priority assigned when a name has no entry in the table
pub const DEFAULT_PRIORITY: i32 = 50;
