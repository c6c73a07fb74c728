/*!
 * Glossary and protected-term handling.
 *
 * The glossary maps an entry key or a game term to its approved translation.
 * It is read once at startup, shared by every worker during a run, extended
 * with each new translation, and persisted at the end of the run. Protected
 * terms are literal strings that must never be sent for translation; they
 * are loaded once and immutable afterwards.
 */

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use anyhow::{Context, Result};
use log::{debug, warn};
use parking_lot::RwLock;

/// Persisted key/term to approved-translation mapping, shared across workers
pub struct Glossary {
    /// Internal storage, guarded for concurrent worker access
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl Glossary {
    /// Create an empty glossary
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Load the glossary from a JSON file, merged over the built-in base
    /// game glossary. User entries win on conflict. A missing file yields
    /// just the base glossary.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let mut entries = base_game_glossary();

        let path = path.as_ref();
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                    Ok(user_entries) => {
                        debug!("Loaded {} glossary entries from {:?}", user_entries.len(), path);
                        entries.extend(user_entries);
                    }
                    Err(e) => warn!("Ignoring malformed glossary file {:?}: {}", path, e),
                },
                Err(e) => warn!("Could not read glossary file {:?}: {}", path, e),
            }
        }

        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Persist the glossary as JSON. Writing is skipped when empty.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let entries = self.entries.read();
        if entries.is_empty() {
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&*entries)
            .context("Failed to serialize glossary")?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write glossary: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Look up the approved translation for a key or term
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    /// Whether the glossary has an entry for the key
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Record a new translation unless the key is already present
    pub fn insert_if_absent(&self, key: &str, translation: &str) {
        let mut entries = self.entries.write();
        entries
            .entry(key.to_string())
            .or_insert_with(|| translation.to_string());
    }

    /// Snapshot of all keys, longest first, for longest-match-first masking
    pub fn keys_by_length(&self) -> Vec<String> {
        let entries = self.entries.read();
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        keys
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the glossary has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for Glossary {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Glossary {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

/// Built-in base glossary of game mechanics terms
fn base_game_glossary() -> HashMap<String, String> {
    [
        ("army_experience", "陆军经验"),
        ("navy_experience", "海军经验"),
        ("air_experience", "空军经验"),
        ("command_power", "指挥点数"),
        ("political_power", "政治点数"),
        ("stability", "稳定度"),
        ("war_support", "战争支持度"),
        ("division_template", "师模板"),
        ("combat_width", "战斗宽度"),
        ("front_line", "前线"),
        ("supply", "补给"),
        ("logistics", "后勤"),
        ("conscription_law", "征兵法案"),
        ("economy_law", "经济法案"),
        ("war_economy", "战时经济"),
        ("blitzkrieg", "闪电战"),
        ("superior_firepower", "优势火力"),
        ("mass_assault", "人海战术"),
        ("battle_plan", "作战计划"),
        ("planning_bonus", "计划加成"),
        ("entrenchment", "战壕"),
        ("breakthrough", "突破"),
        ("armor", "装甲"),
        ("piercing", "穿甲"),
        ("air_superiority", "空中优势"),
        ("close_air_support", "近距离空中支援"),
        ("strategic_bomber", "战略轰炸机"),
        ("nuclear_bomb", "核弹"),
        ("resistance", "抵抗运动"),
        ("compliance", "顺从度"),
        ("collaboration_government", "合作政府"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Immutable set of literal terms exempted from translation
#[derive(Debug, Clone)]
pub struct ProtectedTerms {
    /// Terms sorted longest first so overlapping terms match correctly
    terms: Vec<String>,
}

impl ProtectedTerms {
    /// Build from the built-in defaults only
    pub fn builtin() -> Self {
        Self::from_terms(default_protected_terms())
    }

    /// Build from the built-in defaults merged with an optional user file
    /// containing a JSON list of additional terms
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let mut terms = default_protected_terms();

        let path = path.as_ref();
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                    Ok(user_terms) => {
                        debug!("Loaded {} protected terms from {:?}", user_terms.len(), path);
                        terms.extend(user_terms);
                    }
                    Err(e) => warn!("Ignoring malformed protected-terms file {:?}: {}", path, e),
                },
                Err(e) => warn!("Could not read protected-terms file {:?}: {}", path, e),
            }
        }

        Self::from_terms(terms)
    }

    /// Build from an explicit term list
    pub fn from_terms(terms: Vec<String>) -> Self {
        let mut terms: Vec<String> = terms
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .collect();
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        terms.dedup();
        Self { terms }
    }

    /// Terms in longest-match-first order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|s| s.as_str())
    }

    /// Number of protected terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Built-in proper nouns: factions, mechanics, equipment, people, places
fn default_protected_terms() -> Vec<String> {
    [
        // Factions and alliances
        "Axis", "Allies", "Comintern", "Reich", "Reichskommissariat",
        "Entente", "Central Powers",
        // Military terms
        "Division", "Battalion", "Brigade", "Garrison", "Manpower",
        "Combat Width", "Breakthrough", "Soft Attack", "Hard Attack",
        "Armor", "Piercing", "Air Superiority", "CAS", "Strategic Bombing",
        "Entrenchment", "Attrition", "Mobilization", "Conscription",
        // Game mechanics
        "National Focus", "Doctrine", "War Support", "Compliance",
        "Resistance", "Collaboration", "Dockyard",
        // Equipment
        "Panzer", "Tiger", "Panther", "Sherman", "Spitfire", "Bf 109",
        "IL-2", "Bismarck", "Yamato", "T-34", "KV-1", "IS-2", "P-51",
        // People
        "Hitler", "Stalin", "Churchill", "Roosevelt", "Mussolini",
        "Zhukov", "Rommel", "Patton", "Montgomery", "Eisenhower",
        "De Gaulle", "Tito", "Chiang", "Mao",
        // Places and operations
        "Barbarossa", "Normandy", "Stalingrad", "Berlin", "Moscow",
        "Pearl Harbor", "Midway", "El Alamein", "Dunkirk", "Kursk",
        "Ardennes", "Okinawa", "Iwo Jima", "Warsaw", "Leningrad",
        // Concepts and organizations
        "Blitzkrieg", "Anschluss", "Manhattan Project", "Enigma",
        "Luftwaffe", "Wehrmacht", "Red Army", "Gestapo", "NKVD", "RAF",
        // Country tags
        "GER", "SOV", "USA", "ENG", "FRA", "ITA", "JAP", "POL", "CHI",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
