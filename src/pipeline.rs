/*!
 * Per-file translation pipeline.
 *
 * A file goes through: read, line classification, format repair, priority
 * ordering, glossary lookup, mask/translate/restore per entry, reassembly in
 * original line order, cross-reference resolution, and write-back behind a
 * one-time backup. Failures inside one file never abort the run; the
 * orchestrator catches them and moves on.
 */

use std::path::Path;
use std::sync::Arc;
use anyhow::Result;
use log::{debug, info};

use crate::file_utils::FileManager;
use crate::glossary::{Glossary, ProtectedTerms};
use crate::localization::{priority_for, repair_line, LocEntry, LocLine};
use crate::protect;
use crate::quality::QualityLog;
use crate::stats::RunStats;
use crate::translation::context::{apply_hint, context_hint, strip_hint};
use crate::translation::postprocess;
use crate::translation::references;
use crate::translation::{GlobalTranslationMap, TranslationClient};

/// Pipeline instance shared by all worker tasks of a run
pub struct FilePipeline {
    /// Fail-open translation client
    client: Arc<TranslationClient>,

    /// Shared glossary, consulted before the API and extended after it
    glossary: Glossary,

    /// Literal terms exempt from translation
    terms: ProtectedTerms,

    /// Key to translated line, shared across files for reference resolution
    global_map: GlobalTranslationMap,

    /// Anomaly collector
    quality: QualityLog,

    /// Shared run counters
    stats: Arc<RunStats>,
}

impl FilePipeline {
    /// Create a pipeline over shared run state
    pub fn new(
        client: Arc<TranslationClient>,
        glossary: Glossary,
        terms: ProtectedTerms,
        global_map: GlobalTranslationMap,
        quality: QualityLog,
        stats: Arc<RunStats>,
    ) -> Self {
        Self {
            client,
            glossary,
            terms,
            global_map,
            quality,
            stats,
        }
    }

    /// Process one localization file in place.
    ///
    /// Returns the number of format repairs applied. The backup copy is
    /// created before anything else and never overwritten by later runs.
    pub async fn process_file(&self, path: &Path) -> Result<usize> {
        if FileManager::backup_once(path)? {
            debug!("Backed up {:?}", path);
        }

        let content = FileManager::read_to_string_lossy(path)?;

        let mut fixes = 0;
        let mut lines: Vec<LocLine> = Vec::new();
        for raw in content.split('\n') {
            let repaired = match repair_line(raw) {
                Some(fixed) => {
                    fixes += 1;
                    fixed
                }
                None => raw.to_string(),
            };
            lines.push(LocLine::classify(&repaired));
        }
        RunStats::add(&self.stats.format_fixes, fixes);

        // Entries with a lower priority key are translated first so later
        // entries can reference their translations. The sort is stable, so
        // file order is kept within a priority class.
        let mut order: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_translatable())
            .map(|(i, _)| i)
            .collect();
        order.sort_by_key(|&i| match &lines[i] {
            LocLine::Entry(e) => priority_for(&e.key),
            _ => unreachable!(),
        });

        for i in order {
            let entry = match &lines[i] {
                LocLine::Entry(e) => e.clone(),
                _ => continue,
            };
            let translated = self.translate_entry(&entry).await;
            self.global_map
                .insert(&translated.key, &translated.to_string());
            lines[i] = LocLine::Entry(translated);
        }

        let assembled = lines
            .iter()
            .map(|line| line.raw())
            .collect::<Vec<_>>()
            .join("\n");

        let (resolved, substitutions) = references::resolve(&assembled, &self.global_map);
        RunStats::add(&self.stats.reference_replacements, substitutions);

        FileManager::write_to_file(path, &resolved)?;
        RunStats::bump(&self.stats.processed_files);
        info!("Processed {:?} ({} repairs)", path, fixes);

        Ok(fixes)
    }

    /// Translate one entry's value through the protect/translate/restore
    /// round trip. A glossary hit skips the API entirely.
    async fn translate_entry(&self, entry: &LocEntry) -> LocEntry {
        if let Some(cached) = self.glossary.get(&entry.key) {
            RunStats::bump(&self.stats.glossary_hits);
            return entry.with_value(cached);
        }

        let original_value = entry.value.clone();
        let outcome = protect::mask(&original_value, &self.glossary, &self.terms);
        RunStats::add(&self.stats.protected_hits, outcome.protected_hits);

        let payload = match context_hint(&entry.to_string()) {
            Some(hint) => apply_hint(hint, &outcome.text),
            None => outcome.text.clone(),
        };

        // Fail-open: on failure the entry keeps its pre-mask value; the
        // masked payload must never reach the output or the glossary.
        let Some(translated) = self.client.translate(&payload).await else {
            return entry.clone();
        };
        RunStats::bump(&self.stats.translated_lines);

        let restored = protect::unmask(
            strip_hint(&translated),
            &outcome.recovery,
            &self.glossary,
            &self.terms,
        );
        let restored = postprocess::apply(&restored);

        self.check_quality(&entry.key, &original_value, &restored);

        // A result identical to the input is either a failed request or an
        // untranslatable value; neither belongs in the persisted glossary.
        if restored != original_value {
            self.glossary.insert_if_absent(&entry.key, &restored);
        }

        entry.with_value(restored)
    }

    /// Detect dropped variables and leaked placeholders by comparing the
    /// variable-token sets of the original and restored values.
    fn check_quality(&self, key: &str, original: &str, restored: &str) {
        let leaked = protect::leaked_tokens(restored);
        if !leaked.is_empty() {
            self.quality.record(
                key,
                original,
                restored,
                &format!("placeholder tokens leaked: {}", leaked.join(", ")),
            );
            return;
        }

        let mut before = protect::variable_tokens(original);
        let mut after = protect::variable_tokens(restored);
        before.sort();
        after.sort();
        if before != after {
            self.quality.record(
                key,
                original,
                restored,
                "variable set changed across translation",
            );
        }
    }
}

impl Clone for FilePipeline {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            glossary: self.glossary.clone(),
            terms: self.terms.clone(),
            global_map: self.global_map.clone(),
            quality: self.quality.clone(),
            stats: self.stats.clone(),
        }
    }
}
