/*!
 * Directory orchestrator.
 *
 * Walks a mod directory, orders its localization files, fans them out over a
 * bounded worker pool, and produces the end-of-run report. One failed file
 * never stops the run.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use tokio::sync::Semaphore;

use crate::app_config::{BackendKind, Config};
use crate::file_utils::FileManager;
use crate::glossary::{Glossary, ProtectedTerms};
use crate::localization::priority_for;
use crate::pipeline::FilePipeline;
use crate::providers::deepl::DeepL;
use crate::providers::youdao::Youdao;
use crate::providers::TranslationBackend;
use crate::quality::QualityLog;
use crate::stats::RunStats;
use crate::translation::{GlobalTranslationMap, TranslationClient};

/// Application controller owning the shared state of one run
pub struct Controller {
    /// Validated configuration
    config: Config,

    /// Shared glossary
    glossary: Glossary,

    /// Protected-terms list
    terms: ProtectedTerms,

    /// Anomaly collector
    quality: QualityLog,

    /// Shared run counters
    stats: Arc<RunStats>,
}

impl Controller {
    /// Build a controller from a validated configuration, loading the
    /// glossary and protected-terms files it points at
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let glossary = Glossary::load(&config.glossary_path);
        let terms = ProtectedTerms::load(&config.protected_terms_path);

        Ok(Self {
            config,
            glossary,
            terms,
            quality: QualityLog::new(),
            stats: Arc::new(RunStats::new()),
        })
    }

    /// Counters of the current run
    pub fn stats(&self) -> Arc<RunStats> {
        self.stats.clone()
    }

    /// Instantiate the configured backend
    fn build_backend(&self) -> Arc<dyn TranslationBackend> {
        match self.config.backend {
            BackendKind::Deepl => Arc::new(DeepL::new(
                &self.config.deepl.api_key,
                &self.config.deepl.endpoint,
            )),
            BackendKind::Youdao => Arc::new(Youdao::new(
                &self.config.youdao.app_key,
                &self.config.youdao.app_secret,
                &self.config.youdao.endpoint,
            )),
        }
    }

    /// Translate every localization file under `root`.
    ///
    /// Files are ordered by name priority so foundational files land in the
    /// shared translation map before the files that reference them, then
    /// processed by at most `max_workers` concurrent tasks.
    pub async fn run<P: AsRef<Path>>(&self, root: P) -> Result<()> {
        let root = root.as_ref();
        let start_time = Instant::now();

        if !FileManager::dir_exists(root) {
            return Err(anyhow!("Input directory does not exist: {:?}", root));
        }

        let mut files = FileManager::find_localization_files(root)?;
        if files.is_empty() {
            return Err(anyhow!("No localization files found in {:?}", root));
        }

        files.sort_by_key(|path| {
            path.file_name()
                .map(|name| priority_for(&name.to_string_lossy()))
                .unwrap_or(crate::localization::DEFAULT_PRIORITY)
        });

        info!(
            "Translating {} files with {} ({} workers)",
            files.len(),
            self.config.backend.display_name(),
            self.config.max_workers
        );

        let backend = self.build_backend();
        let client = Arc::new(TranslationClient::new(
            backend,
            self.config.source_language.clone(),
            self.config.target_language.clone(),
            self.stats.clone(),
        ));

        let pipeline = FilePipeline::new(
            client,
            self.glossary.clone(),
            self.terms.clone(),
            GlobalTranslationMap::new(),
            self.quality.clone(),
            self.stats.clone(),
        );

        let progress_bar = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Processing files");

        let semaphore = Arc::new(Semaphore::new(self.config.max_workers));
        let mut tasks = Vec::with_capacity(files.len());

        for file in files {
            let pipeline = pipeline.clone();
            let semaphore = semaphore.clone();
            let progress_bar = progress_bar.clone();
            let stats = self.stats.clone();

            tasks.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return 0usize,
                };

                let name = display_name(&file);
                progress_bar.set_message(format!("Processing: {}", name));

                let fixes = match pipeline.process_file(&file).await {
                    Ok(fixes) => fixes,
                    Err(e) => {
                        error!("Error processing file {}: {}", name, e);
                        RunStats::bump(&stats.failed_files);
                        0
                    }
                };

                progress_bar.inc(1);
                fixes
            }));
        }

        let results = join_all(tasks).await;
        let total_fixes: usize = results.into_iter().map(|r| r.unwrap_or(0)).sum();

        progress_bar.finish_with_message("Directory processing complete");

        if let Err(e) = self.glossary.save(&self.config.glossary_path) {
            warn!("Failed to save glossary: {}", e);
        }
        if let Err(e) = self.quality.save(&self.config.quality_log_path) {
            warn!("Failed to save quality log: {}", e);
        }

        let report = self.build_report(total_fixes, start_time.elapsed());
        println!("{}", report);

        Ok(())
    }

    /// Build the end-of-run summary report
    fn build_report(&self, total_fixes: usize, elapsed: std::time::Duration) -> String {
        let processed = RunStats::get(&self.stats.processed_files);
        let failed = RunStats::get(&self.stats.failed_files);
        let translated = RunStats::get(&self.stats.translated_lines);
        let api_errors = RunStats::get(&self.stats.api_errors);
        let rate_limited = RunStats::get(&self.stats.rate_limited);
        let glossary_hits = RunStats::get(&self.stats.glossary_hits);
        let protected = RunStats::get(&self.stats.protected_hits);
        let references = RunStats::get(&self.stats.reference_replacements);

        let (rating, guidance) = if failed == 0 && api_errors == 0 && self.quality.is_empty() {
            ("Perfect".to_string(), "No issues detected.".to_string())
        } else {
            let total_ops = translated.max(1);
            let error_ratio = (api_errors + self.quality.len()) as f64 / total_ops as f64;
            if error_ratio < 0.05 && failed == 0 {
                (
                    "Excellent".to_string(),
                    format!(
                        "Spot-check {} for the few affected lines.",
                        self.config.quality_log_path
                    ),
                )
            } else {
                (
                    format!(
                        "Needs review ({} failed files, {} anomalies)",
                        failed,
                        self.quality.len()
                    ),
                    format!(
                        "Review {} and rerun; untranslated lines are retried automatically.",
                        self.config.quality_log_path
                    ),
                )
            }
        };

        format!(
            "Translation run complete in {:.1}s\n\
             \x20 Files processed:        {}\n\
             \x20 Files failed:           {}\n\
             \x20 Lines translated:       {}\n\
             \x20 Format repairs:         {}\n\
             \x20 Glossary hits:          {}\n\
             \x20 Protected terms hit:    {}\n\
             \x20 References resolved:    {}\n\
             \x20 API errors:             {}\n\
             \x20 Rate-limit events:      {}\n\
             \x20 Quality rating:         {}\n\
             {}",
            elapsed.as_secs_f64(),
            processed,
            failed,
            translated,
            total_fixes,
            glossary_hits,
            protected,
            references,
            api_errors,
            rate_limited,
            rating,
            guidance
        )
    }
}

fn display_name(path: &PathBuf) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
