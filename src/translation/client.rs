/*!
 * Fail-open translation client.
 *
 * Wraps a backend with retries and error accounting. A failure is reported
 * as `None` so the caller keeps its own pre-mask text; the failure itself is
 * only surfaced through counters and logs. A mistranslated line can be fixed
 * by hand; a line destroyed by an error cannot.
 */

use std::sync::Arc;
use std::time::Duration;
use log::{debug, error};

use crate::errors::ProviderError;
use crate::providers::TranslationBackend;
use crate::stats::RunStats;

/// Attempts per text before giving up and falling back to the original
const MAX_ATTEMPTS: u32 = 3;

/// Adapter between the file pipeline and a translation backend
pub struct TranslationClient {
    /// The active backend
    backend: Arc<dyn TranslationBackend>,

    /// Source language code
    source_lang: String,

    /// Target language code
    target_lang: String,

    /// Shared run counters
    stats: Arc<RunStats>,

    /// Delay between retry attempts
    retry_delay: Duration,
}

impl TranslationClient {
    /// Create a client over the given backend
    pub fn new(
        backend: Arc<dyn TranslationBackend>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        stats: Arc<RunStats>,
    ) -> Self {
        Self {
            backend,
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            stats,
            retry_delay: Duration::from_secs(5),
        }
    }

    /// Override the retry delay (tests use zero)
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Name of the active backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Translate a text, reporting failure as `None`.
    ///
    /// Retryable failures are retried up to the attempt limit with a fixed
    /// delay. Exhaustion or a non-retryable failure increments the error
    /// counter exactly once and returns `None`; the caller keeps whatever
    /// text it holds, not the masked payload that was sent here.
    pub async fn translate(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return Some(text.to_string());
        }

        let mut rate_limit_seen = false;

        for attempt in 0..MAX_ATTEMPTS {
            match self
                .backend
                .translate(text, &self.source_lang, &self.target_lang)
                .await
            {
                Ok(translated) => {
                    debug!(
                        "{} translated {} chars -> {} chars",
                        self.backend.name(),
                        text.chars().count(),
                        translated.chars().count()
                    );
                    if rate_limit_seen {
                        RunStats::bump(&self.stats.rate_limited);
                    }
                    return Some(translated);
                }
                Err(e) => {
                    if matches!(e, ProviderError::RateLimitExceeded(_)) {
                        rate_limit_seen = true;
                    }
                    if e.is_retryable() && attempt + 1 < MAX_ATTEMPTS {
                        debug!(
                            "{} attempt {}/{} failed: {}",
                            self.backend.name(),
                            attempt + 1,
                            MAX_ATTEMPTS,
                            e
                        );
                        tokio::time::sleep(self.retry_delay).await;
                        continue;
                    }

                    error!(
                        "{} translation failed, caller keeps original text: {}",
                        self.backend.name(),
                        e
                    );
                    RunStats::bump(&self.stats.api_errors);
                    if rate_limit_seen {
                        RunStats::bump(&self.stats.rate_limited);
                    }
                    return None;
                }
            }
        }

        None
    }
}
