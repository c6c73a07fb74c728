/*!
 * Run-wide counters.
 *
 * Workers process files concurrently, so every counter is an atomic; the
 * report reads a consistent-enough snapshot at the end of the run.
 */

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters aggregated across all worker tasks during one run
#[derive(Debug, Default)]
pub struct RunStats {
    /// Files processed to completion
    pub processed_files: AtomicUsize,

    /// Files skipped because their pipeline failed
    pub failed_files: AtomicUsize,

    /// Entries successfully translated through the API
    pub translated_lines: AtomicUsize,

    /// Format repairs applied (missing version markers, missing quotes)
    pub format_fixes: AtomicUsize,

    /// Cross-reference substitutions performed by the resolver
    pub reference_replacements: AtomicUsize,

    /// Protected-term maskings performed by the codec
    pub protected_hits: AtomicUsize,

    /// Glossary cache hits that short-circuited an API call
    pub glossary_hits: AtomicUsize,

    /// Translation requests that failed and fell back to the original text
    pub api_errors: AtomicUsize,

    /// Requests that hit a rate-limit error class
    pub rate_limited: AtomicUsize,
}

impl RunStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to a counter
    pub fn add(counter: &AtomicUsize, n: usize) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    /// Increment a counter by one
    pub fn bump(counter: &AtomicUsize) {
        Self::add(counter, 1);
    }

    /// Read a counter
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::Relaxed)
    }
}
