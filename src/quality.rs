/*!
 * Translation quality log.
 *
 * Records anomalies detected after restoration: a variable set that changed
 * across translation, or a placeholder token that leaked into the output.
 * The log is persisted at the end of the run for manual review.
 */

use std::path::Path;
use std::sync::Arc;
use anyhow::{Context, Result};
use chrono::Local;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// One detected translation anomaly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityRecord {
    /// Entry key the anomaly belongs to
    pub key: String,

    /// Original value before translation
    pub original: String,

    /// Value after translation and restoration
    pub translated: String,

    /// What went wrong
    pub issue: String,

    /// When the anomaly was recorded
    pub timestamp: String,
}

/// Shared collector of quality records
pub struct QualityLog {
    /// Guarded record storage; workers append concurrently
    records: Arc<Mutex<Vec<QualityRecord>>>,
}

impl QualityLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append one anomaly record
    pub fn record(&self, key: &str, original: &str, translated: &str, issue: &str) {
        self.records.lock().push(QualityRecord {
            key: key.to_string(),
            original: original.to_string(),
            translated: translated.to_string(),
            issue: issue.to_string(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
    }

    /// Number of recorded anomalies
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether no anomalies were recorded
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Persist all records as JSON. Writing is skipped when empty.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let records = self.records.lock();
        if records.is_empty() {
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&*records)
            .context("Failed to serialize quality log")?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write quality log: {:?}", path.as_ref()))?;
        Ok(())
    }
}

impl Default for QualityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for QualityLog {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}
