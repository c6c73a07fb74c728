/*!
 * Backend implementations for remote translation services.
 *
 * This module contains client implementations for the supported translation
 * APIs:
 * - DeepL: bearer-token authenticated REST API
 * - Youdao: signed-request API with a global rate limit
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation backends
///
/// This trait defines the interface every backend must follow, allowing them
/// to be used interchangeably by the translation client.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Translate a single text between the given languages
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `source_lang` - Source language code (e.g. "EN")
    /// * `target_lang` - Target language code (e.g. "ZH")
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError>;

    /// Short backend name for logs and the report
    fn name(&self) -> &'static str;
}

pub mod deepl;
pub mod youdao;
