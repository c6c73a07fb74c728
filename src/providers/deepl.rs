use std::time::Duration;
use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::Deserialize;

use super::TranslationBackend;
use crate::errors::ProviderError;

/// DeepL client for the v2 translate endpoint
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key sent as a DeepL-Auth-Key authorization header
    api_key: String,
    /// API endpoint URL
    endpoint: String,
}

/// One translated text in a DeepL response
#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    /// The translated text
    text: String,
}

/// DeepL translate response
#[derive(Debug, Deserialize)]
struct DeepLResponse {
    /// Translations, one per input text
    translations: Vec<DeepLTranslation>,
}

impl DeepL {
    /// Create a new DeepL client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TranslationBackend for DeepL {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let form = [
            ("text", text),
            ("source_lang", source_lang),
            ("target_lang", target_lang),
            // Placeholders and indentation must survive the round trip
            ("preserve_formatting", "1"),
            ("tag_handling", "xml"),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("DeepL request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthenticationError(error_text),
                // 456 is DeepL's quota-exceeded status
                429 | 456 => ProviderError::RateLimitExceeded(error_text),
                code => ProviderError::ApiError {
                    status_code: code,
                    message: error_text,
                },
            });
        }

        let parsed = response
            .json::<DeepLResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("DeepL response: {}", e)))?;

        parsed
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| ProviderError::ParseError("DeepL returned no translations".to_string()))
    }

    fn name(&self) -> &'static str {
        "deepl"
    }
}
