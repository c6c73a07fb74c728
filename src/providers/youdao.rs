use std::time::Duration;
use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tokio::time::Instant;
use uuid::Uuid;

use super::TranslationBackend;
use crate::errors::ProviderError;

/// Minimum delay between requests; the free tier allows roughly one per second
const RATE_LIMIT_DELAY: Duration = Duration::from_millis(1200);

/// Error codes that signal rate limiting and are worth retrying
const RATE_LIMIT_CODES: [&str; 4] = ["103", "108", "110", "111"];

/// Youdao client using the signed openapi request scheme
#[derive(Debug)]
pub struct Youdao {
    /// HTTP client for API requests
    client: Client,
    /// Application key used in the signature
    app_key: String,
    /// Application secret used in the signature
    app_secret: String,
    /// API endpoint URL
    endpoint: String,
    /// Time of the last request, shared across all workers.
    /// The API enforces a global rate limit, so access is serialized here
    /// rather than tracked per task.
    last_request: Arc<Mutex<Option<Instant>>>,
}

/// Youdao translate response
#[derive(Debug, Deserialize)]
struct YoudaoResponse {
    /// "0" on success, a decimal error code otherwise
    #[serde(rename = "errorCode", default)]
    error_code: String,
    /// Translations, one per input text
    #[serde(default)]
    translation: Vec<String>,
}

impl Youdao {
    /// Create a new Youdao client
    pub fn new(
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            app_key: app_key.into(),
            app_secret: app_secret.into(),
            endpoint: endpoint.into(),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Wait until the global inter-request delay has elapsed, then claim the
    /// next slot. The lock is held across the sleep so concurrent workers
    /// queue up instead of racing for the same slot.
    async fn wait_for_rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(at) = *last {
            let elapsed = at.elapsed();
            if elapsed < RATE_LIMIT_DELAY {
                tokio::time::sleep(RATE_LIMIT_DELAY - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn request_once(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        self.wait_for_rate_limit().await;

        let salt = Uuid::new_v4().to_string();
        let curtime = chrono::Utc::now().timestamp().to_string();
        let sign = sign_request(&self.app_key, text, &salt, &curtime, &self.app_secret);

        let params = [
            ("q", text),
            ("from", source_lang),
            ("to", target_lang),
            ("appKey", self.app_key.as_str()),
            ("salt", salt.as_str()),
            ("sign", sign.as_str()),
            ("signType", "v3"),
            ("curtime", curtime.as_str()),
        ];

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Youdao request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let parsed = response
            .json::<YoudaoResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Youdao response: {}", e)))?;

        if parsed.error_code != "0" {
            let message = format!(
                "{} ({})",
                decode_error(&parsed.error_code),
                parsed.error_code
            );
            if RATE_LIMIT_CODES.contains(&parsed.error_code.as_str()) {
                return Err(ProviderError::RateLimitExceeded(message));
            }
            let status_code = parsed.error_code.parse::<u16>().unwrap_or(0);
            return Err(ProviderError::ApiError {
                status_code,
                message,
            });
        }

        parsed
            .translation
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ParseError("Youdao returned no translations".to_string()))
    }
}

#[async_trait]
impl TranslationBackend for Youdao {
    /// One signed request per call; retry policy lives in the client adapter
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        self.request_once(text, source_lang, target_lang).await
    }

    fn name(&self) -> &'static str {
        "youdao"
    }
}

/// Compute the v3 request signature.
///
/// The signature hashes the truncated text, never the full payload; the full
/// text still travels as the `q` parameter.
pub fn sign_request(app_key: &str, text: &str, salt: &str, curtime: &str, app_secret: &str) -> String {
    let input = format!(
        "{}{}{}{}{}",
        app_key,
        truncate_for_sign(text),
        salt,
        curtime,
        app_secret
    );
    let digest = Sha256::digest(input.as_bytes());
    format!("{:x}", digest)
}

/// Bounded-length representation of a text for signature input: texts over
/// 20 characters keep the first 10 and last 10 characters with the total
/// character count in between.
pub fn truncate_for_sign(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 20 {
        return text.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 10..].iter().collect();
    format!("{}{}{}", head, chars.len(), tail)
}

/// Human-readable message for a Youdao error code
pub fn decode_error(code: &str) -> &'static str {
    match code {
        "101" => "missing required parameter",
        "102" => "unsupported language",
        "103" => "text too long",
        "104" => "unsupported API type",
        "105" => "unsupported signature type",
        "106" => "unsupported response type",
        "107" => "unsupported transport encryption",
        "108" => "invalid application key",
        "109" => "malformed batchLog",
        "110" => "no valid service instance",
        "111" => "invalid developer account",
        "201" => "decryption failed",
        "202" => "signature check failed",
        "203" => "IP address not in allow list",
        "301" => "dictionary lookup failed",
        "302" => "translation lookup failed",
        "303" => "server-side exception",
        "401" => "account balance exhausted",
        "411" => "access frequency limited",
        _ => "unknown error",
    }
}
