/*!
 * Mock backend implementations for testing
 *
 * These mocks implement the TranslationBackend trait so translation plumbing
 * can be tested without external API calls. Each mock records the requests it
 * receives and returns predetermined responses.
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use loctrans::errors::ProviderError;
use loctrans::providers::TranslationBackend;

/// Tracks calls to ensure no actual external requests are made
#[derive(Debug, Default)]
pub struct CallTracker {
    /// Count of mock calls made
    pub call_count: usize,
    /// Texts received, in order
    pub requests: Vec<String>,
}

/// How the mock behaves on each call
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Echo the input back unchanged
    Echo,
    /// Wrap the input so translated text is distinguishable
    Wrap,
    /// Fail every call with a non-retryable error
    FailAuth,
    /// Fail every call with a retryable request error
    FailRequest,
    /// Fail every call with a rate-limit error
    FailRateLimit,
    /// Fail the first N calls with a retryable error, then wrap
    FailThenWrap(u32),
    /// Return a fixed string, dropping whatever placeholders were sent
    Lossy,
}

/// Mock translation backend with scripted behavior
#[derive(Debug)]
pub struct MockBackend {
    behavior: MockBehavior,
    tracker: Arc<Mutex<CallTracker>>,
}

impl MockBackend {
    pub fn new(behavior: MockBehavior) -> Self {
        MockBackend {
            behavior,
            tracker: Arc::new(Mutex::new(CallTracker::default())),
        }
    }

    /// Get the call tracker
    pub fn tracker(&self) -> Arc<Mutex<CallTracker>> {
        self.tracker.clone()
    }

    /// Wrapped form of a translated text, shared with assertions
    pub fn wrap(text: &str) -> String {
        format!("ZH<{}>", text)
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> Result<String, ProviderError> {
        let call_count = {
            let mut tracker = self.tracker.lock().unwrap();
            tracker.call_count += 1;
            tracker.requests.push(text.to_string());
            tracker.call_count
        };

        match self.behavior {
            MockBehavior::Echo => Ok(text.to_string()),
            MockBehavior::Wrap => Ok(Self::wrap(text)),
            MockBehavior::FailAuth => Err(ProviderError::AuthenticationError(
                "mock auth failure".to_string(),
            )),
            MockBehavior::FailRequest => Err(ProviderError::RequestFailed(
                "mock connection failure".to_string(),
            )),
            MockBehavior::FailRateLimit => Err(ProviderError::RateLimitExceeded(
                "mock rate limit".to_string(),
            )),
            MockBehavior::FailThenWrap(failures) => {
                if call_count <= failures as usize {
                    Err(ProviderError::RequestFailed(
                        "mock transient failure".to_string(),
                    ))
                } else {
                    Ok(Self::wrap(text))
                }
            }
            MockBehavior::Lossy => Ok("mangled text".to_string()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
