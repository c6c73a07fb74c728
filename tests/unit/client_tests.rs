/*!
 * Tests for the fail-open translation client
 */

use std::sync::Arc;
use std::time::Duration;

use loctrans::stats::RunStats;
use loctrans::translation::TranslationClient;

use crate::common::mock_backends::{MockBackend, MockBehavior};

fn client_with(behavior: MockBehavior) -> (TranslationClient, Arc<RunStats>, Arc<MockBackend>) {
    let backend = Arc::new(MockBackend::new(behavior));
    let stats = Arc::new(RunStats::new());
    let client = TranslationClient::new(backend.clone(), "EN", "ZH", stats.clone())
        .with_retry_delay(Duration::from_millis(0));
    (client, stats, backend)
}

/// Test the happy path: backend result is passed through
#[tokio::test]
async fn test_translate_withWorkingBackend_shouldReturnTranslation() {
    let (client, stats, _backend) = client_with(MockBehavior::Wrap);
    let result = client.translate("Hello").await;
    assert_eq!(result, Some(MockBackend::wrap("Hello")));
    assert_eq!(RunStats::get(&stats.api_errors), 0);
}

/// Test fail-open: a hard failure reports None and bumps the error
/// counter exactly once
#[tokio::test]
async fn test_translate_withFailingBackend_shouldReportFailureAndCountOnce() {
    let (client, stats, backend) = client_with(MockBehavior::FailAuth);
    let result = client.translate("Keep me intact").await;
    assert_eq!(result, None);
    assert_eq!(RunStats::get(&stats.api_errors), 1);
    // auth errors are not retryable, so exactly one attempt was made
    assert_eq!(backend.tracker().lock().unwrap().call_count, 1);
}

/// Test that retryable failures are retried up to the attempt limit
#[tokio::test]
async fn test_translate_withRetryableFailure_shouldExhaustAttempts() {
    let (client, stats, backend) = client_with(MockBehavior::FailRequest);
    let result = client.translate("text").await;
    assert_eq!(result, None);
    assert_eq!(RunStats::get(&stats.api_errors), 1);
    assert_eq!(backend.tracker().lock().unwrap().call_count, 3);
}

/// Test recovery on a later attempt
#[tokio::test]
async fn test_translate_withTransientFailure_shouldSucceedOnRetry() {
    let (client, stats, backend) = client_with(MockBehavior::FailThenWrap(2));
    let result = client.translate("text").await;
    assert_eq!(result, Some(MockBackend::wrap("text")));
    assert_eq!(RunStats::get(&stats.api_errors), 0);
    assert_eq!(backend.tracker().lock().unwrap().call_count, 3);
}

/// Test that rate-limit failures are surfaced through the rate counter
#[tokio::test]
async fn test_translate_withRateLimit_shouldCountRateLimitEvent() {
    let (client, stats, _backend) = client_with(MockBehavior::FailRateLimit);
    let result = client.translate("text").await;
    assert_eq!(result, None);
    assert_eq!(RunStats::get(&stats.api_errors), 1);
    assert_eq!(RunStats::get(&stats.rate_limited), 1);
}

/// Test that empty input skips the backend entirely
#[tokio::test]
async fn test_translate_withEmptyText_shouldSkipBackend() {
    let (client, stats, backend) = client_with(MockBehavior::Wrap);
    assert_eq!(client.translate("").await.as_deref(), Some(""));
    assert_eq!(client.translate("   ").await.as_deref(), Some("   "));
    assert_eq!(backend.tracker().lock().unwrap().call_count, 0);
    assert_eq!(RunStats::get(&stats.api_errors), 0);
}
