/*!
 * Tests for the parallel and sequential translation pipelines
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tubetrans::app_config::ExecutionMode;
use tubetrans::errors::ProviderError;
use tubetrans::providers::mock::MockProvider;
use tubetrans::providers::{DetectRequest, DetectedLanguage, Provider, TranslateRequest, TranslateResponse};
use tubetrans::translation::{BatchTranslator, RetryPolicy, TranslationService};

use crate::common::{self, service_with};

const TRANSCRIPT: &str = "Rust gives you memory safety without a garbage collector. \
    Tokio schedules tasks across worker threads. Acme Corp ships both to production.";

fn translator(provider: MockProvider, mode: ExecutionMode, chunk_size: usize) -> BatchTranslator {
    BatchTranslator::with_settings(Arc::new(service_with(provider, 2)), chunk_size, mode, 4)
}

#[tokio::test]
async fn test_parallelAndSequential_withDeterministicProvider_shouldMatch() {
    let terms = vec!["Acme Corp".to_string()];
    let provider = MockProvider::working().with_custom_response(common::reverse_and_lowercase);

    let parallel = translator(provider.clone(), ExecutionMode::Parallel, 17)
        .translate(TRANSCRIPT, "en", "es", &terms)
        .await;
    let sequential = translator(provider, ExecutionMode::Sequential, 17)
        .translate(TRANSCRIPT, "en", "es", &terms)
        .await;

    assert_eq!(parallel.translated, sequential.translated);
    assert_eq!(parallel.chunk_count, sequential.chunk_count);
    assert_eq!(parallel.chunk_count, TRANSCRIPT.chars().count().div_ceil(17));
}

/// Answers later chunks sooner and records the order answers were sent
#[derive(Debug, Default)]
struct ReversingLatencyProvider {
    finished: Mutex<Vec<String>>,
}

#[async_trait]
impl Provider for ReversingLatencyProvider {
    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, ProviderError> {
        let delay_ms = match request.q.as_str() {
            "a" => 100,
            "b" => 80,
            "c" => 60,
            _ => 40,
        };
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        self.finished.lock().push(request.q.clone());

        Ok(TranslateResponse {
            translated_text: request.q.repeat(2).to_uppercase(),
        })
    }

    async fn detect(&self, _request: DetectRequest) -> Result<Vec<DetectedLanguage>, ProviderError> {
        Ok(Vec::new())
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_translate_inParallel_whenLaterChunksFinishFirst_shouldKeepInputOrder() {
    let provider = Arc::new(ReversingLatencyProvider::default());
    let service = TranslationService::with_provider(provider.clone(), RetryPolicy::new(1, Duration::ZERO));
    let translator = BatchTranslator::with_settings(Arc::new(service), 1, ExecutionMode::Parallel, 4);

    let result = translator.translate("abcd", "en", "fr", &[]).await;

    assert_eq!(*provider.finished.lock(), vec!["d", "c", "b", "a"]);
    assert_eq!(result.translated, "AA BB CC DD");
}

#[tokio::test]
async fn test_translate_inSpawnedTask_shouldRunParallelPipeline() {
    let translator = translator(MockProvider::working(), ExecutionMode::Parallel, 2);
    let terms = vec!["ab".to_string()];

    let handle = tokio::spawn(async move { translator.translate("abcdef", "en", "fr", &terms).await });
    let result = handle.await.unwrap();

    assert_eq!(result.translated, "[fr] ab [fr] cd [fr] ef");
}

#[tokio::test]
async fn test_translate_inParallel_shouldKeepChunkOrder() {
    let provider = MockProvider::slow(5);
    let result = translator(provider, ExecutionMode::Parallel, 3)
        .translate("aaabbbcccdddeee", "en", "fr", &[])
        .await;

    assert_eq!(result.translated, "[fr] aaa [fr] bbb [fr] ccc [fr] ddd [fr] eee");
}

#[tokio::test]
async fn test_translate_withEmptyText_shouldMakeNoRequests() {
    let provider = MockProvider::working();
    let result = translator(provider.clone(), ExecutionMode::Parallel, 10)
        .translate("", "en", "fr", &[])
        .await;

    assert_eq!(result.translated, "");
    assert_eq!(result.chunk_count, 0);
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_translate_withFailingProvider_shouldJoinOriginalChunks() {
    let provider = MockProvider::failing();
    let result = translator(provider.clone(), ExecutionMode::Sequential, 3)
        .translate("abcdefgh", "en", "fr", &[])
        .await;

    assert_eq!(result.translated, "abc def gh");
    assert_eq!(result.fallback_count, 3);
    assert_eq!(provider.request_count(), 6);
}

#[tokio::test]
async fn test_translateWithProgress_shouldReportEveryChunk() {
    let calls = Arc::new(AtomicUsize::new(0));
    let last_total = Arc::new(AtomicUsize::new(0));
    let (calls_cb, total_cb) = (Arc::clone(&calls), Arc::clone(&last_total));

    let result = translator(MockProvider::working(), ExecutionMode::Parallel, 4)
        .translate_with_progress("0123456789", "en", "fr", &[], move |_done, total| {
            calls_cb.fetch_add(1, Ordering::SeqCst);
            total_cb.store(total, Ordering::SeqCst);
        })
        .await;

    assert_eq!(result.chunk_count, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(last_total.load(Ordering::SeqCst), 3);
}
