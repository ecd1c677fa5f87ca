/*!
 * Tests for the application controller over mock collaborators
 */

use std::sync::Arc;

use tubetrans::app_config::ExecutionMode;
use tubetrans::errors::AppError;
use tubetrans::providers::mock::MockProvider;
use tubetrans::Controller;

use crate::common::mock_sources::MockTranscriptSource;
use crate::common::{self, test_config};

const VIDEO: &str = "dQw4w9WgXcQ";
const URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

fn source() -> MockTranscriptSource {
    MockTranscriptSource::new(&["en"])
        .with_captions(VIDEO, "en", &["Welcome to Rustacean Station", "today with Ferris"])
        .with_captions("eeeeeeeeeee", "en", &["   ", ""])
}

fn controller(source: MockTranscriptSource, provider: MockProvider) -> Controller {
    common::init_logging();
    Controller::with_components(
        test_config(ExecutionMode::Parallel, 350),
        Arc::new(source),
        Arc::new(provider),
    )
}

#[tokio::test]
async fn test_fetchTranscript_withUrl_shouldReturnTextLanguageAndTerms() {
    let controller = controller(source(), MockProvider::working());

    let fetched = controller.fetch_transcript(URL).await.unwrap();

    assert_eq!(fetched.video_id, VIDEO);
    assert_eq!(fetched.transcript, "Welcome to Rustacean Station today with Ferris");
    assert_eq!(fetched.source_lang, "en");
    assert_eq!(fetched.suggested_terms, vec!["Ferris", "Rustacean", "Station", "Welcome"]);
}

#[tokio::test]
async fn test_fetchTranscript_withFailedDetection_shouldReportAuto() {
    let provider = MockProvider::working().with_detected_language(None);
    let controller = controller(source(), provider);

    let fetched = controller.fetch_transcript(VIDEO).await.unwrap();

    assert_eq!(fetched.source_lang, "auto");
}

#[tokio::test]
async fn test_fetchTranscript_withInvalidUrl_shouldBeInvalidInput() {
    let source = source();
    let controller = controller(source.clone(), MockProvider::working());

    let error = controller.fetch_transcript("https://example.com/video").await.unwrap_err();

    assert!(matches!(error, AppError::InvalidInput(ref m) if m == "Invalid YouTube URL"));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_fetchTranscript_withUnknownVideo_shouldBeNotFound() {
    let controller = controller(source(), MockProvider::working());

    let error = controller.fetch_transcript("zzzzzzzzzzz").await.unwrap_err();

    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_fetchTranscript_withBlankCaptions_shouldBeInvalidInput() {
    let controller = controller(source(), MockProvider::working());

    let error = controller.fetch_transcript("eeeeeeeeeee").await.unwrap_err();

    assert!(error.is_client_error());
}

#[tokio::test]
async fn test_translateTranscript_shouldTranslateAndCountChunks() {
    let controller = controller(source(), MockProvider::working().with_custom_response(common::uppercase));

    let outcome = controller
        .translate_transcript("made by Acme", "en", "fr", &["Acme"])
        .await
        .unwrap();

    assert_eq!(outcome.translated, "MADE BY Acme");
    assert_eq!(outcome.chunks, 1);
    assert_eq!(outcome.fallback_chunks, 0);
    assert!(outcome.processing_time >= 0.0);
}

#[tokio::test]
async fn test_translateTranscript_withPaddedTerms_shouldTrimThem() {
    let controller = controller(source(), MockProvider::working().with_custom_response(common::uppercase));

    let outcome = controller
        .translate_transcript("made by Acme", "en", "fr", &["  Acme ", "", "   "])
        .await
        .unwrap();

    assert_eq!(outcome.translated, "MADE BY Acme");
}

#[tokio::test]
async fn test_translateTranscript_withEmptyText_shouldBeInvalidInput() {
    let provider = MockProvider::working();
    let controller = controller(source(), provider.clone());

    let error = controller
        .translate_transcript::<&str>("  \n ", "en", "fr", &[])
        .await
        .unwrap_err();

    assert!(error.is_client_error());
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_translateTranscript_withBadLanguages_shouldBeInvalidInput() {
    let controller = controller(source(), MockProvider::working());

    let bad_target = controller
        .translate_transcript::<&str>("hello", "en", "e", &[])
        .await
        .unwrap_err();
    let auto_target = controller
        .translate_transcript::<&str>("hello", "en", "auto", &[])
        .await
        .unwrap_err();
    let bad_source = controller
        .translate_transcript::<&str>("hello", "nope", "fr", &[])
        .await
        .unwrap_err();

    assert!(bad_target.is_client_error());
    assert!(auto_target.is_client_error());
    assert!(bad_source.is_client_error());
}

#[tokio::test]
async fn test_translateTranscript_withFailingProvider_shouldFallBackToOriginal() {
    let controller = controller(source(), MockProvider::failing());

    let outcome = controller
        .translate_transcript::<&str>("keep me", "auto", "fr", &[])
        .await
        .unwrap();

    assert_eq!(outcome.translated, "keep me");
    assert_eq!(outcome.fallback_chunks, 1);
}

#[tokio::test]
async fn test_translateVideo_calledTwice_shouldFetchTranscriptOnce() {
    let source = source();
    let controller = controller(source.clone(), MockProvider::working());

    let first = controller.translate_video::<&str>(URL, "es", &[]).await.unwrap();
    let second = controller.translate_video::<&str>(VIDEO, "es", &[]).await.unwrap();

    assert_eq!(first.original, "Welcome to Rustacean Station today with Ferris");
    assert_eq!(first.outcome.translated, "[es] Welcome to Rustacean Station today with Ferris");
    assert_eq!(second.outcome.translated, first.outcome.translated);
    assert_eq!(source.calls(), 1);
    assert_eq!(controller.transcripts().stats().hits, 1);
}

#[tokio::test]
async fn test_translateTranscript_withSurroundingWhitespace_shouldChunkTrimmedText() {
    let provider = MockProvider::working();
    let controller = Controller::with_components(
        test_config(ExecutionMode::Sequential, 3),
        Arc::new(source()),
        Arc::new(provider.clone()),
    );

    let outcome = controller
        .translate_transcript::<&str>("  abc  ", "en", "es", &[])
        .await
        .unwrap();

    assert_eq!(outcome.chunks, 1);
    assert_eq!(outcome.translated, "[es] abc");
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_translateTranscript_withEndpointSpecificCode_shouldPassItThrough() {
    let controller = controller(source(), MockProvider::working());

    let outcome = controller
        .translate_transcript::<&str>("hello world", "auto", "zt", &[])
        .await
        .unwrap();

    assert_eq!(outcome.translated, "[zt] hello world");
}

#[tokio::test]
async fn test_checkTranslationEndpoint_shouldReportReachability() {
    let up = controller(source(), MockProvider::working());
    let down = controller(source(), MockProvider::failing());

    assert!(up.check_translation_endpoint().await);
    assert!(!down.check_translation_endpoint().await);
}
