use log::{debug, info, warn};
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::language_utils;
use crate::providers::libretranslate::LibreTranslate;
use crate::providers::Provider;
use crate::transcript::{extract_video_id, Transcript, TranscriptCache, TranscriptSource, YouTubeTranscripts};
use crate::translation::masking::{normalize_terms, suggest_terms};
use crate::translation::{BatchTranslator, PipelineResult, TranslationService};

/// Transcript plus what the caller needs to pick preserve terms
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedTranscript {
    /// 11-character video id
    pub video_id: String,

    /// Flattened transcript text
    pub transcript: String,

    /// Detected language, or "auto" when detection failed
    pub source_lang: String,

    /// Capitalized words worth preserving
    pub suggested_terms: Vec<String>,
}

/// Outcome of a transcript translation
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOutcome {
    /// Translated text
    pub translated: String,

    /// Wall time in seconds, rounded to two decimals
    pub processing_time: f64,

    /// Number of chunks the text was split into
    pub chunks: usize,

    /// Chunks that kept their original text
    pub fallback_chunks: usize,
}

impl From<PipelineResult> for TranslationOutcome {
    fn from(result: PipelineResult) -> Self {
        Self {
            translated: result.translated,
            processing_time: round_seconds(result.elapsed.as_secs_f64()),
            chunks: result.chunk_count,
            fallback_chunks: result.fallback_count,
        }
    }
}

/// Outcome of fetching and translating a video in one call
#[derive(Debug, Clone, PartialEq)]
pub struct VideoTranslation {
    /// Original transcript
    pub original: String,

    /// Translation result
    pub outcome: TranslationOutcome,
}

/// Round to two decimal places
fn round_seconds(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

/// Main application controller for transcript translation
///
/// Owns the transcript cache and the translation pipeline and is shared by
/// the CLI and the HTTP API.
#[derive(Debug)]
pub struct Controller {
    /// App configuration
    config: Config,

    /// Memoized transcript source
    transcripts: TranscriptCache,

    /// Chunk translation service, also used for detection
    service: Arc<TranslationService>,

    /// Whole-transcript pipeline
    batch_translator: BatchTranslator,
}

impl Controller {
    /// Create a controller wired to YouTube and the configured LibreTranslate endpoint
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate().map_err(|e| AppError::Config(e.to_string()))?;

        let source = YouTubeTranscripts::new(config.transcript.languages.clone())?;
        let provider = LibreTranslate::from_config(&config.translation)?;

        Ok(Self::with_components(config, Arc::new(source), Arc::new(provider)))
    }

    /// Create a controller over explicit collaborators
    pub fn with_components(
        config: Config,
        source: Arc<dyn TranscriptSource>,
        provider: Arc<dyn Provider>,
    ) -> Self {
        let service = Arc::new(
            TranslationService::with_provider(provider, config.translation.retry_policy())
                .with_api_key(config.translation.api_key.clone()),
        );
        let batch_translator = BatchTranslator::new(Arc::clone(&service), &config.translation);
        let transcripts = TranscriptCache::new(source, config.transcript.cache_capacity);

        Self {
            config,
            transcripts,
            service,
            batch_translator,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Transcript cache
    pub fn transcripts(&self) -> &TranscriptCache {
        &self.transcripts
    }

    /// Translation service
    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Check that the translation endpoint answers
    ///
    /// Failures are logged, not raised: chunks still fall back to their
    /// original text when the endpoint stays down.
    pub async fn check_translation_endpoint(&self) -> bool {
        match self.service.test_connection().await {
            Ok(()) => {
                debug!("Translation endpoint {} is reachable", self.config.translation.endpoint);
                true
            }
            Err(e) => {
                warn!(
                    "Translation endpoint {} is not reachable: {}",
                    self.config.translation.endpoint, e
                );
                false
            }
        }
    }

    /// Resolve a video reference and load its transcript through the cache
    pub async fn load_transcript(&self, video_ref: &str) -> Result<Arc<Transcript>, AppError> {
        let video_id = extract_video_id(video_ref)
            .ok_or_else(|| AppError::InvalidInput("Invalid YouTube URL".to_string()))?;

        let transcript = self.transcripts.get(&video_id).await?;
        if transcript.is_empty() {
            return Err(AppError::InvalidInput(format!("Transcript for {} is empty", video_id)));
        }
        Ok(transcript)
    }

    /// Fetch a transcript, detect its language and suggest preserve terms
    pub async fn fetch_transcript(&self, video_ref: &str) -> Result<FetchedTranscript, AppError> {
        let transcript = self.load_transcript(video_ref).await?;
        let source_lang = self.service.detect_language(&transcript.text).await;
        let suggested_terms = suggest_terms(&transcript.text);

        info!(
            "Fetched transcript for {} ({} chars, detected '{}')",
            transcript.video_id,
            transcript.text.chars().count(),
            source_lang
        );

        Ok(FetchedTranscript {
            video_id: transcript.video_id.clone(),
            transcript: transcript.text.clone(),
            source_lang,
            suggested_terms,
        })
    }

    /// Translate caller-supplied transcript text
    pub async fn translate_transcript<S: AsRef<str>>(
        &self,
        transcript: &str,
        source_lang: &str,
        target_lang: &str,
        preserve_terms: &[S],
    ) -> Result<TranslationOutcome, AppError> {
        self.translate_transcript_with_progress(transcript, source_lang, target_lang, preserve_terms, |_, _| {})
            .await
    }

    /// Translate caller-supplied transcript text, reporting chunk progress
    pub async fn translate_transcript_with_progress<S: AsRef<str>>(
        &self,
        transcript: &str,
        source_lang: &str,
        target_lang: &str,
        preserve_terms: &[S],
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<TranslationOutcome, AppError> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(AppError::InvalidInput("Transcript is empty".to_string()));
        }
        let source_lang = source_lang.trim();
        let target_lang = target_lang.trim();
        language_utils::validate_translation_code(source_lang, true)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        language_utils::validate_translation_code(target_lang, false)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let terms = normalize_terms(preserve_terms);
        debug!("Preserving {} terms", terms.len());

        let result = self
            .batch_translator
            .translate_with_progress(transcript, source_lang, target_lang, &terms, progress_callback)
            .await;

        Ok(result.into())
    }

    /// Fetch a video's transcript and translate it from the configured source language
    pub async fn translate_video<S: AsRef<str>>(
        &self,
        video_ref: &str,
        target_lang: &str,
        preserve_terms: &[S],
    ) -> Result<VideoTranslation, AppError> {
        let transcript = self.load_transcript(video_ref).await?;
        let outcome = self
            .translate_transcript(
                &transcript.text,
                &self.config.translation.source_language,
                target_lang,
                preserve_terms,
            )
            .await?;

        Ok(VideoTranslation {
            original: transcript.text.clone(),
            outcome,
        })
    }
}
