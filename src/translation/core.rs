/*!
 * Core translation service implementation.
 *
 * This module contains the `TranslationService`, which translates a single
 * chunk against a provider with term masking, bounded retries and a
 * fallback to the original text. A chunk translation never fails: once the
 * retry budget is spent the caller gets the untranslated chunk back.
 */

use anyhow::Result;
use log::{debug, error, warn};
use std::fmt;
use std::sync::Arc;

use crate::app_config::TranslationConfig;
use crate::language_utils::AUTO_DETECT;
use crate::providers::libretranslate::LibreTranslate;
use crate::providers::{DetectRequest, Provider, TranslateRequest};

use super::masking;
use super::retry::RetryPolicy;

/// Characters of the transcript sent to language detection
pub const DETECT_SAMPLE_CHARS: usize = 1000;

/// Result of translating one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkTranslation {
    /// Translated text, or the original chunk after a fallback
    pub text: String,

    /// Requests made for this chunk
    pub attempts: u32,

    /// Whether every attempt failed and `text` is the original chunk
    pub fell_back: bool,
}

/// Translation service for chunked transcript translation
#[derive(Clone)]
pub struct TranslationService {
    /// Provider every request goes to
    provider: Arc<dyn Provider>,

    /// Attempts and delays per chunk
    retry: RetryPolicy,

    /// API key attached to requests when non-empty
    api_key: String,
}

impl fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationService")
            .field("provider", &self.provider)
            .field("retry", &self.retry)
            .field("api_key", &if self.api_key.is_empty() { "<none>" } else { "<set>" })
            .finish()
    }
}

impl TranslationService {
    /// Create a service talking to the configured LibreTranslate endpoint
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let provider = LibreTranslate::from_config(config)?;
        Ok(Self {
            provider: Arc::new(provider),
            retry: config.retry_policy(),
            api_key: config.api_key.clone(),
        })
    }

    /// Create a service over an arbitrary provider
    pub fn with_provider(provider: Arc<dyn Provider>, retry: RetryPolicy) -> Self {
        Self {
            provider,
            retry,
            api_key: String::new(),
        }
    }

    /// Attach an API key to every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Retry policy in effect
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Translate one chunk, returning only the resulting text
    pub async fn translate_chunk(&self, chunk: &str, source: &str, target: &str, terms: &[String]) -> String {
        self.translate_chunk_detailed(chunk, source, target, terms).await.text
    }

    /// Translate one chunk, reporting attempts and whether it fell back
    ///
    /// Terms are masked before the first request and restored in the
    /// translated output. Any failure, including a response that does not
    /// parse, consumes one attempt; the policy delay is slept between
    /// attempts but not after the last one.
    pub async fn translate_chunk_detailed(
        &self,
        chunk: &str,
        source: &str,
        target: &str,
        terms: &[String],
    ) -> ChunkTranslation {
        let (masked, term_map) = masking::mask(chunk, terms);
        let max_attempts = self.retry.max_attempts();

        for attempt in 1..=max_attempts {
            let request = TranslateRequest::new(masked.as_str(), source, target).api_key(&self.api_key);

            match self.provider.translate(request).await {
                Ok(response) => {
                    debug!(
                        "Translated chunk of {} chars on attempt {}/{}",
                        chunk.chars().count(),
                        attempt,
                        max_attempts
                    );
                    return ChunkTranslation {
                        text: masking::unmask(&response.translated_text, &term_map),
                        attempts: attempt,
                        fell_back: false,
                    };
                }
                Err(e) => {
                    error!("Translation error (attempt {}/{}): {}", attempt, max_attempts, e);
                    if let Some(delay) = self.retry.delay_after(attempt) {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        warn!(
            "Giving up on chunk after {} attempts, keeping original text",
            max_attempts
        );
        ChunkTranslation {
            text: chunk.to_string(),
            attempts: max_attempts,
            fell_back: true,
        }
    }

    /// Detect the language of `text` from its first characters
    ///
    /// Returns "auto" when detection fails or reports nothing.
    pub async fn detect_language(&self, text: &str) -> String {
        let sample: String = text.chars().take(DETECT_SAMPLE_CHARS).collect();
        let request = DetectRequest {
            q: sample,
            api_key: (!self.api_key.is_empty()).then(|| self.api_key.clone()),
        };

        match self.provider.detect(request).await {
            Ok(candidates) => match candidates.into_iter().next() {
                Some(best) if !best.language.trim().is_empty() => best.language,
                _ => {
                    warn!("Language detection returned no candidates");
                    AUTO_DETECT.to_string()
                }
            },
            Err(e) => {
                warn!("Language detection failed: {}", e);
                AUTO_DETECT.to_string()
            }
        }
    }

    /// Test the connection to the provider
    pub async fn test_connection(&self) -> Result<()> {
        self.provider.test_connection().await?;
        Ok(())
    }
}
