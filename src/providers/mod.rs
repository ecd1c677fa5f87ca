/*!
 * Provider implementations for machine translation services.
 *
 * This module contains client implementations for translation backends:
 * - LibreTranslate: self-hosted or public LibreTranslate-compatible endpoint
 * - Mock: scripted provider used by tests and benchmarks
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Body of a translate call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslateRequest {
    /// Text to translate
    pub q: String,

    /// Source language code, or "auto"
    pub source: String,

    /// Target language code
    pub target: String,

    /// API key for keyed deployments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl TranslateRequest {
    /// Create an unkeyed request
    pub fn new(q: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            source: source.into(),
            target: target.into(),
            api_key: None,
        }
    }

    /// Attach an API key; empty keys are ignored
    pub fn api_key(mut self, key: &str) -> Self {
        if !key.is_empty() {
            self.api_key = Some(key.to_string());
        }
        self
    }
}

/// Successful translate response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslateResponse {
    /// Translated text
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

/// Body of a detect call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectRequest {
    /// Text sample to classify
    pub q: String,

    /// API key for keyed deployments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// One detection candidate, best first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectedLanguage {
    /// Detected language code
    pub language: String,

    /// Detector confidence, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Common trait for all translation providers
///
/// Implementations perform a single request per call. Retrying and fallback
/// belong to the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate one piece of text
    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, ProviderError>;

    /// Detect the language of a text sample
    async fn detect(&self, request: DetectRequest) -> Result<Vec<DetectedLanguage>, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod libretranslate;
pub mod mock;
