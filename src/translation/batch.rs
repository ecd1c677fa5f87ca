/*!
 * Chunked transcript translation.
 *
 * This module splits a transcript into chunks, translates them either
 * concurrently or one at a time, and reassembles the results in the original
 * chunk order regardless of completion order.
 */

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::{ExecutionMode, TranslationConfig};

use super::chunking;
use super::core::{ChunkTranslation, TranslationService};

/// Separator placed between translated chunks
pub const CHUNK_SEPARATOR: &str = " ";

/// Outcome of translating a whole transcript
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    /// Translated chunks joined in input order
    pub translated: String,

    /// Number of chunks the transcript was split into
    pub chunk_count: usize,

    /// Chunks that kept their original text after exhausting retries
    pub fallback_count: usize,

    /// Wall time spent translating
    pub elapsed: Duration,
}

/// Batch translator for processing transcript chunks
#[derive(Debug, Clone)]
pub struct BatchTranslator {
    /// The translation service to use
    service: Arc<TranslationService>,

    /// Maximum characters per chunk
    chunk_size: usize,

    /// Parallel or sequential dispatch
    mode: ExecutionMode,

    /// Maximum number of chunks in flight in parallel mode
    max_concurrent_requests: usize,
}

impl BatchTranslator {
    /// Create a batch translator from the translation configuration
    pub fn new(service: Arc<TranslationService>, config: &TranslationConfig) -> Self {
        Self::with_settings(
            service,
            config.chunk_size,
            config.execution_mode,
            config.effective_concurrency(),
        )
    }

    /// Create a batch translator with explicit settings
    pub fn with_settings(
        service: Arc<TranslationService>,
        chunk_size: usize,
        mode: ExecutionMode,
        max_concurrent_requests: usize,
    ) -> Self {
        Self {
            service,
            chunk_size: chunk_size.max(1),
            mode,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    /// Dispatch mode in effect
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Translate a whole transcript
    pub async fn translate(&self, text: &str, source: &str, target: &str, terms: &[String]) -> PipelineResult {
        self.translate_with_progress(text, source, target, terms, |_, _| {}).await
    }

    /// Translate a whole transcript, reporting `(done, total)` after each chunk
    pub async fn translate_with_progress(
        &self,
        text: &str,
        source: &str,
        target: &str,
        terms: &[String],
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> PipelineResult {
        let start_time = Instant::now();
        let chunks = chunking::split(text, self.chunk_size);
        let total_chunks = chunks.len();

        info!(
            "Translating {} chunks ({} mode, {} -> {})",
            total_chunks, self.mode, source, target
        );

        let results = match self.mode {
            ExecutionMode::Parallel => {
                self.translate_parallel(&chunks, source, target, terms, progress_callback)
                    .await
            }
            ExecutionMode::Sequential => {
                self.translate_sequential(&chunks, source, target, terms, progress_callback)
                    .await
            }
        };

        let fallback_count = results.iter().filter(|r| r.fell_back).count();
        if fallback_count > 0 {
            warn!(
                "{} of {} chunks kept their original text",
                fallback_count, total_chunks
            );
        }

        let translated = results
            .into_iter()
            .map(|r| r.text)
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR);

        let elapsed = start_time.elapsed();
        debug!("Translated {} chunks in {:?}", total_chunks, elapsed);

        PipelineResult {
            translated,
            chunk_count: total_chunks,
            fallback_count,
            elapsed,
        }
    }

    async fn translate_parallel(
        &self,
        chunks: &[&str],
        source: &str,
        target: &str,
        terms: &[String],
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Vec<ChunkTranslation> {
        let total_chunks = chunks.len();
        let processed_chunks = Arc::new(AtomicUsize::new(0));

        // Tasks own their inputs so the stream holds no borrows of the caller
        let service = Arc::clone(&self.service);
        let source: Arc<str> = Arc::from(source);
        let target: Arc<str> = Arc::from(target);
        let terms: Arc<[String]> = Arc::from(terms);
        let tasks: Vec<(usize, String)> = chunks.iter().map(|c| c.to_string()).enumerate().collect();

        let completed = stream::iter(tasks)
            .map(move |(chunk_index, chunk)| {
                let service = Arc::clone(&service);
                let source = Arc::clone(&source);
                let target = Arc::clone(&target);
                let terms = Arc::clone(&terms);
                let processed_chunks = Arc::clone(&processed_chunks);
                let progress_callback = progress_callback.clone();

                async move {
                    let result = service
                        .translate_chunk_detailed(&chunk, &source, &target, &terms)
                        .await;

                    let current = processed_chunks.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total_chunks);

                    (chunk_index, result)
                }
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect::<Vec<_>>()
            .await;

        // Completion order is arbitrary; each result goes back into its chunk's slot
        let mut slots: Vec<Option<ChunkTranslation>> = (0..total_chunks).map(|_| None).collect();
        for (chunk_index, result) in completed {
            slots[chunk_index] = Some(result);
        }
        slots.into_iter().flatten().collect()
    }

    async fn translate_sequential(
        &self,
        chunks: &[&str],
        source: &str,
        target: &str,
        terms: &[String],
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Vec<ChunkTranslation> {
        let total_chunks = chunks.len();
        let mut results = Vec::with_capacity(total_chunks);

        for (chunk_index, chunk) in chunks.iter().enumerate() {
            results.push(
                self.service
                    .translate_chunk_detailed(chunk, source, target, terms)
                    .await,
            );
            progress_callback(chunk_index + 1, total_chunks);
        }

        results
    }
}
