/*!
 * # tubetrans - YouTube transcript translation
 *
 * A Rust library for fetching YouTube transcripts and translating them
 * through a LibreTranslate-compatible endpoint.
 *
 * ## Features
 *
 * - Resolve YouTube URLs and bare video ids
 * - Fetch captions, trying configured language variants in order
 * - Bounded LRU cache of fetched transcripts
 * - Chunked translation, parallel or sequential, in original order
 * - Preserve terms shielded from translation by placeholders
 * - Bounded retries with fallback to the untranslated chunk
 * - HTTP API and command-line interface
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `transcript`: Video references, caption sources and the transcript cache
 * - `translation`: Chunked translation:
 *   - `translation::core`: Per-chunk translation with retries and fallback
 *   - `translation::batch`: Whole-transcript pipeline
 *   - `translation::masking`: Preserve-term placeholders
 *   - `translation::chunking`: Transcript splitting
 * - `providers`: Translation endpoint clients
 * - `app_controller`: Main application controller
 * - `server`: HTTP API
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod server;
pub mod transcript;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, ProviderError, TranscriptError};
pub use transcript::{extract_video_id, Transcript, TranscriptCache, TranscriptSource};
pub use translation::{BatchTranslator, TranslationService};
