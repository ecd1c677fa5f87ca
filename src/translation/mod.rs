/*!
 * Transcript translation against a machine translation endpoint.
 *
 * This module is split into several submodules:
 *
 * - `core`: Per-chunk translation with masking, retries and fallback
 * - `batch`: Parallel or sequential translation of a whole transcript
 * - `chunking`: Fixed-width text splitting
 * - `masking`: Preserve-term placeholders and term suggestions
 * - `retry`: Retry schedule
 */

// Re-export main types for easier usage
pub use self::batch::{BatchTranslator, PipelineResult};
pub use self::core::{ChunkTranslation, TranslationService};
pub use self::masking::{mask, suggest_terms, unmask, TermMap};
pub use self::retry::RetryPolicy;

// Submodules
pub mod batch;
pub mod chunking;
pub mod core;
pub mod masking;
pub mod retry;
