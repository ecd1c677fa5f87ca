/*!
 * Transcript acquisition.
 *
 * - `youtube`: video reference parsing and the YouTube caption source
 * - `cache`: bounded LRU memoization of fetched transcripts
 *
 * A transcript is the ordered caption text of one video, flattened into a
 * single string. Blank caption entries are dropped and the rest are joined
 * with one space.
 */

use async_trait::async_trait;
use log::warn;
use std::fmt::Debug;

use crate::errors::TranscriptError;

pub mod cache;
pub mod youtube;

pub use self::cache::{CacheStats, TranscriptCache};
pub use self::youtube::{extract_video_id, YouTubeTranscripts};

/// One caption line as delivered by the source
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionEntry {
    /// Caption text
    pub text: String,

    /// Start offset in seconds
    pub start: f64,

    /// Display duration in seconds
    pub duration: f64,
}

impl CaptionEntry {
    /// Caption without timing information
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: 0.0,
            duration: 0.0,
        }
    }
}

/// A video's transcript, flattened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// 11-character YouTube video id
    pub video_id: String,

    /// Language code of the caption variant the text came from
    pub language: String,

    /// Caption texts joined by single spaces
    pub text: String,
}

impl Transcript {
    /// Build a transcript from raw caption entries
    pub fn from_entries(video_id: impl Into<String>, language: impl Into<String>, entries: &[CaptionEntry]) -> Self {
        Self {
            video_id: video_id.into(),
            language: language.into(),
            text: join_entries(entries),
        }
    }

    /// Whether the transcript carries no text
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Join non-blank caption texts with single spaces
pub fn join_entries(entries: &[CaptionEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Order caption languages for fetching
///
/// Preferred languages that exist come first, in preference order, followed
/// by every other available language in the order the source listed them.
/// Matching ignores ASCII case; duplicates are dropped.
pub fn order_languages(preferred: &[String], available: &[String]) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::with_capacity(available.len());
    let mut push = |language: &String| {
        if !ordered.iter().any(|l| l.eq_ignore_ascii_case(language)) {
            ordered.push(language.clone());
        }
    };

    for wanted in preferred {
        if let Some(found) = available.iter().find(|l| l.eq_ignore_ascii_case(wanted)) {
            push(found);
        }
    }
    for language in available {
        push(language);
    }

    ordered
}

/// Upstream provider of caption tracks
#[async_trait]
pub trait TranscriptSource: Send + Sync + Debug {
    /// Fetch the caption entries of one language variant
    async fn fetch_variant(&self, video_id: &str, language: &str) -> Result<Vec<CaptionEntry>, TranscriptError>;

    /// Language codes of the caption tracks that exist for a video
    async fn list_languages(&self, video_id: &str) -> Result<Vec<String>, TranscriptError>;

    /// Preferred language variants, tried before any other available track
    fn languages(&self) -> &[String];

    /// Fetch the first available language variant
    ///
    /// Tracks in a preferred language are tried first, then any other track
    /// the video has. If the listing fails upstream, only the preferred
    /// languages are tried. Returns immediately when captions are disabled or
    /// the video has no tracks; any other per-variant failure is logged and
    /// the next variant is tried.
    async fn fetch(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        let candidates = match self.list_languages(video_id).await {
            Ok(available) => order_languages(self.languages(), &available),
            Err(e @ (TranscriptError::TranscriptsDisabled(_) | TranscriptError::NoTranscriptFound(_))) => {
                return Err(e);
            }
            Err(e) => {
                warn!("Could not list caption tracks for {}: {}", video_id, e);
                self.languages().to_vec()
            }
        };

        for language in &candidates {
            match self.fetch_variant(video_id, language).await {
                Ok(entries) => return Ok(Transcript::from_entries(video_id, language.as_str(), &entries)),
                Err(e @ TranscriptError::TranscriptsDisabled(_)) => return Err(e),
                Err(e) => warn!("Transcript variant '{}' unavailable for {}: {}", language, video_id, e),
            }
        }

        Err(TranscriptError::NoTranscriptFound(video_id.to_string()))
    }
}
