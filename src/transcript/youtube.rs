/*!
 * YouTube video references and caption fetching.
 */

use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use url::Url;
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

use crate::errors::TranscriptError;

use super::{CaptionEntry, TranscriptSource};

/// Exact shape of a video id
static VIDEO_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z_-]{11}$").expect("valid video id regex"));

/// Known URL shapes that failed to parse as a URL (missing scheme and so on)
static URL_PATTERN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/shorts/)([0-9A-Za-z_-]{11})")
        .expect("valid youtube url regex")
});

/// Last resort: any 11-character id after `v=` or a slash
static LOOSE_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("valid loose id regex"));

fn is_video_id(candidate: &str) -> bool {
    VIDEO_ID_REGEX.is_match(candidate)
}

fn is_youtube_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == "youtu.be"
        || host == "youtube.com"
        || host.ends_with(".youtube.com")
        || host == "youtube-nocookie.com"
        || host.ends_with(".youtube-nocookie.com")
}

/// Video id from a parsed YouTube URL
fn video_id_from_url(u: &Url) -> Option<String> {
    let host = u.host_str()?;
    if !is_youtube_host(host) {
        return None;
    }

    // youtu.be/<id>
    if host.eq_ignore_ascii_case("youtu.be") {
        let seg = u.path_segments()?.next()?.trim();
        return is_video_id(seg).then(|| seg.to_string());
    }

    // youtube.com/watch?v=<id>
    if u.path().starts_with("/watch") {
        return u
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| is_video_id(v));
    }

    // youtube.com/shorts/<id>, /embed/<id>, /live/<id>
    let mut segs = u.path_segments()?;
    let kind = segs.next().unwrap_or("");
    let id = segs.next().unwrap_or("").trim();
    if matches!(kind, "shorts" | "embed" | "live") && is_video_id(id) {
        return Some(id.to_string());
    }

    None
}

/// Extract the 11-character video id from a URL or a bare id
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if is_video_id(input) {
        return Some(input.to_string());
    }

    if let Ok(u) = Url::parse(input) {
        if let Some(id) = video_id_from_url(&u) {
            return Some(id);
        }
    }

    URL_PATTERN_REGEX
        .captures(input)
        .or_else(|| LOOSE_ID_REGEX.captures(input))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Caption source backed by YouTube's public transcript endpoints
pub struct YouTubeTranscripts {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl fmt::Debug for YouTubeTranscripts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeTranscripts")
            .field("languages", &self.languages)
            .finish_non_exhaustive()
    }
}

impl YouTubeTranscripts {
    /// Create a source that tries `languages` in order
    pub fn new(languages: Vec<String>) -> Result<Self, TranscriptError> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| TranscriptError::SourceFailed {
            video_id: String::new(),
            message: format!("Failed to create transcript client: {}", e),
        })?;
        Ok(Self { api, languages })
    }
}

/// Map an upstream failure onto the transcript error it stands for
fn classify_failure(video_id: &str, error: CouldNotRetrieveTranscript) -> TranscriptError {
    match &error.reason {
        Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled) => {
            TranscriptError::TranscriptsDisabled(video_id.to_string())
        }
        Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. }) => {
            TranscriptError::NoTranscriptFound(video_id.to_string())
        }
        _ => TranscriptError::SourceFailed {
            video_id: video_id.to_string(),
            message: error.to_string(),
        },
    }
}

#[async_trait]
impl TranscriptSource for YouTubeTranscripts {
    async fn fetch_variant(&self, video_id: &str, language: &str) -> Result<Vec<CaptionEntry>, TranscriptError> {
        debug!("Fetching '{}' captions for {}", language, video_id);

        let fetched = self
            .api
            .fetch_transcript(video_id, &[language], false)
            .await
            .map_err(|e| classify_failure(video_id, e))?;

        Ok(fetched
            .snippets
            .into_iter()
            .map(|snippet| CaptionEntry {
                text: snippet.text,
                start: snippet.start,
                duration: snippet.duration,
            })
            .collect())
    }

    async fn list_languages(&self, video_id: &str) -> Result<Vec<String>, TranscriptError> {
        let listed = self
            .api
            .list_transcripts(video_id)
            .await
            .map_err(|e| classify_failure(video_id, e))?;

        // Manually created tracks before generated ones, stable within each group
        let mut tracks: Vec<(bool, String)> = listed
            .transcripts()
            .map(|t| (t.is_generated(), t.language_code().to_string()))
            .collect();
        tracks.sort();
        debug!("{} caption tracks listed for {}", tracks.len(), video_id);

        Ok(tracks.into_iter().map(|(_, code)| code).collect())
    }

    fn languages(&self) -> &[String] {
        &self.languages
    }
}
