//! Boundary to an external video-info/transcript provider.
//!
//! Only the pure parts live here: pulling the video id out of a URL, flattening a caption
//! track, and the failure taxonomy a provider reports. Fetching is behind
//! [`TranscriptProvider`].

use std::sync::LazyLock;

use regex::Regex;

static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .unwrap()
});
static CAPTION_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text[^>]*>(.*?)</text>").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Why a transcript could not be produced; `Display` is the message shown to the user.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Invalid YouTube URL format")]
    InvalidUrl,
    #[error("Video not found or unavailable")]
    NotFound,
    #[error("This video requires signing in to view")]
    SignInRequired,
    #[error("No captions are available for this video")]
    NoCaptions,
    #[error("This video is age-restricted")]
    AgeRestricted,
    #[error("Failed to transcribe video: {0}")]
    Provider(String),
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Transcript {
    pub video_id: String,
    pub title: String,
    pub text: String,
}

/// Source of video titles and caption text.
pub trait TranscriptProvider {
    fn fetch(&self, video_id: &str) -> Result<Transcript, TranscriptError>;
}

/// The 11-character id from `watch?v=`, `/embed/`, `/v/`, `/e/` or `youtu.be/` URLs.
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Flatten a timed-text caption document into one line of plain text.
pub fn parse_caption_xml(xml: &str) -> String {
    let parts: Vec<String> = CAPTION_TEXT
        .captures_iter(xml)
        .map(|caps| decode_entities(&caps[1]).trim().to_owned())
        .filter(|t| !t.is_empty())
        .collect();
    WHITESPACE
        .replace_all(&parts.join(" "), " ")
        .trim()
        .to_owned()
}

fn decode_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

/// Resolve `url` to an id and ask `provider` for its transcript.
#[tracing::instrument(skip(provider))]
pub fn transcribe(
    provider: &dyn TranscriptProvider,
    url: &str,
) -> Result<Transcript, TranscriptError> {
    let id = extract_video_id(url.trim()).ok_or(TranscriptError::InvalidUrl)?;
    tracing::debug!(video_id = id, "fetching transcript");
    provider.fetch(id)
}

#[cfg(test)]
#[path = "../tests/unit/transcript.rs"]
mod tests;
