pub mod config;
pub mod error;
pub mod metadata;
pub mod server;
pub mod summarize;
pub mod youtube;

use serde::Serialize;

pub use error::Error;

/// A single timed caption fragment
#[derive(Debug, Clone, Serialize)]
pub struct Caption {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Video title and thumbnail, as reported by the metadata service
#[derive(Debug, Clone, Serialize)]
pub struct VideoMetadata {
    pub title: String,
    pub thumbnail_url: String,
}

/// Parsed summarization result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub summary: String,
    pub bullet_points: Vec<String>,
}

/// Fetches a video's caption track in a given language
#[async_trait::async_trait]
pub trait CaptionFetcher: Send + Sync {
    async fn fetch(&self, video_id: &str, language: &str) -> Result<Vec<Caption>, Error>;
}

/// Fetches a video's title and thumbnail
#[async_trait::async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, Error>;
}

/// Turns transcript text into a summary with bullet points
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, transcript_text: &str) -> Result<Summary, Error>;
}

/// Extract video ID from various YouTube URL formats
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    // Bare 11-character video ID
    if regex::Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap().is_match(input) {
        return Some(input.to_string());
    }

    // youtube.com/watch?v=ID
    if let Some(caps) = regex::Regex::new(r"(?:youtube\.com/watch\?.*v=)([a-zA-Z0-9_-]{11})")
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    // youtu.be/ID
    if let Some(caps) = regex::Regex::new(r"youtu\.be/([a-zA-Z0-9_-]{11})")
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    // youtube.com/embed/ID
    if let Some(caps) = regex::Regex::new(r"youtube\.com/embed/([a-zA-Z0-9_-]{11})")
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    // youtube.com/shorts/ID
    if let Some(caps) = regex::Regex::new(r"youtube\.com/shorts/([a-zA-Z0-9_-]{11})")
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    None
}
