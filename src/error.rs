//! Error taxonomy for the service. Provider modules map upstream failures
//! into these; the HTTP layer maps them onto status codes.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Video is unavailable or doesn't exist.")]
    VideoUnavailable,

    #[error("Captions are disabled for this video.")]
    CaptionsDisabled,

    #[error("No transcript available for this video.")]
    NoTranscriptFound,

    #[error("Video not found.")]
    MetadataNotFound,

    /// Any other provider failure. Carries the raw underlying message.
    #[error("{0}")]
    Upstream(String),
}

impl Error {
    /// True for failures meaning "the requested content does not exist or is
    /// inaccessible", as opposed to transient/unexpected ones.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::VideoUnavailable
                | Error::CaptionsDisabled
                | Error::NoTranscriptFound
                | Error::MetadataNotFound
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upstream(err.to_string())
    }
}
