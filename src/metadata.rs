//! Metadata fetcher backed by the YouTube Data API v3.

use log::debug;
use serde::Deserialize;

use crate::{Error, MetadataFetcher, VideoMetadata};

const VIDEOS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// Metadata provider using an API key against the public Data API.
pub struct DataApiClient {
    client: reqwest::Client,
    api_key: String,
}

impl DataApiClient {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[async_trait::async_trait]
impl MetadataFetcher for DataApiClient {
    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, Error> {
        debug!("Fetching video metadata for {video_id}");

        let resp: VideoListResponse = self
            .client
            .get(VIDEOS_ENDPOINT)
            .query(&[("part", "snippet"), ("id", video_id), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        first_item_metadata(resp)
    }
}

/// Title and high-resolution thumbnail from the first result item.
/// Zero items means the video does not exist as far as the Data API knows.
fn first_item_metadata(resp: VideoListResponse) -> Result<VideoMetadata, Error> {
    let item = resp.items.into_iter().next().ok_or(Error::MetadataNotFound)?;

    let thumbnail_url = item
        .snippet
        .thumbnails
        .high
        .map(|t| t.url)
        .ok_or_else(|| Error::Upstream("video snippet missing high-resolution thumbnail".to_string()))?;

    Ok(VideoMetadata {
        title: item.snippet.title,
        thumbnail_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_item_metadata() {
        let resp: VideoListResponse = serde_json::from_value(serde_json::json!({
            "items": [
                {
                    "snippet": {
                        "title": "A Video",
                        "thumbnails": {
                            "high": { "url": "https://i.ytimg.com/vi/abc/hqdefault.jpg" }
                        }
                    }
                }
            ]
        }))
        .unwrap();

        let meta = first_item_metadata(resp).unwrap();
        assert_eq!(meta.title, "A Video");
        assert_eq!(meta.thumbnail_url, "https://i.ytimg.com/vi/abc/hqdefault.jpg");
    }

    #[test]
    fn test_zero_items_is_not_found() {
        let resp: VideoListResponse = serde_json::from_value(serde_json::json!({ "items": [] })).unwrap();
        assert!(matches!(first_item_metadata(resp), Err(Error::MetadataNotFound)));
    }

    #[test]
    fn test_missing_items_field_is_not_found() {
        let resp: VideoListResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(matches!(first_item_metadata(resp), Err(Error::MetadataNotFound)));
    }

    #[test]
    fn test_missing_high_thumbnail_is_upstream() {
        let resp: VideoListResponse = serde_json::from_value(serde_json::json!({
            "items": [
                {
                    "snippet": {
                        "title": "No Thumb",
                        "thumbnails": {}
                    }
                }
            ]
        }))
        .unwrap();

        assert!(matches!(first_item_metadata(resp), Err(Error::Upstream(_))));
    }
}
