use crate::internal::cache::MetadataCache;
use crate::internal::models::VideoMetadata;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const OEMBED_BASE_URL: &str = "https://www.youtube.com/";
const THUMBNAIL_BASE_URL: &str = "https://i.ytimg.com/vi/";

/// Fields we consume from the oEmbed body. The endpoint returns more
/// (author, provider, embed html) but only the title feeds our metadata.
#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: String,
}

/// HTTP service resolving video ids to metadata via the YouTube oEmbed
/// endpoint.
///
/// Uses an async `reqwest::Client` and returns `anyhow::Result` with
/// contextualized errors to preserve diagnostic information instead of
/// erasing it into plain strings. Successful lookups are cached.
pub struct OembedService {
    client: Client,
    metadata_cache: MetadataCache,
    base_url: Option<String>,
}

impl OembedService {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            metadata_cache: MetadataCache::new(Duration::from_secs(300)), // 5 minutes
            base_url: None,
        }
    }

    /// Point the service at a different endpoint root. Tests use this to
    /// target a local mock server.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            metadata_cache: MetadataCache::new(Duration::from_secs(300)),
            base_url: Some(base_url),
        }
    }

    fn get_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(OEMBED_BASE_URL)
    }

    /// Fetch and synthesize metadata for a single video id.
    ///
    /// oEmbed carries neither duration nor a long description, so the
    /// duration is a fixed placeholder and the description mirrors the title.
    /// The thumbnail URL is derived from the id rather than taken from the
    /// response, to always get the highest resolution variant.
    pub async fn fetch_video_metadata(&self, id: &str) -> Result<VideoMetadata> {
        if let Some(metadata) = self.metadata_cache.get(id) {
            return Ok(metadata);
        }

        let url = format!(
            "{}oembed?url=https://www.youtube.com/watch?v={}&format=json",
            self.get_base_url(),
            id
        );
        let resp = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .with_context(|| format!("failed to send GET request to {}", url))?
            .error_for_status()
            .with_context(|| format!("oEmbed request rejected for video {}", id))?;

        let body: OembedResponse = resp
            .json()
            .await
            .with_context(|| format!("failed to parse oEmbed response for video {}", id))?;

        let metadata = VideoMetadata {
            id: id.to_string(),
            title: body.title.clone(),
            duration: "12:00".to_string(),
            thumbnail: format!("{}{}/maxresdefault.jpg", THUMBNAIL_BASE_URL, id),
            description: body.title,
        };

        self.metadata_cache.set(id, metadata.clone());
        Ok(metadata)
    }
}

impl Default for OembedService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn watch_url_matcher(id: &str) -> Matcher {
        Matcher::UrlEncoded(
            "url".to_string(),
            format!("https://www.youtube.com/watch?v={}", id),
        )
    }

    #[tokio::test]
    async fn test_fetch_video_metadata_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/oembed")
            .match_query(watch_url_matcher("abc123"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"title": "Test Video", "author_name": "someone", "type": "video"}"#)
            .create_async()
            .await;

        let service = OembedService::with_base_url(format!("{}/", server.url()));
        let metadata = service.fetch_video_metadata("abc123").await.unwrap();

        mock.assert_async().await;
        assert_eq!(metadata.id, "abc123");
        assert_eq!(metadata.title, "Test Video");
        assert_eq!(metadata.duration, "12:00");
        assert_eq!(
            metadata.thumbnail,
            "https://i.ytimg.com/vi/abc123/maxresdefault.jpg"
        );
        assert_eq!(metadata.description, "Test Video");
    }

    #[tokio::test]
    async fn test_fetch_video_metadata_http_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/oembed")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let service = OembedService::with_base_url(format!("{}/", server.url()));
        let result = service.fetch_video_metadata("missing").await;

        mock.assert_async().await;
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("oEmbed request rejected"));
    }

    #[tokio::test]
    async fn test_fetch_video_metadata_invalid_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/oembed")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let service = OembedService::with_base_url(format!("{}/", server.url()));
        let result = service.fetch_video_metadata("bad").await;

        mock.assert_async().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_video_metadata_network_error() {
        let service = OembedService::with_base_url("http://localhost:1/".to_string());
        let result = service.fetch_video_metadata("abc123").await;

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("failed to send GET request"));
    }

    #[tokio::test]
    async fn test_second_fetch_served_from_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/oembed")
            .match_query(watch_url_matcher("cached"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"title": "Cached Video"}"#)
            .expect(1)
            .create_async()
            .await;

        let service = OembedService::with_base_url(format!("{}/", server.url()));
        let first = service.fetch_video_metadata("cached").await.unwrap();
        let second = service.fetch_video_metadata("cached").await.unwrap();

        mock.assert_async().await;
        assert_eq!(first, second);
    }
}
