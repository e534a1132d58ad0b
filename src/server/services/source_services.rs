use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::server::models::{RequestContext, UpstreamSubtitlesResponse};

pub type DynSubtitleSource = Arc<dyn SubtitleSourceTrait + Send + Sync>;

/// why a source came back empty. never leaves the fetch step, it only ends up in the logs
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("not an http source")]
    InvalidSource,

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("upstream returned {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed body: {0}")]
    Body(#[source] reqwest::Error),
}

#[automock]
#[async_trait]
pub trait SubtitleSourceTrait {
    /// raw subtitle entries from one upstream addon, in the order it ranked them
    async fn fetch_subtitles(
        &self,
        source: &str,
        request: &RequestContext,
    ) -> Result<Vec<Value>, FetchError>;
}

/// talks to upstream subtitle addons over their public protocol
pub struct HttpSubtitleSource {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl HttpSubtitleSource {
    pub fn new(timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("autosub/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            timeout,
        }
    }

    /// `{source}/subtitles/{type}/{id}[/videoHash={hash}].json`
    pub fn subtitles_url(source: &str, request: &RequestContext) -> String {
        let mut url = format!(
            "{}/subtitles/{}/{}",
            source, request.media_type, request.media_id
        );
        if let Some(hash) = &request.content_hash {
            url.push_str("/videoHash=");
            url.push_str(&urlencoding::encode(hash));
        }
        url.push_str(".json");
        url
    }
}

#[async_trait]
impl SubtitleSourceTrait for HttpSubtitleSource {
    async fn fetch_subtitles(
        &self,
        source: &str,
        request: &RequestContext,
    ) -> Result<Vec<Value>, FetchError> {
        if !source.starts_with("http") {
            return Err(FetchError::InvalidSource);
        }

        let url = Self::subtitles_url(source, request);
        debug!("fetching {}", url);

        // the fallback client from `new` has no timeout of its own
        let response = self
            .http_client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(self.timeout)
                } else {
                    FetchError::Request(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // the per call timeout covers the body too
        let body: UpstreamSubtitlesResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout)
            } else {
                FetchError::Body(e)
            }
        })?;

        debug!("{} returned {} subtitles", source, body.subtitles.len());
        Ok(body.subtitles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(hash: Option<&str>) -> RequestContext {
        RequestContext {
            target_language: "eng".to_string(),
            substitute_language: "mri".to_string(),
            source_urls: vec![],
            content_hash: hash.map(str::to_string),
            normalized_filename: None,
            media_type: "movie".to_string(),
            media_id: "tt0499549".to_string(),
        }
    }

    #[test]
    fn builds_upstream_url() {
        assert_eq!(
            HttpSubtitleSource::subtitles_url("https://subs.example", &request(None)),
            "https://subs.example/subtitles/movie/tt0499549.json"
        );
        assert_eq!(
            HttpSubtitleSource::subtitles_url("https://subs.example", &request(Some("abc123"))),
            "https://subs.example/subtitles/movie/tt0499549/videoHash=abc123.json"
        );
    }

    #[test]
    fn escapes_the_hash() {
        assert_eq!(
            HttpSubtitleSource::subtitles_url("https://subs.example", &request(Some("a/b?c"))),
            "https://subs.example/subtitles/movie/tt0499549/videoHash=a%2Fb%3Fc.json"
        );
    }

    #[tokio::test]
    async fn gives_up_on_a_silent_upstream() {
        // accepts the connection and never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let source = HttpSubtitleSource::new(Duration::from_millis(200));
        let started = std::time::Instant::now();
        let result = source
            .fetch_subtitles(&format!("http://{}", addr), &request(None))
            .await;

        assert!(matches!(result, Err(FetchError::Timeout(_))));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn rejects_non_http_sources() {
        let source = HttpSubtitleSource::new(Duration::from_millis(100));
        let result = source.fetch_subtitles("ftp://nope", &request(None)).await;
        assert!(matches!(result, Err(FetchError::InvalidSource)));
    }
}
