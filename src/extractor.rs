#![allow(async_fn_in_trait)]
use log::{debug, info, warn};
use reqwest::header;
use youtube_dl::YoutubeDl;

use crate::error::{Error, Result};
use crate::models::{MetadataSource, VideoMetadata};
use crate::utils::{PAGE_TITLE_EXPR, watch_url};

/// A metadata retrieval mechanism.
///
/// `user_agent` is the client identity the extractor presents to the
/// upstream service; the retrieval policy rotates it between attempts.
pub trait MetadataExtractor: Send + Sync {
    /// Name of the extractor, used in log entries.
    fn name(&self) -> &'static str;

    async fn extract(&self, video_id: &str, user_agent: &str) -> Result<VideoMetadata>;
}

impl<T: MetadataExtractor> MetadataExtractor for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn extract(&self, video_id: &str, user_agent: &str) -> Result<VideoMetadata> {
        (**self).extract(video_id, user_agent).await
    }
}

/// Primary extractor backed by the yt-dlp runner.
///
/// Runs metadata-only, nothing is downloaded. The subscriber, like, comment
/// and category fields need privileged API access and stay unset.
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    socket_timeout_secs: u32,
}

impl YtDlpExtractor {
    pub fn new(socket_timeout_secs: u32) -> Self {
        YtDlpExtractor {
            socket_timeout_secs,
        }
    }
}

impl MetadataExtractor for YtDlpExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn extract(&self, video_id: &str, user_agent: &str) -> Result<VideoMetadata> {
        let url = watch_url(video_id);
        debug!("running yt-dlp against {url}");
        let timeout = self.socket_timeout_secs.to_string();
        let output = YoutubeDl::new(url.as_str())
            .socket_timeout(timeout.as_str())
            .user_agent(user_agent)
            .run_async()
            .await?;

        let video = output.into_single_video().ok_or_else(|| {
            Error::ResourceGetFailed(format!("no metadata returned for video {video_id}"))
        })?;
        info!(
            "extracted metadata for {video_id}: title {:?}",
            video.title.as_deref().unwrap_or("<none>")
        );

        let duration_secs = video
            .duration
            .as_ref()
            .and_then(|d| d.as_u64().or_else(|| d.as_f64().map(|f| f as u64)));

        Ok(VideoMetadata {
            video_id: video_id.to_string(),
            source: MetadataSource::Primary,
            title: video.title,
            channel: video.uploader,
            channel_url: video.uploader_url,
            thumbnail_url: video.thumbnail,
            description: video.description,
            publish_date: video.upload_date,
            view_count: video.view_count,
            duration_secs,
            captured_at: chrono::Local::now().date_naive(),
            subscriber_count: None,
            like_count: None,
            comment_count: None,
            category: None,
        })
    }
}

/// Degraded fallback extractor: fetches the watch page unauthenticated and
/// scrapes the title element. Everything else on the record stays unset.
#[derive(Debug, Clone)]
pub struct PageTitleExtractor {
    client: reqwest::Client,
    base_url: String,
}

impl PageTitleExtractor {
    pub fn new() -> Result<Self> {
        Self::with_base_url("https://www.youtube.com")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(PageTitleExtractor {
            client: reqwest::Client::builder().build()?,
            base_url: base_url.into(),
        })
    }
}

impl MetadataExtractor for PageTitleExtractor {
    fn name(&self) -> &'static str {
        "page-title"
    }

    async fn extract(&self, video_id: &str, user_agent: &str) -> Result<VideoMetadata> {
        let url = format!("{}/watch?v={}", self.base_url, video_id);
        info!("fetching {url} directly");
        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, user_agent)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::ResourceGetFailed(format!(
                "page fetch for {video_id} failed with status code {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let title = PAGE_TITLE_EXPR
            .captures(&body)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().trim_end_matches(" - YouTube").trim().to_string())
            .filter(|title| !title.is_empty());
        if title.is_none() {
            warn!("no title element found in page for {video_id}");
        }

        Ok(VideoMetadata::degraded(video_id, title))
    }
}
