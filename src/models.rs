use chrono::NaiveDate;

/// Which retrieval path produced a record. Rendering uses this to pick the
/// degraded placeholder text for fields the fallback cannot supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataSource {
    Primary,
    Fallback,
}

/// Metadata fetched for a single video.
///
/// Created once per run and never mutated after note generation begins.
/// Fields the extractor could not determine stay `None`; the view model
/// renders the placeholder text, so the template never sees a missing key.
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub video_id: String,
    pub source: MetadataSource,
    pub title: Option<String>,
    pub channel: Option<String>,
    pub channel_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    /// Raw upload date as reported upstream, often `YYYYMMDD`.
    pub publish_date: Option<String>,
    pub view_count: Option<i64>,
    pub duration_secs: Option<u64>,
    pub captured_at: NaiveDate,
    pub subscriber_count: Option<i64>,
    pub like_count: Option<i64>,
    pub comment_count: Option<i64>,
    pub category: Option<String>,
}

impl VideoMetadata {
    /// A record from the fallback path. Only the title may be known, every
    /// other field renders as a degraded placeholder.
    pub fn degraded(video_id: impl Into<String>, title: Option<String>) -> Self {
        VideoMetadata {
            video_id: video_id.into(),
            source: MetadataSource::Fallback,
            title,
            channel: None,
            channel_url: None,
            thumbnail_url: None,
            description: None,
            publish_date: None,
            view_count: None,
            duration_secs: None,
            captured_at: chrono::Local::now().date_naive(),
            subscriber_count: None,
            like_count: None,
            comment_count: None,
            category: None,
        }
    }
}
