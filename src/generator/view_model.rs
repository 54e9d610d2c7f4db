use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{MetadataSource, VideoMetadata};
use crate::utils::{extract_hashtags, format_count, format_duration};

const UNKNOWN: &str = "Unknown";
const NO_HASHTAGS: &str = "None";
const FALLBACK_CHANNEL: &str = "Unknown (Fallback Method)";
const FALLBACK_DESCRIPTION: &str = "Description unavailable...";
const DESCRIPTION_LIMIT: usize = 2000;

/// Template-facing projection of a record.
///
/// Every field is fully rendered text. The placeholder rules live here and
/// only here: absent values render as `Unknown` (or the fallback-specific
/// placeholders for a degraded record), so the template never deals with a
/// missing key.
#[derive(Debug, Serialize)]
pub struct NoteView {
    video_id: String,
    title: String,
    channel: String,
    subscribers: String,
    published: String,
    captured: String,
    duration: String,
    views: String,
    likes: String,
    comments: String,
    category: String,
    thumbnail_url: String,
    description: String,
    hashtags: String,
}

impl NoteView {
    pub fn from_record(record: &VideoMetadata) -> Self {
        let title = record
            .title
            .clone()
            .unwrap_or_else(|| format!("YouTube Video {}", record.video_id));
        let thumbnail_url = record.thumbnail_url.clone().unwrap_or_else(|| {
            format!(
                "https://img.youtube.com/vi/{}/maxresdefault.jpg",
                record.video_id
            )
        });

        NoteView {
            video_id: record.video_id.clone(),
            title,
            channel: render_channel(record),
            subscribers: render_count(record.subscriber_count),
            published: render_publish_date(record),
            captured: record.captured_at.format("%Y-%m-%d").to_string(),
            duration: record
                .duration_secs
                .map(format_duration)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            views: render_count(record.view_count),
            likes: render_count(record.like_count),
            comments: render_count(record.comment_count),
            category: record
                .category
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            thumbnail_url,
            description: render_description(record),
            hashtags: render_hashtags(record),
        }
    }
}

fn render_count(count: Option<i64>) -> String {
    count.map(format_count).unwrap_or_else(|| UNKNOWN.to_string())
}

fn render_channel(record: &VideoMetadata) -> String {
    match (&record.channel, &record.channel_url) {
        (Some(name), Some(url)) => format!("[{name}]({url})"),
        (Some(name), None) => name.clone(),
        (None, _) => match record.source {
            MetadataSource::Primary => UNKNOWN.to_string(),
            MetadataSource::Fallback => FALLBACK_CHANNEL.to_string(),
        },
    }
}

fn render_description(record: &VideoMetadata) -> String {
    match record.description.as_deref() {
        Some(description) => truncate_description(description),
        None => match record.source {
            MetadataSource::Primary => String::new(),
            MetadataSource::Fallback => FALLBACK_DESCRIPTION.to_string(),
        },
    }
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let mut capped: String = description.chars().take(DESCRIPTION_LIMIT - 3).collect();
        capped.push_str("...");
        capped
    } else {
        description.to_string()
    }
}

fn render_hashtags(record: &VideoMetadata) -> String {
    let tags = record
        .description
        .as_deref()
        .map(extract_hashtags)
        .unwrap_or_default();
    if tags.is_empty() {
        NO_HASHTAGS.to_string()
    } else {
        tags.join(" ")
    }
}

fn render_publish_date(record: &VideoMetadata) -> String {
    let Some(raw) = record.publish_date.as_deref() else {
        return UNKNOWN.to_string();
    };
    // upstream reports YYYYMMDD; anything else is kept as is
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y%m%d") {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    raw.to_string()
}
