use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{Error, Result};
use crate::extractor::MetadataExtractor;
use crate::models::{MetadataSource, VideoMetadata};

/// A record with every field populated, for rendering and policy tests.
pub fn sample_record(video_id: &str) -> VideoMetadata {
    VideoMetadata {
        video_id: video_id.to_string(),
        source: MetadataSource::Primary,
        title: Some("Sample Video".to_string()),
        channel: Some("Sample Channel".to_string()),
        channel_url: Some("https://www.youtube.com/@sample".to_string()),
        thumbnail_url: Some("https://img.youtube.com/vi/abc/maxresdefault.jpg".to_string()),
        description: Some("Check this out #foo and #bar!".to_string()),
        publish_date: Some("20240311".to_string()),
        view_count: Some(1234567),
        duration_secs: Some(125),
        captured_at: chrono::NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
        subscriber_count: None,
        like_count: None,
        comment_count: None,
        category: None,
    }
}

/// Scripted extractor for retrieval-policy tests. Pops one prepared result
/// per call and errors once the script runs out.
pub struct MockExtractor {
    name: &'static str,
    results: Mutex<VecDeque<Result<VideoMetadata>>>,
    calls: AtomicU32,
    seen_user_agents: Mutex<Vec<String>>,
}

impl MockExtractor {
    pub fn new(name: &'static str, results: Vec<Result<VideoMetadata>>) -> Self {
        MockExtractor {
            name,
            results: Mutex::new(results.into()),
            calls: AtomicU32::new(0),
            seen_user_agents: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_user_agents(&self) -> Vec<String> {
        self.seen_user_agents.lock().unwrap().clone()
    }
}

impl MetadataExtractor for MockExtractor {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn extract(&self, _video_id: &str, user_agent: &str) -> Result<VideoMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_user_agents
            .lock()
            .unwrap()
            .push(user_agent.to_string());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other(format!("mock {} out of results", self.name))))
    }
}
