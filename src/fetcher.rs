use std::time::Duration;

use log::{info, warn};
use rand::Rng;
use tokio::time::sleep;

use crate::error::Result;
use crate::extractor::MetadataExtractor;
use crate::models::VideoMetadata;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Client identities presented to the upstream service, rotated between
/// attempts to avoid identity-based blocking.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/113.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) \
     Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 13_2_3 like Mac OS X) AppleWebKit/605.1.15 \
     (KHTML, like Gecko) Version/13.0.3 Mobile/15E148 Safari/604.1",
];

/// Default backoff schedule between primary attempts: 2s, 4s, 6s, ...
pub fn linear_backoff(attempt: u32) -> Duration {
    Duration::from_secs((attempt as u64 + 1) * 2)
}

/// Bounded linear retry over the primary extractor with one escalation step
/// to the fallback extractor.
///
/// Transient failures inside the loop are logged and retried; only
/// exhaustion of both the loop and the fallback surfaces as an error, so
/// the caller never sees a partial record.
pub struct MetadataFetcher<P, F> {
    primary: P,
    fallback: F,
    max_attempts: u32,
    backoff: fn(u32) -> Duration,
}

impl<P: MetadataExtractor, F: MetadataExtractor> MetadataFetcher<P, F> {
    pub fn new(primary: P, fallback: F, max_attempts: u32) -> Self {
        MetadataFetcher {
            primary,
            fallback,
            max_attempts,
            backoff: linear_backoff,
        }
    }

    /// Replaces the backoff schedule. Tests inject a zero schedule so the
    /// policy runs without real delays.
    pub fn with_backoff(mut self, backoff: fn(u32) -> Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub async fn fetch(&self, video_id: &str) -> Result<VideoMetadata> {
        for attempt in 0..self.max_attempts {
            let user_agent = pick_user_agent();
            info!(
                "attempt {}/{} with {} for video {video_id}",
                attempt + 1,
                self.max_attempts,
                self.primary.name(),
            );
            match self.primary.extract(video_id, user_agent).await {
                Ok(record) => return Ok(record),
                Err(e) => {
                    warn!(
                        "{} attempt {} failed for {video_id}: {e}",
                        self.primary.name(),
                        attempt + 1
                    );
                    if attempt + 1 < self.max_attempts {
                        let delay = (self.backoff)(attempt);
                        info!("retrying in {delay:?}");
                        sleep(delay).await;
                    }
                }
            }
        }

        info!(
            "{} exhausted after {} attempts, falling back to {}",
            self.primary.name(),
            self.max_attempts,
            self.fallback.name()
        );
        self.fallback
            .extract(video_id, pick_user_agent())
            .await
            .map_err(|e| {
                warn!("{} failed for {video_id}: {e}", self.fallback.name());
                e
            })
    }
}

fn pick_user_agent() -> &'static str {
    USER_AGENTS[rand::thread_rng().gen_range(0..USER_AGENTS.len())]
}

#[cfg(test)]
mod local_tests {
    use super::*;
    use crate::mock::{MockExtractor, sample_record};
    use crate::models::MetadataSource;

    fn zero_backoff(_: u32) -> Duration {
        Duration::ZERO
    }

    #[test]
    fn test_linear_backoff_schedule() {
        assert_eq!(linear_backoff(0), Duration::from_secs(2));
        assert_eq!(linear_backoff(1), Duration::from_secs(4));
        assert_eq!(linear_backoff(2), Duration::from_secs(6));
    }

    #[test]
    fn test_pick_user_agent_stays_in_pool() {
        for _ in 0..50 {
            assert!(USER_AGENTS.contains(&pick_user_agent()));
        }
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let primary = MockExtractor::new("primary", vec![Ok(sample_record("abc"))]);
        let fallback = MockExtractor::new("fallback", vec![]);
        let fetcher = MetadataFetcher::new(&primary, &fallback, 3).with_backoff(zero_backoff);

        let record = fetcher.fetch("abc").await.unwrap();
        assert_eq!(record.source, MetadataSource::Primary);
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let primary = MockExtractor::new(
            "primary",
            vec![
                Err(crate::error::Error::Other("boom".into())),
                Err(crate::error::Error::Other("boom".into())),
                Ok(sample_record("abc")),
            ],
        );
        let fallback = MockExtractor::new("fallback", vec![]);
        let fetcher = MetadataFetcher::new(&primary, &fallback, 3).with_backoff(zero_backoff);

        let record = fetcher.fetch("abc").await.unwrap();
        assert_eq!(record.video_id, "abc");
        assert_eq!(primary.calls(), 3);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_exhaustion_invokes_fallback_exactly_once() {
        let primary = MockExtractor::new("primary", vec![]);
        let fallback = MockExtractor::new(
            "fallback",
            vec![Ok(VideoMetadata::degraded("abc", Some("Scraped Title".into())))],
        );
        let fetcher = MetadataFetcher::new(&primary, &fallback, 3).with_backoff(zero_backoff);

        let record = fetcher.fetch("abc").await.unwrap();
        assert_eq!(record.source, MetadataSource::Fallback);
        assert_eq!(record.title.as_deref(), Some("Scraped Title"));
        assert_eq!(primary.calls(), 3);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn test_double_exhaustion_is_terminal() {
        let primary = MockExtractor::new("primary", vec![]);
        let fallback = MockExtractor::new("fallback", vec![]);
        let fetcher = MetadataFetcher::new(&primary, &fallback, 3).with_backoff(zero_backoff);

        assert!(fetcher.fetch("abc").await.is_err());
        assert_eq!(primary.calls(), 3);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn test_every_attempt_presents_a_pool_identity() {
        let primary = MockExtractor::new("primary", vec![]);
        let fallback = MockExtractor::new("fallback", vec![]);
        let fetcher = MetadataFetcher::new(&primary, &fallback, 3).with_backoff(zero_backoff);

        let _ = fetcher.fetch("abc").await;
        for ua in primary.seen_user_agents().iter() {
            assert!(USER_AGENTS.contains(&ua.as_str()));
        }
        assert_eq!(primary.seen_user_agents().len(), 3);
    }
}
