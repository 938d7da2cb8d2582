use std::sync::Arc;
use url::Url;

use super::{CheckCounters, CheckOutcome, RetryPolicy};
use crate::{
    fetch::Fetcher,
    hls::SegmentEntry,
    logging::{LogRecord, LogSink},
};

/// Verifies that segments of one rendition are fetchable and non-empty.
pub struct SegmentChecker {
    rendition: Url,
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn LogSink>,
    policy: RetryPolicy,
}

impl SegmentChecker {
    pub fn new(
        rendition: Url,
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn LogSink>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            rendition,
            fetcher,
            sink,
            policy,
        }
    }

    pub fn rendition(&self) -> &Url {
        &self.rendition
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch a segment once and classify the result.
    pub async fn check_segment(&self, segment: &SegmentEntry) -> CheckOutcome {
        let response = match self.fetcher.get(&segment.url).await {
            Ok(response) => response,
            Err(_) => return CheckOutcome::ProtocolError,
        };

        if let Some(outcome) = CheckOutcome::from_status(response.status) {
            return outcome;
        }

        match response.body {
            Err(_) => CheckOutcome::ProtocolError,
            Ok(body) if body.is_empty() => CheckOutcome::EmptySegmentError,
            Ok(_) => CheckOutcome::Ok,
        }
    }

    /// Check a segment with retries, then record a final failure in `counters`
    /// and the log sink.
    pub async fn retry_check_segment(
        &self,
        segment: &SegmentEntry,
        counters: &mut CheckCounters,
    ) -> CheckOutcome {
        let attempts = self.policy.attempts.max(1);
        let mut outcome = CheckOutcome::Ok;

        for attempt in 1..=attempts {
            outcome = self.check_segment(segment).await;
            if outcome.is_ok() {
                break;
            }

            self.sink.emit(
                LogRecord::debug("Segment check attempt failed")
                    .with_field("rendition", &self.rendition)
                    .with_field("url", &segment.url)
                    .with_field("outcome", outcome.as_str())
                    .with_field("attempt", attempt),
            );

            if attempt < attempts && !self.policy.delay.is_zero() {
                tokio::time::sleep(self.policy.delay).await;
            }
        }

        if !outcome.is_ok() {
            counters.record(outcome);
            self.sink.emit(
                LogRecord::error(outcome.message())
                    .with_field("rendition", &self.rendition)
                    .with_field("url", &segment.url)
                    .with_field("outcome", outcome.as_str())
                    .with_field("sequence", segment.media_sequence),
            );
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fetch::mock::{Scripted, ScriptedFetcher},
        hls::SegmentInfo,
        logging::{LogLevel, MemorySink},
    };

    const RENDITION: &str = "https://cdn.example.com/live/index.m3u8";
    const SEGMENT: &str = "https://cdn.example.com/live/seg7.ts";

    fn segment() -> SegmentEntry {
        SegmentEntry::new(SegmentInfo::default(), 7, Url::parse(SEGMENT).unwrap())
    }

    fn checker(fetcher: &Arc<ScriptedFetcher>, sink: &Arc<MemorySink>) -> SegmentChecker {
        SegmentChecker::new(
            Url::parse(RENDITION).unwrap(),
            fetcher.clone(),
            sink.clone(),
            RetryPolicy::immediate(3),
        )
    }

    async fn classify(reply: Scripted) -> CheckOutcome {
        let fetcher = Arc::new(ScriptedFetcher::new());
        let sink = Arc::new(MemorySink::new());
        fetcher.push(SEGMENT, reply);
        checker(&fetcher, &sink).check_segment(&segment()).await
    }

    #[tokio::test]
    async fn test_check_segment_classification() {
        assert_eq!(
            classify(Scripted::status(404, "gone")).await,
            CheckOutcome::ClientError
        );
        assert_eq!(
            classify(Scripted::status(503, "busy")).await,
            CheckOutcome::ServerError
        );
        assert_eq!(
            classify(Scripted::ok("")).await,
            CheckOutcome::EmptySegmentError
        );
        assert_eq!(classify(Scripted::ok("\x47data")).await, CheckOutcome::Ok);
        assert_eq!(
            classify(Scripted::Transport).await,
            CheckOutcome::ProtocolError
        );
        assert_eq!(
            classify(Scripted::BodyError).await,
            CheckOutcome::ProtocolError
        );
    }

    #[tokio::test]
    async fn test_boundary_statuses() {
        // 400 is not a client error and falls through to the body checks.
        assert_eq!(classify(Scripted::status(400, "x")).await, CheckOutcome::Ok);
        assert_eq!(
            classify(Scripted::status(400, "")).await,
            CheckOutcome::EmptySegmentError
        );
        assert_eq!(
            classify(Scripted::status(500, "x")).await,
            CheckOutcome::ClientError
        );
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        let sink = Arc::new(MemorySink::new());
        fetcher.push(SEGMENT, Scripted::status(503, ""));
        fetcher.push(SEGMENT, Scripted::Transport);
        fetcher.push(SEGMENT, Scripted::ok("payload"));

        let mut counters = CheckCounters::default();
        let outcome = checker(&fetcher, &sink)
            .retry_check_segment(&segment(), &mut counters)
            .await;

        assert_eq!(outcome, CheckOutcome::Ok);
        assert_eq!(counters, CheckCounters::default());
        assert_eq!(fetcher.request_count(SEGMENT), 3);
        assert!(sink.at_level(LogLevel::Error).is_empty());
    }

    #[tokio::test]
    async fn test_retry_exhausted_counts_final_outcome_once() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        let sink = Arc::new(MemorySink::new());
        fetcher.push(SEGMENT, Scripted::status(503, ""));
        fetcher.push(SEGMENT, Scripted::status(404, ""));
        fetcher.push(SEGMENT, Scripted::ok(""));

        let mut counters = CheckCounters::default();
        let outcome = checker(&fetcher, &sink)
            .retry_check_segment(&segment(), &mut counters)
            .await;

        assert_eq!(outcome, CheckOutcome::EmptySegmentError);
        assert_eq!(
            counters,
            CheckCounters {
                empty_segment_errors: 1,
                ..Default::default()
            }
        );
        assert_eq!(fetcher.request_count(SEGMENT), 3);

        let errors = sink.at_level(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field("url"), Some(SEGMENT));
        assert_eq!(errors[0].field("rendition"), Some(RENDITION));
        assert_eq!(errors[0].field("outcome"), Some("empty_segment"));
    }

    #[tokio::test]
    async fn test_first_success_stops_retrying() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        let sink = Arc::new(MemorySink::new());
        fetcher.push(SEGMENT, Scripted::ok("payload"));

        let mut counters = CheckCounters::default();
        checker(&fetcher, &sink)
            .retry_check_segment(&segment(), &mut counters)
            .await;

        assert_eq!(fetcher.request_count(SEGMENT), 1);
        assert!(sink.records().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_attempts_only() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        let sink = Arc::new(MemorySink::new());
        fetcher.push(SEGMENT, Scripted::status(404, ""));

        let checker = SegmentChecker::new(
            Url::parse(RENDITION).unwrap(),
            fetcher.clone(),
            sink.clone(),
            RetryPolicy::default(),
        );

        let start = tokio::time::Instant::now();
        let mut counters = CheckCounters::default();
        checker.retry_check_segment(&segment(), &mut counters).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= RetryPolicy::DEFAULT_DELAY * 2);
        assert!(elapsed < RetryPolicy::DEFAULT_DELAY * 3);
        assert_eq!(counters.client_errors, 1);
    }
}
