use crate::aggregate::{self, sum_totals};
use crate::compose::{self, TimeWindow};
use crate::normalize::{normalize_all, NormalizedBucket, NormalizedProfile, NormalizedTweet};
use crate::report::{AccountSummaryReport, TopicVolumeReport, TweetPerformanceReport};
use crate::select::top_or_placeholder;
use crate::trend;
use core_types::{CountsResponse, TimelineResponse, TopicCountRequest, UserResponse};

/// A stateless calculator for deriving social-media reports from raw API payloads.
///
/// Every method is total: missing or malformed fields degrade to zero or empty
/// values, and an empty batch yields a zeroed report with a placeholder top item.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account-level metrics and a one-sentence summary for a user lookup.
    pub fn account_summary(&self, user: &UserResponse) -> AccountSummaryReport {
        let profile = user
            .data
            .as_ref()
            .map(NormalizedProfile::from)
            .unwrap_or_default();

        tracing::debug!(username = %profile.username, "Composing account summary.");
        compose::account_summary(&profile)
    }

    /// Engagement per tweet, averages, and the best performing tweet.
    ///
    /// # Arguments
    ///
    /// * `username` - The account the timeline belongs to, echoed into the report.
    /// * `timeline` - The tweets in the order the API returned them. Order decides ties.
    pub fn tweet_performance(
        &self,
        username: &str,
        timeline: &TimelineResponse,
    ) -> TweetPerformanceReport {
        let tweets: Vec<NormalizedTweet> = normalize_all(timeline.tweets());
        let aggregate = aggregate::aggregate(&tweets);
        let top = top_or_placeholder(&aggregate.tweets);

        tracing::debug!(
            username,
            tweets = aggregate.tweets.len(),
            top_engagement = top.total_engagement,
            "Aggregated tweet performance."
        );
        compose::tweet_performance(username, &aggregate, &top)
    }

    /// Bucketed volume for a topic query with its peak period and trend.
    pub fn topic_volume(
        &self,
        request: &TopicCountRequest,
        counts: &CountsResponse,
    ) -> TopicVolumeReport {
        let buckets: Vec<NormalizedBucket> = normalize_all(counts.buckets());
        let total = sum_totals(&buckets);
        let analysis = trend::analyze(&buckets);
        let window = reported_window(request, counts);

        tracing::debug!(
            query = %request.query,
            buckets = buckets.len(),
            total,
            trend = %analysis.trend,
            "Analyzed topic volume."
        );
        compose::topic_volume(
            &request.query,
            &window,
            request.granularity,
            &buckets,
            total,
            &analysis,
        )
    }
}

/// Window bounds as echoed by the API, else as requested, else empty.
fn reported_window(request: &TopicCountRequest, counts: &CountsResponse) -> TimeWindow {
    let meta = counts.meta.as_ref();
    let pick = |from_meta: Option<&String>, requested: Option<&String>| {
        from_meta
            .filter(|s| !s.is_empty())
            .or(requested.filter(|s| !s.is_empty()))
            .cloned()
            .unwrap_or_default()
    };

    TimeWindow {
        start_time: pick(
            meta.and_then(|m| m.start_time.as_ref()),
            request.start_time.as_ref(),
        ),
        end_time: pick(
            meta.and_then(|m| m.end_time.as_ref()),
            request.end_time.as_ref(),
        ),
    }
}
