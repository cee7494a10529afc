//! Assembles the final report structures and their narrative sentences.
//!
//! Everything here is formatting over already computed values; inputs are only
//! borrowed and never modified.

use crate::aggregate::{round_whole, EngagementAggregate};
use crate::normalize::{NormalizedBucket, NormalizedProfile};
use crate::report::{
    AccountSummaryReport, TimeBucket, TopTweet, TopicVolumeReport, TweetMetrics,
    TweetPerformanceReport,
};
use crate::trend::TrendAnalysis;
use core_types::Granularity;

/// Maximum number of characters of the top tweet's text kept in a report.
pub const TOP_TEXT_LIMIT: usize = 200;
pub const ELLIPSIS: &str = "...";

/// Cuts `text` to `limit` characters, appending an ellipsis when anything was cut.
pub fn truncate_text(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

pub fn account_summary(profile: &NormalizedProfile) -> AccountSummaryReport {
    let analytics_summary = format!(
        "User @{} has {} followers, follows {} accounts, and has posted {} tweets.",
        profile.username, profile.followers_count, profile.following_count, profile.tweet_count
    );

    AccountSummaryReport {
        user_id: profile.id.clone(),
        username: profile.username.clone(),
        name: profile.name.clone(),
        followers_count: profile.followers_count,
        following_count: profile.following_count,
        tweet_count: profile.tweet_count,
        listed_count: profile.listed_count,
        verified: profile.verified,
        created_at: profile.created_at.clone(),
        description: profile.description.clone(),
        analytics_summary,
    }
}

pub fn tweet_performance(
    username: &str,
    aggregate: &EngagementAggregate,
    top: &TweetMetrics,
) -> TweetPerformanceReport {
    let total_tweets = aggregate.tweets.len();
    let means = &aggregate.means;
    let performance_summary = format!(
        "Analyzed {} recent tweets from @{}. Average engagement: {} per tweet ({} likes, {} retweets, {} replies). Top tweet had {} total engagements.",
        total_tweets,
        username,
        round_whole(means.total),
        round_whole(means.likes),
        round_whole(means.retweets),
        round_whole(means.replies),
        top.total_engagement,
    );

    TweetPerformanceReport {
        username: username.to_string(),
        total_tweets_retrieved: total_tweets,
        tweets: aggregate.tweets.clone(),
        average_engagement: aggregate.average.clone(),
        top_tweet: TopTweet {
            tweet_id: top.tweet_id.clone(),
            text: truncate_text(&top.text, TOP_TEXT_LIMIT),
            total_engagement: top.total_engagement,
        },
        performance_summary,
    }
}

/// The reported query window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_time: String,
    pub end_time: String,
}

pub fn topic_volume(
    query: &str,
    window: &TimeWindow,
    granularity: Granularity,
    buckets: &[NormalizedBucket],
    total_tweet_count: u64,
    analysis: &TrendAnalysis,
) -> TopicVolumeReport {
    let peak = time_bucket(&analysis.peak);
    let trend_analysis = format!(
        "Found {} total tweets for \"{}\" over the specified period. Trend is {} (first half avg: {}, second half avg: {}). Peak period had {} tweets between {} and {}.",
        total_tweet_count,
        query,
        analysis.trend,
        round_whole(analysis.first_half_mean),
        round_whole(analysis.second_half_mean),
        peak.tweet_count,
        peak.start,
        peak.end,
    );

    TopicVolumeReport {
        query: query.to_string(),
        start_time: window.start_time.clone(),
        end_time: window.end_time.clone(),
        granularity,
        total_tweet_count,
        time_buckets: buckets.iter().map(time_bucket).collect(),
        peak_period: peak,
        trend_analysis,
    }
}

fn time_bucket(bucket: &NormalizedBucket) -> TimeBucket {
    TimeBucket {
        start: bucket.start.clone(),
        end: bucket.end.clone(),
        tweet_count: bucket.tweet_count,
    }
}
