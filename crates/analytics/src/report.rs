use core_types::Granularity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account-level metrics for a single user.
///
/// This is the `getUserAnalytics` result as it crosses the system boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummaryReport {
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub followers_count: u64,
    pub following_count: u64,
    pub tweet_count: u64,
    pub listed_count: u64,
    pub verified: bool,
    pub created_at: String,
    pub description: String,
    pub analytics_summary: String,
}

/// One tweet of a performance report, with its derived engagement total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetMetrics {
    pub tweet_id: String,
    pub text: String,
    pub created_at: String,
    pub like_count: u64,
    pub retweet_count: u64,
    pub reply_count: u64,
    pub quote_count: u64,
    pub total_engagement: u64,
}

/// Per-field means over the retrieved tweets, rounded to two decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageEngagement {
    #[serde(with = "rust_decimal::serde::float")]
    pub likes: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub retweets: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub replies: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub quotes: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// The best performing tweet, with its text cut to the display limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTweet {
    pub tweet_id: String,
    pub text: String,
    pub total_engagement: u64,
}

/// The `getUserTweetPerformance` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetPerformanceReport {
    pub username: String,
    pub total_tweets_retrieved: usize,
    pub tweets: Vec<TweetMetrics>,
    pub average_engagement: AverageEngagement,
    pub top_tweet: TopTweet,
    pub performance_summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    pub start: String,
    pub end: String,
    pub tweet_count: u64,
}

/// The `getTopicTweetCount` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicVolumeReport {
    pub query: String,
    pub start_time: String,
    pub end_time: String,
    pub granularity: Granularity,
    pub total_tweet_count: u64,
    pub time_buckets: Vec<TimeBucket>,
    pub peak_period: TimeBucket,
    pub trend_analysis: String,
}
