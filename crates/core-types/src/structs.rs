//! Raw records as returned by the upstream X/Twitter v2 API.
//!
//! Every field is optional. Nothing here is trusted to be present or well typed;
//! the analytics crate normalizes these records once, at its boundary.

use crate::lenient;
use serde::Deserialize;

// ==============================================================================
// Users
// ==============================================================================

/// The `public_metrics` sub-object of a user.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserPublicMetrics {
    #[serde(default, deserialize_with = "lenient::count")]
    pub followers_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub following_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub tweet_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub listed_count: Option<u64>,
}

/// A user profile from `GET /2/users/by/username/:username`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawUser {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub verified: Option<bool>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub public_metrics: Option<UserPublicMetrics>,
}

/// Envelope of a user lookup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserResponse {
    #[serde(default, deserialize_with = "lenient::object")]
    pub data: Option<RawUser>,
}

// ==============================================================================
// Tweets
// ==============================================================================

/// The `public_metrics` sub-object of a tweet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TweetPublicMetrics {
    #[serde(default, deserialize_with = "lenient::count")]
    pub like_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub retweet_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub reply_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub quote_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTweet {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub public_metrics: Option<TweetPublicMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TimelineMeta {
    #[serde(default, deserialize_with = "lenient::count")]
    pub result_count: Option<u64>,
}

/// A page of a user's timeline from `GET /2/users/:id/tweets`.
///
/// A user without any tweets comes back with no `data` at all.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TimelineResponse {
    #[serde(default, deserialize_with = "lenient::records")]
    pub data: Option<Vec<RawTweet>>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub meta: Option<TimelineMeta>,
}

impl TimelineResponse {
    pub fn tweets(&self) -> &[RawTweet] {
        self.data.as_deref().unwrap_or_default()
    }
}

// ==============================================================================
// Tweet counts
// ==============================================================================

/// One time bucket from `GET /2/tweets/counts/recent`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawBucket {
    #[serde(default, deserialize_with = "lenient::text")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub tweet_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CountsMeta {
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_tweet_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CountsResponse {
    #[serde(default, deserialize_with = "lenient::records")]
    pub data: Option<Vec<RawBucket>>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub meta: Option<CountsMeta>,
}

impl CountsResponse {
    pub fn buckets(&self) -> &[RawBucket] {
        self.data.as_deref().unwrap_or_default()
    }
}
