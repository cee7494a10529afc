//! Turns raw, partially populated records into fixed-shape records.
//!
//! Missing numbers become `0`, missing strings become `""`, a missing `verified`
//! flag becomes `false`. Conversion is infallible; nothing downstream re-checks
//! for absent fields.

use core_types::{RawBucket, RawTweet, RawUser};

/// A tweet with every field present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedTweet {
    pub id: String,
    pub text: String,
    pub created_at: String,
    pub like_count: u64,
    pub retweet_count: u64,
    pub reply_count: u64,
    pub quote_count: u64,
}

/// A count bucket with every field present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBucket {
    pub start: String,
    pub end: String,
    pub tweet_count: u64,
}

/// A user profile with every field present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedProfile {
    pub id: String,
    pub username: String,
    pub name: String,
    pub followers_count: u64,
    pub following_count: u64,
    pub tweet_count: u64,
    pub listed_count: u64,
    pub verified: bool,
    pub created_at: String,
    pub description: String,
}

impl From<&RawTweet> for NormalizedTweet {
    fn from(raw: &RawTweet) -> Self {
        let metrics = raw.public_metrics.clone().unwrap_or_default();
        Self {
            id: raw.id.clone().unwrap_or_default(),
            text: raw.text.clone().unwrap_or_default(),
            created_at: raw.created_at.clone().unwrap_or_default(),
            like_count: metrics.like_count.unwrap_or(0),
            retweet_count: metrics.retweet_count.unwrap_or(0),
            reply_count: metrics.reply_count.unwrap_or(0),
            quote_count: metrics.quote_count.unwrap_or(0),
        }
    }
}

impl From<&RawBucket> for NormalizedBucket {
    fn from(raw: &RawBucket) -> Self {
        Self {
            start: raw.start.clone().unwrap_or_default(),
            end: raw.end.clone().unwrap_or_default(),
            tweet_count: raw.tweet_count.unwrap_or(0),
        }
    }
}

impl From<&RawUser> for NormalizedProfile {
    fn from(raw: &RawUser) -> Self {
        let metrics = raw.public_metrics.clone().unwrap_or_default();
        Self {
            id: raw.id.clone().unwrap_or_default(),
            username: raw.username.clone().unwrap_or_default(),
            name: raw.name.clone().unwrap_or_default(),
            followers_count: metrics.followers_count.unwrap_or(0),
            following_count: metrics.following_count.unwrap_or(0),
            tweet_count: metrics.tweet_count.unwrap_or(0),
            listed_count: metrics.listed_count.unwrap_or(0),
            verified: raw.verified.unwrap_or(false),
            created_at: raw.created_at.clone().unwrap_or_default(),
            description: raw.description.clone().unwrap_or_default(),
        }
    }
}

/// Normalizes a whole batch, preserving input order.
pub fn normalize_all<'a, R, N>(raw: &'a [R]) -> Vec<N>
where
    N: From<&'a R>,
{
    raw.iter().map(N::from).collect()
}
