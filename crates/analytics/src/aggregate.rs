//! Per-item engagement totals and collection-wide means.

use crate::normalize::{NormalizedBucket, NormalizedTweet};
use crate::report::{AverageEngagement, TweetMetrics};
use rust_decimal::{Decimal, RoundingStrategy};

/// Anything that carries a single engagement scalar.
pub trait Engagement {
    fn total(&self) -> u64;
}

/// The sub-counts that together make up a tweet's engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementField {
    Likes,
    Retweets,
    Replies,
    Quotes,
}

impl EngagementField {
    pub const ALL: [EngagementField; 4] = [
        EngagementField::Likes,
        EngagementField::Retweets,
        EngagementField::Replies,
        EngagementField::Quotes,
    ];

    pub fn of(self, tweet: &NormalizedTweet) -> u64 {
        match self {
            EngagementField::Likes => tweet.like_count,
            EngagementField::Retweets => tweet.retweet_count,
            EngagementField::Replies => tweet.reply_count,
            EngagementField::Quotes => tweet.quote_count,
        }
    }
}

impl Engagement for NormalizedTweet {
    fn total(&self) -> u64 {
        EngagementField::ALL
            .iter()
            .fold(0u64, |acc, field| acc.saturating_add(field.of(self)))
    }
}

impl Engagement for NormalizedBucket {
    fn total(&self) -> u64 {
        self.tweet_count
    }
}

impl Engagement for TweetMetrics {
    fn total(&self) -> u64 {
        self.total_engagement
    }
}

/// Unrounded means over a batch of tweets.
///
/// Stored report values are these rounded to cents; narrative text rounds them to
/// whole numbers instead. The two rules are independent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngagementMeans {
    pub likes: Decimal,
    pub retweets: Decimal,
    pub replies: Decimal,
    pub quotes: Decimal,
    pub total: Decimal,
}

impl EngagementMeans {
    pub fn of(tweets: &[NormalizedTweet]) -> Self {
        let field_mean = |field: EngagementField| mean(tweets.iter().map(|t| field.of(t)));
        Self {
            likes: field_mean(EngagementField::Likes),
            retweets: field_mean(EngagementField::Retweets),
            replies: field_mean(EngagementField::Replies),
            quotes: field_mean(EngagementField::Quotes),
            total: mean(tweets.iter().map(Engagement::total)),
        }
    }

    pub fn rounded(&self) -> AverageEngagement {
        AverageEngagement {
            likes: round_cents(self.likes),
            retweets: round_cents(self.retweets),
            replies: round_cents(self.replies),
            quotes: round_cents(self.quotes),
            total: round_cents(self.total),
        }
    }
}

/// The result of aggregating one batch of tweets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngagementAggregate {
    /// Input tweets in input order, each with its engagement total.
    pub tweets: Vec<TweetMetrics>,
    pub means: EngagementMeans,
    pub average: AverageEngagement,
}

pub fn aggregate(tweets: &[NormalizedTweet]) -> EngagementAggregate {
    let means = EngagementMeans::of(tweets);
    let average = means.rounded();
    let tweets = tweets
        .iter()
        .map(|t| TweetMetrics {
            tweet_id: t.id.clone(),
            text: t.text.clone(),
            created_at: t.created_at.clone(),
            like_count: t.like_count,
            retweet_count: t.retweet_count,
            reply_count: t.reply_count,
            quote_count: t.quote_count,
            total_engagement: t.total(),
        })
        .collect();

    EngagementAggregate { tweets, means, average }
}

pub fn sum_totals<T: Engagement>(items: &[T]) -> u64 {
    items.iter().fold(0u64, |acc, item| acc.saturating_add(item.total()))
}

/// Arithmetic mean over the values actually present. Zero for no values.
pub fn mean<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = u64>,
{
    let (count, sum) = values
        .into_iter()
        .fold((0u64, 0u64), |(n, s), v| (n + 1, s.saturating_add(v)));
    if count == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(sum) / Decimal::from(count)
}

/// Two decimal places, half away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole number, half away from zero. Used only for narrative text.
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tweet(likes: u64, retweets: u64, replies: u64, quotes: u64) -> NormalizedTweet {
        NormalizedTweet {
            like_count: likes,
            retweet_count: retweets,
            reply_count: replies,
            quote_count: quotes,
            ..Default::default()
        }
    }

    #[test]
    fn total_sums_all_four_fields() {
        assert_eq!(tweet(1, 2, 3, 4).total(), 10);
        assert_eq!(NormalizedTweet::default().total(), 0);
    }

    #[test]
    fn bucket_total_is_its_count() {
        let bucket = NormalizedBucket { tweet_count: 17, ..Default::default() };
        assert_eq!(bucket.total(), 17);
    }

    #[test]
    fn empty_batch_degrades_to_zero() {
        let agg = aggregate(&[]);
        assert!(agg.tweets.is_empty());
        assert_eq!(agg.average, AverageEngagement::default());
        assert_eq!(agg.means.total, Decimal::ZERO);
    }

    #[test]
    fn averages_round_to_cents() {
        let agg = aggregate(&[tweet(1, 0, 0, 0), tweet(1, 0, 0, 0), tweet(0, 0, 0, 0)]);
        assert_eq!(agg.average.likes, dec!(0.67));
        assert_eq!(agg.average.total, dec!(0.67));
        assert_eq!(agg.tweets[0].total_engagement, 1);
    }

    #[test]
    fn midpoints_round_away_from_zero() {
        assert_eq!(round_cents(dec!(2.345)), dec!(2.35));
        assert_eq!(round_cents(dec!(2.344)), dec!(2.34));
        assert_eq!(round_whole(dec!(2.5)), dec!(3));
        assert_eq!(round_whole(dec!(2.49)), dec!(2));
    }

    #[test]
    fn narrative_and_stored_rounding_can_differ() {
        // 2.495 rounds to 2.50 when stored but displays as 2, not 3.
        let raw = dec!(2.495);
        assert_eq!(round_cents(raw), dec!(2.50));
        assert_eq!(round_whole(raw), dec!(2));
    }

    #[test]
    fn mean_ignores_nominal_sizes() {
        assert_eq!(mean([10u64, 20]), dec!(15));
        assert_eq!(mean(Vec::<u64>::new()), Decimal::ZERO);
    }

    #[test]
    fn sum_totals_over_buckets() {
        let buckets = vec![
            NormalizedBucket { tweet_count: 3, ..Default::default() },
            NormalizedBucket { tweet_count: 4, ..Default::default() },
        ];
        assert_eq!(sum_totals(&buckets), 7);
    }
}
