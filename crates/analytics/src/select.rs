//! Picks the single best item of a collection.
//!
//! The comparator is "strictly greater engagement total replaces the running
//! best", folded left to right from the first element. An item therefore only
//! loses to a later item with a higher total; on ties the earliest item wins.

use crate::aggregate::Engagement;

/// The earliest item with the highest total, or `None` for an empty slice.
pub fn first_max<T: Engagement>(items: &[T]) -> Option<&T> {
    let (first, rest) = items.split_first()?;
    Some(rest.iter().fold(first, |best, current| {
        if current.total() > best.total() {
            current
        } else {
            best
        }
    }))
}

/// Like [`first_max`], falling back to an empty zero-engagement item.
pub fn top_or_placeholder<T>(items: &[T]) -> T
where
    T: Engagement + Clone + Default,
{
    first_max(items).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TweetMetrics;

    fn item(id: &str, total: u64) -> TweetMetrics {
        TweetMetrics {
            tweet_id: id.to_string(),
            total_engagement: total,
            ..Default::default()
        }
    }

    #[test]
    fn picks_the_highest_total() {
        let items = vec![item("a", 3), item("b", 9), item("c", 4)];
        assert_eq!(first_max(&items).unwrap().tweet_id, "b");
    }

    #[test]
    fn earliest_wins_on_tie() {
        let items = vec![item("a", 1), item("b", 7), item("c", 7), item("d", 7)];
        assert_eq!(first_max(&items).unwrap().tweet_id, "b");
    }

    #[test]
    fn all_zero_returns_first() {
        let items = vec![item("a", 0), item("b", 0)];
        assert_eq!(first_max(&items).unwrap().tweet_id, "a");
    }

    #[test]
    fn empty_yields_placeholder() {
        let items: Vec<TweetMetrics> = Vec::new();
        assert!(first_max(&items).is_none());
        let top = top_or_placeholder(&items);
        assert_eq!(top, TweetMetrics::default());
        assert_eq!(top.total_engagement, 0);
    }
}
