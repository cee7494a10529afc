pub mod enums;
pub mod error;
pub mod lenient;
pub mod requests;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::Granularity;
pub use error::CoreError;
pub use requests::{TopicCountRequest, TweetPerformanceRequest, UserAnalyticsRequest};
pub use structs::{
    CountsMeta, CountsResponse, RawBucket, RawTweet, RawUser, TimelineMeta, TimelineResponse,
    TweetPublicMetrics, UserPublicMetrics, UserResponse,
};
