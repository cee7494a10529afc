//! # Socials Analytics Engine
//!
//! This crate turns raw social-media payloads into the three reports served to
//! agents: account summary, tweet performance, and topic volume.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of the network
//!   client or the tool server. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` takes one batch of raw records
//!   and produces one report. It never fails and never holds state between calls.
//!
//! ## Pipeline
//!
//! `normalize` → `aggregate` + `select` (+ `trend` for topics) → `compose`.
//!
//! Input order is significant: ties for the top tweet and the peak bucket go to the
//! earliest item.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod compose;
pub mod engine;
pub mod normalize;
pub mod report;
pub mod select;
pub mod trend;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use report::{
    AccountSummaryReport, AverageEngagement, TimeBucket, TopTweet, TopicVolumeReport,
    TweetMetrics, TweetPerformanceReport,
};
pub use trend::Trend;
