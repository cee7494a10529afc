//! Caller-facing request types for the three report operations.
//!
//! Field names follow the camelCase of the tool input schemas. Deserialization
//! applies the schema defaults; `validate` enforces the remaining constraints.

use crate::enums::Granularity;
use crate::error::CoreError;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Lower bound of `maxResults`, inclusive.
pub const MIN_MAX_RESULTS: u32 = 5;
/// Upper bound of `maxResults`, inclusive.
pub const MAX_MAX_RESULTS: u32 = 100;
pub const DEFAULT_MAX_RESULTS: u32 = 10;

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalyticsRequest {
    /// Username without the leading `@`.
    pub username: String,
}

impl UserAnalyticsRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("username", &self.username)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetPerformanceRequest {
    pub username: String,
    /// How many recent tweets to request upstream.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl TweetPerformanceRequest {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("username", &self.username)?;
        if !(MIN_MAX_RESULTS..=MAX_MAX_RESULTS).contains(&self.max_results) {
            return Err(CoreError::InvalidInput(
                "maxResults".to_string(),
                format!(
                    "must be between {} and {} but was {}",
                    MIN_MAX_RESULTS, MAX_MAX_RESULTS, self.max_results
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicCountRequest {
    /// Search query, hashtag or keyword.
    pub query: String,
    /// ISO-8601 start of the window. The upstream default is seven days ago.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// ISO-8601 end of the window. The upstream default is now.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub granularity: Granularity,
}

impl TopicCountRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            start_time: None,
            end_time: None,
            granularity: Granularity::default(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("query", &self.query)?;
        let start = self
            .start_time
            .as_deref()
            .map(|s| parse_timestamp("startTime", s))
            .transpose()?;
        let end = self
            .end_time
            .as_deref()
            .map(|s| parse_timestamp("endTime", s))
            .transpose()?;
        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                return Err(CoreError::InvalidInput(
                    "startTime".to_string(),
                    "must be earlier than endTime".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::MissingField(field.to_string()));
    }
    Ok(())
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<FixedOffset>, CoreError> {
    DateTime::parse_from_rfc3339(value).map_err(|e| {
        CoreError::InvalidInput(
            field.to_string(),
            format!("'{}' is not an ISO-8601 timestamp ({})", value, e),
        )
    })
}
