//! The three report operations, exposed as callable tools.
//!
//! A call runs in three steps: validate arguments, fetch raw records, and run the
//! analytics engine. An upstream failure short-circuits to an error payload
//! without touching the engine; there is no partial report.

use crate::error::AppError;
use analytics::AnalyticsEngine;
use api_client::{ApiError, SocialApiClient};
use core_types::requests::{DEFAULT_MAX_RESULTS, MAX_MAX_RESULTS, MIN_MAX_RESULTS};
use core_types::{TopicCountRequest, TweetPerformanceRequest, UserAnalyticsRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    UserAnalytics,
    TweetPerformance,
    TopicTweetCount,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::UserAnalytics, Tool::TweetPerformance, Tool::TopicTweetCount];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::UserAnalytics => "getUserAnalytics",
            Tool::TweetPerformance => "getUserTweetPerformance",
            Tool::TopicTweetCount => "getTopicTweetCount",
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tool::UserAnalytics => "Twitter user analytics tool",
            Tool::TweetPerformance => "Twitter user tweet performance analytics tool",
            Tool::TopicTweetCount => "Twitter topic tweet count analytics tool",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::UserAnalytics => {
                "Retrieves analytics for a Twitter/X user: follower, following, tweet and listed counts plus profile details. \
                 Use this for questions about an account's influence, size, or basic statistics."
            }
            Tool::TweetPerformance => {
                "Retrieves a user's recent tweets with likes, retweets, replies and quotes, the average engagement, \
                 and the top performing tweet. Use this to compare tweets or understand audience engagement."
            }
            Tool::TopicTweetCount => {
                "Retrieves time-bucketed tweet volume for a topic, hashtag or search query, with the peak period \
                 and whether volume is increasing, decreasing or stable over the window."
            }
        }
    }

    /// JSON schema of the tool's arguments object.
    pub fn input_schema(&self) -> Value {
        let username = json!({
            "type": "string",
            "description": "Twitter/X username without the @ symbol, e.g. 'jack'"
        });
        match self {
            Tool::UserAnalytics => json!({
                "type": "object",
                "properties": { "username": username },
                "required": ["username"]
            }),
            Tool::TweetPerformance => json!({
                "type": "object",
                "properties": {
                    "username": username,
                    "maxResults": {
                        "type": "integer",
                        "minimum": MIN_MAX_RESULTS,
                        "maximum": MAX_MAX_RESULTS,
                        "default": DEFAULT_MAX_RESULTS,
                        "description": "Number of recent tweets to retrieve"
                    }
                },
                "required": ["username"]
            }),
            Tool::TopicTweetCount => json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query, hashtag (with or without #), keyword or topic"
                    },
                    "startTime": {
                        "type": "string",
                        "description": "ISO 8601 start time. Defaults to 7 days ago."
                    },
                    "endTime": {
                        "type": "string",
                        "description": "ISO 8601 end time. Defaults to now."
                    },
                    "granularity": {
                        "type": "string",
                        "enum": ["minute", "hour", "day"],
                        "default": "hour",
                        "description": "Width of each count bucket"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    /// JSON schema of the report returned as `structuredContent`.
    pub fn output_schema(&self) -> Value {
        match self {
            Tool::UserAnalytics => object_schema(json!({
                "userId": string(),
                "username": string(),
                "name": string(),
                "followersCount": integer(),
                "followingCount": integer(),
                "tweetCount": integer(),
                "listedCount": integer(),
                "verified": { "type": "boolean" },
                "createdAt": string(),
                "description": string(),
                "analyticsSummary": string()
            })),
            Tool::TweetPerformance => object_schema(json!({
                "username": string(),
                "totalTweetsRetrieved": integer(),
                "tweets": {
                    "type": "array",
                    "items": object_schema(json!({
                        "tweetId": string(),
                        "text": string(),
                        "createdAt": string(),
                        "likeCount": integer(),
                        "retweetCount": integer(),
                        "replyCount": integer(),
                        "quoteCount": integer(),
                        "totalEngagement": integer()
                    }))
                },
                "averageEngagement": object_schema(json!({
                    "likes": number(),
                    "retweets": number(),
                    "replies": number(),
                    "quotes": number(),
                    "total": number()
                })),
                "topTweet": object_schema(json!({
                    "tweetId": string(),
                    "text": string(),
                    "totalEngagement": integer()
                })),
                "performanceSummary": string()
            })),
            Tool::TopicTweetCount => {
                let bucket = object_schema(json!({
                    "start": string(),
                    "end": string(),
                    "tweetCount": integer()
                }));
                object_schema(json!({
                    "query": string(),
                    "startTime": string(),
                    "endTime": string(),
                    "granularity": { "type": "string", "enum": ["minute", "hour", "day"] },
                    "totalTweetCount": integer(),
                    "timeBuckets": { "type": "array", "items": bucket },
                    "peakPeriod": bucket,
                    "trendAnalysis": string()
                }))
            }
        }
    }

    /// The message returned in place of a report when the fetch fails.
    pub fn fetch_failure_message(&self) -> &'static str {
        match self {
            Tool::UserAnalytics => "Failed to fetch user analytics",
            Tool::TweetPerformance => "Failed to fetch tweet details",
            Tool::TopicTweetCount => "Failed to fetch topic tweet count",
        }
    }

    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            title: self.title().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
            output_schema: self.output_schema(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub title: String,
    pub description: String,
    pub input_schema: Value,
    pub output_schema: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// The result envelope of a tool call: a JSON text rendering plus, on success,
/// the same report as a structured object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

impl ToolResult {
    pub fn report<T: Serialize>(report: &T) -> Result<Self, AppError> {
        let value = serde_json::to_value(report)?;
        Ok(Self {
            content: vec![ToolContent::Text { text: value.to_string() }],
            structured_content: Some(value),
        })
    }

    pub fn fetch_failure(message: &str) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: json!({ "error": message }).to_string(),
            }],
            structured_content: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.structured_content.is_none()
    }
}

/// Runs one tool call end to end.
pub async fn invoke(
    client: &dyn SocialApiClient,
    engine: &AnalyticsEngine,
    tool: Tool,
    arguments: Value,
) -> Result<ToolResult, AppError> {
    match tool {
        Tool::UserAnalytics => {
            let request: UserAnalyticsRequest = parse_arguments(arguments)?;
            request.validate()?;
            match client.user_analytics(&request.username).await {
                Ok(user) => ToolResult::report(&engine.account_summary(&user)),
                Err(e) => Ok(fetch_failed(tool, &e)),
            }
        }
        Tool::TweetPerformance => {
            let request: TweetPerformanceRequest = parse_arguments(arguments)?;
            request.validate()?;
            match client.user_tweets(&request.username, request.max_results).await {
                Ok(timeline) => {
                    ToolResult::report(&engine.tweet_performance(&request.username, &timeline))
                }
                Err(e) => Ok(fetch_failed(tool, &e)),
            }
        }
        Tool::TopicTweetCount => {
            let request: TopicCountRequest = parse_arguments(arguments)?;
            request.validate()?;
            match client.topic_tweet_counts(&request).await {
                Ok(counts) => ToolResult::report(&engine.topic_volume(&request, &counts)),
                Err(e) => Ok(fetch_failed(tool, &e)),
            }
        }
    }
}

fn string() -> Value {
    json!({ "type": "string" })
}

fn integer() -> Value {
    json!({ "type": "integer" })
}

fn number() -> Value {
    json!({ "type": "number" })
}

/// An object schema in which every listed property is required.
fn object_schema(properties: Value) -> Value {
    let required: Vec<String> = properties
        .as_object()
        .map(|props| props.keys().cloned().collect())
        .unwrap_or_default();
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, AppError> {
    serde_json::from_value(arguments).map_err(|e| AppError::InvalidInput(e.to_string()))
}

fn fetch_failed(tool: Tool, error: &ApiError) -> ToolResult {
    tracing::error!(tool = tool.name(), error = %error, "Upstream fetch failed.");
    ToolResult::fetch_failure(tool.fetch_failure_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name("sayHello"), None);
    }

    #[test]
    fn schemas_mark_required_fields() {
        assert_eq!(Tool::UserAnalytics.input_schema()["required"], json!(["username"]));
        assert_eq!(Tool::TopicTweetCount.input_schema()["required"], json!(["query"]));
        assert_eq!(
            Tool::TweetPerformance.input_schema()["properties"]["maxResults"]["maximum"],
            json!(100)
        );
    }

    /// Every key of `value` is described by `schema`, and nothing more, recursively.
    fn assert_schema_matches(schema: &Value, value: &Value, path: &str) {
        match value {
            Value::Object(fields) => {
                let properties = schema["properties"].as_object().unwrap();
                let mut described: Vec<&String> = properties.keys().collect();
                let mut present: Vec<&String> = fields.keys().collect();
                described.sort();
                present.sort();
                assert_eq!(described, present, "properties of {path}");
                for (key, field) in fields {
                    assert_schema_matches(&properties[key], field, &format!("{path}.{key}"));
                }
            }
            Value::Array(items) => {
                for item in items {
                    assert_schema_matches(&schema["items"], item, &format!("{path}[]"));
                }
            }
            _ => {}
        }
    }

    #[test]
    fn output_schemas_describe_the_reports() {
        use core_types::{CountsResponse, TimelineResponse, UserResponse};

        let engine = AnalyticsEngine::new();
        let timeline: TimelineResponse = serde_json::from_value(json!({
            "data": [{"id": "1", "text": "hi", "public_metrics": {"like_count": 3}}]
        }))
        .unwrap();
        let counts: CountsResponse = serde_json::from_value(json!({
            "data": [{"start": "a", "end": "b", "tweet_count": 4}]
        }))
        .unwrap();

        let summary = serde_json::to_value(engine.account_summary(&UserResponse::default())).unwrap();
        let performance = serde_json::to_value(engine.tweet_performance("jack", &timeline)).unwrap();
        let volume = serde_json::to_value(
            engine.topic_volume(&TopicCountRequest::new("rust"), &counts),
        )
        .unwrap();

        assert_schema_matches(&Tool::UserAnalytics.output_schema(), &summary, "account");
        assert_schema_matches(&Tool::TweetPerformance.output_schema(), &performance, "performance");
        assert_schema_matches(&Tool::TopicTweetCount.output_schema(), &volume, "topic");
    }

    #[test]
    fn fetch_failure_has_no_structured_content() {
        let result = ToolResult::fetch_failure("Failed to fetch user analytics");
        assert!(result.is_error());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "{\"error\":\"Failed to fetch user analytics\"}"}]})
        );
    }

    #[test]
    fn report_envelope_carries_text_and_structure() {
        let result = ToolResult::report(&json!({"a": 1})).unwrap();
        assert_eq!(result.structured_content, Some(json!({"a": 1})));
        assert_eq!(result.content, vec![ToolContent::Text { text: "{\"a\":1}".to_string() }]);
    }
}
