use crate::auth::bearer_headers;
use async_trait::async_trait;
use configuration::ApiConfig;
use core_types::{CountsResponse, TimelineResponse, TopicCountRequest, UserResponse};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

mod auth;
pub mod error;
pub mod responses;
// --- Public API ---
pub use error::ApiError;
pub use responses::ApiProblem;

const USER_ANALYTICS_FIELDS: &str = "public_metrics,created_at,description,verified";
const TWEET_FIELDS: &str = "public_metrics,created_at";

/// The abstract interface for the social-media API the reports are built from.
///
/// Each call fetches one finite batch of raw records. A failure is returned as an
/// `ApiError` value and is never retried here. The server and the CLI only depend on
/// this trait, so the live client can be swapped for a canned one in tests.
#[async_trait]
pub trait SocialApiClient: Send + Sync {
    /// Fetches a user profile including public metrics.
    async fn user_analytics(&self, username: &str) -> Result<UserResponse, ApiError>;

    /// Fetches up to `max_results` of a user's most recent tweets with public metrics.
    async fn user_tweets(
        &self,
        username: &str,
        max_results: u32,
    ) -> Result<TimelineResponse, ApiError>;

    /// Fetches time-bucketed tweet counts for a search query.
    async fn topic_tweet_counts(
        &self,
        request: &TopicCountRequest,
    ) -> Result<CountsResponse, ApiError>;
}

/// A concrete implementation of the `SocialApiClient` for the X/Twitter v2 API.
#[derive(Clone)]
pub struct TwitterClient {
    client: reqwest::Client,
    base_url: Url,
}

impl TwitterClient {
    pub fn new(api_config: &ApiConfig) -> Result<Self, ApiError> {
        let headers = bearer_headers(&api_config.bearer_token)?;
        let base_url = Url::parse(&api_config.base_url)
            .map_err(|e| ApiError::InvalidData(format!("Invalid base url '{}': {}", api_config.base_url, e)))?;

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Joins path segments onto the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidData(format!("Base url '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!(path = url.path(), "GET");
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<T>(&text).map_err(|e| ApiError::Deserialization(e.to_string()))
        } else {
            Err(ApiError::Upstream {
                status: status.as_u16(),
                message: ApiProblem::describe(&text),
            })
        }
    }

    /// Looks a user up by username. A lookup without `data` means no such user.
    async fn lookup_user(
        &self,
        username: &str,
        user_fields: Option<&str>,
    ) -> Result<UserResponse, ApiError> {
        let url = self.endpoint(&["2", "users", "by", "username", username])?;
        let query: Vec<(&str, String)> = user_fields
            .map(|fields| vec![("user.fields", fields.to_string())])
            .unwrap_or_default();

        let user: UserResponse = self.get_json(url, &query).await?;
        if user.data.is_none() {
            return Err(ApiError::NotFound(username.to_string()));
        }
        Ok(user)
    }
}

#[async_trait]
impl SocialApiClient for TwitterClient {
    async fn user_analytics(&self, username: &str) -> Result<UserResponse, ApiError> {
        let user = self.lookup_user(username, Some(USER_ANALYTICS_FIELDS)).await?;
        tracing::debug!(username, "Retrieved user analytics.");
        Ok(user)
    }

    async fn user_tweets(
        &self,
        username: &str,
        max_results: u32,
    ) -> Result<TimelineResponse, ApiError> {
        let user = self.lookup_user(username, None).await?;
        let user_id = user
            .data
            .and_then(|u| u.id)
            .ok_or_else(|| ApiError::InvalidData(format!("User '{}' has no id", username)))?;

        let url = self.endpoint(&["2", "users", user_id.as_str(), "tweets"])?;
        let timeline: TimelineResponse = self
            .get_json(
                url,
                &[
                    ("max_results", max_results.to_string()),
                    ("tweet.fields", TWEET_FIELDS.to_string()),
                ],
            )
            .await?;

        tracing::debug!(
            username,
            tweets = timeline.tweets().len(),
            reported = ?timeline.meta.as_ref().and_then(|m| m.result_count),
            "Retrieved user timeline."
        );
        Ok(timeline)
    }

    async fn topic_tweet_counts(
        &self,
        request: &TopicCountRequest,
    ) -> Result<CountsResponse, ApiError> {
        let url = self.endpoint(&["2", "tweets", "counts", "recent"])?;

        let mut query = vec![
            ("query", request.query.clone()),
            ("granularity", request.granularity.as_str().to_string()),
        ];
        // The API applies its own window when the bounds are left out.
        if let Some(start) = &request.start_time {
            query.push(("start_time", start.clone()));
        }
        if let Some(end) = &request.end_time {
            query.push(("end_time", end.clone()));
        }

        let counts: CountsResponse = self.get_json(url, &query).await?;
        tracing::debug!(
            query = %request.query,
            buckets = counts.buckets().len(),
            reported_total = ?counts.meta.as_ref().and_then(|m| m.total_tweet_count),
            "Retrieved topic tweet counts."
        );
        Ok(counts)
    }
}
