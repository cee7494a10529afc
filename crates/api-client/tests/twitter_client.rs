use api_client::{ApiError, SocialApiClient, TwitterClient};
use configuration::ApiConfig;
use core_types::{Granularity, TopicCountRequest};
use httpmock::prelude::*;
use serde_json::json;

fn client_for(server: &MockServer) -> TwitterClient {
    let config = ApiConfig {
        base_url: server.base_url(),
        bearer_token: "token".to_string(),
        timeout_secs: 5,
    };
    TwitterClient::new(&config).expect("client")
}

#[tokio::test]
async fn user_analytics_requests_metric_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/2/users/by/username/jack")
                .header("authorization", "Bearer token")
                .query_param("user.fields", "public_metrics,created_at,description,verified");
            then.status(200).json_body(json!({
                "data": {
                    "id": "12",
                    "username": "jack",
                    "name": "jack",
                    "verified": true,
                    "public_metrics": {"followers_count": 100, "following_count": 3, "tweet_count": 50, "listed_count": 1}
                }
            }));
        })
        .await;

    let user = client_for(&server).user_analytics("jack").await.unwrap();
    mock.assert_async().await;

    let data = user.data.unwrap();
    assert_eq!(data.id.as_deref(), Some("12"));
    assert_eq!(data.verified, Some(true));
    assert_eq!(data.public_metrics.unwrap().followers_count, Some(100));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/2/users/by/username/ghost");
            then.status(200).json_body(json!({
                "errors": [{"detail": "Could not find user with username: [ghost]."}]
            }));
        })
        .await;

    let err = client_for(&server).user_analytics("ghost").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(name) if name == "ghost"));
}

#[tokio::test]
async fn user_tweets_resolves_id_then_reads_timeline() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET).path("/2/users/by/username/jack");
            then.status(200).json_body(json!({"data": {"id": "12", "username": "jack"}}));
        })
        .await;
    let timeline = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/2/users/12/tweets")
                .query_param("max_results", "25")
                .query_param("tweet.fields", "public_metrics,created_at");
            then.status(200).json_body(json!({
                "data": [
                    {"id": "1", "text": "a", "public_metrics": {"like_count": 2}},
                    {"id": "2", "text": "b"}
                ],
                "meta": {"result_count": 2}
            }));
        })
        .await;

    let result = client_for(&server).user_tweets("jack", 25).await.unwrap();
    lookup.assert_async().await;
    timeline.assert_async().await;

    assert_eq!(result.tweets().len(), 2);
    assert!(result.tweets()[1].public_metrics.is_none());
    assert_eq!(result.meta.and_then(|m| m.result_count), Some(2));
}

#[tokio::test]
async fn topic_counts_send_query_and_window() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/2/tweets/counts/recent")
                .query_param("query", "rustlang")
                .query_param("granularity", "day")
                .query_param("start_time", "2024-01-01T00:00:00Z");
            then.status(200).json_body(json!({
                "data": [{"start": "s", "end": "e", "tweet_count": 7}],
                "meta": {"total_tweet_count": 7}
            }));
        })
        .await;

    let mut request = TopicCountRequest::new("rustlang");
    request.granularity = Granularity::Day;
    request.start_time = Some("2024-01-01T00:00:00Z".to_string());

    let counts = client_for(&server).topic_tweet_counts(&request).await.unwrap();
    mock.assert_async().await;
    assert_eq!(counts.buckets()[0].tweet_count, Some(7));
    assert_eq!(counts.meta.and_then(|m| m.total_tweet_count), Some(7));
}

#[tokio::test]
async fn error_status_carries_problem_detail() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/2/tweets/counts/recent");
            then.status(429).json_body(json!({"title": "Too Many Requests", "detail": "Too Many Requests", "status": 429}));
        })
        .await;

    let err = client_for(&server)
        .topic_tweet_counts(&TopicCountRequest::new("x"))
        .await
        .unwrap_err();
    match err {
        ApiError::Upstream { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Too Many Requests");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_token_is_rejected_up_front() {
    let config = ApiConfig::default();
    assert!(matches!(TwitterClient::new(&config), Err(ApiError::MissingCredentials)));
}
