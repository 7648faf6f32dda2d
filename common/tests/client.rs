use common::twitter::{
    TimelineOptions, TwitterClient, TwitterError, TwitterSource, UserListEndpoint, UserListOptions,
};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn timeline_request_carries_fixed_flags_and_cursor() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/statuses/user_timeline.json")
                .header("authorization", "Bearer secret")
                .query_param("count", "200")
                .query_param("exclude_replies", "false")
                .query_param("include_rts", "true")
                .query_param("trim_user", "true")
                .query_param("screen_name", "someone")
                .query_param("max_id", "42");
            then.status(200).json_body(json!([
                {
                    "id": 42,
                    "id_str": "42",
                    "created_at": "Wed Oct 10 20:19:24 +0000 2018",
                    "text": "hello #rust",
                    "in_reply_to_screen_name": "friend",
                    "entities": { "hashtags": [{ "text": "rust", "indices": [6, 11] }] },
                    "user": { "id": 1 }
                }
            ]));
        })
        .await;

    let client = TwitterClient::with_base_url("secret", &server.base_url());
    let tweets = client
        .user_timeline(&TimelineOptions::new(Some("someone"), Some(42)))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(tweets.len(), 1);
    assert_eq!(tweets[0].id, 42);
    assert_eq!(tweets[0].reply_target(), Some("friend"));
    assert_eq!(tweets[0].hashtags(), vec!["rust"]);
}

#[tokio::test]
async fn user_list_decodes_cursor_page() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/friends/list.json")
                .query_param("cursor", "-1")
                .query_param("skip_status", "true");
            then.status(200).json_body(json!({
                "users": [{ "id": 5, "screen_name": "five" }],
                "next_cursor": 1234,
                "previous_cursor": 0
            }));
        })
        .await;

    let client = TwitterClient::with_base_url("secret", &server.base_url());
    let page = client
        .user_list(UserListEndpoint::Friends, &UserListOptions::first(None))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.users[0].screen_name, "five");
    assert_eq!(page.next_cursor, 1234);
}

#[tokio::test]
async fn profile_without_screen_name_uses_credentials_endpoint() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/account/verify_credentials.json");
            then.status(200).json_body(json!({ "id": 1, "screen_name": "me" }));
        })
        .await;

    let client = TwitterClient::with_base_url("secret", &server.base_url());
    let profile = client.profile(None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(profile.screen_name, "me");
}

#[tokio::test]
async fn status_codes_map_to_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/show.json").query_param("screen_name", "limited");
            then.status(429);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/show.json").query_param("screen_name", "locked");
            then.status(401);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/show.json").query_param("screen_name", "gone");
            then.status(404).body("not found");
        })
        .await;

    let client = TwitterClient::with_base_url("secret", &server.base_url());

    assert!(matches!(client.profile(Some("limited")).await, Err(TwitterError::RateLimit)));
    assert!(matches!(client.profile(Some("locked")).await, Err(TwitterError::Unauthorized)));
    match client.profile(Some("gone")).await {
        Err(TwitterError::Api { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "not found");
        }
        other => panic!("unexpected result: {:?}", other.map(|p| p.screen_name)),
    }
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/statuses/user_timeline.json");
            then.status(200).body("{not json");
        })
        .await;

    let client = TwitterClient::with_base_url("secret", &server.base_url());
    let result = client.user_timeline(&TimelineOptions::new(None, None)).await;
    assert!(matches!(result, Err(TwitterError::InvalidResponse(_))));
}
