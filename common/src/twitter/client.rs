use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::error::TwitterError;
use super::source::{TimelineOptions, TwitterSource, UserListEndpoint, UserListOptions};
use super::types::{Profile, Tweet, UserPage};

pub const DEFAULT_API_URL: &str = "https://api.twitter.com/1.1";

#[derive(Clone)]
pub struct TwitterClient {
    client: Client,
    base_url: String,
    bearer_token: String,
}

#[derive(Serialize)]
struct ScreenName<'a> {
    screen_name: &'a str,
}

impl TwitterClient {
    pub fn new(bearer_token: &str) -> Self {
        Self::with_base_url(bearer_token, DEFAULT_API_URL)
    }

    pub fn with_base_url(bearer_token: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.to_string(),
        }
    }

    async fn get<Q, T>(&self, path: &str, query: &Q) -> Result<T, TwitterError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(query)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TwitterError> {
        match response.status() {
            reqwest::StatusCode::OK => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| TwitterError::InvalidResponse(e.to_string()))
            },
            reqwest::StatusCode::UNAUTHORIZED => Err(TwitterError::Unauthorized),
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(TwitterError::RateLimit),
            status => {
                let body = response.text().await?;
                Err(TwitterError::Api { status: status.as_u16(), body })
            }
        }
    }
}

#[async_trait]
impl TwitterSource for TwitterClient {
    async fn user_timeline(&self, options: &TimelineOptions) -> Result<Vec<Tweet>, TwitterError> {
        self.get("statuses/user_timeline.json", options).await
    }

    async fn user_list(
        &self,
        endpoint: UserListEndpoint,
        options: &UserListOptions,
    ) -> Result<UserPage, TwitterError> {
        self.get(endpoint.path(), options).await
    }

    async fn profile(&self, screen_name: Option<&str>) -> Result<Profile, TwitterError> {
        match screen_name {
            Some(screen_name) => self.get("users/show.json", &ScreenName { screen_name }).await,
            None => self.get("account/verify_credentials.json", &[] as &[(&str, &str)]).await,
        }
    }
}
