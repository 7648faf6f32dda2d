use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, info};

use super::error::TwitterError;
use super::source::{TimelineOptions, TwitterSource, UserListEndpoint, UserListOptions};
use super::types::{Profile, Tweet, User, UserPage};

const TWEETS_FILE: &str = "tweets.json";
const PROFILE_FILE: &str = "profile.json";
const FOLLOWERS_FILE: &str = "followers.json";
const FRIENDS_FILE: &str = "friends.json";

/// Offline source backed by JSON fixtures in one directory.
///
/// Timeline pages start at the tweet whose id equals `max_id`, the same
/// inclusive overlap the live endpoint has.
pub struct StubSource {
    tweets: Vec<Tweet>,
    profile: Profile,
    followers: Vec<User>,
    friends: Vec<User>,
}

impl StubSource {
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, TwitterError> {
        let dir = dir.as_ref();
        let tweets: Vec<Tweet> = read_json(&dir.join(TWEETS_FILE)).await?;
        let profile: Profile = read_json(&dir.join(PROFILE_FILE)).await?;
        let followers = read_optional(dir.join(FOLLOWERS_FILE)).await?;
        let friends = read_optional(dir.join(FRIENDS_FILE)).await?;

        info!(
            "Loaded stub fixtures from {}: {} tweets, {} followers, {} friends",
            dir.display(),
            tweets.len(),
            followers.len(),
            friends.len()
        );

        Ok(Self { tweets, profile, followers, friends })
    }

    pub fn from_parts(
        tweets: Vec<Tweet>,
        profile: Profile,
        followers: Vec<User>,
        friends: Vec<User>,
    ) -> Self {
        Self { tweets, profile, followers, friends }
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TwitterError> {
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

async fn read_optional(path: PathBuf) -> Result<Vec<User>, TwitterError> {
    if fs::try_exists(&path).await? {
        read_json(&path).await
    } else {
        Ok(Vec::new())
    }
}

#[async_trait]
impl TwitterSource for StubSource {
    async fn user_timeline(&self, options: &TimelineOptions) -> Result<Vec<Tweet>, TwitterError> {
        let begin = options
            .max_id
            .and_then(|max_id| self.tweets.iter().position(|t| t.id == max_id))
            .unwrap_or(0);
        let end = (begin + options.count as usize).min(self.tweets.len());
        debug!("stub timeline slice {}..{}", begin, end);

        Ok(self.tweets[begin..end].to_vec())
    }

    async fn user_list(
        &self,
        endpoint: UserListEndpoint,
        options: &UserListOptions,
    ) -> Result<UserPage, TwitterError> {
        let users = match endpoint {
            UserListEndpoint::Followers => &self.followers,
            UserListEndpoint::Friends => &self.friends,
        };

        let begin = if options.cursor < 0 { 0 } else { options.cursor as usize };
        let begin = begin.min(users.len());
        let end = (begin + options.count as usize).min(users.len());
        let next_cursor = if end >= users.len() { 0 } else { end as i64 };

        Ok(UserPage {
            users: users[begin..end].to_vec(),
            next_cursor,
        })
    }

    async fn profile(&self, _screen_name: Option<&str>) -> Result<Profile, TwitterError> {
        Ok(self.profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tweet(id: u64) -> Tweet {
        Tweet {
            id,
            created_at: "Mon Jan 01 00:00:00 +0000 2024".to_string(),
            ..Default::default()
        }
    }

    fn user(id: u64) -> User {
        User { id, screen_name: format!("user{}", id), ..Default::default() }
    }

    #[tokio::test]
    async fn timeline_page_starts_at_max_id() {
        let tweets = (1..=5).rev().map(tweet).collect();
        let stub = StubSource::from_parts(tweets, Profile::default(), vec![], vec![]);

        let mut options = TimelineOptions::new(None, Some(3));
        options.count = 2;
        let page = stub.user_timeline(&options).await.unwrap();
        let ids: Vec<u64> = page.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[tokio::test]
    async fn last_record_is_returned_alone() {
        let tweets = (1..=3).rev().map(tweet).collect();
        let stub = StubSource::from_parts(tweets, Profile::default(), vec![], vec![]);

        let page = stub.user_timeline(&TimelineOptions::new(None, Some(1))).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, 1);
    }

    #[tokio::test]
    async fn user_list_pages_until_zero_cursor() {
        let users = (1..=450).map(user).collect();
        let stub = StubSource::from_parts(vec![], Profile::default(), users, vec![]);

        let first = stub
            .user_list(UserListEndpoint::Followers, &UserListOptions::first(None))
            .await
            .unwrap();
        assert_eq!(first.users.len(), 200);
        assert_eq!(first.next_cursor, 200);

        let last = stub
            .user_list(UserListEndpoint::Followers, &UserListOptions::new(None, 400))
            .await
            .unwrap();
        assert_eq!(last.users.len(), 50);
        assert_eq!(last.next_cursor, 0);

        let friends = stub
            .user_list(UserListEndpoint::Friends, &UserListOptions::first(None))
            .await
            .unwrap();
        assert!(friends.users.is_empty());
        assert_eq!(friends.next_cursor, 0);
    }

    #[tokio::test]
    async fn opens_fixture_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(TWEETS_FILE),
            r#"[{"id": 2, "created_at": "Tue Jan 02 00:00:00 +0000 2024"},
                {"id": 1, "created_at": "Mon Jan 01 00:00:00 +0000 2024"}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(PROFILE_FILE),
            r#"{"id": 9, "screen_name": "someone", "followers_count": 3}"#,
        )
        .unwrap();

        let stub = StubSource::open(dir.path()).await.unwrap();
        let profile = stub.profile(Some("ignored")).await.unwrap();
        assert_eq!(profile.screen_name, "someone");
        assert_eq!(profile.followers_count, 3);

        let page = stub.user_timeline(&TimelineOptions::new(None, None)).await.unwrap();
        assert_eq!(page.len(), 2);
    }

    #[tokio::test]
    async fn missing_tweets_file_is_a_fixture_error() {
        let dir = tempfile::tempdir().unwrap();
        match StubSource::open(dir.path()).await {
            Err(TwitterError::Fixture(_)) => {}
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected an error"),
        }
    }
}
