use async_trait::async_trait;
use serde::Serialize;

use super::error::TwitterError;
use super::types::{Profile, Tweet, UserPage};

/// Records requested per call, for both timelines and user lists.
pub const PAGE_SIZE: u32 = 200;

/// Cursor value that starts a user list walk.
pub const FIRST_CURSOR: i64 = -1;

/// Query for one page of `statuses/user_timeline`.
///
/// Replies and retweets are always requested; filtering belongs to aggregation.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineOptions {
    pub count: u32,
    pub exclude_replies: bool,
    pub include_rts: bool,
    pub trim_user: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_id: Option<u64>,
}

impl TimelineOptions {
    pub fn new(screen_name: Option<&str>, max_id: Option<u64>) -> Self {
        Self {
            count: PAGE_SIZE,
            exclude_replies: false,
            include_rts: true,
            trim_user: true,
            screen_name: screen_name.map(str::to_string),
            max_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserListEndpoint {
    Followers,
    Friends,
}

impl UserListEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            UserListEndpoint::Followers => "followers/list.json",
            UserListEndpoint::Friends => "friends/list.json",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListOptions {
    pub count: u32,
    pub skip_status: bool,
    pub cursor: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,
}

impl UserListOptions {
    pub fn new(screen_name: Option<&str>, cursor: i64) -> Self {
        Self {
            count: PAGE_SIZE,
            skip_status: true,
            cursor,
            screen_name: screen_name.map(str::to_string),
        }
    }

    pub fn first(screen_name: Option<&str>) -> Self {
        Self::new(screen_name, FIRST_CURSOR)
    }
}

/// Page-level access to the social API.
///
/// Implemented by the HTTP client and by the fixture-backed stub; the report
/// pipeline only ever sees this trait.
#[async_trait]
pub trait TwitterSource: Send + Sync {
    /// One page of a user timeline, newest first.
    async fn user_timeline(&self, options: &TimelineOptions) -> Result<Vec<Tweet>, TwitterError>;

    /// One cursor page of followers or friends.
    async fn user_list(
        &self,
        endpoint: UserListEndpoint,
        options: &UserListOptions,
    ) -> Result<UserPage, TwitterError>;

    /// Profile of `screen_name`, or of the authenticated account when `None`.
    async fn profile(&self, screen_name: Option<&str>) -> Result<Profile, TwitterError>;
}
