use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::error::ReportError;

// v1.1 timestamp layout, e.g. "Wed Oct 10 20:19:24 +0000 2018"
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: u64,
    #[serde(default)]
    pub id_str: String,
    pub created_at: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub in_reply_to_status_id: Option<u64>,
    #[serde(default)]
    pub in_reply_to_screen_name: Option<String>,
    #[serde(default)]
    pub entities: Entities,
    #[serde(default)]
    pub retweet_count: u32,
    #[serde(default)]
    pub favorite_count: u32,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<Hashtag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hashtag {
    pub text: String,
}

impl Tweet {
    /// Parses `created_at` into an absolute instant.
    ///
    /// The API format is tried first, RFC 3339 second (fixtures written by hand
    /// tend to use it).
    pub fn created_at(&self) -> Result<DateTime<Utc>, ReportError> {
        DateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(&self.created_at))
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ReportError::InvalidTimestamp {
                id: self.id,
                value: self.created_at.clone(),
            })
    }

    /// Distinct hashtag texts carried by this tweet, first occurrence first.
    pub fn hashtags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::with_capacity(self.entities.hashtags.len());
        for hashtag in &self.entities.hashtags {
            if !tags.contains(&hashtag.text.as_str()) {
                tags.push(&hashtag.text);
            }
        }
        tags
    }

    pub fn reply_target(&self) -> Option<&str> {
        self.in_reply_to_screen_name.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub next_cursor: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub friends_count: u64,
    #[serde(default)]
    pub statuses_count: u64,
    #[serde(default)]
    pub favourites_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
}
