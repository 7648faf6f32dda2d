use std::collections::HashSet;

use common::twitter::{
    TimelineOptions, TwitterError, TwitterSource, User, UserListEndpoint, UserListOptions,
};
use common::Tweet;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Walks a user timeline backwards with `max_id` until it is exhausted.
///
/// The endpoint treats `max_id` as inclusive, so every page after the first
/// repeats the previous page's oldest tweet. Tweets are kept in arrival order
/// and the first copy of each id wins. The walk stops on an empty page or when
/// a page does not move the cursor, which is how the API signals that only
/// the boundary tweet is left.
///
/// Any transport error aborts the walk and nothing collected so far is returned.
pub async fn fetch_timeline<S>(
    source: &S,
    screen_name: Option<&str>,
) -> Result<Vec<Tweet>, TwitterError>
where
    S: TwitterSource + ?Sized,
{
    let mut result: Vec<Tweet> = Vec::new();
    let mut seen: HashSet<u64> = HashSet::new();
    let mut max_id: Option<u64> = None;

    loop {
        let options = TimelineOptions::new(screen_name, max_id);
        let page = source.user_timeline(&options).await?;

        let Some(last_id) = page.last().map(|t| t.id) else {
            break;
        };
        debug!(count = page.len(), last_id, "received timeline page");

        let exhausted = max_id == Some(last_id);
        if exhausted && page.len() > 1 {
            warn!(last_id, "timeline page did not advance past the cursor, stopping");
        }

        for tweet in page {
            if seen.insert(tweet.id) {
                result.push(tweet);
            }
        }

        if exhausted {
            break;
        }
        max_id = Some(last_id);
    }

    info!("Fetched {} tweets", result.len());
    Ok(result)
}

/// Collects every page of followers or friends.
///
/// Cursor pages do not overlap, so users are concatenated as they arrive.
pub async fn fetch_user_list<S>(
    source: &S,
    endpoint: UserListEndpoint,
    screen_name: Option<&str>,
) -> Result<Vec<User>, TwitterError>
where
    S: TwitterSource + ?Sized,
{
    let mut users = Vec::new();
    let mut options = UserListOptions::first(screen_name);

    loop {
        let page = source.user_list(endpoint, &options).await?;
        debug!(
            count = page.users.len(),
            next_cursor = page.next_cursor,
            "received {:?} page",
            endpoint
        );
        users.extend(page.users);

        if page.next_cursor == 0 {
            break;
        }
        if page.next_cursor == options.cursor {
            warn!(cursor = page.next_cursor, "{:?} cursor repeated, stopping", endpoint);
            break;
        }
        options.cursor = page.next_cursor;
    }

    info!("Fetched {} users from {:?}", users.len(), endpoint);
    Ok(users)
}

#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    pub followers: Vec<User>,
    pub friends: Vec<User>,
}

/// Handle sets derived from a [`SocialGraph`], ready for the report.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SocialGraphSummary {
    pub followers_count: usize,
    pub friends_count: usize,
    pub mutual: Vec<String>,
    pub followers_only: Vec<String>,
    pub friends_only: Vec<String>,
}

impl SocialGraph {
    /// Accounts that both follow and are followed, in follower order.
    pub fn mutual(&self) -> Vec<String> {
        let friends = handles(&self.friends);
        self.followers
            .iter()
            .filter(|u| friends.contains(u.screen_name.as_str()))
            .map(|u| u.screen_name.clone())
            .collect()
    }

    /// Followers that are not followed back.
    pub fn followers_only(&self) -> Vec<String> {
        let friends = handles(&self.friends);
        self.followers
            .iter()
            .filter(|u| !friends.contains(u.screen_name.as_str()))
            .map(|u| u.screen_name.clone())
            .collect()
    }

    /// Followed accounts that do not follow back.
    pub fn friends_only(&self) -> Vec<String> {
        let followers = handles(&self.followers);
        self.friends
            .iter()
            .filter(|u| !followers.contains(u.screen_name.as_str()))
            .map(|u| u.screen_name.clone())
            .collect()
    }

    pub fn summary(&self) -> SocialGraphSummary {
        SocialGraphSummary {
            followers_count: self.followers.len(),
            friends_count: self.friends.len(),
            mutual: self.mutual(),
            followers_only: self.followers_only(),
            friends_only: self.friends_only(),
        }
    }
}

fn handles(users: &[User]) -> HashSet<&str> {
    users.iter().map(|u| u.screen_name.as_str()).collect()
}

/// Fetches followers then friends, one after the other.
pub async fn fetch_social_graph<S>(
    source: &S,
    screen_name: Option<&str>,
) -> Result<SocialGraph, TwitterError>
where
    S: TwitterSource + ?Sized,
{
    let followers = fetch_user_list(source, UserListEndpoint::Followers, screen_name).await?;
    let friends = fetch_user_list(source, UserListEndpoint::Friends, screen_name).await?;
    Ok(SocialGraph { followers, friends })
}
