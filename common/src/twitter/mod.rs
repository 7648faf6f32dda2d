mod error;
mod types;
mod source;
mod client;
mod stub;

pub use error::TwitterError;
pub use types::{Entities, Hashtag, Profile, Tweet, User, UserPage};
pub use source::{
    TimelineOptions, TwitterSource, UserListEndpoint, UserListOptions, FIRST_CURSOR, PAGE_SIZE,
};
pub use client::{TwitterClient, DEFAULT_API_URL};
pub use stub::StubSource;
