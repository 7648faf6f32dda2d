use thiserror::Error;

use crate::twitter::TwitterError;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to fetch from the social API: {0}")]
    Transport(#[from] TwitterError),

    #[error("At least one tweet is required to build a date range")]
    EmptyInput,

    #[error("Tweet {id} has an unparseable created_at: {value}")]
    InvalidTimestamp { id: u64, value: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}
