pub mod error;
pub mod twitter;

pub use error::ReportError;
pub use twitter::{Tweet, TwitterError, TwitterSource};
