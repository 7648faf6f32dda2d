use std::env;
use std::path::{Path, PathBuf};

use common::twitter::DEFAULT_API_URL;
use common::ReportError;
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Upper bound for `chart_days` and `heatmap_days` (about a century).
pub const MAX_WINDOW_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    // Transport settings
    pub api_base_url: String,
    pub bearer_token: Option<String>,
    pub stub_dir: Option<PathBuf>,  // Serve fixtures instead of calling the API

    // Report settings
    pub chart_days: i64,             // Days shown before the newest day in the daily chart
    pub heatmap_days: Option<i64>,   // Weekday/hour window ending at the newest tweet
    pub include_social_graph: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            bearer_token: None,
            stub_dir: None,

            chart_days: 30,
            heatmap_days: None,  // Whole history
            include_social_graph: false,
        }
    }
}

impl ReportConfig {
    /// Reads a TOML file; keys it leaves out keep their defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ReportError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ReportError> {
        toml::from_str(content).map_err(|e| ReportError::Config(e.to_string()))
    }

    /// Applies `TWITTER_BEARER_TOKEN`, `TWITTER_API_URL` and
    /// `TWEET_REPORT_STUB_DIR` from the process environment.
    pub fn with_env(mut self) -> Self {
        if let Ok(token) = env::var("TWITTER_BEARER_TOKEN") {
            self.bearer_token = Some(token);
        }
        if let Ok(url) = env::var("TWITTER_API_URL") {
            self.api_base_url = url;
        }
        if let Ok(dir) = env::var("TWEET_REPORT_STUB_DIR") {
            self.stub_dir = Some(PathBuf::from(dir));
        }
        self
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if !(0..=MAX_WINDOW_DAYS).contains(&self.chart_days) {
            return Err(ReportError::Config(format!(
                "chart_days must be between 0 and {}",
                MAX_WINDOW_DAYS
            )));
        }
        if matches!(self.heatmap_days, Some(days) if !(1..=MAX_WINDOW_DAYS).contains(&days)) {
            return Err(ReportError::Config(format!(
                "heatmap_days must be between 1 and {}",
                MAX_WINDOW_DAYS
            )));
        }
        if self.stub_dir.is_none() && self.bearer_token.is_none() {
            return Err(ReportError::Config(
                "set TWITTER_BEARER_TOKEN or a stub directory".to_string(),
            ));
        }
        Ok(())
    }
}
