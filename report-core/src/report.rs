use chrono::{DateTime, Duration, Utc};
use common::twitter::{Profile, TwitterSource};
use common::{ReportError, Tweet};
use serde::Serialize;
use tracing::info;

use crate::chart::{daily_chart, heatmap, DailyChart, HeatmapRow};
use crate::config::ReportConfig;
use crate::gateway::{fetch_social_graph, fetch_timeline, SocialGraphSummary};
use crate::summarize::{
    summarize_daily, summarize_hashtags, summarize_replies, summarize_weekday_hourly, DailyCount,
    RankedCount, TimeWindow, UnmappedDate, WeekdayHourlyCount,
};

/// Everything one run produces, serialized as the JSON snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub profile: Profile,
    pub generated_at: DateTime<Utc>,
    pub tweet_count: usize,
    pub daily: Vec<DailyCount>,
    pub unmapped_dates: Vec<UnmappedDate>,
    pub weekday_hourly: Vec<WeekdayHourlyCount>,
    pub replies: Vec<RankedCount>,
    pub hashtags: Vec<RankedCount>,
    pub daily_chart: DailyChart,
    pub heatmap: Vec<HeatmapRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_graph: Option<SocialGraphSummary>,
}

impl Report {
    /// Builds every summary from an already fetched timeline.
    pub fn from_tweets(
        profile: Profile,
        tweets: &[Tweet],
        config: &ReportConfig,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        let daily = summarize_daily(tweets)?;
        let window = heatmap_window(tweets, config.heatmap_days)?;
        let weekday_hourly = summarize_weekday_hourly(tweets, &window)?;

        Ok(Self {
            profile,
            generated_at,
            tweet_count: tweets.len(),
            daily_chart: daily_chart(&daily.counts, config.chart_days)?,
            heatmap: heatmap(&weekday_hourly),
            daily: daily.counts,
            unmapped_dates: daily.unmapped,
            weekday_hourly,
            replies: summarize_replies(tweets),
            hashtags: summarize_hashtags(tweets),
            social_graph: None,
        })
    }

    pub fn with_social_graph(mut self, summary: SocialGraphSummary) -> Self {
        self.social_graph = Some(summary);
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn heatmap_window(tweets: &[Tweet], days: Option<i64>) -> Result<TimeWindow, ReportError> {
    let Some(days) = days else {
        return Ok(TimeWindow::unbounded());
    };

    let mut newest: Option<DateTime<Utc>> = None;
    for tweet in tweets {
        let created_at = tweet.created_at()?;
        newest = Some(newest.map_or(created_at, |n| n.max(created_at)));
    }
    let newest = newest.ok_or(ReportError::EmptyInput)?;
    let from = Duration::try_days(days)
        .and_then(|span| newest.checked_sub_signed(span))
        .ok_or_else(|| {
            ReportError::Config(format!("heatmap window of {} days is out of range", days))
        })?;

    Ok(TimeWindow::between(from, newest))
}

/// Fetches the profile, the full timeline and optionally the social graph,
/// one request at a time, then aggregates.
pub async fn generate_report<S>(
    source: &S,
    screen_name: Option<&str>,
    config: &ReportConfig,
) -> Result<Report, ReportError>
where
    S: TwitterSource + ?Sized,
{
    let profile = source.profile(screen_name).await?;
    info!("Generating report for @{}", profile.screen_name);

    let tweets = fetch_timeline(source, screen_name).await?;
    let social_graph = if config.include_social_graph {
        Some(fetch_social_graph(source, screen_name).await?.summary())
    } else {
        None
    };

    let report = Report::from_tweets(profile, &tweets, config, Utc::now())?;
    Ok(match social_graph {
        Some(summary) => report.with_social_graph(summary),
        None => report,
    })
}
