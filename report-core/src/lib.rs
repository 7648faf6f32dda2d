pub mod chart;
pub mod config;
pub mod gateway;
pub mod report;
pub mod summarize;

pub use config::ReportConfig;
pub use gateway::{
    fetch_social_graph, fetch_timeline, fetch_user_list, SocialGraph, SocialGraphSummary,
};
pub use report::{generate_report, Report};
pub use summarize::{
    summarize_daily, summarize_hashtags, summarize_ranked_by, summarize_replies,
    summarize_weekday_hourly, DailyCount, DailySummary, RankedCount, TimeWindow, UnmappedDate,
    WeekdayHourlyCount,
};
