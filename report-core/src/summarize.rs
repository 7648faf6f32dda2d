//! Aggregations over a fetched timeline.
//!
//! Every function here is pure: the input slice is only read, and each call
//! builds its buckets from scratch.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use common::{ReportError, Tweet};
use serde::Serialize;
use tracing::warn;

/// Offset applied before taking a date, weekday or hour (JST).
pub const TARGET_OFFSET_HOURS: i64 = 9;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// A tweet whose date had no bucket. Skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmappedDate {
    pub tweet_id: u64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub counts: Vec<DailyCount>,
    pub unmapped: Vec<UnmappedDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyCount {
    pub hour: u32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayHourlyCount {
    pub day: String,
    pub hours: Vec<HourlyCount>,
}

impl WeekdayHourlyCount {
    fn empty(day: &str) -> Self {
        Self {
            day: day.to_string(),
            hours: (0..24).map(|hour| HourlyCount { hour, count: 0 }).collect(),
        }
    }

    pub fn total(&self) -> u32 {
        self.hours.iter().map(|h| h.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub key: String,
    pub count: u32,
}

/// Inclusive bounds on the raw (unshifted) creation instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from: Some(from), to: Some(to) }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| instant >= from) && self.to.map_or(true, |to| instant <= to)
    }
}

fn shifted(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.naive_utc() + Duration::hours(TARGET_OFFSET_HOURS)
}

/// Tweets per calendar day in the target offset, one entry for every day
/// between the oldest and newest tweet, empty days included.
///
/// Requires at least one tweet.
pub fn summarize_daily(tweets: &[Tweet]) -> Result<DailySummary, ReportError> {
    let dates = tweets
        .iter()
        .map(|tweet| Ok((tweet.id, shifted(tweet.created_at()?).date())))
        .collect::<Result<Vec<_>, ReportError>>()?;

    let min = dates.iter().map(|(_, date)| *date).min().ok_or(ReportError::EmptyInput)?;
    let max = dates.iter().map(|(_, date)| *date).max().ok_or(ReportError::EmptyInput)?;

    Ok(count_days(&dates, min, max))
}

fn count_days(dates: &[(u64, NaiveDate)], min: NaiveDate, max: NaiveDate) -> DailySummary {
    let mut counts: Vec<DailyCount> = min
        .iter_days()
        .take_while(|day| *day <= max)
        .map(|date| DailyCount { date, count: 0 })
        .collect();
    let mut unmapped = Vec::new();

    for &(tweet_id, date) in dates {
        let bucket = usize::try_from((date - min).num_days())
            .ok()
            .and_then(|index| counts.get_mut(index))
            .filter(|bucket| bucket.date == date);

        match bucket {
            Some(bucket) => bucket.count += 1,
            None => {
                warn!(tweet_id, %date, "date is not in the daily range, skipping");
                unmapped.push(UnmappedDate { tweet_id, date });
            }
        }
    }

    DailySummary { counts, unmapped }
}

/// Tweets per weekday (Sun..Sat) and hour in the target offset.
///
/// The window is checked against the raw instant, before the offset is
/// applied. All 7 x 24 buckets are always present.
pub fn summarize_weekday_hourly(
    tweets: &[Tweet],
    window: &TimeWindow,
) -> Result<Vec<WeekdayHourlyCount>, ReportError> {
    let mut result: Vec<WeekdayHourlyCount> =
        WEEKDAYS.iter().map(|day| WeekdayHourlyCount::empty(day)).collect();

    for tweet in tweets {
        let created_at = tweet.created_at()?;
        if !window.contains(created_at) {
            continue;
        }

        let local = shifted(created_at);
        let day = local.weekday().num_days_from_sunday() as usize;
        let hour = local.hour() as usize;
        result[day].hours[hour].count += 1;
    }

    Ok(result)
}

/// Counts keys produced by `keys` and ranks them by count descending, then by
/// key ascending.
///
/// A tweet may produce no key (it is skipped) or several (each one counts).
pub fn summarize_ranked_by<'a, F, K>(tweets: &'a [Tweet], keys: F) -> Vec<RankedCount>
where
    F: Fn(&'a Tweet) -> K,
    K: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for tweet in tweets {
        for key in keys(tweet) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<RankedCount> = counts
        .into_iter()
        .map(|(key, count)| RankedCount { key: key.to_string(), count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    ranked
}

/// Reply targets, most replied first. Tweets that are not replies are ignored.
pub fn summarize_replies(tweets: &[Tweet]) -> Vec<RankedCount> {
    summarize_ranked_by(tweets, |tweet| tweet.reply_target())
}

pub fn summarize_hashtags(tweets: &[Tweet]) -> Vec<RankedCount> {
    summarize_ranked_by(tweets, |tweet| tweet.hashtags())
}
