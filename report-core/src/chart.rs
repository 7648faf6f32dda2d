use std::collections::HashMap;

use chrono::Duration;
use common::ReportError;
use serde::Serialize;

use crate::summarize::{DailyCount, WeekdayHourlyCount};

/// Height in pixels of the tallest daily bar.
pub const MAX_BAR_HEIGHT: u32 = 185;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBar {
    pub label: String,
    pub count: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailyChart {
    pub bars: Vec<DailyBar>,
    pub vertical_labels: [u32; 3],
}

/// Bars for the `days` days before the newest day plus the newest day itself.
///
/// A window reaching past the calendar's range is a configuration error.
pub fn daily_chart(daily: &[DailyCount], days: i64) -> Result<DailyChart, ReportError> {
    let Some(newest) = daily.last().map(|c| c.date) else {
        return Ok(DailyChart::default());
    };
    let oldest = Duration::try_days(days.max(0))
        .and_then(|span| newest.checked_sub_signed(span))
        .ok_or_else(|| {
            ReportError::Config(format!("chart window of {} days is out of range", days))
        })?;
    let by_date: HashMap<_, _> = daily.iter().map(|c| (c.date, c.count)).collect();

    let mut bars: Vec<DailyBar> = oldest
        .iter_days()
        .take_while(|day| *day <= newest)
        .map(|day| DailyBar {
            label: day.format("%d").to_string(),
            count: by_date.get(&day).copied().unwrap_or(0),
            height: 0,
        })
        .collect();

    let max_count = bars.iter().map(|b| b.count).max().unwrap_or(0);
    if max_count > 0 {
        for bar in &mut bars {
            let scaled = MAX_BAR_HEIGHT as f64 * bar.count as f64 / max_count as f64;
            bar.height = scaled.round() as u32;
        }
    }

    Ok(DailyChart {
        bars,
        vertical_labels: [0, (max_count + 1) / 2, max_count],
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatLevel {
    Empty,
    Low,
    Medium,
    High,
    Peak,
}

impl HeatLevel {
    pub fn color(&self) -> &'static str {
        match self {
            HeatLevel::Empty => "#ebedf0",
            HeatLevel::Low => "#c6e48b",
            HeatLevel::Medium => "#7bc96f",
            HeatLevel::High => "#239a3b",
            HeatLevel::Peak => "#196127",
        }
    }
}

pub fn heat_level(count: u32) -> HeatLevel {
    match count {
        0 => HeatLevel::Empty,
        1..=9 => HeatLevel::Low,
        10..=19 => HeatLevel::Medium,
        20..=29 => HeatLevel::High,
        _ => HeatLevel::Peak,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatCell {
    pub hour: u32,
    pub count: u32,
    pub level: HeatLevel,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapRow {
    pub day: String,
    pub cells: Vec<HeatCell>,
}

pub fn heatmap(weekday_hourly: &[WeekdayHourlyCount]) -> Vec<HeatmapRow> {
    weekday_hourly
        .iter()
        .map(|day| HeatmapRow {
            day: day.day.clone(),
            cells: day
                .hours
                .iter()
                .map(|h| {
                    let level = heat_level(h.count);
                    HeatCell { hour: h.hour, count: h.count, level, color: level.color() }
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::HourlyCount;
    use chrono::NaiveDate;

    fn day(m: u32, d: u32, count: u32) -> DailyCount {
        DailyCount { date: NaiveDate::from_ymd_opt(2024, m, d).unwrap(), count }
    }

    #[test]
    fn chart_covers_window_ending_at_newest_day() {
        let daily = vec![day(1, 1, 4), day(1, 2, 0), day(1, 3, 2), day(1, 4, 1)];
        let chart = daily_chart(&daily, 2).unwrap();

        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["02", "03", "04"]);
        let heights: Vec<u32> = chart.bars.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![0, 185, 93]);
        assert_eq!(chart.vertical_labels, [0, 1, 2]);
    }

    #[test]
    fn chart_zero_fills_days_before_history() {
        let chart = daily_chart(&[day(3, 1, 5)], 30).unwrap();

        assert_eq!(chart.bars.len(), 31);
        assert_eq!(chart.bars.first().unwrap().label, "31");
        assert_eq!(chart.bars.last().unwrap().height, MAX_BAR_HEIGHT);
        assert_eq!(chart.bars.iter().filter(|b| b.count > 0).count(), 1);
        assert_eq!(chart.vertical_labels, [0, 3, 5]);
    }

    #[test]
    fn all_zero_chart_has_flat_bars() {
        let chart = daily_chart(&[day(1, 1, 0), day(1, 2, 0)], 1).unwrap();
        assert!(chart.bars.iter().all(|b| b.height == 0));
        assert_eq!(chart.vertical_labels, [0, 0, 0]);
    }

    #[test]
    fn empty_input_gives_empty_chart() {
        assert_eq!(daily_chart(&[], 30).unwrap(), DailyChart::default());
    }

    #[test]
    fn oversized_window_is_a_config_error() {
        let daily = vec![day(1, 1, 1)];

        assert!(matches!(daily_chart(&daily, 1_000_000_000_000), Err(ReportError::Config(_))));
        assert!(matches!(daily_chart(&daily, i64::MAX), Err(ReportError::Config(_))));
    }

    #[test]
    fn heat_levels_follow_thresholds() {
        assert_eq!(heat_level(0), HeatLevel::Empty);
        assert_eq!(heat_level(1), HeatLevel::Low);
        assert_eq!(heat_level(9), HeatLevel::Low);
        assert_eq!(heat_level(10), HeatLevel::Medium);
        assert_eq!(heat_level(20), HeatLevel::High);
        assert_eq!(heat_level(30), HeatLevel::Peak);
        assert_eq!(heat_level(30).color(), "#196127");
    }

    #[test]
    fn heatmap_annotates_every_cell() {
        let rows = heatmap(&[WeekdayHourlyCount {
            day: "Sun".to_string(),
            hours: vec![HourlyCount { hour: 0, count: 12 }, HourlyCount { hour: 1, count: 0 }],
        }]);

        assert_eq!(rows[0].day, "Sun");
        assert_eq!(rows[0].cells[0].color, "#7bc96f");
        assert_eq!(rows[0].cells[1].level, HeatLevel::Empty);
    }
}
