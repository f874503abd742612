/// Period windows and target progress
///
/// A habit with a target shows the sum of entries logged since the start of
/// the current period instead of its all-time total. Windows are computed in
/// the caller's time zone (local time in the app).

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::domain::{Entry, Habit, Period};

/// Start of the period containing `now`
///
/// day: midnight today; week: Monday 00:00; month: the 1st at 00:00;
/// year: January 1st at 00:00.
pub fn period_start<Tz: TimeZone>(period: Period, now: &DateTime<Tz>) -> DateTime<Tz> {
    let today = now.date_naive();
    let first_day = match period {
        Period::Day => today,
        Period::Week => today - Duration::days(today.weekday().num_days_from_monday() as i64),
        Period::Month => today.with_day(1).unwrap_or(today),
        Period::Year => today.with_ordinal(1).unwrap_or(today),
    };
    start_of_day(&now.timezone(), first_day).unwrap_or_else(|| now.clone())
}

/// Local midnight of `date`, or the first valid instant after it when a DST
/// transition skips midnight
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    (0..=2)
        .map(|h| midnight + Duration::hours(h))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
}

/// Sum of entry values logged at or after the start of the current period
pub fn period_total<Tz: TimeZone>(entries: &[Entry], period: Period, now: &DateTime<Tz>) -> f64 {
    let start = period_start(period, now).with_timezone(&Utc);
    entries
        .iter()
        .filter(|e| e.timestamp >= start)
        .map(|e| e.value)
        .sum()
}

/// Count shown for a habit: the period total when it has a target,
/// otherwise its all-time total
pub fn display_total<Tz: TimeZone>(habit: &Habit, entries: &[Entry], now: &DateTime<Tz>) -> f64 {
    match &habit.target {
        Some(target) => period_total(entries, target.period, now),
        None => habit.total_count,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetProgress {
    pub current: f64,
    pub target: f64,
    pub period: Period,
    /// `current / target`, clamped to 0..=1
    pub fraction: f64,
    pub reached: bool,
}

/// Progress towards a habit's target, if it has one
pub fn target_progress<Tz: TimeZone>(
    habit: &Habit,
    entries: &[Entry],
    now: &DateTime<Tz>,
) -> Option<TargetProgress> {
    let target = habit.target?;
    let current = period_total(entries, target.period, now);
    Some(TargetProgress {
        current,
        target: target.value,
        period: target.period,
        fraction: (current / target.value).clamp(0.0, 1.0),
        reached: current >= target.value,
    })
}
