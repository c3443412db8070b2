// Meal-time windows and cron rendering
use crate::config::ScheduleSettings;
use crate::model::ScheduleError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use tracing::info;

/// Cutoff time of day per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindowTable {
    cutoffs: HashMap<String, NaiveTime>,
}

impl TimeWindowTable {
    pub fn new<I, S>(cutoffs: I) -> Self
    where
        I: IntoIterator<Item = (S, NaiveTime)>,
        S: Into<String>,
    {
        Self {
            cutoffs: cutoffs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn cutoff(&self, category: &str) -> Option<NaiveTime> {
        self.cutoffs.get(category).copied()
    }
}

impl Default for TimeWindowTable {
    fn default() -> Self {
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default();
        Self::new([
            ("Frühstück", at(10, 0)),
            ("Mittagessen", at(14, 0)),
            ("Zwischenversorgung", at(16, 30)),
            ("Abendmensa", at(19, 30)),
        ])
    }
}

impl<'de> Deserialize<'de> for TimeWindowTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, String>::deserialize(deserializer)?;
        let mut cutoffs = HashMap::with_capacity(raw.len());
        for (category, time) in raw {
            let parsed = NaiveTime::parse_from_str(&time, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(&time, "%H:%M:%S"))
                .map_err(|e| serde::de::Error::custom(format!("invalid time `{time}`: {e}")))?;
            cutoffs.insert(category, parsed);
        }
        Ok(Self { cutoffs })
    }
}

/// Categories whose cutoff, moved `offset_minutes` earlier, has not passed yet.
///
/// A category missing from `table` has its cutoff at midnight and is therefore
/// always dropped. `None` when nothing remains.
pub fn active_categories(
    requested: &[String],
    now: NaiveTime,
    table: &TimeWindowTable,
    offset_minutes: i64,
) -> Option<Vec<String>> {
    let now_seconds = seconds_since_midnight(now);

    let active: Vec<String> = requested
        .iter()
        .filter(|category| {
            let cutoff = table.cutoff(category).unwrap_or_default();
            let close = seconds_since_midnight(cutoff) - offset_minutes * 60;
            if now_seconds >= close {
                info!(
                    "Removing category '{}' because its time {} (offset {} min) has passed.",
                    category, cutoff, offset_minutes
                );
                false
            } else {
                true
            }
        })
        .cloned()
        .collect();

    if active.is_empty() { None } else { Some(active) }
}

// Signed so an offset larger than the cutoff never wraps to the previous evening.
fn seconds_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight())
}

/// The time fields of a crontab line: `"<minute> <hour> * * <days>"`.
pub fn cron_expression(schedule: &ScheduleSettings) -> Result<String, ScheduleError> {
    if schedule.hour > 23 {
        return Err(ScheduleError::InvalidHour(schedule.hour));
    }
    if schedule.minute > 59 {
        return Err(ScheduleError::InvalidMinute(schedule.minute));
    }

    let days = schedule.alarm_days.enabled();
    if days.is_empty() {
        return Err(ScheduleError::NoAlarmDays);
    }
    let days = days.iter().map(u8::to_string).collect::<Vec<_>>().join(",");

    Ok(format!("{} {} * * {}", schedule.minute, schedule.hour, days))
}

/// A complete crontab line running `program` with `settings` and appending output to `log`.
pub fn cron_line(
    schedule: &ScheduleSettings,
    program: &str,
    settings: &str,
    log: &str,
) -> Result<String, ScheduleError> {
    Ok(format!(
        "{} {} --settings {} >> {} 2>&1",
        cron_expression(schedule)?,
        program,
        settings,
        log
    ))
}
