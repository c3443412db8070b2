use crate::model::ConfigError;
use crate::parser::MenuParser;
use crate::schedule::TimeWindowTable;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://www.stw-thueringen.de/mensen";
pub const DEFAULT_TITLE: &str = "‼️LunchHunt‼️";

pub fn default_menu_categories() -> Vec<String> {
    ["Frühstück", "Mittagessen", "Zwischenversorgung", "Abendessen"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_offset() -> i64 {
    30
}

fn default_priority() -> u8 {
    5
}

/// CSS selectors describing the markup of a menu page.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SelectorConfig {
    pub section: String,
    pub label: String,
    pub item: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            section: "div.container-fluid.px-xl-0.splGroupWrapper".to_string(),
            label: "div.pl-2".to_string(),
            item: "div.mealText".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScraperSettings {
    #[serde(default = "default_menu_categories", deserialize_with = "one_or_many")]
    pub menu_categories: Vec<String>,
    #[serde(default)]
    pub mensen: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub favorite_foods: Vec<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

impl ScraperSettings {
    /// Compiles the configured selectors into a menu parser.
    pub fn parser(&self) -> Result<MenuParser, ConfigError> {
        Ok(MenuParser::new(&self.selectors)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AlarmDays {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl AlarmDays {
    pub fn weekdays() -> Self {
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            ..Self::default()
        }
    }

    /// Cron day-of-week numbers (Monday = 1 ... Sunday = 7) of the enabled days.
    pub fn enabled(&self) -> Vec<u8> {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
            self.sunday,
        ]
        .iter()
        .zip(1u8..)
        .filter_map(|(on, day)| on.then_some(day))
        .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct ScheduleSettings {
    #[serde(default = "default_offset", deserialize_with = "whole_minutes")]
    pub offset: i64,
    pub hour: u32,
    pub minute: u32,
    #[serde(default = "AlarmDays::weekdays")]
    pub alarm_days: AlarmDays,
    #[serde(default)]
    pub time_windows: Option<TimeWindowTable>,
}

impl ScheduleSettings {
    /// The configured table, or the built-in defaults when none is given.
    pub fn time_window_table(&self) -> TimeWindowTable {
        self.time_windows.clone().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct GotifySettings {
    pub server_url: String,
    pub token: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub secure: bool,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub scraper_settings: ScraperSettings,
    pub schedule_settings: ScheduleSettings,
    pub gotify_settings: GotifySettings,
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Minutes given as integer or fractional number, rounded to whole minutes.
fn whole_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let minutes = f64::deserialize(deserializer)?;
    if !minutes.is_finite() {
        return Err(serde::de::Error::custom(format!("invalid offset {minutes}")));
    }
    Ok(minutes.round() as i64)
}

/// Accepts either a single string or a list of strings.
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}
