// Core structs: Menu, MenuResult, DishCollection and the error enums
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

/// A single bullet-prefixed menu line, e.g. `"• Gulasch"`.
pub type Dish = String;

pub const BULLET: &str = "\u{2022}";
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// Insertion-ordered mapping of category name to dishes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<(String, Vec<Dish>)>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a category. An existing category keeps its position and gets the new dishes.
    pub fn insert(&mut self, category: impl Into<String>, dishes: Vec<Dish>) {
        let category = category.into();
        match self.entries.iter_mut().find(|(name, _)| *name == category) {
            Some((_, existing)) => *existing = dishes,
            None => self.entries.push((category, dishes)),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[Dish]> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, dishes)| dishes.as_slice())
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &[Dish]) -> bool,
    {
        self.entries.retain(|(name, dishes)| keep(name, dishes));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Dish])> {
        self.entries
            .iter()
            .map(|(name, dishes)| (name.as_str(), dishes.as_slice()))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<Dish>)> for Menu {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Dish>)>>(iter: I) -> Self {
        let mut menu = Menu::new();
        for (category, dishes) in iter {
            menu.insert(category, dishes);
        }
        menu
    }
}

// Hand-written so JSON objects keep their key order.
impl<'de> Deserialize<'de> for Menu {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MenuVisitor;

        impl<'de> Visitor<'de> for MenuVisitor {
            type Value = Menu;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category names to lists of dishes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Menu, A::Error> {
                let mut menu = Menu::new();
                while let Some((category, dishes)) = access.next_entry::<String, Vec<Dish>>()? {
                    menu.insert(category, dishes);
                }
                Ok(menu)
            }
        }

        deserializer.deserialize_map(MenuVisitor)
    }
}

/// Dish data in one of the three shapes the matcher and formatter accept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DishCollection {
    Single(Dish),
    Flat(Vec<Dish>),
    Grouped(Menu),
}

impl DishCollection {
    /// Decides the shape of a JSON payload once, at the boundary.
    ///
    /// This is the entry point for untyped input; typed callers build the
    /// variants directly and can never hold an invalid shape.
    pub fn from_json(payload: &str) -> Result<Self, MatchError> {
        serde_json::from_str(payload).map_err(|e| MatchError::InvalidInputShape(e.to_string()))
    }
}

impl From<Menu> for DishCollection {
    fn from(menu: Menu) -> Self {
        DishCollection::Grouped(menu)
    }
}

impl From<Vec<Dish>> for DishCollection {
    fn from(dishes: Vec<Dish>) -> Self {
        DishCollection::Flat(dishes)
    }
}

/// Outcome of one successful scrape. Owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuResult {
    pub code: String,
    pub region: String,
    pub display_name: String,
    pub address: String,
    pub menu: Menu,
}

impl MenuResult {
    pub fn dishes(&self) -> DishCollection {
        DishCollection::Grouped(self.menu.clone())
    }
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("unknown location code: {0}")]
    UnknownLocation(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no menu sections found")]
    NoSectionsFound,
    #[error("no valid menu sections found")]
    NoValidSections,
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("no dishes available for searching")]
    NoDishesAvailable,
    #[error("invalid dish data: expected string, list or map of lists ({0})")]
    InvalidInputShape(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("notification server responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("notification request timed out")]
    Timeout,
    #[error("notification server url `{0}` has no host")]
    MissingHost(String),
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("hour must be between 0 and 23, got {0}")]
    InvalidHour(u32),
    #[error("minute must be between 0 and 59, got {0}")]
    InvalidMinute(u32),
    #[error("at least one alarm day must be enabled")]
    NoAlarmDays,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Selector(#[from] ParseError),
    #[error("duplicate location code: {0}")]
    DuplicateLocation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_insert_keeps_first_position_for_repeated_category() {
        let mut menu = Menu::new();
        menu.insert("Mittagessen", vec!["• Gulasch".into()]);
        menu.insert("Abendessen", vec!["• Brot".into()]);
        menu.insert("Mittagessen", vec!["• Waffel".into()]);

        let categories: Vec<_> = menu.categories().collect();
        assert_eq!(categories, ["Mittagessen", "Abendessen"]);
        assert_eq!(menu.get("Mittagessen"), Some(&["• Waffel".to_string()][..]));
    }

    #[test]
    fn grouped_json_keeps_key_order() {
        let payload = r#"{"Zwischenversorgung": ["• Kuchen"], "Abendessen": ["• Brot"]}"#;
        let parsed = DishCollection::from_json(payload).unwrap();

        let DishCollection::Grouped(menu) = parsed else {
            panic!("expected grouped dishes");
        };
        let categories: Vec<_> = menu.categories().collect();
        assert_eq!(categories, ["Zwischenversorgung", "Abendessen"]);
    }

    #[test]
    fn json_shapes_are_decided_at_the_boundary() {
        assert_eq!(
            DishCollection::from_json(r#""• Gulasch""#).unwrap(),
            DishCollection::Single("• Gulasch".into())
        );
        assert_eq!(
            DishCollection::from_json(r#"["• Gulasch"]"#).unwrap(),
            DishCollection::Flat(vec!["• Gulasch".into()])
        );
    }

    #[test]
    fn other_json_shapes_are_rejected() {
        for payload in ["42", "null", r#"[1, 2]"#, r#"{"Mittagessen": "• Gulasch"}"#] {
            let err = DishCollection::from_json(payload).unwrap_err();
            assert!(matches!(err, MatchError::InvalidInputShape(_)), "{payload}");
        }
    }
}
