// Canteen menu page parsing
use crate::config::SelectorConfig;
use crate::model::{BULLET, Dish, ParseError, UNKNOWN_CATEGORY};
use crate::utils::collapse_text;
use scraper::{ElementRef, Html, Selector};

pub trait CategoryExtractor {
    /// Yields one `(category, dishes)` pair per menu section, in document order.
    fn extract(&self, html: &str) -> Result<Vec<(String, Vec<Dish>)>, ParseError>;
}

pub struct MenuParser {
    section: Selector,
    label: Selector,
    item: Selector,
}

impl MenuParser {
    pub fn new(selectors: &SelectorConfig) -> Result<Self, ParseError> {
        Ok(Self {
            section: compile(&selectors.section)?,
            label: compile(&selectors.label)?,
            item: compile(&selectors.item)?,
        })
    }

    fn category_name(&self, section: ElementRef<'_>) -> String {
        let label = section
            .select(&self.label)
            .next()
            .map(|node| collapse_text(node.text()))
            .unwrap_or_default();

        if label.is_empty() {
            UNKNOWN_CATEGORY.to_string()
        } else {
            label
        }
    }

    fn dishes(&self, section: ElementRef<'_>) -> Vec<Dish> {
        section
            .select(&self.item)
            .map(|node| collapse_text(node.text()))
            .filter(|text| !text.is_empty())
            .map(|text| format!("{BULLET} {text}"))
            .collect()
    }
}

impl CategoryExtractor for MenuParser {
    fn extract(&self, html: &str) -> Result<Vec<(String, Vec<Dish>)>, ParseError> {
        let document = Html::parse_document(html);

        let sections: Vec<(String, Vec<Dish>)> = document
            .select(&self.section)
            .map(|section| (self.category_name(section), self.dishes(section)))
            .collect();

        if sections.is_empty() {
            return Err(ParseError::NoSectionsFound);
        }

        Ok(sections)
    }
}

fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
