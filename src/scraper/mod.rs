pub mod fetcher;
pub mod traits;

pub use fetcher::HttpFetcher;
pub use traits::DocumentFetcher;

use crate::locations::LocationRegistry;
use crate::model::{Menu, MenuResult, ParseError, ScrapeError};
use crate::parser::{CategoryExtractor, MenuParser};
use tracing::{info, warn};

/// Fetches a location's menu page and turns it into a [`MenuResult`].
pub struct MensaScraper<F> {
    fetcher: F,
    parser: MenuParser,
    registry: LocationRegistry,
    base_url: String,
    menu_categories: Vec<String>,
}

impl<F: DocumentFetcher> MensaScraper<F> {
    pub fn new(
        fetcher: F,
        parser: MenuParser,
        registry: LocationRegistry,
        base_url: impl Into<String>,
        menu_categories: Vec<String>,
    ) -> Self {
        Self {
            fetcher,
            parser,
            registry,
            base_url: base_url.into(),
            menu_categories,
        }
    }

    /// Scrapes the menu of `code`, keeping only the requested categories.
    ///
    /// Unknown codes fail before anything is fetched. Transport failures,
    /// pages without menu sections and menus without any requested category
    /// are logged and yield `Ok(None)`.
    pub async fn scrape(&self, code: &str) -> Result<Option<MenuResult>, ScrapeError> {
        let entry = self.registry.resolve(code)?;
        let address = self.registry.address(&self.base_url, code)?;
        let display_name = self.registry.display_name(code);

        info!("Fetching menu of {} ({})", display_name, address);
        let html = match self.fetcher.fetch(&address).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to fetch {}: {}", address, e);
                return Ok(None);
            }
        };

        let menu = match self.menu_from_html(&html) {
            Ok(menu) => menu,
            Err(e) => {
                info!("{} for {}", e, display_name);
                return Ok(None);
            }
        };

        Ok(Some(MenuResult {
            code: entry.code.clone(),
            region: entry.region.clone(),
            display_name,
            address,
            menu,
        }))
    }

    fn menu_from_html(&self, html: &str) -> Result<Menu, ParseError> {
        let mut menu: Menu = self.parser.extract(html)?.into_iter().collect();
        menu.retain(|category, _| self.menu_categories.iter().any(|c| c == category));

        if menu.is_empty() {
            return Err(ParseError::NoValidSections);
        }
        Ok(menu)
    }
}
