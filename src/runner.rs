// Batch loop over the configured locations
use crate::matcher::{Keywords, find_matches};
use crate::model::{DishCollection, MenuResult};
use crate::notifier::{Notifier, format_message};
use crate::scraper::{DocumentFetcher, MensaScraper};
use tracing::{error, info, warn};

/// What happened for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Notified,
    NoMatches,
    NoDishes,
    Skipped,
    Failed,
}

/// Scrapes every code in order and notifies about each menu (or its matches).
/// A failing location never stops the batch.
pub async fn run_batch<F, N>(
    scraper: &MensaScraper<F>,
    notifier: &N,
    codes: &[String],
    keywords: &Keywords,
) -> Vec<(String, Outcome)>
where
    F: DocumentFetcher,
    N: Notifier + ?Sized,
{
    let mut outcomes = Vec::with_capacity(codes.len());
    for code in codes {
        info!("Getting dishes of {} by category...", code);
        let outcome = process_location(scraper, notifier, code, keywords).await;
        info!("Finished {}: {:?}", code, outcome);
        outcomes.push((code.clone(), outcome));
    }
    outcomes
}

pub async fn process_location<F, N>(
    scraper: &MensaScraper<F>,
    notifier: &N,
    code: &str,
    keywords: &Keywords,
) -> Outcome
where
    F: DocumentFetcher,
    N: Notifier + ?Sized,
{
    let result = match scraper.scrape(code).await {
        Ok(Some(result)) => result,
        Ok(None) => {
            info!("No dishes found.");
            return Outcome::NoDishes;
        }
        Err(e) => {
            error!("Skipping location: {}", e);
            return Outcome::Failed;
        }
    };
    log_menu(&result);

    let payload = if keywords.is_empty() {
        result.dishes()
    } else {
        info!("Find matches with favourite food...");
        match find_matches(keywords, Some(&result.dishes())) {
            Ok(Some(matches)) => {
                info!("Matched dishes: {:?}", matches);
                matches
            }
            Ok(None) => {
                info!("No matches found.");
                return Outcome::NoMatches;
            }
            Err(e) => {
                error!("Matching failed: {}", e);
                return Outcome::Failed;
            }
        }
    };

    deliver(notifier, &payload, &result).await
}

async fn deliver<N: Notifier + ?Sized>(
    notifier: &N,
    payload: &DishCollection,
    result: &MenuResult,
) -> Outcome {
    let location = Some(result.display_name.as_str());
    let site = Some(result.address.as_str());
    let Some(message) = format_message(payload, location, site) else {
        warn!("No valid message content to send. Skipping notification.");
        return Outcome::Skipped;
    };

    match notifier.deliver(&message, None, None).await {
        Ok(()) => Outcome::Notified,
        Err(e) => {
            warn!("Failed to send notification: {}", e);
            Outcome::Failed
        }
    }
}

fn log_menu(result: &MenuResult) {
    for (category, dishes) in result.menu.iter() {
        info!("Dishes for {}:", category);
        for dish in dishes {
            info!("{}", dish);
        }
    }
}
