// tests/pipeline.rs
//
// End-to-end runs of scrape -> match -> format -> deliver with in-memory
// fetcher and notifier.
//
use std::collections::HashMap;
use std::sync::Mutex;

use lunchhunt::config::{DEFAULT_BASE_URL, SelectorConfig};
use lunchhunt::locations::LocationRegistry;
use lunchhunt::matcher::{Keywords, find_matches};
use lunchhunt::model::{FetchError, MatchError, NotifyError};
use lunchhunt::notifier::Notifier;
use lunchhunt::parser::MenuParser;
use lunchhunt::runner::{Outcome, process_location, run_batch};
use lunchhunt::scraper::{DocumentFetcher, MensaScraper};

const EAP_PAGE: &str = r#"
<html><body>
  <div class="container-fluid px-xl-0 splGroupWrapper">
    <div class="pl-2">Mittagessen</div>
    <div class="mealText">Waffel mit Sahne</div>
    <div class="mealText">Gulasch</div>
  </div>
  <div class="container-fluid px-xl-0 splGroupWrapper">
    <div class="pl-2">Abendessen</div>
    <div class="mealText">Kartoffelpuffer</div>
  </div>
</body></html>
"#;

const CLOSED_PAGE: &str = "<html><body><h1>Heute geschlossen</h1></body></html>";

/// Serves fixed pages by address; anything else is a 404.
struct PageFetcher {
    pages: HashMap<String, &'static str>,
}

impl PageFetcher {
    fn new(pages: &[(&str, &'static str)]) -> Self {
        let pages = pages
            .iter()
            .map(|(code, page)| (address(code), *page))
            .collect();
        Self { pages }
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for PageFetcher {
    async fn fetch(&self, address: &str) -> Result<String, FetchError> {
        self.pages
            .get(address)
            .map(|page| page.to_string())
            .ok_or_else(|| FetchError::Status {
                url: address.to_string(),
                status: 404,
            })
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(
        &self,
        message: &str,
        _title: Option<&str>,
        _priority: Option<u8>,
    ) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        self.sent.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

fn address(code: &str) -> String {
    LocationRegistry::default()
        .address(DEFAULT_BASE_URL, code)
        .unwrap()
}

fn scraper(fetcher: PageFetcher) -> MensaScraper<PageFetcher> {
    MensaScraper::new(
        fetcher,
        MenuParser::new(&SelectorConfig::default()).unwrap(),
        LocationRegistry::default(),
        DEFAULT_BASE_URL,
        vec!["Mittagessen".to_string(), "Abendessen".to_string()],
    )
}

fn codes(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

#[tokio::test]
async fn empty_page_then_matching_without_dishes_fails() {
    let scraper = scraper(PageFetcher::new(&[("EAP", CLOSED_PAGE)]));

    let result = scraper.scrape("EAP").await.unwrap();
    assert!(result.is_none());

    let dishes = result.as_ref().map(|r| r.dishes());
    let err = find_matches(&Keywords::new(["Waffel"]), dishes.as_ref()).unwrap_err();
    assert!(matches!(err, MatchError::NoDishesAvailable));
}

#[tokio::test]
async fn favorites_are_matched_and_delivered() {
    let scraper = scraper(PageFetcher::new(&[("EAP", EAP_PAGE)]));
    let notifier = RecordingNotifier::default();

    let outcome = process_location(&scraper, &notifier, "EAP", &Keywords::new(["waffel"])).await;

    assert_eq!(outcome, Outcome::Notified);
    let sent = notifier.sent.lock().unwrap();
    assert_eq!(
        sent.as_slice(),
        [format!(
            "\nMITTAGESSEN - Mensa Ernst Abbe Platz\n• Waffel mit Sahne\n{}",
            address("EAP")
        )]
    );
}

#[tokio::test]
async fn whole_menu_is_delivered_without_favorites() {
    let scraper = scraper(PageFetcher::new(&[("EAP", EAP_PAGE)]));
    let notifier = RecordingNotifier::default();

    let outcome = process_location(&scraper, &notifier, "EAP", &Keywords::default()).await;

    assert_eq!(outcome, Outcome::Notified);
    let sent = notifier.sent.lock().unwrap();
    assert!(sent[0].contains("\nMITTAGESSEN - Mensa Ernst Abbe Platz\n• Waffel mit Sahne\n• Gulasch"));
    assert!(sent[0].contains("\nABENDESSEN - Mensa Ernst Abbe Platz\n• Kartoffelpuffer"));
}

#[tokio::test]
async fn no_match_sends_nothing() {
    let scraper = scraper(PageFetcher::new(&[("EAP", EAP_PAGE)]));
    let notifier = RecordingNotifier::default();

    let outcome = process_location(&scraper, &notifier, "EAP", &Keywords::new(["Germknödel"])).await;

    assert_eq!(outcome, Outcome::NoMatches);
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn batch_continues_past_failing_locations() {
    let scraper = scraper(PageFetcher::new(&[("EAP", EAP_PAGE), ("MAP", CLOSED_PAGE)]));
    let notifier = RecordingNotifier::default();

    let outcomes = run_batch(
        &scraper,
        &notifier,
        &codes(&["BOGUS", "MAS", "MAP", "EAP"]),
        &Keywords::new(["puffer"]),
    )
    .await;

    assert_eq!(
        outcomes,
        vec![
            ("BOGUS".to_string(), Outcome::Failed),
            ("MAS".to_string(), Outcome::NoDishes),
            ("MAP".to_string(), Outcome::NoDishes),
            ("EAP".to_string(), Outcome::Notified),
        ]
    );
    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn delivery_failure_is_reported_per_location() {
    let scraper = scraper(PageFetcher::new(&[("EAP", EAP_PAGE)]));
    let notifier = RecordingNotifier {
        fail: true,
        ..RecordingNotifier::default()
    };

    let outcome = process_location(&scraper, &notifier, "EAP", &Keywords::default()).await;
    assert_eq!(outcome, Outcome::Failed);
}
