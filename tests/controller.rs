//! End-to-end behaviour of the search controller against a scripted backend.

use catsearch::model::ItemKey;
use catsearch::pager::VisibilitySource;
use catsearch::view::StatusBanner;
use catsearch::{Phase, Product, SearchClient, SearchConfig, SearchController, SearchError, SearchPage};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const WAIT: Duration = Duration::from_secs(5);

/// In-memory catalog of `size` shoes; blank queries match everything.
struct FakeCatalog {
    products: Vec<Product>,
    calls: Mutex<Vec<(String, u32)>>,
    /// Queries that block until a value arrives on the gate
    gate: Option<(String, Receiver<()>)>,
}

impl FakeCatalog {
    fn new(size: usize) -> Self {
        let products = (0..size)
            .map(|i| Product {
                id: Some(format!("p{}", i)),
                title: format!("Shoe {}", i),
                price: 1999 + i as i64,
                product_type: "Shoes".to_string(),
                inventory_quantity: (i % 12) as i64,
                image: None,
            })
            .collect();
        Self {
            products,
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Make searches for `query` wait until the returned sender fires
    fn gated(mut self, query: &str) -> (Self, Sender<()>) {
        let (tx, rx) = bounded(1);
        self.gate = Some((query.to_string(), rx));
        (self, tx)
    }

    fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SearchClient for FakeCatalog {
    fn search(&self, query: &str, page: u32, page_size: u32) -> Result<SearchPage, SearchError> {
        self.calls.lock().unwrap().push((query.to_string(), page));

        if let Some((gated, rx)) = &self.gate {
            if gated == query {
                let _ = rx.recv_timeout(WAIT);
            }
        }
        if query == "broken" {
            return Err(SearchError::Http {
                status: 500,
                message: Some("index unavailable".to_string()),
            });
        }

        let needle = query.trim().to_lowercase();
        let matching: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
            .collect();
        let start = ((page - 1) * page_size) as usize;
        let items = matching
            .iter()
            .skip(start)
            .take(page_size as usize)
            .map(|p| (*p).clone())
            .collect();
        Ok(SearchPage {
            items,
            total_found: matching.len() as u64,
        })
    }
}

/// Reports every target as visible by a fixed fraction
struct Visible(f32);

impl VisibilitySource<ItemKey> for Visible {
    fn visible_fraction(&self, _target: &ItemKey) -> Option<f32> {
        Some(self.0)
    }
}

fn config(initial_query: &str) -> SearchConfig {
    SearchConfig {
        page_size: 12,
        debounce_ms: 200,
        initial_query: initial_query.to_string(),
        ..Default::default()
    }
}

fn started(catalog: Arc<FakeCatalog>, initial_query: &str) -> SearchController {
    let mut controller = SearchController::new(config(initial_query), catalog);
    controller.start();
    assert!(controller.wait_for_fetch(WAIT), "initial fetch did not finish");
    controller
}

#[test]
fn startup_loads_first_page_of_everything() {
    let catalog = Arc::new(FakeCatalog::new(25));
    let controller = started(catalog.clone(), "");

    let session = controller.session();
    assert_eq!(session.items().len(), 12);
    assert_eq!(session.total_found(), 25);
    assert_eq!(session.phase(), &Phase::Loaded { has_more: true });
    assert_eq!(controller.banner(), None);
    assert_eq!(catalog.calls(), vec![(String::new(), 1)]);
}

#[test]
fn scrolling_pages_through_all_results() {
    let catalog = Arc::new(FakeCatalog::new(25));
    let mut controller = started(catalog.clone(), "");

    // Half the last card on screen requests page 2 exactly once
    assert!(controller.observe(&Visible(0.5)));
    assert!(!controller.observe(&Visible(1.0)));
    assert_eq!(controller.banner(), Some(StatusBanner::LoadingMore));
    assert!(controller.wait_for_fetch(WAIT));
    assert_eq!(controller.session().items().len(), 24);

    assert!(controller.observe(&Visible(1.0)));
    assert!(controller.wait_for_fetch(WAIT));

    let session = controller.session();
    assert_eq!(session.items().len(), 25);
    assert!(!session.has_more());
    assert_eq!(controller.banner(), Some(StatusBanner::EndOfResults(25)));

    // Nothing left to load
    assert!(!controller.observe(&Visible(1.0)));
    assert_eq!(
        catalog.calls(),
        vec![(String::new(), 1), (String::new(), 2), (String::new(), 3)]
    );
}

#[test]
fn barely_visible_last_card_does_not_page() {
    let catalog = Arc::new(FakeCatalog::new(25));
    let mut controller = started(catalog.clone(), "");

    assert!(!controller.observe(&Visible(0.3)));
    assert_eq!(catalog.calls().len(), 1);
}

#[test]
fn typing_burst_searches_only_the_final_text() {
    let catalog = Arc::new(FakeCatalog::new(25));
    let mut controller = started(catalog.clone(), "");

    let t0 = Instant::now();
    controller.input("sh".to_string(), t0);
    controller.input("sho".to_string(), t0 + Duration::from_millis(50));
    controller.input("shoe 1".to_string(), t0 + Duration::from_millis(100));
    assert!(controller.is_typing());
    assert_eq!(controller.next_wakeup(), Some(t0 + Duration::from_millis(300)));

    assert!(!controller.tick(t0 + Duration::from_millis(250)));
    assert!(controller.tick(t0 + Duration::from_millis(300)));
    assert!(!controller.is_typing());
    assert!(controller.wait_for_fetch(WAIT));

    // "Shoe 1" and "Shoe 10".."Shoe 19"
    let session = controller.session();
    assert_eq!(session.query(), "shoe 1");
    assert_eq!(session.total_found(), 11);
    assert_eq!(session.items().len(), 11);
    assert_eq!(controller.banner(), Some(StatusBanner::EndOfResults(11)));
    assert_eq!(
        catalog.calls(),
        vec![(String::new(), 1), ("shoe 1".to_string(), 1)]
    );
}

#[test]
fn typing_back_to_the_settled_text_sends_nothing() {
    let catalog = Arc::new(FakeCatalog::new(5));
    let mut controller = started(catalog.clone(), "");

    let t0 = Instant::now();
    controller.input("x".to_string(), t0);
    controller.input(String::new(), t0 + Duration::from_millis(20));
    assert!(!controller.tick(t0 + Duration::from_secs(1)));
    assert_eq!(catalog.calls().len(), 1);
}

#[test]
fn no_results_banner_names_the_query() {
    let catalog = Arc::new(FakeCatalog::new(5));
    let controller = started(catalog, "sandal");

    assert!(controller.session().items().is_empty());
    assert_eq!(
        controller.banner().map(|b| b.text()),
        Some("No products found for \"sandal\".".to_string())
    );
}

#[test]
fn server_error_is_shown_and_can_be_retried() {
    let catalog = Arc::new(FakeCatalog::new(5));
    let mut controller = started(catalog.clone(), "broken");

    assert_eq!(controller.session().error(), Some("index unavailable"));
    assert!(controller.session().items().is_empty());
    assert_eq!(
        controller.banner(),
        Some(StatusBanner::Error("index unavailable".to_string()))
    );
    assert!(!controller.observe(&Visible(1.0)));

    controller.reload();
    assert!(controller.session().is_loading());
    assert!(controller.wait_for_fetch(WAIT));
    assert_eq!(catalog.calls(), vec![("broken".to_string(), 1), ("broken".to_string(), 1)]);
}

#[test]
fn slow_stale_response_never_overwrites_newer_results() {
    let (catalog, release) = FakeCatalog::new(25).gated("shoe 2");
    let catalog = Arc::new(catalog);
    let mut controller = started(catalog.clone(), "");

    let t0 = Instant::now();
    controller.input("shoe 2".to_string(), t0);
    assert!(controller.tick(t0 + Duration::from_millis(200)));

    let t1 = t0 + Duration::from_millis(400);
    controller.input("shoe 1".to_string(), t1);
    assert!(controller.tick(t1 + Duration::from_millis(200)));

    // The newer query answers first
    assert!(controller.wait_for_fetch(WAIT));
    assert_eq!(controller.session().query(), "shoe 1");
    assert_eq!(controller.session().total_found(), 11);

    // Then the old one limps in and is ignored
    release.send(()).unwrap();
    assert!(controller.wait_for_fetch(WAIT));
    let session = controller.session();
    assert_eq!(session.query(), "shoe 1");
    assert_eq!(session.items().len(), 11);
    assert!(session.items().iter().all(|p| p.title.starts_with("Shoe 1")));
    assert!(session.in_flight().is_none());
}

#[test]
fn reload_while_typing_searches_the_typed_text() {
    let catalog = Arc::new(FakeCatalog::new(25));
    let mut controller = started(catalog.clone(), "shoe 2");

    let t0 = Instant::now();
    controller.input("shoe 1".to_string(), t0);
    controller.reload();
    assert!(!controller.is_typing());
    assert!(controller.wait_for_fetch(WAIT));

    // Nothing left for the debounce to emit
    assert!(!controller.tick(t0 + Duration::from_secs(5)));

    let session = controller.session();
    assert_eq!(controller.raw_query(), "shoe 1");
    assert_eq!(session.query(), "shoe 1");
    assert_eq!(session.total_found(), 11);
    assert_eq!(
        catalog.calls(),
        vec![("shoe 2".to_string(), 1), ("shoe 1".to_string(), 1)]
    );
}

#[test]
fn reload_with_nothing_typed_repeats_the_current_query() {
    let catalog = Arc::new(FakeCatalog::new(25));
    let mut controller = started(catalog.clone(), "shoe 2");

    // Typing back to the searched text leaves nothing new to search
    let t0 = Instant::now();
    controller.input("shoe".to_string(), t0);
    controller.input("shoe 2".to_string(), t0 + Duration::from_millis(10));
    controller.reload();
    assert!(controller.wait_for_fetch(WAIT));

    assert_eq!(controller.session().query(), "shoe 2");
    assert_eq!(
        catalog.calls(),
        vec![("shoe 2".to_string(), 1), ("shoe 2".to_string(), 1)]
    );
}
