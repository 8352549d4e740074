//! Search controller
//!
//! Wires the debouncer, the session, the fetch coordinator and the scroll
//! pager together. Front ends feed it keystrokes, clock ticks and
//! visibility reports, and render from [`SearchController::session`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use crate::client::SearchClient;
use crate::config::SearchConfig;
use crate::coordinator::{FetchCoordinator, Waker};
use crate::debounce::Debouncer;
use crate::model::ItemKey;
use crate::pager::{PagerGate, ScrollPager, VisibilitySource};
use crate::session::{Event, Session};
use crate::view::StatusBanner;

pub struct SearchController {
    config: SearchConfig,
    raw_query: String,
    debouncer: Debouncer<String>,
    session: Session,
    pager: ScrollPager<ItemKey>,
    coordinator: FetchCoordinator,
}

impl SearchController {
    pub fn new(config: SearchConfig, client: Arc<dyn SearchClient>) -> Self {
        let initial = config.initial_query.clone();
        Self {
            raw_query: initial.clone(),
            debouncer: Debouncer::new(initial, config.debounce()),
            session: Session::new(config.page_size),
            pager: ScrollPager::default(),
            coordinator: FetchCoordinator::new(client),
            config,
        }
    }

    /// Repaint hook run whenever a fetch finishes
    pub fn set_waker(&mut self, waker: Waker) {
        self.coordinator.set_waker(waker);
    }

    /// Search the initial query right away, without waiting for the debounce.
    pub fn start(&mut self) {
        let query = self.debouncer.settled().clone();
        info!(query = %query, "initial search");
        self.dispatch(Event::QueryChanged(query));
    }

    /// Raw text of the input box changed
    pub fn input(&mut self, query: String, now: Instant) {
        if query == self.raw_query {
            return;
        }
        self.raw_query = query.clone();
        self.debouncer.input(query, now);
    }

    /// Search again from page 1. Text still waiting on the debounce is
    /// searched right away instead of the old query.
    pub fn reload(&mut self) {
        match self.debouncer.flush() {
            Some(query) if query != self.session.query() => {
                info!(query = %query, "query settled by reload");
                self.dispatch(Event::QueryChanged(query));
            }
            _ => self.dispatch(Event::Reload),
        }
    }

    /// Advance timers and apply finished fetches. Returns `true` if the
    /// session may have changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        // Finished fetches first, so a fetch issued below is never drained
        // in the same tick
        for outcome in self.coordinator.drain() {
            self.dispatch(outcome.into_event());
            changed = true;
        }

        if let Some(query) = self.debouncer.poll(now) {
            info!(query = %query, "query settled");
            self.dispatch(Event::QueryChanged(query));
            changed = true;
        }

        changed
    }

    /// Block up to `timeout` for one finished fetch and apply it.
    pub fn wait_for_fetch(&mut self, timeout: Duration) -> bool {
        match self.coordinator.recv_timeout(timeout) {
            Some(outcome) => {
                self.dispatch(outcome.into_event());
                true
            }
            None => false,
        }
    }

    /// Report where the last card currently is; may request the next page.
    pub fn observe(&mut self, source: &impl VisibilitySource<ItemKey>) -> bool {
        self.sync_pager();
        if self.pager.check(source) {
            self.dispatch(Event::PageRequested);
            return true;
        }
        false
    }

    /// Earliest instant at which [`tick`](Self::tick) has timer work to do
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    fn dispatch(&mut self, event: Event) {
        if let Some(request) = self.session.update(event) {
            self.coordinator.issue(request);
        }
        self.sync_pager();
    }

    fn sync_pager(&mut self) {
        let gate = PagerGate {
            has_more: self.session.has_more(),
            loading: self.session.is_loading(),
        };
        self.pager.attach(self.session.last_item_key(), gate);
    }

    // --- Accessors ---

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Text of the input box, before debouncing
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn banner(&self) -> Option<StatusBanner> {
        StatusBanner::for_session(&self.session)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn is_typing(&self) -> bool {
        self.debouncer.is_pending()
    }
}
