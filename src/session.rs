//! Query/pagination state machine
//!
//! All mutations of the result list happen in [`Session::update`]. Every
//! fetch it asks for carries a [`FetchTag`]; a completion is applied only if
//! its tag equals the one the session is waiting for, so a response that was
//! overtaken by a newer query or page is dropped on arrival.

use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::model::{ItemKey, Product, SearchPage};

/// Whether a completed page replaces or extends the result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Replace,
    Append,
}

/// Identifies one issued fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTag {
    /// Bumped for every fetch the session issues
    pub seq: u64,
    pub query: String,
    pub page: u32,
    pub mode: FetchMode,
}

/// Side effect requested by a transition: run this search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub tag: FetchTag,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading(u32),
    Error(String),
    Loaded { has_more: bool },
}

#[derive(Debug, Clone)]
pub enum Event {
    /// The debounced query settled on a new value
    QueryChanged(String),
    /// The scroll pager wants the next page
    PageRequested,
    /// Restart the current query from page 1
    Reload,
    FetchSucceeded { tag: FetchTag, page: SearchPage },
    FetchFailed { tag: FetchTag, error: SearchError },
}

#[derive(Debug, Clone)]
pub struct Session {
    page_size: u32,
    query: String,
    items: Vec<Product>,
    page: u32,
    total_found: u64,
    has_more: bool,
    phase: Phase,
    next_seq: u64,
    in_flight: Option<FetchTag>,
    completed_once: bool,
}

impl Session {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            query: String::new(),
            items: Vec::new(),
            page: 1,
            total_found: 0,
            has_more: false,
            phase: Phase::Idle,
            next_seq: 0,
            in_flight: None,
            completed_once: false,
        }
    }

    /// Apply one event; returns the fetch to issue, if any.
    pub fn update(&mut self, event: Event) -> Option<FetchRequest> {
        match event {
            Event::QueryChanged(query) => {
                if self.phase != Phase::Idle && query == self.query {
                    debug!(query = %query, "query unchanged, keeping session");
                    return None;
                }
                Some(self.start_session(query))
            }
            Event::Reload => {
                let query = self.query.clone();
                Some(self.start_session(query))
            }
            Event::PageRequested => self.next_page(),
            Event::FetchSucceeded { tag, page } => {
                if !self.accept(&tag) {
                    return None;
                }
                self.apply_page(tag, page);
                None
            }
            Event::FetchFailed { tag, error } => {
                if !self.accept(&tag) {
                    return None;
                }
                warn!(query = %tag.query, page = tag.page, error = %error, "search failed");
                self.items.clear();
                self.total_found = 0;
                self.has_more = false;
                self.completed_once = true;
                self.phase = Phase::Error(error.message());
                None
            }
        }
    }

    fn start_session(&mut self, query: String) -> FetchRequest {
        info!(query = %query, "starting search session");
        self.query = query;
        self.items.clear();
        self.page = 1;
        self.total_found = 0;
        self.has_more = true;
        self.phase = Phase::Loading(1);
        self.issue(FetchMode::Replace)
    }

    fn next_page(&mut self) -> Option<FetchRequest> {
        if self.phase != (Phase::Loaded { has_more: true }) {
            debug!(phase = ?self.phase, "page request ignored");
            return None;
        }
        self.page += 1;
        self.phase = Phase::Loading(self.page);
        debug!(query = %self.query, page = self.page, "requesting next page");
        Some(self.issue(FetchMode::Append))
    }

    fn issue(&mut self, mode: FetchMode) -> FetchRequest {
        self.next_seq += 1;
        let tag = FetchTag {
            seq: self.next_seq,
            query: self.query.clone(),
            page: self.page,
            mode,
        };
        self.in_flight = Some(tag.clone());
        FetchRequest {
            tag,
            page_size: self.page_size,
        }
    }

    fn accept(&mut self, tag: &FetchTag) -> bool {
        if self.in_flight.as_ref() != Some(tag) {
            debug!(seq = tag.seq, query = %tag.query, page = tag.page, "discarding stale response");
            return false;
        }
        self.in_flight = None;
        true
    }

    fn apply_page(&mut self, tag: FetchTag, page: SearchPage) {
        let received = page.items.len();
        match tag.mode {
            FetchMode::Replace => self.items = page.items,
            FetchMode::Append => self.items.extend(page.items),
        }
        self.total_found = page.total_found;
        self.has_more = self.total_found > u64::from(tag.page) * u64::from(self.page_size);
        self.completed_once = true;
        self.phase = Phase::Loaded {
            has_more: self.has_more,
        };
        debug!(
            query = %tag.query,
            page = tag.page,
            received,
            total = self.total_found,
            has_more = self.has_more,
            "page applied"
        );
    }

    // --- Accessors ---

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_found(&self) -> u64 {
        self.total_found
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn in_flight(&self) -> Option<&FetchTag> {
        self.in_flight.as_ref()
    }

    /// True once any fetch of any session has finished
    pub fn has_completed_fetch(&self) -> bool {
        self.completed_once
    }

    /// Identity of the last rendered item, the scroll pager's target
    pub fn last_item_key(&self) -> Option<ItemKey> {
        let position = self.items.len().checked_sub(1)?;
        Some(ItemKey::for_item(position, &self.items[position]))
    }
}
