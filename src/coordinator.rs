//! Fetch coordination
//!
//! Each [`FetchRequest`] runs on its own worker thread against the shared
//! [`SearchClient`]; the outcome comes back tagged over a channel and is
//! drained by the UI loop. Nothing here decides whether an outcome is still
//! wanted, that is the session's job.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, error};

use crate::client::SearchClient;
use crate::error::SearchError;
use crate::model::SearchPage;
use crate::session::{Event, FetchRequest, FetchTag};

/// Callback run after an outcome is queued (e.g. to repaint a GUI)
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Result of one fetch, still carrying the tag it was issued with
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub tag: FetchTag,
    pub result: Result<SearchPage, SearchError>,
}

impl FetchOutcome {
    /// Convert into the session event for this outcome
    pub fn into_event(self) -> Event {
        match self.result {
            Ok(page) => Event::FetchSucceeded { tag: self.tag, page },
            Err(error) => Event::FetchFailed { tag: self.tag, error },
        }
    }
}

pub struct FetchCoordinator {
    client: Arc<dyn SearchClient>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    waker: Option<Waker>,
}

impl FetchCoordinator {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        let (tx, rx) = unbounded();
        Self {
            client,
            tx,
            rx,
            waker: None,
        }
    }

    pub fn set_waker(&mut self, waker: Waker) {
        self.waker = Some(waker);
    }

    /// Start `request` in the background
    pub fn issue(&self, request: FetchRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let waker = self.waker.clone();

        debug!(
            seq = request.tag.seq,
            query = %request.tag.query,
            page = request.tag.page,
            mode = ?request.tag.mode,
            "issuing fetch"
        );

        let spawned = thread::Builder::new()
            .name(format!("fetch-{}", request.tag.seq))
            .spawn(move || {
                let FetchRequest { tag, page_size } = request;
                let result = client.search(&tag.query, tag.page, page_size);
                if let Err(err) = &result {
                    debug!(seq = tag.seq, status = ?err.status(), error = %err, "fetch failed");
                }
                let _ = tx.send(FetchOutcome { tag, result });
                if let Some(wake) = waker {
                    wake();
                }
            });

        if let Err(e) = spawned {
            error!(error = %e, "failed to spawn fetch worker");
        }
    }

    /// All outcomes delivered so far, in arrival order
    pub fn drain(&self) -> Vec<FetchOutcome> {
        self.rx.try_iter().collect()
    }

    /// Block up to `timeout` for the next outcome
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
