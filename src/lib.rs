//! Catsearch - search-as-you-type catalog browser
//!
//! Queries a product search backend while the user types and loads further
//! pages as the end of the result grid scrolls into view.
//!
//! # Architecture
//!
//! - **Debouncer**: turns raw keystrokes into settled queries
//! - **Session**: a pure state machine over one search session; every fetch
//!   it asks for is tagged, and responses whose tag is no longer in flight are
//!   dropped
//! - **Fetch coordinator**: runs tagged fetches on worker threads
//! - **Scroll pager**: fires a page request once when the last card is
//!   visible enough
//! - **Front ends**: a terminal UI (ratatui) and a desktop UI (egui), both
//!   driven through [`SearchController`]
//!
//! # Example
//!
//! ```no_run
//! use catsearch::{HttpSearchClient, SearchClient};
//!
//! fn main() -> catsearch::Result<()> {
//!     let client = HttpSearchClient::new("http://localhost:8080")?;
//!     let page = client.search("shoe", 1, 12)?;
//!
//!     println!("{} products match", page.total_found);
//!     for product in &page.items {
//!         println!("{}", product.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod coordinator;
pub mod debounce;
pub mod error;
pub mod gui;
pub mod logging;
pub mod model;
pub mod pager;
pub mod session;
pub mod tui;
pub mod view;

// Re-export main types
pub use client::{HttpSearchClient, SearchClient};
pub use config::{AppConfig, Overrides, SearchConfig};
pub use controller::SearchController;
pub use error::{CatsearchError, Result, SearchError};
pub use model::{ItemKey, Product, ProductImage, SearchPage};
pub use session::{Event, FetchMode, FetchRequest, FetchTag, Phase, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
