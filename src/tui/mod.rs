//! Terminal front end
//!
//! A search bar over a grid of product cards. Scrolling the last card into
//! view loads the next page.

pub mod app;
pub mod colors;
pub mod grid;
pub mod search;
pub mod ui;

use std::sync::Arc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tracing::info;

use crate::client::SearchClient;
use crate::config::SearchConfig;
use crate::{CatsearchError, Result};

pub use app::App;

/// Run the terminal UI until the user quits
pub fn run(config: SearchConfig, client: Arc<dyn SearchClient>) -> Result<()> {
    info!(base_url = %config.base_url, "starting terminal UI");

    let mut terminal =
        ratatui::try_init().map_err(|e| CatsearchError::Terminal(e.to_string()))?;
    if let Err(e) = execute!(std::io::stdout(), EnableMouseCapture) {
        ratatui::restore();
        return Err(CatsearchError::Terminal(e.to_string()));
    }

    let mut app = App::new(config, client);
    let result = app.run(&mut terminal);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}
