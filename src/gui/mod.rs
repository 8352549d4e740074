//! Desktop front end (eframe/egui)

pub mod app;
pub mod cards;
pub mod colors;

use std::sync::Arc;

use crate::client::SearchClient;
use crate::config::SearchConfig;
use crate::{CatsearchError, Result};

/// Entry point: launch the native GUI window
pub fn run(config: SearchConfig, client: Arc<dyn SearchClient>) -> Result<()> {
    tracing::info!(base_url = %config.base_url, "starting desktop UI");

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Catsearch - Product Search")
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Catsearch",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::CatalogApp::new(cc, config, client)))),
    )
    .map_err(|e| CatsearchError::Gui(format!("GUI error: {}", e)))
}
