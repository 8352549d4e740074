//! Main desktop application

use crate::client::SearchClient;
use crate::config::SearchConfig;
use crate::controller::SearchController;
use crate::gui::cards::{self, FailedImages, LastCard};
use crate::gui::colors;
use crate::model::ItemKey;
use crate::session::Phase;
use crate::view::{backend_hint, CardView, StatusBanner};
use eframe::egui;
use std::sync::Arc;
use std::time::Instant;

pub struct CatalogApp {
    controller: SearchController,
    /// Text in the search field
    query: String,
    /// Focus the search field on the first frame
    first_frame: bool,
    /// Image URLs that failed to load in this session
    failed_images: FailedImages,
}

impl CatalogApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: SearchConfig,
        client: Arc<dyn SearchClient>,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let query = config.initial_query.clone();
        let mut controller = SearchController::new(config, client);
        let ctx = cc.egui_ctx.clone();
        controller.set_waker(Arc::new(move || ctx.request_repaint()));
        controller.start();

        Self {
            controller,
            query,
            first_frame: true,
            failed_images: FailedImages::default(),
        }
    }

    fn render_search_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("Product Search");
            ui.add_space(4.0);
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.query)
                    .desired_width(ui.available_width())
                    .hint_text("Search for products..."),
            );

            if self.first_frame {
                response.request_focus();
                self.first_frame = false;
            }

            if response.changed() {
                self.controller.input(self.query.clone(), Instant::now());
            }
            ui.add_space(6.0);
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let session = self.controller.session();
                match session.phase() {
                    Phase::Loading(page) => {
                        ui.spinner();
                        ui.label(format!("Loading page {}...", page));
                    }
                    Phase::Error(_) => {
                        ui.colored_label(colors::ERROR_FG, "Search failed");
                    }
                    _ => {
                        ui.label(format!(
                            "{} of {} products",
                            session.items().len(),
                            session.total_found()
                        ));
                    }
                }
                if self.controller.is_typing() {
                    ui.separator();
                    ui.label("typing...");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(&self.controller.config().base_url)
                            .color(colors::MUTED),
                    );
                });
            });
        });
    }

    fn render_error_banner(&mut self, ui: &mut egui::Ui, banner: &StatusBanner) {
        let mut retry = false;
        egui::Frame::new()
            .fill(colors::ERROR_BG)
            .inner_margin(egui::Margin::same(8))
            .corner_radius(egui::CornerRadius::same(4))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.colored_label(colors::ERROR_FG, egui::RichText::new(banner.text()).strong());
                ui.label(backend_hint(&self.controller.config().base_url));
                retry = ui.button("Retry").clicked();
            });
        if retry {
            self.failed_images.clear();
            self.controller.reload();
        }
    }

    /// Card grid plus the trailing status message. Returns where the last
    /// card ended up.
    fn render_grid(&mut self, ui: &mut egui::Ui, banner: Option<&StatusBanner>) -> Option<LastCard> {
        let session = self.controller.session();
        let failed = &mut self.failed_images;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut last = None;
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
                    let count = session.items().len();
                    for (position, product) in session.items().iter().enumerate() {
                        let response = cards::card(ui, &CardView::from_product(product), failed);
                        if position + 1 == count {
                            last = Some((ItemKey::for_item(position, product), response.rect));
                        }
                    }
                });

                if let Some(banner) = banner.filter(|b| !b.is_error()) {
                    ui.add_space(12.0);
                    ui.vertical_centered(|ui| {
                        if *banner == StatusBanner::LoadingMore {
                            ui.spinner();
                        }
                        ui.label(egui::RichText::new(banner.text()).color(colors::MUTED));
                    });
                    ui.add_space(12.0);
                }

                let clip = ui.clip_rect();
                last.map(|(key, rect)| LastCard { key, rect, clip })
            })
            .inner
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.controller.tick(now);

        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.failed_images.clear();
            self.controller.reload();
        }
        self.failed_images.sync(self.controller.session().query());

        self.render_search_bar(ctx);
        self.render_status_bar(ctx);

        let banner = self.controller.banner();
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(b) = banner.as_ref().filter(|b| b.is_error()) {
                self.render_error_banner(ui, b);
                ui.add_space(8.0);
            }
            if let Some(last) = self.render_grid(ui, banner.as_ref()) {
                if self.controller.observe(&last) {
                    ctx.request_repaint();
                }
            }
        });

        // Wake up again when the debounce settles
        if let Some(deadline) = self.controller.next_wakeup() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}
