//! Product card widget

use std::collections::HashSet;

use eframe::egui::{self, Align, Align2, FontId, Layout, Rect, RichText, Sense};
use tracing::debug;

use crate::gui::colors;
use crate::model::ItemKey;
use crate::pager::{overlap_fraction, VisibilitySource};
use crate::view::{CardView, ImageSource};

pub const CARD_WIDTH: f32 = 220.0;
pub const IMAGE_HEIGHT: f32 = 160.0;

/// Draw one product card and return its response (rect included).
///
/// `failed` remembers image URLs that could not be loaded so later frames go
/// straight to the error placeholder.
pub fn card(ui: &mut egui::Ui, card: &CardView, failed: &mut FailedImages) -> egui::Response {
    egui::Frame::group(ui.style())
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                product_image(ui, &card.image, failed);
                ui.add_space(4.0);
                ui.add(egui::Label::new(RichText::new(&card.title).strong()).truncate());
                ui.label(RichText::new(&card.category).small().color(colors::MUTED));
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&card.price).strong().color(colors::ACCENT));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(
                            RichText::new(card.stock.label())
                                .small()
                                .color(colors::stock_color(card.stock)),
                        );
                    });
                });
            });
        })
        .response
}

fn product_image(ui: &mut egui::Ui, source: &ImageSource, failed: &mut FailedImages) {
    let size = egui::vec2(CARD_WIDTH, IMAGE_HEIGHT);
    let source = match source {
        ImageSource::Remote(url) if failed.contains(url) => source.on_error(),
        other => other.clone(),
    };

    if let ImageSource::Remote(url) = &source {
        let image = egui::Image::new(url.clone()).fit_to_exact_size(size);
        match image.load_for_size(ui.ctx(), size) {
            Ok(_) => {
                ui.add(image);
            }
            Err(err) => {
                debug!(url = url.as_str(), %err, "image failed to load");
                failed.insert(url.clone());
                placeholder(ui, size, source.on_error().caption());
            }
        }
        return;
    }

    placeholder(ui, size, source.caption());
}

fn placeholder(ui: &mut egui::Ui, size: egui::Vec2, caption: &str) {
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, egui::CornerRadius::same(4), colors::PLACEHOLDER_BG);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        caption,
        FontId::proportional(16.0),
        colors::PLACEHOLDER_FG,
    );
}

/// Image URLs that failed to load in the current search session
#[derive(Debug, Default)]
pub struct FailedImages {
    query: String,
    urls: HashSet<String>,
}

impl FailedImages {
    /// Forget failures recorded for a different query
    pub fn sync(&mut self, query: &str) {
        if self.query != query {
            self.urls.clear();
            self.query = query.to_string();
        }
    }

    pub fn clear(&mut self) {
        self.urls.clear();
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn insert(&mut self, url: String) {
        self.urls.insert(url);
    }
}

/// Where the last card landed relative to the scroll area's clip rect
#[derive(Debug, Clone)]
pub struct LastCard {
    pub key: ItemKey,
    pub rect: Rect,
    pub clip: Rect,
}

impl VisibilitySource<ItemKey> for LastCard {
    fn visible_fraction(&self, target: &ItemKey) -> Option<f32> {
        (*target == self.key).then(|| {
            overlap_fraction(self.rect.top(), self.rect.bottom(), self.clip.top(), self.clip.bottom())
        })
    }
}
