use crate::view::StockBand;
use eframe::egui::Color32;

pub const ACCENT: Color32 = Color32::from_rgb(0, 123, 255);
pub const MUTED: Color32 = Color32::from_rgb(119, 119, 119);
pub const ERROR_FG: Color32 = Color32::from_rgb(204, 0, 0);
pub const ERROR_BG: Color32 = Color32::from_rgb(255, 230, 230);
pub const PLACEHOLDER_BG: Color32 = Color32::from_rgb(224, 224, 224);
pub const PLACEHOLDER_FG: Color32 = Color32::from_rgb(51, 51, 51);

/// Stock badge colour (matches the TUI palette).
pub fn stock_color(band: StockBand) -> Color32 {
    match band {
        StockBand::OutOfStock => Color32::from_rgb(220, 53, 69),
        StockBand::Unlimited => Color32::from_rgb(0, 123, 255),
        StockBand::Low(_) => Color32::from_rgb(255, 193, 7),
        StockBand::InStock => Color32::from_rgb(40, 167, 69),
    }
}
