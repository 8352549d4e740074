use crate::view::StockBand;
use ratatui::style::Color;

pub const BAR_BG: Color = Color::Rgb(40, 40, 50);
pub const ACCENT: Color = Color::Rgb(0, 123, 255);
pub const MUTED: Color = Color::Rgb(119, 119, 119);
pub const ERROR_FG: Color = Color::Rgb(204, 0, 0);

pub fn stock_color(band: StockBand) -> Color {
    match band {
        StockBand::OutOfStock => Color::Rgb(220, 53, 69),
        StockBand::Unlimited => Color::Rgb(0, 123, 255),
        StockBand::Low(_) => Color::Rgb(255, 193, 7),
        StockBand::InStock => Color::Rgb(40, 167, 69),
    }
}
