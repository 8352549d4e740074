//! Presentation model shared by the terminal and desktop front ends.
//!
//! Everything here is a pure function of session state; the front ends only
//! decide how to draw it.

use crate::model::Product;
use crate::session::Session;

pub const PLACEHOLDER_NO_IMAGE: &str = "https://placehold.co/400x400/E0E0E0/333333?text=No+Image";
pub const PLACEHOLDER_IMAGE_ERROR: &str =
    "https://placehold.co/400x400/E0E0E0/333333?text=Image+Error";

/// Threshold below which a positive stock count is shown as low
const LOW_STOCK_LIMIT: i64 = 10;

/// The single status message shown below the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusBanner {
    Error(String),
    LoadingMore,
    NoResults(String),
    /// The wildcard search came back empty
    EmptyCatalog,
    StartTyping,
    EndOfResults(u64),
}

impl StatusBanner {
    /// Pick the banner for the current state, if any applies.
    pub fn for_session(session: &Session) -> Option<Self> {
        let empty = session.items().is_empty();
        let loading = session.is_loading();

        if let Some(msg) = session.error() {
            return Some(StatusBanner::Error(msg.to_string()));
        }
        if loading {
            return (!empty).then_some(StatusBanner::LoadingMore);
        }
        if empty {
            if !session.query().is_empty() {
                return Some(StatusBanner::NoResults(session.query().to_string()));
            }
            if !session.has_completed_fetch() {
                return Some(StatusBanner::StartTyping);
            }
            return Some(StatusBanner::EmptyCatalog);
        }
        (!session.has_more()).then(|| StatusBanner::EndOfResults(session.total_found()))
    }

    pub fn text(&self) -> String {
        match self {
            StatusBanner::Error(msg) => format!("Error! {}", msg),
            StatusBanner::LoadingMore => "Loading more products...".to_string(),
            StatusBanner::NoResults(query) => format!("No products found for \"{}\".", query),
            StatusBanner::EmptyCatalog => "No products found.".to_string(),
            StatusBanner::StartTyping => "Start typing to search for products.".to_string(),
            StatusBanner::EndOfResults(total) => {
                format!("You've reached the end of the results ({} products).", total)
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusBanner::Error(_))
    }
}

/// Hint shown under an error banner
pub fn backend_hint(base_url: &str) -> String {
    format!("Please ensure the search backend is running on {} and reachable.", base_url)
}

/// Stock display band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockBand {
    OutOfStock,
    Unlimited,
    Low(i64),
    InStock,
}

impl StockBand {
    /// 0 is out of stock, -1 unlimited, 1..=9 low; anything else in stock.
    pub fn classify(quantity: i64) -> Self {
        match quantity {
            0 => StockBand::OutOfStock,
            -1 => StockBand::Unlimited,
            n if n > 0 && n < LOW_STOCK_LIMIT => StockBand::Low(n),
            _ => StockBand::InStock,
        }
    }

    pub fn label(&self) -> String {
        match self {
            StockBand::OutOfStock => "Out of Stock".to_string(),
            StockBand::Unlimited => "Available (Unlimited)".to_string(),
            StockBand::Low(n) => format!("Low Stock ({})", n),
            StockBand::InStock => "In Stock".to_string(),
        }
    }
}

/// Where a card's picture comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Placeholder(&'static str),
}

impl ImageSource {
    pub fn for_product(product: &Product) -> Self {
        match product.image_url() {
            Some(url) => ImageSource::Remote(url.to_string()),
            None => ImageSource::Placeholder(PLACEHOLDER_NO_IMAGE),
        }
    }

    /// Replacement after the image failed to load. A failing placeholder
    /// is kept as is.
    pub fn on_error(&self) -> Self {
        match self {
            ImageSource::Remote(_) => ImageSource::Placeholder(PLACEHOLDER_IMAGE_ERROR),
            placeholder => placeholder.clone(),
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            ImageSource::Remote(url) => url,
            ImageSource::Placeholder(url) => url,
        }
    }

    /// Short caption for front ends that cannot draw pictures
    pub fn caption(&self) -> &'static str {
        match self {
            ImageSource::Remote(_) => "[image]",
            ImageSource::Placeholder(PLACEHOLDER_IMAGE_ERROR) => "Image Error",
            ImageSource::Placeholder(_) => "No Image",
        }
    }
}

/// Format cents as `$12.34`
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

/// Everything a card shows, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub category: String,
    pub price: String,
    pub stock: StockBand,
    pub image: ImageSource,
}

impl CardView {
    pub fn from_product(product: &Product) -> Self {
        let category = if product.product_type.trim().is_empty() {
            "N/A".to_string()
        } else {
            product.product_type.clone()
        };
        Self {
            title: product.title.clone(),
            category,
            price: format_price(product.price),
            stock: StockBand::classify(product.inventory_quantity),
            image: ImageSource::for_product(product),
        }
    }
}
