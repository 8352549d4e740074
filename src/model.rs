//! Catalog data model and the search backend's wire format

use serde::{Deserialize, Serialize};

/// A single catalog product as returned inside a search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    /// Price in cents
    pub price: i64,
    #[serde(default)]
    pub product_type: String,
    /// 0 = out of stock, -1 = unlimited
    pub inventory_quantity: i64,
    #[serde(default)]
    pub image: Option<ProductImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub src: Option<String>,
}

impl Product {
    /// Image URL, if the product carries a non-empty one
    pub fn image_url(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(|img| img.src.as_deref())
            .filter(|src| !src.trim().is_empty())
    }
}

/// One page of results plus the total match count for the whole query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    pub items: Vec<Product>,
    pub total_found: u64,
}

/// Stable identity of a rendered card, used to re-attach the scroll pager
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub position: usize,
    pub id: Option<String>,
}

impl ItemKey {
    pub fn for_item(position: usize, product: &Product) -> Self {
        Self {
            position,
            id: product.id.clone(),
        }
    }
}

// --- Wire format ---

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub found: u64,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    pub document: Product,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl From<SearchResponse> for SearchPage {
    fn from(resp: SearchResponse) -> Self {
        Self {
            items: resp.hits.into_iter().map(|hit| hit.document).collect(),
            total_found: resp.found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_document() {
        let json = r#"{
            "id": "p-1",
            "title": "Trail Shoe",
            "price": 12999,
            "productType": "Shoes",
            "inventoryQuantity": 4,
            "image": { "src": "https://cdn.example/shoe.png" }
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_deref(), Some("p-1"));
        assert_eq!(product.price, 12999);
        assert_eq!(product.product_type, "Shoes");
        assert_eq!(product.image_url(), Some("https://cdn.example/shoe.png"));
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{ "title": "Mystery", "price": 0, "inventoryQuantity": -1 }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, None);
        assert_eq!(product.product_type, "");
        assert_eq!(product.image_url(), None);
    }

    #[test]
    fn blank_image_src_is_missing() {
        let json = r#"{ "title": "x", "price": 1, "inventoryQuantity": 1, "image": { "src": " " } }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.image_url(), None);
    }

    #[test]
    fn response_flattens_hits_in_order() {
        let json = r#"{
            "found": 25,
            "hits": [
                { "document": { "title": "a", "price": 1, "inventoryQuantity": 1 } },
                { "document": { "title": "b", "price": 2, "inventoryQuantity": 2 } }
            ]
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        let page = SearchPage::from(resp);
        assert_eq!(page.total_found, 25);
        let titles: Vec<_> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
    }
}
