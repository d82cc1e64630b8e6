//! Wire types for the product resource.

use serde::{Deserialize, Serialize};

/// Inventory status as exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryStatus {
    #[serde(rename = "INSTOCK")]
    InStock,
    #[serde(rename = "LOWSTOCK")]
    LowStock,
    #[serde(rename = "OUTOFSTOCK")]
    OutOfStock,
}

impl InventoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryStatus::InStock => "INSTOCK",
            InventoryStatus::LowStock => "LOWSTOCK",
            InventoryStatus::OutOfStock => "OUTOFSTOCK",
        }
    }
}

impl std::str::FromStr for InventoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INSTOCK" => Ok(InventoryStatus::InStock),
            "LOWSTOCK" => Ok(InventoryStatus::LowStock),
            "OUTOFSTOCK" => Ok(InventoryStatus::OutOfStock),
            other => Err(format!(
                "invalid inventory status '{other}'. Allowed: INSTOCK, LOWSTOCK, OUTOFSTOCK"
            )),
        }
    }
}

impl std::fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog product. Mirrors the API's product representation; fields the
/// server fills in (id, version, audit-driven defaults) are optional so the
/// same type serves create payloads and responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Optimistic-lock version; echo it back on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    /// Unique product code (SKU).
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_reference: Option<String>,
    /// Shelf identifier (aisle/shelf location).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_status: Option<InventoryStatus>,
    /// Average rating, 0..5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// One page of a product listing, straight off the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default)]
    pub content: Vec<Product>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub size: u32,
    pub number: u32,
}

/// Listing parameters. Filters are transmitted only when they carry a
/// trimmed, non-blank value; page and size always go out, defaulted when
/// unset.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Page index, zero-based. Defaults to 0.
    pub page: Option<u32>,
    /// Page size. Defaults to 12.
    pub size: Option<u32>,
    /// Category filter.
    pub category: Option<String>,
    /// Free-text search over name, code and description.
    pub q: Option<String>,
    /// Inventory status filter (INSTOCK, LOWSTOCK, OUTOFSTOCK).
    pub status: Option<String>,
}

pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 12;

impl ProductQuery {
    /// Builds the GET query pairs: `page` and `size` always, filters only
    /// when non-blank.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.unwrap_or(DEFAULT_PAGE).to_string()),
            ("size", self.size.unwrap_or(DEFAULT_PAGE_SIZE).to_string()),
        ];
        if let Some(v) = non_blank(self.category.as_deref()) {
            params.push(("category", v));
        }
        if let Some(v) = non_blank(self.q.as_deref()) {
            params.push(("q", v));
        }
        if let Some(v) = non_blank(self.status.as_deref()) {
            params.push(("status", v));
        }
        params
    }
}

fn non_blank(v: Option<&str>) -> Option<String> {
    v.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

// ── Tests ────────────────────────────────────────────────────
