//! # Menu Browsing
//!
//! Search, category filter and sort over the catalog's items.
//!
//! ```text
//! items ──► search (name | description, case-insensitive)
//!       ──► category ("All" matches everything)
//!       ──► sort (name A-Z | price ↑ | price ↓ | prep time ↑)
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::CatalogItem;

/// Category label that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Fixed category labels shown by the menu, in display order.
pub const CATEGORIES: [&str; 7] = [
    ALL_CATEGORIES,
    "Pizza",
    "Burgers",
    "Asian",
    "Salads",
    "Desserts",
    "Beverages",
];

/// Menu ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum MenuSort {
    /// Name, A to Z.
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    /// Shortest preparation time first.
    Time,
}

impl FromStr for MenuSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(MenuSort::Name),
            "price-low" => Ok(MenuSort::PriceLow),
            "price-high" => Ok(MenuSort::PriceHigh),
            "time" => Ok(MenuSort::Time),
            other => Err(ValidationError::invalid_format(
                "sort",
                format!("unknown sort '{}' (name, price-low, price-high, time)", other),
            )),
        }
    }
}

/// What the customer typed and picked on the menu page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuQuery {
    #[serde(default)]
    pub search: String,
    /// `None` or `"All"` matches every category.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort: MenuSort,
}

impl MenuQuery {
    fn matches(&self, item: &CatalogItem, needle: &str) -> bool {
        let matches_search = needle.is_empty()
            || item.name.to_lowercase().contains(needle)
            || item.description.to_lowercase().contains(needle);

        let matches_category = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => item.category == category,
        };

        matches_search && matches_category
    }
}

/// Filters and sorts menu items. The input order breaks ties.
pub fn filter_menu(items: &[CatalogItem], query: &MenuQuery) -> Vec<CatalogItem> {
    let needle = query.search.trim().to_lowercase();

    let mut filtered: Vec<CatalogItem> = items
        .iter()
        .filter(|item| query.matches(item, &needle))
        .cloned()
        .collect();

    match query.sort {
        MenuSort::Name => filtered.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        MenuSort::PriceLow => filtered.sort_by_key(|item| item.price),
        MenuSort::PriceHigh => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
        MenuSort::Time => filtered.sort_by_key(|item| item.preparation_time),
    }

    filtered
}
