//! # Catalog Commands
//!
//! Menu browsing: search, category filter, sort.

use serde::Serialize;
use tracing::debug;

use bite_core::catalog::{MenuQuery, MenuSort, ALL_CATEGORIES};
use bite_core::validation::validate_search_query;
use bite_core::CatalogItem;

use crate::catalog::Catalog;
use crate::error::ApiError;
use crate::state::CartState;

/// One menu card: the item and how many are already in the cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemView {
    pub item: CatalogItem,
    pub in_cart: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub items: Vec<MenuItemView>,
    pub categories: Vec<String>,
    pub query: MenuQuery,
}

/// Lists the menu.
///
/// ## Arguments
/// * `search` - Case-insensitive match on name or description
/// * `category` - One of the catalog's categories; `"All"` or `None` for everything
/// * `sort` - `name`, `price-low`, `price-high` or `time`
///
/// ## Errors
/// Validation error for an over-long search, unknown category or unknown sort.
pub fn list_menu(
    catalog: &Catalog,
    cart: &CartState,
    search: Option<&str>,
    category: Option<&str>,
    sort: Option<&str>,
) -> Result<MenuResponse, ApiError> {
    debug!(?search, ?category, ?sort, "list_menu command");

    let search = validate_search_query(search.unwrap_or_default())?;

    let category = match category.map(str::trim).filter(|c| !c.is_empty()) {
        None => None,
        Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => None,
        Some(c) => {
            let known = catalog
                .categories()
                .iter()
                .find(|known| known.eq_ignore_ascii_case(c))
                .ok_or_else(|| ApiError::validation(format!("Unknown category: {}", c)))?;
            Some(known.to_string())
        }
    };

    let sort = match sort {
        Some(raw) => raw.parse::<MenuSort>()?,
        None => MenuSort::default(),
    };

    let query = MenuQuery {
        search,
        category,
        sort,
    };

    let items = cart.with_engine(|engine| {
        catalog
            .search(&query)
            .into_iter()
            .map(|item| MenuItemView {
                in_cart: engine.quantity_of(&item.id),
                item,
            })
            .collect()
    });

    Ok(MenuResponse {
        items,
        categories: catalog.categories().iter().map(|c| c.to_string()).collect(),
        query,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::state::CartEngine;
    use bite_store::{MemoryStore, Storage};
    use std::sync::Arc;

    fn cart() -> CartState {
        let storage = Storage::with_store(MemoryStore::new());
        CartState::new(CartEngine::open(
            storage.cart(),
            Arc::new(RecordingNotifier::new()),
        ))
    }

    #[test]
    fn test_category_is_case_insensitive() {
        let catalog = Catalog::seeded();
        let menu = list_menu(&catalog, &cart(), None, Some("pizza"), Some("price-low")).unwrap();

        let names: Vec<_> = menu.items.iter().map(|v| v.item.name.as_str()).collect();
        assert_eq!(names, vec!["Margherita Pizza", "Pepperoni Pizza"]);
        assert_eq!(menu.query.category.as_deref(), Some("Pizza"));
        assert_eq!(menu.categories.len(), 7);
    }

    #[test]
    fn test_all_category_lists_everything() {
        let catalog = Catalog::seeded();
        let menu = list_menu(&catalog, &cart(), Some("  "), Some("All"), None).unwrap();
        assert_eq!(menu.items.len(), catalog.items().len());
        assert_eq!(menu.query.category, None);
    }

    #[test]
    fn test_in_cart_quantities() {
        let catalog = Catalog::seeded();
        let cart = cart();
        cart.with_engine_mut(|engine| {
            engine.add_item(catalog.get("8").unwrap(), 2, None);
        });

        let menu = list_menu(&catalog, &cart, Some("caesar"), None, None).unwrap();
        assert_eq!(menu.items.len(), 1);
        assert_eq!(menu.items[0].in_cart, 2);
    }

    #[test]
    fn test_bad_inputs() {
        let catalog = Catalog::seeded();
        assert!(list_menu(&catalog, &cart(), None, Some("Soups"), None).is_err());
        assert!(list_menu(&catalog, &cart(), None, None, Some("random")).is_err());

        let long = "x".repeat(101);
        assert!(list_menu(&catalog, &cart(), Some(&long), None, None).is_err());
    }
}
