//! # Catalog Provider
//!
//! The built-in Yellow Bite menu and its category labels.
//!
//! ## Seeded Menu
//! Every dish has:
//! - id: `"1"` .. `"12"`, stable across restarts so persisted carts still
//!   line up with the menu
//! - a category from [`CATEGORIES`]
//! - price in cents
//! - preparation time in minutes
//!
//! One dish ships unavailable so the "Item Unavailable" path is reachable
//! from the shell.

use bite_core::catalog::{filter_menu, MenuQuery, CATEGORIES};
use bite_core::{CatalogItem, Money};

/// (id, name, description, price cents, category, vegetarian, available, prep minutes)
type Seed = (
    &'static str,
    &'static str,
    &'static str,
    i64,
    &'static str,
    bool,
    bool,
    u32,
);

const MENU: &[Seed] = &[
    ("1", "Margherita Pizza", "Fresh tomatoes, mozzarella, basil and olive oil", 1299, "Pizza", true, true, 20),
    ("2", "Pepperoni Pizza", "Classic pepperoni with mozzarella and tomato sauce", 1499, "Pizza", false, true, 22),
    ("3", "Classic Cheeseburger", "Beef patty, cheddar, lettuce, tomato and pickles", 1099, "Burgers", false, true, 15),
    ("4", "Veggie Burger", "Black bean patty with avocado and chipotle mayo", 999, "Burgers", true, true, 12),
    ("5", "Chicken Pad Thai", "Rice noodles, egg, peanuts and tamarind sauce", 1399, "Asian", false, true, 18),
    ("6", "Vegetable Spring Rolls", "Crispy rolls with sweet chili dipping sauce", 699, "Asian", true, true, 10),
    ("7", "Spicy Tuna Roll", "Fresh tuna, sriracha mayo and cucumber", 1199, "Asian", false, false, 15),
    ("8", "Caesar Salad", "Romaine, parmesan, croutons and Caesar dressing", 899, "Salads", true, true, 8),
    ("9", "Greek Salad", "Tomato, cucumber, olives, red onion and feta", 949, "Salads", true, true, 8),
    ("10", "Chocolate Lava Cake", "Warm chocolate cake with a molten center", 799, "Desserts", true, true, 12),
    ("11", "Fresh Lemonade", "House-made lemonade with mint", 399, "Beverages", true, true, 3),
    ("12", "Iced Coffee", "Cold brew over ice with a splash of milk", 449, "Beverages", true, true, 4),
];

/// Read-only menu.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// The built-in menu, in display order.
    pub fn seeded() -> Self {
        let items = MENU
            .iter()
            .map(
                |&(id, name, description, cents, category, vegetarian, available, prep)| {
                    CatalogItem {
                        description: description.to_string(),
                        image: format!("/images/menu/{}.jpg", id),
                        category: category.to_string(),
                        is_vegetarian: vegetarian,
                        is_available: available,
                        preparation_time: prep,
                        ..CatalogItem::new(id, name, Money::from_cents(cents))
                    }
                },
            )
            .collect();

        Catalog { items }
    }

    /// A catalog over arbitrary items.
    pub fn from_items(items: Vec<CatalogItem>) -> Self {
        Catalog { items }
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn categories(&self) -> &'static [&'static str] {
        &CATEGORIES
    }

    pub fn search(&self, query: &MenuQuery) -> Vec<CatalogItem> {
        filter_menu(&self.items, query)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}
