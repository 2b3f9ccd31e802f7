//! Menu catalog and supply keys offered by the daily report form

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub category: &'static str,
    pub name: &'static str,
    /// Default price in EUR
    pub price: f64,
}

const fn item(id: &'static str, category: &'static str, name: &'static str, price: f64) -> MenuItem {
    MenuItem {
        id,
        category,
        name,
        price,
    }
}

pub const COFFEE: &str = "Coffee Drinks";
pub const OTHER_DRINKS: &str = "Other Drinks";
pub const CAKES: &str = "Cakes";
pub const SANDWICHES: &str = "Sandwiches";

pub const MENU: [MenuItem; 32] = [
    item("c1", COFFEE, "Espresso", 2.5),
    item("c2", COFFEE, "Americano", 3.0),
    item("c3", COFFEE, "Cappuccino", 3.5),
    item("c4", COFFEE, "Latte", 3.8),
    item("c5", COFFEE, "Flat White", 3.8),
    item("c6", COFFEE, "Mocha", 4.0),
    item("c7", COFFEE, "Macchiato", 3.2),
    item("c8", COFFEE, "Iced Americano", 3.2),
    item("c9", COFFEE, "Iced Latte", 4.0),
    item("c10", COFFEE, "Cold Brew", 4.2),
    item("o1", OTHER_DRINKS, "Matcha Latte", 4.5),
    item("o2", OTHER_DRINKS, "Chai Latte", 4.3),
    item("o3", OTHER_DRINKS, "Hot Chocolate", 4.0),
    item("o4", OTHER_DRINKS, "Orange Juice", 3.8),
    item("o5", OTHER_DRINKS, "Apple Juice", 3.8),
    item("o6", OTHER_DRINKS, "Iced Tea", 3.2),
    item("o7", OTHER_DRINKS, "Lemonade", 3.2),
    item("o8", OTHER_DRINKS, "Sparkling Water", 2.5),
    item("o9", OTHER_DRINKS, "Still Water", 2.0),
    item("o10", OTHER_DRINKS, "Italian Soda", 3.5),
    item("k1", CAKES, "Cheesecake", 4.8),
    item("k2", CAKES, "Chocolate Cake", 4.8),
    item("k3", CAKES, "Carrot Cake", 4.8),
    item("k4", CAKES, "Tiramisu", 5.2),
    item("k5", CAKES, "Blueberry Muffin", 3.2),
    item("k6", CAKES, "Banana Bread", 3.5),
    item("k7", CAKES, "Lemon Tart", 4.5),
    item("s1", SANDWICHES, "Ham & Cheese", 5.5),
    item("s2", SANDWICHES, "Turkey Avocado", 6.5),
    item("s3", SANDWICHES, "Veggie", 5.2),
    item("s4", SANDWICHES, "Tuna", 5.8),
    item("s5", SANDWICHES, "BLT", 6.0),
];

pub const SUPPLY_KEYS: [&str; 10] = [
    "Large Paper Bag",
    "Small Paper Bag",
    "Sandwich Bag",
    "Paper Cup",
    "Paper Cup Lid",
    "Plastic Cup",
    "Plastic Lid",
    "Plastic Spoon",
    "Plastic Fork",
    "Cake Takeout Box",
];

pub fn find_item(id: &str) -> Option<&'static MenuItem> {
    MENU.iter().find(|m| m.id == id)
}

/// Catalog payload for `GET /api/reports/catalog`
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub items: &'static [MenuItem],
    pub supplies: &'static [&'static str],
}

pub fn catalog() -> Catalog {
    Catalog {
        items: &MENU,
        supplies: &SUPPLY_KEYS,
    }
}
