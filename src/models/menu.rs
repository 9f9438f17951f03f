use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A menu item as served by the backend.
///
/// The backend owns these; the client only holds read-only copies. Prices
/// arrive as JSON numbers and are parsed into `Decimal` so cart arithmetic
/// stays exact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: String,
}

/// Request body for `POST /menu/search`.
#[derive(Debug, Clone, Serialize)]
pub struct MenuQuery {
    pub limit: u64,
    pub skip: u64,
    pub search: String,
    pub category: String,
    pub sort_by: String,
    pub sort_asc: bool,
}

/// Response body for `POST /menu/search`.
///
/// The backend omits `items` entirely when nothing matches, so both fields
/// default.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuPage {
    #[serde(default)]
    pub items: Vec<MenuItem>,
    #[serde(default)]
    pub total_count: u64,
}

/// Payload for creating or updating a menu item (admin).
#[derive(Debug, Clone, Serialize)]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub available: bool,
}

/// The fixed category set the menu browser filters by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Appetizers,
    MainCourses,
    Desserts,
    Drinks,
}

impl CategoryFilter {
    /// The wire value sent in `MenuQuery.category`; empty means no filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "",
            CategoryFilter::Appetizers => "appetizers",
            CategoryFilter::MainCourses => "main-courses",
            CategoryFilter::Desserts => "desserts",
            CategoryFilter::Drinks => "drinks",
        }
    }

    /// Human-readable label for the tab bar.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Appetizers => "Appetizers",
            CategoryFilter::MainCourses => "Main Courses",
            CategoryFilter::Desserts => "Desserts",
            CategoryFilter::Drinks => "Drinks",
        }
    }

    /// Cycle to the next category (wrapping around).
    pub fn next(&self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Appetizers,
            CategoryFilter::Appetizers => CategoryFilter::MainCourses,
            CategoryFilter::MainCourses => CategoryFilter::Desserts,
            CategoryFilter::Desserts => CategoryFilter::Drinks,
            CategoryFilter::Drinks => CategoryFilter::All,
        }
    }

    /// Cycle to the previous category (wrapping around).
    pub fn prev(&self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Drinks,
            CategoryFilter::Appetizers => CategoryFilter::All,
            CategoryFilter::MainCourses => CategoryFilter::Appetizers,
            CategoryFilter::Desserts => CategoryFilter::MainCourses,
            CategoryFilter::Drinks => CategoryFilter::Desserts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_page() {
        let json = r#"{"items":[{"id":"665f1","name":"Margherita Pizza","description":"Tomato, mozzarella, basil","price":9.5,"available":true,"category":"main-courses","image_url":"http://img/pizza.png"}],"total_count":12}"#;

        let page: MenuPage = serde_json::from_str(json).expect("Failed to parse menu page JSON");
        assert_eq!(page.total_count, 12);
        assert_eq!(page.items.len(), 1);

        let item = &page.items[0];
        assert_eq!(item.name, "Margherita Pizza");
        assert_eq!(item.price, "9.5".parse::<Decimal>().unwrap());
        assert!(item.available);
    }

    #[test]
    fn test_parse_empty_menu_page() {
        // The backend omits `items` when nothing matches
        let page: MenuPage =
            serde_json::from_str(r#"{"total_count":0}"#).expect("Failed to parse empty page");
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_menu_query_wire_format() {
        let query = MenuQuery {
            limit: 5,
            skip: 10,
            search: "pizza".to_string(),
            category: String::new(),
            sort_by: "price".to_string(),
            sort_asc: true,
        };

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["limit"], 5);
        assert_eq!(value["skip"], 10);
        assert_eq!(value["search"], "pizza");
        assert_eq!(value["sort_by"], "price");
        assert_eq!(value["sort_asc"], true);
    }

    #[test]
    fn test_category_filter_cycles() {
        let mut filter = CategoryFilter::All;
        for _ in 0..5 {
            filter = filter.next();
        }
        assert_eq!(filter, CategoryFilter::All);
        assert_eq!(CategoryFilter::All.prev(), CategoryFilter::Drinks);
        assert_eq!(CategoryFilter::MainCourses.as_str(), "main-courses");
    }
}
