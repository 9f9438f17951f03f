//! In-memory menu catalog keyed by item id.
//!
//! Order rows reference menu items by id only; the catalog resolves those
//! ids to names for display. It is rebuilt wholesale from the batch-lookup
//! endpoint on every list reload - no incremental invalidation, the
//! staleness window is one page view. A miss (deleted item, failed batch
//! fetch) falls back to showing the raw id.

// Allow dead code: lookup methods kept for API completeness
#![allow(dead_code)]

use std::collections::HashMap;

use crate::models::MenuItem;

#[derive(Debug, Default)]
pub struct Catalog {
    items: HashMap<String, MenuItem>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole catalog with a fresh batch-lookup result.
    pub fn rebuild(&mut self, items: Vec<MenuItem>) {
        self.items = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.get(id)
    }

    /// The item's name, or the raw id when the catalog has no entry.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        match self.items.get(id) {
            Some(item) => &item.name,
            None => id,
        }
    }

    /// Comma-separated names for an order's item list.
    pub fn item_names(&self, ids: &[String]) -> String {
        ids.iter()
            .map(|id| self.display_name(id))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price: "1.00".parse().unwrap(),
            available: true,
            category: String::new(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_miss_falls_back_to_raw_id() {
        let mut catalog = Catalog::new();
        catalog.rebuild(vec![item("m-1", "Margherita Pizza")]);

        assert_eq!(catalog.display_name("m-1"), "Margherita Pizza");
        assert_eq!(catalog.display_name("m-404"), "m-404");
    }

    #[test]
    fn test_item_names_mixed_hits_and_misses() {
        let mut catalog = Catalog::new();
        catalog.rebuild(vec![item("m-1", "Margherita Pizza")]);

        let ids = vec!["m-1".to_string(), "m-404".to_string()];
        assert_eq!(catalog.item_names(&ids), "Margherita Pizza, m-404");
    }

    #[test]
    fn test_rebuild_replaces_not_merges() {
        let mut catalog = Catalog::new();
        catalog.rebuild(vec![item("m-1", "Margherita Pizza")]);
        catalog.rebuild(vec![item("m-2", "Garlic Bread")]);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("m-1").is_none());
        assert_eq!(catalog.display_name("m-2"), "Garlic Bread");
    }

    #[test]
    fn test_empty_catalog_never_panics() {
        let catalog = Catalog::new();
        assert_eq!(catalog.item_names(&["m-9".to_string()]), "m-9");
        assert!(catalog.is_empty());
    }
}
