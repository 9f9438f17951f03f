//! The shopping cart: an ordered sequence of menu item snapshots.
//!
//! The cart exists only for the duration of a session - it is never
//! persisted. Checkout submits item ids only; the backend recomputes the
//! total from its own prices, so a stale snapshot price can never leak
//! into an order.

use rust_decimal::Decimal;

use crate::models::MenuItem;

#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<MenuItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Ordering matters for display; duplicates are
    /// allowed (ordering two pizzas means adding the item twice).
    pub fn add(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    /// Exact sum of the snapshot prices, for display only.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.price).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// The submission payload: ids in cart order, nothing else.
    pub fn item_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, price: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price: price.parse().unwrap(),
            available: true,
            category: "main-courses".to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_total_is_exact() {
        let mut cart = Cart::new();
        cart.add(item("m-1", "Margherita Pizza", "9.50"));
        cart.add(item("m-2", "Garlic Bread", "3.25"));

        assert_eq!(cart.total(), "12.75".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_add_then_clear() {
        let mut cart = Cart::new();
        cart.add(item("m-1", "Margherita Pizza", "9.50"));
        assert_eq!(cart.len(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_item_ids_preserve_order_and_duplicates() {
        let mut cart = Cart::new();
        cart.add(item("m-2", "Garlic Bread", "3.25"));
        cart.add(item("m-1", "Margherita Pizza", "9.50"));
        cart.add(item("m-2", "Garlic Bread", "3.25"));

        assert_eq!(cart.item_ids(), vec!["m-2", "m-1", "m-2"]);
    }
}
