//! Inventory items.

use serde::{Deserialize, Serialize};

/// A stocked product. The name is the table's unique key, compared
/// case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    pub name: String,
    pub category: String,
    /// Units on hand; never negative
    pub quantity: u32,
    /// Unit price in euros; positive
    pub price: f64,
}

impl InventoryItem {
    /// Create a new inventory row.
    pub fn new(name: impl Into<String>, category: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            quantity,
            price,
        }
    }

    /// Case-insensitive match on the product name key.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Out of stock; the sale flow warns the operator to reorder.
    pub fn is_depleted(&self) -> bool {
        self.quantity == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_ignores_case() {
        let item = InventoryItem::new("Ray-Ban Aviator", "Frames", 4, 120.0);
        assert!(item.name_matches("ray-ban aviator"));
        assert!(item.name_matches(" RAY-BAN AVIATOR "));
        assert!(!item.name_matches("Aviator"));
    }

    #[test]
    fn test_depleted() {
        let mut item = InventoryItem::new("Lens cloth", "Accessories", 1, 2.5);
        assert!(!item.is_depleted());
        item.quantity = 0;
        assert!(item.is_depleted());
    }
}
