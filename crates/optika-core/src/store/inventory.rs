//! Inventory table operations.

use super::{table, Store, StoreError, StoreResult};
use crate::models::InventoryItem;

/// Header row of `inventory.csv`.
pub const INVENTORY_HEADERS: [&str; 4] = ["Product", "Category", "Quantity", "Price"];

impl Store {
    /// Load every inventory row, parsing quantity and price.
    pub fn load_inventory(&self) -> StoreResult<Vec<InventoryItem>> {
        let path = self.config().inventory_file();
        let (_, rows) = table::read_table(&path)?;
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let malformed = |reason: String| StoreError::Malformed {
                    file: path.display().to_string(),
                    record: i + 1,
                    reason,
                };
                let quantity: u32 = table::field(row, 2)
                    .trim()
                    .parse()
                    .map_err(|_| malformed(format!("bad quantity {:?}", table::field(row, 2))))?;
                let price: f64 = table::field(row, 3)
                    .trim()
                    .parse()
                    .map_err(|_| malformed(format!("bad price {:?}", table::field(row, 3))))?;
                Ok(InventoryItem {
                    name: table::field(row, 0).to_string(),
                    category: table::field(row, 1).to_string(),
                    quantity,
                    price,
                })
            })
            .collect()
    }

    /// Rewrite the whole inventory table.
    pub fn save_inventory(&self, items: &[InventoryItem]) -> StoreResult<()> {
        let rows: Vec<Vec<String>> = items
            .iter()
            .map(|item| {
                vec![
                    item.name.clone(),
                    item.category.clone(),
                    item.quantity.to_string(),
                    item.price.to_string(),
                ]
            })
            .collect();
        table::write_table(&self.config().inventory_file(), &INVENTORY_HEADERS, &rows)
    }

    /// Find a product by its case-insensitive name key.
    pub fn find_product(&self, name: &str) -> StoreResult<Option<InventoryItem>> {
        Ok(self
            .load_inventory()?
            .into_iter()
            .find(|item| item.name_matches(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShopConfig;

    fn setup_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(ShopConfig::rooted_at(dir.path())).unwrap();
        (dir, store)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_dir, store) = setup_store();
        let items = vec![
            InventoryItem::new("Ray-Ban Aviator", "Frames", 4, 120.0),
            InventoryItem::new("Contact lens solution", "Care", 12, 8.5),
        ];
        store.save_inventory(&items).unwrap();
        assert_eq!(store.load_inventory().unwrap(), items);
    }

    #[test]
    fn test_find_product_ignores_case() {
        let (_dir, store) = setup_store();
        store
            .save_inventory(&[InventoryItem::new("Ray-Ban Aviator", "Frames", 4, 120.0)])
            .unwrap();
        assert!(store.find_product("ray-ban aviator").unwrap().is_some());
        assert!(store.find_product("Wayfarer").unwrap().is_none());
    }

    #[test]
    fn test_bad_quantity_is_malformed() {
        let (_dir, store) = setup_store();
        let path = store.config().inventory_file();
        let mut text = std::fs::read_to_string(&path).unwrap();
        text.push_str("Lens cloth,Accessories,many,2.5\n");
        std::fs::write(&path, text).unwrap();

        assert!(matches!(
            store.load_inventory(),
            Err(StoreError::Malformed { record: 1, .. })
        ));
    }
}
