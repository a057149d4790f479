//! In-memory catalog, loadable from a JSON snapshot.
//!
//! ```json
//! {
//!   "categories": [{ "id": 1, "slug": "fruits", "updated_at": "2024-06-15 10:00:00" }],
//!   "products": [{ "id": 7, "slug": "lemon", "category_ids": [1] }],
//!   "stores": [], "farmers": [], "blogs": []
//! }
//! ```

use super::{CatalogStore, StoreError, StoreResult};
use crate::catalog::{Blog, Category, Farmer, Product, Store};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStore {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub stores: Vec<Store>,
    pub farmers: Vec<Farmer>,
    pub blogs: Vec<Blog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot document.
    pub fn from_json(content: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a snapshot file.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| StoreError::Io(path.to_path_buf(), err))?;
        Self::from_json(&content)
    }
}

/// Snapshot rows sorted by id, matching the database store.
fn by_id<T: Clone>(items: &[T], id: impl Fn(&T) -> i64) -> Vec<T> {
    let mut items = items.to_vec();
    items.sort_by_key(|item| id(item));
    items
}

impl CatalogStore for MemoryStore {
    fn categories(&self) -> StoreResult<Vec<Category>> {
        Ok(by_id(&self.categories, |c| c.id))
    }

    fn products(&self) -> StoreResult<Vec<Product>> {
        Ok(by_id(&self.products, |p| p.id))
    }

    fn stores(&self) -> StoreResult<Vec<Store>> {
        Ok(by_id(&self.stores, |s| s.id))
    }

    fn farmers(&self) -> StoreResult<Vec<Farmer>> {
        Ok(by_id(&self.farmers, |f| f.id))
    }

    fn blogs(&self) -> StoreResult<Vec<Blog>> {
        Ok(by_id(&self.blogs, |b| b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::Timestamp;

    #[test]
    fn test_from_json_partial_snapshot() {
        let store = MemoryStore::from_json(
            r#"{
                "categories": [
                    { "id": 1, "slug": "fruits", "updated_at": "2024-06-15 10:00:00" },
                    { "id": 2, "slug": "citrus", "parent_id": 1 }
                ],
                "products": [{ "id": 7, "slug": "lemon", "category_ids": [2] }]
            }"#,
        )
        .unwrap();

        let categories = store.categories().unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(
            categories[0].updated_at,
            Some(Timestamp::new(2024, 6, 15, 10, 0, 0))
        );
        assert_eq!(categories[1].parent_id, Some(1));
        assert_eq!(categories[1].updated_at, None);

        assert_eq!(store.products().unwrap()[0].category_ids, vec![2]);
        assert!(store.stores().unwrap().is_empty());
        assert!(store.blogs().unwrap().is_empty());
    }

    #[test]
    fn test_collections_sorted_by_id() {
        let store = MemoryStore::from_json(
            r#"{
                "stores": [
                    { "id": 9, "slug": "riverside" },
                    { "id": 2, "slug": "main-street" },
                    { "id": 5, "slug": "corner-shop" }
                ],
                "products": [
                    { "id": 8, "slug": "pear", "category_ids": [3, 1] },
                    { "id": 4, "slug": "plum" }
                ]
            }"#,
        )
        .unwrap();

        let slugs: Vec<_> = store.stores().unwrap().into_iter().map(|s| s.slug).collect();
        assert_eq!(slugs, vec!["main-street", "corner-shop", "riverside"]);

        let products = store.products().unwrap();
        assert_eq!(products[0].slug, "plum");
        assert_eq!(products[1].category_ids, vec![3, 1]);
    }

    #[test]
    fn test_from_json_invalid_timestamp() {
        let result = MemoryStore::from_json(
            r#"{ "blogs": [{ "id": 1, "slug": "news", "updated_at": "soon" }] }"#,
        );
        assert!(matches!(result, Err(StoreError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = MemoryStore::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(StoreError::Io(..))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"{ "farmers": [{ "id": 3, "slug": "green-acres" }] }"#).unwrap();

        let store = MemoryStore::load(&path).unwrap();
        assert_eq!(store.farmers().unwrap()[0].slug, "green-acres");
    }
}
