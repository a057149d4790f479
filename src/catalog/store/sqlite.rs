//! SQLite-backed catalog store.
//!
//! Reads the storefront schema:
//!
//! | Table              | Columns                                |
//! |--------------------|----------------------------------------|
//! | `categories`       | `id, slug, parent_id, updated_at`      |
//! | `products`         | `id, slug, updated_at`                 |
//! | `category_product` | `category_id, product_id`              |
//! | `stores`           | `id, slug, updated_at`                 |
//! | `farmers`          | `id, slug, updated_at`                 |
//! | `blogs`            | `id, slug, updated_at`                 |
//!
//! `updated_at` is a nullable text column.

use super::{CatalogStore, StoreError, StoreResult};
use crate::catalog::{Blog, Category, Farmer, Listing, Product, Store};
use crate::utils::date::Timestamp;
use rusqlite::{Connection, OpenFlags};
use rustc_hash::FxHashMap;
use std::path::Path;

pub struct SqliteStore {
    db: Connection,
}

impl SqliteStore {
    /// Open an existing database read-only.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let db = Connection::open_with_flags(path, flags)
            .map_err(|err| StoreError::Open(path.to_path_buf(), err))?;
        Ok(Self { db })
    }

    /// Wrap an already open connection.
    pub fn from_connection(db: Connection) -> Self {
        Self { db }
    }

    fn listings(&self, table: &'static str) -> StoreResult<Vec<Listing>> {
        let sql = format!("SELECT id, slug, updated_at FROM {table} ORDER BY id");
        let mut stmt = self.db.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, slug, raw)| -> StoreResult<Listing> {
                Ok(Listing {
                    id,
                    slug,
                    updated_at: parse_updated_at(table, id, raw)?,
                })
            })
            .collect()
    }

    /// `product_id -> [category_id]`, in pivot insertion order. Pivot rows
    /// whose category no longer exists are left out.
    fn product_categories(&self) -> StoreResult<FxHashMap<i64, Vec<i64>>> {
        let mut stmt = self.db.prepare(
            "SELECT cp.product_id, cp.category_id FROM category_product cp \
             JOIN categories c ON c.id = cp.category_id \
             ORDER BY cp.product_id, cp.rowid",
        )?;
        let pairs = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut map: FxHashMap<i64, Vec<i64>> = FxHashMap::default();
        for (product_id, category_id) in pairs {
            map.entry(product_id).or_default().push(category_id);
        }
        Ok(map)
    }
}

impl CatalogStore for SqliteStore {
    fn categories(&self) -> StoreResult<Vec<Category>> {
        let mut stmt = self
            .db
            .prepare("SELECT id, slug, parent_id, updated_at FROM categories ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, slug, parent_id, raw)| -> StoreResult<Category> {
                Ok(Category {
                    id,
                    slug,
                    parent_id,
                    updated_at: parse_updated_at("categories", id, raw)?,
                })
            })
            .collect()
    }

    fn products(&self) -> StoreResult<Vec<Product>> {
        let mut associations = self.product_categories()?;
        let listings = self.listings("products")?;

        Ok(listings
            .into_iter()
            .map(|listing| Product {
                category_ids: associations.remove(&listing.id).unwrap_or_default(),
                id: listing.id,
                slug: listing.slug,
                updated_at: listing.updated_at,
            })
            .collect())
    }

    fn stores(&self) -> StoreResult<Vec<Store>> {
        self.listings("stores")
    }

    fn farmers(&self) -> StoreResult<Vec<Farmer>> {
        self.listings("farmers")
    }

    fn blogs(&self) -> StoreResult<Vec<Blog>> {
        self.listings("blogs")
    }
}

fn parse_updated_at(
    table: &'static str,
    id: i64,
    raw: Option<String>,
) -> StoreResult<Option<Timestamp>> {
    match raw {
        None => Ok(None),
        Some(value) => match Timestamp::parse(&value) {
            Some(ts) => Ok(Some(ts)),
            None => Err(StoreError::Timestamp { table, id, value }),
        },
    }
}

#[cfg(test)]
pub(crate) const TEST_SCHEMA: &str = "
    CREATE TABLE categories (id INTEGER PRIMARY KEY, slug TEXT NOT NULL, parent_id INTEGER, updated_at TEXT);
    CREATE TABLE products (id INTEGER PRIMARY KEY, slug TEXT NOT NULL, updated_at TEXT);
    CREATE TABLE category_product (category_id INTEGER NOT NULL, product_id INTEGER NOT NULL);
    CREATE TABLE stores (id INTEGER PRIMARY KEY, slug TEXT NOT NULL, updated_at TEXT);
    CREATE TABLE farmers (id INTEGER PRIMARY KEY, slug TEXT NOT NULL, updated_at TEXT);
    CREATE TABLE blogs (id INTEGER PRIMARY KEY, slug TEXT NOT NULL, updated_at TEXT);
";

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SqliteStore {
        let db = Connection::open_in_memory().unwrap();
        db.execute_batch(TEST_SCHEMA).unwrap();
        db.execute_batch(
            "INSERT INTO categories VALUES (2, 'citrus', 1, '2024-05-02 10:00:00');
             INSERT INTO categories VALUES (1, 'fruits', NULL, '2024-05-01 09:00:00');
             INSERT INTO products VALUES (10, 'lemon', '2024-06-01 12:00:00');
             INSERT INTO products VALUES (11, 'apple', NULL);
             INSERT INTO category_product VALUES (2, 10);
             INSERT INTO category_product VALUES (1, 10);
             INSERT INTO stores VALUES (5, 'corner-shop', '2024-01-01T00:00:00Z');",
        )
        .unwrap();
        SqliteStore::from_connection(db)
    }

    #[test]
    fn test_categories_ordered_by_id() {
        let categories = seeded().categories().unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].slug, "fruits");
        assert_eq!(categories[0].parent_id, None);
        assert_eq!(categories[1].parent_id, Some(1));
        assert_eq!(
            categories[1].updated_at,
            Some(Timestamp::new(2024, 5, 2, 10, 0, 0))
        );
    }

    #[test]
    fn test_products_with_associations() {
        let products = seeded().products().unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].slug, "lemon");
        assert_eq!(products[0].category_ids, vec![2, 1]);
        assert!(products[1].category_ids.is_empty());
        assert_eq!(products[1].updated_at, None);
    }

    #[test]
    fn test_dangling_pivot_rows_are_skipped() {
        let store = seeded();
        store
            .db
            .execute_batch(
                "INSERT INTO category_product VALUES (7, 10);
                 INSERT INTO category_product VALUES (8, 11);",
            )
            .unwrap();

        let products = store.products().unwrap();
        assert_eq!(products[0].category_ids, vec![2, 1]);
        assert!(products[1].category_ids.is_empty());
    }

    #[test]
    fn test_flat_listings() {
        let store = seeded();

        let stores = store.stores().unwrap();
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].updated_at, Some(Timestamp::from_ymd(2024, 1, 1)));
        assert!(store.farmers().unwrap().is_empty());
        assert!(store.blogs().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_timestamp() {
        let store = seeded();
        store
            .db
            .execute("INSERT INTO blogs VALUES (1, 'news', 'last tuesday')", [])
            .unwrap();

        match store.blogs() {
            Err(StoreError::Timestamp { table, id, value }) => {
                assert_eq!(table, "blogs");
                assert_eq!(id, 1);
                assert_eq!(value, "last tuesday");
            }
            other => panic!("expected timestamp error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_table_is_query_error() {
        let store = SqliteStore::from_connection(Connection::open_in_memory().unwrap());
        assert!(matches!(store.stores(), Err(StoreError::Sqlite(_))));
    }

    #[test]
    fn test_open_file_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.sqlite");
        {
            let db = Connection::open(&path).unwrap();
            db.execute_batch(TEST_SCHEMA).unwrap();
            db.execute("INSERT INTO farmers VALUES (1, 'green-acres', NULL)", [])
                .unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.farmers().unwrap()[0].slug, "green-acres");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SqliteStore::open(&dir.path().join("missing.sqlite"));
        assert!(matches!(result, Err(StoreError::Open(..))));
    }
}
