//! Read-only access to catalog records.
//!
//! [`CatalogStore`] is the seam between the job and the data store. Every
//! collection is returned in stable id order so repeated runs over the same
//! data render byte-identical documents.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
#[cfg(test)]
pub(crate) use sqlite::TEST_SCHEMA;

use super::{Blog, Category, Farmer, Product, Store};
use std::path::PathBuf;
use thiserror::Error;

/// Catalog access errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open catalog database `{0}`")]
    Open(PathBuf, #[source] rusqlite::Error),

    #[error("catalog query failed")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("catalog snapshot parsing error")]
    Json(#[from] serde_json::Error),

    #[error("invalid timestamp `{value}` in {table}.updated_at (id {id})")]
    Timestamp {
        table: &'static str,
        id: i64,
        value: String,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read-only catalog queries used by the sitemap job.
pub trait CatalogStore {
    /// All categories with their `parent_id`.
    fn categories(&self) -> StoreResult<Vec<Category>>;

    /// All products with their category associations.
    fn products(&self) -> StoreResult<Vec<Product>>;

    fn stores(&self) -> StoreResult<Vec<Store>>;

    fn farmers(&self) -> StoreResult<Vec<Farmer>>;

    fn blogs(&self) -> StoreResult<Vec<Blog>>;
}

impl<T: CatalogStore + ?Sized> CatalogStore for &T {
    fn categories(&self) -> StoreResult<Vec<Category>> {
        (**self).categories()
    }

    fn products(&self) -> StoreResult<Vec<Product>> {
        (**self).products()
    }

    fn stores(&self) -> StoreResult<Vec<Store>> {
        (**self).stores()
    }

    fn farmers(&self) -> StoreResult<Vec<Farmer>> {
        (**self).farmers()
    }

    fn blogs(&self) -> StoreResult<Vec<Blog>> {
        (**self).blogs()
    }
}

impl<T: CatalogStore + ?Sized> CatalogStore for Box<T> {
    fn categories(&self) -> StoreResult<Vec<Category>> {
        (**self).categories()
    }

    fn products(&self) -> StoreResult<Vec<Product>> {
        (**self).products()
    }

    fn stores(&self) -> StoreResult<Vec<Store>> {
        (**self).stores()
    }

    fn farmers(&self) -> StoreResult<Vec<Farmer>> {
        (**self).farmers()
    }

    fn blogs(&self) -> StoreResult<Vec<Blog>> {
        (**self).blogs()
    }
}
