//! Catalog entities read from the storefront database.
//!
//! | Module  | Purpose                                           |
//! |---------|---------------------------------------------------|
//! | `path`  | Category path resolution over the parent chain    |
//! | `store` | `CatalogStore` trait, SQLite and in-memory stores |
//!
//! All records are read fresh for each job run and never mutated.

pub mod path;
pub mod store;

pub use path::{CategoryTree, PathError};
pub use store::{CatalogStore, MemoryStore, SqliteStore, StoreError};

use crate::utils::date::Timestamp;
use serde::{Deserialize, Serialize};

/// Catalog category. `parent_id` links to at most one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub slug: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Product with its category associations in association order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub slug: String,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

/// Flat slug record shared by stores, farmers and blogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub slug: String,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

pub type Store = Listing;
pub type Farmer = Listing;
pub type Blog = Listing;

#[cfg(test)]
impl Category {
    pub fn test(id: i64, slug: &str, parent_id: Option<i64>) -> Self {
        Self {
            id,
            slug: slug.to_string(),
            parent_id,
            updated_at: Some(Timestamp::new(2024, 3, 1, 8, 0, 0)),
        }
    }
}

#[cfg(test)]
impl Listing {
    pub fn test(id: i64, slug: &str) -> Self {
        Self {
            id,
            slug: slug.to_string(),
            updated_at: Some(Timestamp::new(2024, 3, 2, 9, 30, 0)),
        }
    }
}
