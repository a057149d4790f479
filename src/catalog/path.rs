//! Category path resolution.
//!
//! A category's URL path is the chain of slugs from its root ancestor down to
//! itself, joined with `/`:
//!
//! ```text
//! fruits (1)
//! └── citrus (2)
//!     └── oranges (3)   →   "fruits/citrus/oranges"
//! ```
//!
//! The store does not enforce an acyclic parent relation, so the walk keeps a
//! visited set and a depth limit and reports malformed chains as errors. A
//! parent id with no matching row ends the chain there.

use super::Category;
use crate::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

/// Default maximum number of slugs in a category path.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("category {id} is part of a parent cycle")]
    Cycle { id: i64 },

    #[error("category {id} is nested deeper than {max_depth} levels")]
    TooDeep { id: i64, max_depth: usize },

    #[error("product {product_id} references missing category {category_id}")]
    MissingCategory { product_id: i64, category_id: i64 },
}

/// All categories of one run, indexed by id.
#[derive(Debug)]
pub struct CategoryTree<'a> {
    nodes: FxHashMap<i64, &'a Category>,
    max_depth: usize,
}

impl<'a> CategoryTree<'a> {
    pub fn new(categories: &'a [Category], max_depth: usize) -> Self {
        let nodes = categories.iter().map(|c| (c.id, c)).collect();
        Self {
            nodes,
            max_depth: max_depth.max(1),
        }
    }

    #[inline]
    pub fn get(&self, id: i64) -> Option<&'a Category> {
        self.nodes.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve `root/.../category` for a category.
    pub fn resolve_category_path(&self, category: &Category) -> Result<String, PathError> {
        let mut slugs = vec![category.slug.as_str()];
        let mut visited = FxHashSet::default();
        visited.insert(category.id);

        let mut current = category;
        while let Some(parent_id) = current.parent_id {
            if slugs.len() >= self.max_depth {
                return Err(PathError::TooDeep {
                    id: category.id,
                    max_depth: self.max_depth,
                });
            }

            // A dangling parent id ends the chain, as if the node were a root
            let Some(parent) = self.get(parent_id) else {
                debug!("catalog"; "category {} has missing parent {}", current.id, parent_id);
                break;
            };
            if !visited.insert(parent.id) {
                return Err(PathError::Cycle { id: category.id });
            }

            slugs.push(parent.slug.as_str());
            current = parent;
        }

        slugs.reverse();
        Ok(slugs.join("/"))
    }

    /// Resolve the path of a category referenced by a product association.
    pub fn resolve_for_product(
        &self,
        product_id: i64,
        category_id: i64,
    ) -> Result<String, PathError> {
        let category = self.get(category_id).ok_or(PathError::MissingCategory {
            product_id,
            category_id,
        })?;
        self.resolve_category_path(category)
    }
}
