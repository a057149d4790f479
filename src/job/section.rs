//! Sitemap sections and their entry builders.
//!
//! | Section      | File                     | Landing     | Entries                          |
//! |--------------|--------------------------|-------------|----------------------------------|
//! | `pages`      | `sitemap-pages.xml`      | -           | fixed page list                  |
//! | `categories` | `sitemap-categories.xml` | `/catalog`  | `/catalog/{path}`                |
//! | `products`   | `sitemap-products.xml`   | -           | `/catalog/{path}/{slug}` per link |
//! | `stores`     | `sitemap-stores.xml`     | `/shops`    | `/shops/{slug}`                  |
//! | `farmers`    | `sitemap-farmers.xml`    | `/farmers`  | `/farmers/{slug}`                |
//! | `blogs`      | `sitemap-blogs.xml`      | `/blogs`    | `/blogs/{slug}`                  |

use super::JobConfig;
use crate::catalog::{Category, CategoryTree, Listing, PathError, Product};
use crate::sitemap::SitemapEntry;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Pages,
    Categories,
    Products,
    Stores,
    Farmers,
    Blogs,
}

impl Section {
    /// Sections in index and write order.
    pub const ALL: [Self; 6] = [
        Self::Pages,
        Self::Categories,
        Self::Products,
        Self::Stores,
        Self::Farmers,
        Self::Blogs,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Categories => "categories",
            Self::Products => "products",
            Self::Stores => "stores",
            Self::Farmers => "farmers",
            Self::Blogs => "blogs",
        }
    }

    /// Document name without extension, e.g. `sitemap-stores`.
    pub fn file_stem(self) -> String {
        format!("sitemap-{}", self.name())
    }

    /// Front-end path prefix for the section's records.
    pub const fn route(self) -> Option<&'static str> {
        match self {
            Self::Pages => None,
            Self::Categories | Self::Products => Some("catalog"),
            Self::Stores => Some("shops"),
            Self::Farmers => Some("farmers"),
            Self::Blogs => Some("blogs"),
        }
    }

    /// Listing page emitted ahead of the records. Products share the catalog
    /// landing with categories and have none of their own.
    pub const fn landing(self) -> Option<&'static str> {
        match self {
            Self::Pages | Self::Products => None,
            _ => self.route(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static pages. Independent of catalog contents.
pub fn pages(config: &JobConfig) -> Vec<SitemapEntry> {
    config
        .pages
        .iter()
        .map(|path| SitemapEntry::new(config.url(path)))
        .collect()
}

pub fn categories(
    config: &JobConfig,
    tree: &CategoryTree<'_>,
    categories: &[Category],
) -> Result<Vec<SitemapEntry>, PathError> {
    let mut entries = Vec::with_capacity(categories.len() + 1);
    push_landing(config, Section::Categories, &mut entries);

    for category in categories {
        let path = tree.resolve_category_path(category)?;
        entries.push(SitemapEntry::daily(
            config.url(&format!("catalog/{path}")),
            category.updated_at,
        ));
    }
    Ok(entries)
}

/// One entry per product/category association.
pub fn products(
    config: &JobConfig,
    tree: &CategoryTree<'_>,
    products: &[Product],
) -> Result<Vec<SitemapEntry>, PathError> {
    let mut entries = Vec::with_capacity(products.len());

    for product in products {
        for &category_id in &product.category_ids {
            let path = tree.resolve_for_product(product.id, category_id)?;
            entries.push(SitemapEntry::daily(
                config.url(&format!("catalog/{path}/{}", product.slug)),
                product.updated_at,
            ));
        }
    }
    Ok(entries)
}

/// Flat slug sections: stores, farmers, blogs.
pub fn listings(config: &JobConfig, section: Section, items: &[Listing]) -> Vec<SitemapEntry> {
    let mut entries = Vec::with_capacity(items.len() + 1);
    push_landing(config, section, &mut entries);

    let route = section.route().unwrap_or_default();
    for item in items {
        entries.push(SitemapEntry::daily(
            config.url(&format!("{route}/{}", item.slug)),
            item.updated_at,
        ));
    }
    entries
}

fn push_landing(config: &JobConfig, section: Section, entries: &mut Vec<SitemapEntry>) {
    if let Some(landing) = section.landing() {
        entries.push(SitemapEntry::new(config.url(landing)));
    }
}
