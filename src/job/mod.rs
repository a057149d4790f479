//! The sitemap job.
//!
//! One run writes the index, then each section in [`Section::ALL`] order:
//!
//! ```text
//! sitemapindex.xml
//! sitemap-pages.xml
//! sitemap-categories.xml
//! sitemap-products.xml
//! sitemap-stores.xml
//! sitemap-farmers.xml
//! sitemap-blogs.xml
//! ```
//!
//! A failure stops the run. Documents written before it stay on disk; the
//! job is safe to re-run from scratch.

pub mod section;

pub use section::Section;

use crate::catalog::{CatalogStore, CategoryTree, path::DEFAULT_MAX_DEPTH};
use crate::config::SiteConfig;
use crate::debug;
use crate::sitemap::{SitemapEntry, SitemapSink};
use anyhow::{Context, Result};

/// Static pages listed when `[pages] paths` is not configured.
pub const DEFAULT_PAGES: &[&str] = &[
    "",
    "help",
    "help/about",
    "help/contacts",
    "help/delivery-payment",
    "vacancies",
    "farmer-fund",
];

pub const DEFAULT_INDEX_NAME: &str = "sitemapindex";

/// Everything the job needs besides its store and sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    /// Front-end origin without trailing slash.
    pub base_url: String,
    /// Static page paths relative to `base_url`.
    pub pages: Vec<String>,
    /// Index document name.
    pub index_name: String,
    /// Longest accepted category path.
    pub max_depth: usize,
}

impl JobConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            pages: DEFAULT_PAGES.iter().map(|p| (*p).to_string()).collect(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Build from validated site configuration.
    pub fn from_site(config: &SiteConfig) -> Self {
        let mut job = Self::new(config.site.url.as_deref().unwrap_or_default());
        job.pages = config.pages.paths.clone();
        job.index_name = config.output.index.clone();
        job.max_depth = config.catalog.max_depth;
        job
    }

    /// Absolute URL for a path relative to the base. Empty path is the base itself.
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_matches('/');
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Locations listed in the index, in section order.
    pub fn index_locations(&self) -> Vec<String> {
        Section::ALL
            .iter()
            .map(|section| self.url(&format!("{}.xml", section.file_stem())))
            .collect()
    }
}

/// Entry count for one written section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionReport {
    pub section: Section,
    pub urls: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub sections: Vec<SectionReport>,
}

impl RunReport {
    pub fn total_urls(&self) -> usize {
        self.sections.iter().map(|s| s.urls).sum()
    }
}

/// Builds and writes the sitemap index and all sections.
pub struct SitemapJob<S, W> {
    config: JobConfig,
    store: S,
    sink: W,
}

impl<S: CatalogStore, W: SitemapSink> SitemapJob<S, W> {
    pub fn new(config: JobConfig, store: S, sink: W) -> Self {
        Self {
            config,
            store,
            sink,
        }
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Run the job once.
    pub fn run(&self) -> Result<RunReport> {
        self.run_with(|_| {})
    }

    /// Run the job, reporting each section after it is written.
    pub fn run_with(&self, mut on_section: impl FnMut(&SectionReport)) -> Result<RunReport> {
        let locations = self.config.index_locations();
        self.sink
            .write_index(&self.config.index_name, &locations)
            .context("Failed to write sitemap index")?;

        let mut report = RunReport::default();
        for section in Section::ALL {
            let entries = self.build_section(section)?;
            self.sink
                .write_urlset(&section.file_stem(), &entries)
                .with_context(|| format!("Failed to write {section} sitemap"))?;

            let section_report = SectionReport {
                section,
                urls: entries.len(),
            };
            on_section(&section_report);
            report.sections.push(section_report);
        }

        Ok(report)
    }

    /// Build one section's entries from fresh store reads.
    pub fn build_section(&self, section: Section) -> Result<Vec<SitemapEntry>> {
        let config = &self.config;
        let entries = match section {
            Section::Pages => section::pages(config),
            Section::Categories => {
                let categories = self
                    .store
                    .categories()
                    .context("Failed to load categories")?;
                let tree = CategoryTree::new(&categories, config.max_depth);
                section::categories(config, &tree, &categories)
                    .context("Failed to resolve category paths")?
            }
            Section::Products => {
                let categories = self
                    .store
                    .categories()
                    .context("Failed to load categories")?;
                let products = self.store.products().context("Failed to load products")?;
                let tree = CategoryTree::new(&categories, config.max_depth);
                debug!("products"; "{} products over {} categories", products.len(), tree.len());
                section::products(config, &tree, &products)
                    .context("Failed to resolve product paths")?
            }
            Section::Stores => {
                let stores = self.store.stores().context("Failed to load stores")?;
                section::listings(config, section, &stores)
            }
            Section::Farmers => {
                let farmers = self.store.farmers().context("Failed to load farmers")?;
                section::listings(config, section, &farmers)
            }
            Section::Blogs => {
                let blogs = self.store.blogs().context("Failed to load blogs")?;
                section::listings(config, section, &blogs)
            }
        };

        debug!("sitemap"; "{}: {} entries", section, entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Listing, MemoryStore, Product, SqliteStore, store::StoreResult};
    use crate::catalog::{Blog, Farmer, Store};
    use crate::sitemap::{FileSink, MemorySink};
    use crate::utils::date::Timestamp;
    use std::fs;

    const BASE: &str = "https://shop.example";

    fn catalog() -> MemoryStore {
        MemoryStore {
            categories: vec![
                Category::test(1, "fruits", None),
                Category::test(2, "citrus", Some(1)),
            ],
            products: vec![Product {
                id: 10,
                slug: "lemon".to_string(),
                updated_at: Some(Timestamp::new(2024, 6, 1, 12, 0, 0)),
                category_ids: vec![1, 2],
            }],
            stores: Vec::new(),
            farmers: vec![Listing::test(1, "green-acres")],
            blogs: vec![Listing::test(1, "harvest-news")],
        }
    }

    #[test]
    fn test_job_config_trims_base_url() {
        let config = JobConfig::new("https://shop.example///");
        assert_eq!(config.base_url, BASE);
        assert_eq!(config.url(""), BASE);
        assert_eq!(config.url("/help/"), "https://shop.example/help");
    }

    #[test]
    fn test_index_locations() {
        assert_eq!(
            JobConfig::new(BASE).index_locations(),
            vec![
                "https://shop.example/sitemap-pages.xml",
                "https://shop.example/sitemap-categories.xml",
                "https://shop.example/sitemap-products.xml",
                "https://shop.example/sitemap-stores.xml",
                "https://shop.example/sitemap-farmers.xml",
                "https://shop.example/sitemap-blogs.xml",
            ]
        );
    }

    #[test]
    fn test_run_writes_index_then_sections() {
        let sink = MemorySink::new();
        let job = SitemapJob::new(JobConfig::new(BASE), catalog(), &sink);

        let report = job.run().unwrap();

        assert_eq!(
            sink.names(),
            vec![
                "sitemapindex",
                "sitemap-pages",
                "sitemap-categories",
                "sitemap-products",
                "sitemap-stores",
                "sitemap-farmers",
                "sitemap-blogs",
            ]
        );
        let counts: Vec<_> = report.sections.iter().map(|s| s.urls).collect();
        assert_eq!(counts, vec![7, 3, 2, 1, 2, 2]);
        assert_eq!(report.total_urls(), 17);

        let index = sink.get("sitemapindex").unwrap();
        assert!(index.contains("<loc>https://shop.example/sitemap-farmers.xml</loc>"));
        assert_eq!(index.matches("<sitemap>").count(), 6);
    }

    #[test]
    fn test_run_products_one_entry_per_category() {
        let sink = MemorySink::new();
        SitemapJob::new(JobConfig::new(BASE), catalog(), &sink)
            .run()
            .unwrap();

        let products = sink.get("sitemap-products").unwrap();
        assert!(products.contains("<loc>https://shop.example/catalog/fruits/lemon</loc>"));
        assert!(products.contains("<loc>https://shop.example/catalog/fruits/citrus/lemon</loc>"));
        assert_eq!(
            products
                .matches("<lastmod>2024-06-01T12:00:00+00:00</lastmod>")
                .count(),
            2
        );
    }

    #[test]
    fn test_empty_stores_section_has_only_landing() {
        let sink = MemorySink::new();
        SitemapJob::new(JobConfig::new(BASE), catalog(), &sink)
            .run()
            .unwrap();

        let stores = sink.get("sitemap-stores").unwrap();
        assert_eq!(stores.matches("<url>").count(), 1);
        assert!(stores.contains("<loc>https://shop.example/shops</loc>"));
    }

    #[test]
    fn test_pages_independent_of_store() {
        let full = SitemapJob::new(JobConfig::new(BASE), catalog(), MemorySink::new());
        let empty = SitemapJob::new(JobConfig::new(BASE), MemoryStore::new(), MemorySink::new());

        assert_eq!(
            full.build_section(Section::Pages).unwrap(),
            empty.build_section(Section::Pages).unwrap()
        );
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path(), false);
        let job = SitemapJob::new(JobConfig::new(BASE), catalog(), &sink);

        job.run().unwrap();
        let first: Vec<Vec<u8>> = read_all(&sink, job.config());
        job.run().unwrap();
        let second: Vec<Vec<u8>> = read_all(&sink, job.config());

        assert_eq!(first.len(), 7);
        assert_eq!(first, second);
    }

    fn read_all(sink: &FileSink, config: &JobConfig) -> Vec<Vec<u8>> {
        std::iter::once(config.index_name.clone())
            .chain(Section::ALL.iter().map(|s| s.file_stem()))
            .map(|name| fs::read(sink.path_for(&name)).unwrap())
            .collect()
    }

    #[test]
    fn test_custom_pages_and_index_name() {
        let mut config = JobConfig::new(BASE);
        config.pages = vec!["".to_string(), "about".to_string()];
        config.index_name = "sitemap".to_string();
        let sink = MemorySink::new();

        let report = SitemapJob::new(config, MemoryStore::new(), &sink)
            .run()
            .unwrap();

        assert_eq!(sink.names()[0], "sitemap");
        assert_eq!(report.sections[0].urls, 2);
    }

    #[test]
    fn test_cycle_stops_run_after_earlier_sections() {
        let mut store = catalog();
        store.categories[0].parent_id = Some(2);
        let sink = MemorySink::new();

        let err = SitemapJob::new(JobConfig::new(BASE), store, &sink)
            .run()
            .unwrap_err();

        assert!(format!("{err:#}").contains("parent cycle"));
        assert_eq!(sink.names(), vec!["sitemapindex", "sitemap-pages"]);
    }

    #[test]
    fn test_dangling_references_do_not_stop_run() {
        let db = rusqlite::Connection::open_in_memory().unwrap();
        db.execute_batch(crate::catalog::store::TEST_SCHEMA).unwrap();
        db.execute_batch(
            "INSERT INTO categories VALUES (1, 'fruits', NULL, NULL);
             INSERT INTO categories VALUES (3, 'oranges', 99, '2024-05-01 09:00:00');
             INSERT INTO products VALUES (10, 'navel', NULL);
             INSERT INTO category_product VALUES (1, 10);
             INSERT INTO category_product VALUES (2, 10);
             INSERT INTO blogs VALUES (1, 'harvest-news', NULL);",
        )
        .unwrap();
        let sink = MemorySink::new();

        let store = SqliteStore::from_connection(db);

        let report = SitemapJob::new(JobConfig::new(BASE), store, &sink)
            .run()
            .unwrap();

        assert_eq!(sink.names().len(), 7);
        let categories = sink.get("sitemap-categories").unwrap();
        assert!(categories.contains("<loc>https://shop.example/catalog/oranges</loc>"));
        let products = sink.get("sitemap-products").unwrap();
        assert!(products.contains("<loc>https://shop.example/catalog/fruits/navel</loc>"));
        assert_eq!(report.sections[2].urls, 1);
    }

    struct FailingStore;

    impl CatalogStore for FailingStore {
        fn categories(&self) -> StoreResult<Vec<Category>> {
            Ok(Vec::new())
        }

        fn products(&self) -> StoreResult<Vec<Product>> {
            Ok(Vec::new())
        }

        fn stores(&self) -> StoreResult<Vec<Store>> {
            Err(rusqlite::Error::InvalidQuery.into())
        }

        fn farmers(&self) -> StoreResult<Vec<Farmer>> {
            Ok(Vec::new())
        }

        fn blogs(&self) -> StoreResult<Vec<Blog>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_store_error_propagates_with_context() {
        let sink = MemorySink::new();
        let err = SitemapJob::new(JobConfig::new(BASE), FailingStore, &sink)
            .run()
            .unwrap_err();

        assert!(format!("{err:#}").contains("Failed to load stores"));
        assert!(sink.get("sitemap-products").is_some());
        assert!(sink.get("sitemap-stores").is_none());
    }

    #[test]
    fn test_run_with_reports_each_section() {
        let mut seen = Vec::new();
        SitemapJob::new(JobConfig::new(BASE), catalog(), MemorySink::new())
            .run_with(|report| seen.push(report.section))
            .unwrap();

        assert_eq!(seen, Section::ALL.to_vec());
    }
}
