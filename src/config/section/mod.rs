//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sitemap.toml`:
//!
//! | Module    | TOML Section | Purpose                                  |
//! |-----------|--------------|------------------------------------------|
//! | `site`    | `[site]`     | Front-end base URL                       |
//! | `source`  | `[source]`   | Catalog database or JSON snapshot        |
//! | `output`  | `[output]`   | Output directory, index name, minify     |
//! | `pages`   | `[pages]`    | Static page paths                        |
//! | `catalog` | `[catalog]`  | Category path resolution limits          |

mod catalog;
mod output;
mod pages;
mod site;
mod source;

pub use catalog::CatalogConfig;
pub use output::OutputConfig;
pub use pages::PagesConfig;
pub use site::SiteSectionConfig;
pub use source::{SourceConfig, SourceKind};
