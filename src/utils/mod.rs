//! Utility modules shared by the sitemap job.

pub mod date;
mod plural;

pub use plural::plural_count;
