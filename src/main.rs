//! sitemap-job - Writes the storefront sitemap index and section sitemaps.

#![allow(dead_code)]

mod catalog;
mod cli;
mod config;
mod job;
mod logger;
mod sitemap;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Init { dry, .. } => cli::init::write_config(&config, *dry),
        Commands::Build { .. } => cli::build::build_sitemaps(&config).map(|_| ()),
        Commands::Query {
            section, pretty, ..
        } => cli::query::run_query(&config, *section, *pretty),
    }
}
