//! Command-line interface definitions.

use crate::job::Section;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Storefront sitemap generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: sitemap.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "sitemap.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default sitemap.toml
    #[command(visible_alias = "i")]
    Init {
        /// Directory to create the config in (default: current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the config template to stdout instead of writing it
        #[arg(long)]
        dry: bool,
    },

    /// Generate the sitemap index and all section files
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory (overrides [output] dir)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,

        /// Minify the written XML
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        minify: Option<bool>,
    },

    /// Print one section's entries as JSON without writing files
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        source: SourceArgs,

        /// Section to build
        #[arg(value_enum)]
        section: Section,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

/// Catalog source and URL overrides shared by Build and Query
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Override the front-end URL (overrides [site] url)
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Read the catalog from this SQLite database
    #[arg(short = 'D', long, conflicts_with = "snapshot", value_hint = clap::ValueHint::FilePath)]
    pub database: Option<PathBuf>,

    /// Read the catalog from this JSON snapshot
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub snapshot: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_query(&self) -> bool {
        matches!(self.command, Commands::Query { .. })
    }

    /// Source overrides of the current command, if it reads the catalog.
    pub fn source_args(&self) -> Option<&SourceArgs> {
        match &self.command {
            Commands::Build { source, .. } | Commands::Query { source, .. } => Some(source),
            Commands::Init { .. } => None,
        }
    }
}
