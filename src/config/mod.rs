//! Job configuration management for `sitemap.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── catalog    # [catalog]
//! │   ├── output     # [output]
//! │   ├── pages      # [pages]
//! │   ├── site       # [site]
//! │   └── source     # [source]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Precedence
//!
//! Defaults, then `sitemap.toml`, then command-line flags. Relative paths in
//! the file resolve against the file's directory; relative paths on the
//! command line resolve against the working directory.

pub mod section;
pub mod types;
mod util;

use util::{find_config_file, resolve_cli_path};

pub use section::{
    CatalogConfig, OutputConfig, PagesConfig, SiteSectionConfig, SourceConfig, SourceKind,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands, SourceArgs},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitemap.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory holding the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Front-end site settings
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Catalog source
    #[serde(default)]
    pub source: SourceConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Static pages
    #[serde(default)]
    pub pages: PagesConfig,

    /// Category path limits
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl SiteConfig {
    /// Load configuration for the parsed command line.
    ///
    /// For non-Init commands, searches upward from cwd to find the config file.
    pub fn load(cli: &Cli) -> Result<Self> {
        if let Commands::Init { name, .. } = &cli.command {
            let cwd = std::env::current_dir().context("Failed to get current working directory")?;
            let root = name.as_ref().map_or_else(|| cwd.clone(), |name| cwd.join(name));
            let mut config = Self::default();
            config.config_path = root.join(&cli.config);
            config.root = root;
            return Ok(config);
        }

        let config_path =
            find_config_file(&cli.config).ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.finalize(config_path, cli);
        config.validate()?;
        Ok(config)
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, config_path: PathBuf, cli: &Cli) {
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.config_path = config_path;
        self.normalize_paths(&root);
        self.root = root;
        self.apply_command_options(cli);
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build {
                source,
                output,
                minify,
            } => {
                self.apply_source_args(source);
                if let Some(dir) = output {
                    self.output.dir = resolve_cli_path(dir);
                }
                Self::update_option(&mut self.output.minify, minify.as_ref());
            }
            Commands::Query { source, .. } => self.apply_source_args(source),
            Commands::Init { .. } => {}
        }
    }

    /// Apply catalog source arguments from CLI.
    fn apply_source_args(&mut self, args: &SourceArgs) {
        crate::logger::set_verbose(args.verbose);

        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
        }

        // A source given on the command line replaces whichever one the file set
        if let Some(database) = &args.database {
            self.source.database = Some(resolve_cli_path(database));
            self.source.snapshot = None;
        } else if let Some(snapshot) = &args.snapshot {
            self.source.snapshot = Some(resolve_cli_path(snapshot));
            self.source.database = None;
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve file-relative paths against the config directory.
    fn normalize_paths(&mut self, root: &Path) {
        self.source.normalize(root);
        self.output.normalize(root);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.source.validate(&mut diag);
        self.output.validate(&mut diag);
        self.pages.validate(&mut diag);
        self.catalog.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const MINIMAL: &str = "[site]\nurl = \"https://shop.example\"\n[source]\ndatabase = \"app.sqlite\"\n";

    fn parse(content: &str) -> SiteConfig {
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty(), "unknown fields: {ignored:?}");
        config
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sitemap-job").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::from_str("[site\nurl = \"x\"").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();

        assert_eq!(config.site.url, None);
        assert_eq!(config.output.dir, PathBuf::from("public"));
        assert_eq!(config.output.index, "sitemapindex");
        assert!(!config.output.minify);
        assert_eq!(config.pages.paths.len(), 7);
        assert_eq!(config.catalog.max_depth, 64);
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
            [site]
            url = "https://shop.example"

            [source]
            snapshot = "catalog.json"

            [output]
            dir = "/var/www/sitemaps"
            index = "sitemap"
            minify = true

            [pages]
            paths = ["", "about"]

            [catalog]
            max_depth = 8
            "#,
        );

        assert_eq!(config.site.url.as_deref(), Some("https://shop.example"));
        assert_eq!(
            config.source.kind(),
            Some(SourceKind::Snapshot(Path::new("catalog.json")))
        );
        assert_eq!(config.output.index, "sitemap");
        assert!(config.output.minify);
        assert_eq!(config.pages.paths, vec!["", "about"]);
        assert_eq!(config.catalog.max_depth, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = format!("{MINIMAL}[unknown_section]\nfield = \"value\"");
        let (config, ignored) = SiteConfig::parse_with_ignored(&content).unwrap();

        assert_eq!(config.site.url.as_deref(), Some("https://shop.example"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = parse("[catalog]\nmax_depth = 0\n");
        config.output.index = String::new();

        let err = config.validate().unwrap_err();
        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::Diagnostics(diag)) => assert_eq!(diag.len(), 4),
            other => panic!("expected diagnostics, got {other:?}"),
        }
    }

    #[test]
    fn test_finalize_resolves_paths_against_config_dir() {
        let mut config = parse(MINIMAL);
        config.finalize(PathBuf::from("/srv/shop/sitemap.toml"), &cli(&["build"]));

        assert_eq!(config.get_root(), Path::new("/srv/shop"));
        assert_eq!(config.source.database, Some(PathBuf::from("/srv/shop/app.sqlite")));
        assert_eq!(config.output.dir, PathBuf::from("/srv/shop/public"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = parse(MINIMAL);
        config.finalize(
            PathBuf::from("/srv/shop/sitemap.toml"),
            &cli(&[
                "build",
                "--site-url",
                "https://staging.shop.example",
                "--snapshot",
                "/tmp/catalog.json",
                "--output",
                "/tmp/out",
                "--minify",
            ]),
        );

        assert_eq!(
            config.site.url.as_deref(),
            Some("https://staging.shop.example")
        );
        assert_eq!(config.source.database, None);
        assert_eq!(config.source.snapshot, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.output.dir, PathBuf::from("/tmp/out"));
        assert!(config.output.minify);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemap.toml");
        fs::write(&path, MINIMAL).unwrap();

        let config_arg = path.to_string_lossy().into_owned();
        let config = SiteConfig::load(&cli(&["-C", &config_arg, "build"])).unwrap();

        assert_eq!(config.config_path, path);
        assert_eq!(config.source.database, Some(dir.path().join("app.sqlite")));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let config_arg = path.to_string_lossy().into_owned();

        let err = SiteConfig::load(&cli(&["-C", &config_arg, "build"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::NotFound(_))
        ));
    }
}
