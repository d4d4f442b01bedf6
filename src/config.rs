//! Configuration file handling.
//!
//! The report reads an optional JSON file selecting the data source and the
//! layout variant. Every field has a default, so an empty object is valid.

use crate::charts::LayoutOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV: &str = "PLAYER_REPORT_CONFIG";

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "player_report.json";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Dataset source.
    #[serde(default)]
    pub source: SourceConfig,

    /// Include the youth/senior country comparison charts.
    #[serde(default)]
    pub country_comparison: bool,

    /// Number of equal-width bins for the age histogram.
    #[serde(default = "default_age_bins")]
    pub age_bins: usize,

    /// Maximum rows shown in the dataset table.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            country_comparison: false,
            age_bins: default_age_bins(),
            preview_rows: default_preview_rows(),
        }
    }
}

fn default_age_bins() -> usize {
    20
}

fn default_preview_rows() -> usize {
    500
}

/// Data source selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// CSV snapshot loaded once.
    Static { path: PathBuf },
    /// Query re-run on every render pass.
    Live {
        path: PathBuf,
        /// Re-render automatically every N seconds.
        #[serde(default)]
        refresh_secs: Option<u64>,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Static {
            path: PathBuf::from("dataset.csv"),
        }
    }
}

impl SourceConfig {
    pub fn refresh_secs(&self) -> Option<u64> {
        match self {
            SourceConfig::Static { .. } => None,
            SourceConfig::Live { refresh_secs, .. } => *refresh_secs,
        }
    }
}

impl ReportConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ReportConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Resolve the configuration for this run.
    ///
    /// Precedence: explicit path argument, then `PLAYER_REPORT_CONFIG`, then
    /// `player_report.json` in the working directory, then defaults.
    pub fn resolve(arg: Option<PathBuf>) -> Result<Self> {
        let explicit = arg.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        if let Some(path) = explicit {
            return Self::load(&path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            country_comparison: self.country_comparison,
            age_bins: self.age_bins.max(1),
            preview_rows: self.preview_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.age_bins, 20);
        assert!(!config.country_comparison);
        assert_eq!(
            config.source,
            SourceConfig::Static {
                path: PathBuf::from("dataset.csv")
            }
        );
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: ReportConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.age_bins, 20);
        assert_eq!(config.preview_rows, 500);
        assert_eq!(config.source.refresh_secs(), None);
    }

    #[test]
    fn test_parse_live_config() {
        let json = r#"{
            "source": { "kind": "live", "path": "exports/players.csv", "refresh_secs": 30 },
            "country_comparison": true,
            "age_bins": 10
        }"#;

        let config: ReportConfig = serde_json::from_str(json).unwrap();
        assert!(config.country_comparison);
        assert_eq!(config.age_bins, 10);
        assert_eq!(config.source.refresh_secs(), Some(30));
        assert!(matches!(config.source, SourceConfig::Live { .. }));
    }

    #[test]
    fn test_zero_bins_clamped() {
        let config = ReportConfig {
            age_bins: 0,
            ..ReportConfig::default()
        };
        assert_eq!(config.layout_options().age_bins, 1);
    }

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "player_report_{}_{}.json",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_resolve_precedence() {
        let arg = temp_config("arg", r#"{ "age_bins": 12 }"#);
        let env = temp_config("env", r#"{ "age_bins": 7, "country_comparison": true }"#);
        std::env::set_var(CONFIG_ENV, &env);

        // Explicit argument wins over the environment variable
        let config = ReportConfig::resolve(Some(arg.clone())).unwrap();
        assert_eq!(config.age_bins, 12);
        assert!(!config.country_comparison);

        let config = ReportConfig::resolve(None).unwrap();
        assert_eq!(config.age_bins, 7);
        assert!(config.country_comparison);

        std::env::remove_var(CONFIG_ENV);
        std::fs::remove_file(&arg).ok();
        std::fs::remove_file(&env).ok();
    }

    #[test]
    fn test_resolve_missing_explicit_file_is_an_error() {
        let missing = std::env::temp_dir().join("player_report_missing_config.json");
        let err = ReportConfig::resolve(Some(missing)).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read config file"));
    }

    #[test]
    fn test_unknown_source_kind_rejected() {
        let json = r#"{ "source": { "kind": "ftp", "path": "x" } }"#;
        assert!(serde_json::from_str::<ReportConfig>(json).is_err());
    }
}
