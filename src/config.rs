//! @ai:module:intent Configuration structs for the analysis pipeline
//! @ai:module:layer infrastructure
//! @ai:module:public_api AnalysisConfig, PathConfig, ChartConfig, ReportConfig, MissingCategoryPolicy
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent Main configuration for the analysis pipeline
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub charts: ChartConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// @ai:intent Input and output locations
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_intent_csv")]
    pub intent_csv: PathBuf,
    #[serde(default = "default_sentiment_csv")]
    pub sentiment_csv: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
    /// File name of the JSON summary, written inside `output_dir`
    #[serde(default = "default_summary_file")]
    pub summary_file: String,
}

/// @ai:intent Chart rendering options
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_panel_size")]
    pub intent_size: (u32, u32),
    #[serde(default = "default_panel_size")]
    pub sentiment_size: (u32, u32),
    #[serde(default = "default_overview_size")]
    pub overview_size: (u32, u32),
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    #[serde(default = "default_pie_top_n")]
    pub pie_top_n: usize,
    #[serde(default = "default_true")]
    pub create_missing_dirs: bool,
}

/// @ai:intent Report formatting options
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_image_link_prefix")]
    pub image_link_prefix: String,
    #[serde(default = "default_balance_labels")]
    pub balance_labels: Vec<String>,
    #[serde(default)]
    pub missing_category: MissingCategoryPolicy,
}

/// @ai:intent What the report does when an expected category label has no rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingCategoryPolicy {
    /// Report the label with a count of zero
    #[default]
    Zero,
    /// Fail with a missing key error
    Error,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            intent_csv: default_intent_csv(),
            sentiment_csv: default_sentiment_csv(),
            output_dir: default_output_dir(),
            report_path: default_report_path(),
            summary_file: default_summary_file(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            intent_size: default_panel_size(),
            sentiment_size: default_panel_size(),
            overview_size: default_overview_size(),
            histogram_bins: default_histogram_bins(),
            pie_top_n: default_pie_top_n(),
            create_missing_dirs: true,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            image_link_prefix: default_image_link_prefix(),
            balance_labels: default_balance_labels(),
            missing_category: MissingCategoryPolicy::default(),
        }
    }
}

fn default_intent_csv() -> PathBuf {
    PathBuf::from("data/query_intent_response.csv")
}

fn default_sentiment_csv() -> PathBuf {
    PathBuf::from("data/query_sentiment.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data_visualizations")
}

fn default_report_path() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_summary_file() -> String {
    "analysis.json".to_string()
}

fn default_panel_size() -> (u32, u32) {
    (1500, 1200)
}

fn default_overview_size() -> (u32, u32) {
    (1500, 600)
}

fn default_histogram_bins() -> usize {
    30
}

fn default_pie_top_n() -> usize {
    8
}

fn default_true() -> bool {
    true
}

fn default_image_link_prefix() -> String {
    "data_visualizations".to_string()
}

fn default_balance_labels() -> Vec<String> {
    vec!["Positive".to_string(), "Negative".to_string()]
}

impl AnalysisConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Full path of the JSON summary file
    /// @ai:effects pure
    pub fn summary_path(&self) -> PathBuf {
        self.paths.output_dir.join(&self.paths.summary_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_point_at_data_directory() {
        let config = AnalysisConfig::default();
        assert_eq!(
            config.paths.intent_csv,
            PathBuf::from("data/query_intent_response.csv")
        );
        assert_eq!(config.charts.pie_top_n, 8);
        assert_eq!(config.report.missing_category, MissingCategoryPolicy::Zero);
        assert_eq!(
            config.summary_path(),
            PathBuf::from("data_visualizations/analysis.json")
        );
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("insights.toml");
        std::fs::write(
            &path,
            "[report]\nmissing_category = \"error\"\n\n[charts]\nhistogram_bins = 12\n",
        )
        .unwrap();

        let config = AnalysisConfig::load(&path).unwrap();
        assert_eq!(config.report.missing_category, MissingCategoryPolicy::Error);
        assert_eq!(config.report.balance_labels, vec!["Positive", "Negative"]);
        assert_eq!(config.charts.histogram_bins, 12);
        assert!(config.charts.create_missing_dirs);
        assert_eq!(config.paths.report_path, PathBuf::from("README.md"));
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("insights.toml");

        let mut config = AnalysisConfig::default();
        config.paths.output_dir = PathBuf::from("charts");
        config.save(&path).unwrap();

        let loaded = AnalysisConfig::load(&path).unwrap();
        assert_eq!(loaded.paths.output_dir, PathBuf::from("charts"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.toml");
        std::fs::write(&path, "[paths\nintent_csv = 3").unwrap();

        let err = AnalysisConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
