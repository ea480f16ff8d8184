//! @ai:module:intent Chart, Markdown and JSON outputs for dataset summaries
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, RenderedReports, ChartGenerator, MarkdownReporter, JsonReporter, write_atomic, ensure_dir

pub mod charts;
pub mod json_report;
pub mod markdown_report;

pub use charts::{
    ChartGenerator, ChartGeneratorTrait, ChartSet, DATASET_OVERVIEW_FILE, INTENT_ANALYSIS_FILE,
    SENTIMENT_ANALYSIS_FILE,
};
pub use json_report::JsonReporter;
pub use markdown_report::MarkdownReporter;

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::stats::{IntentSummary, SentimentSummary};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Shown wherever a category label is blank
pub const EMPTY_LABEL: &str = "(empty)";

/// @ai:intent Printable form of a category label
/// @ai:effects pure
pub fn display_label(label: &str) -> &str {
    if label.is_empty() {
        EMPTY_LABEL
    } else {
        label
    }
}

/// @ai:intent Report text and JSON summary rendered but not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReports {
    pub markdown: String,
    pub json: String,
}

/// @ai:intent Combined writer for the Markdown report and JSON summary
pub struct ReportGenerator {
    markdown: MarkdownReporter,
    json: JsonReporter,
    create_missing_dirs: bool,
}

impl ReportGenerator {
    /// @ai:intent Create a report generator from the analysis configuration
    /// @ai:effects pure
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            markdown: MarkdownReporter::new(config.report.clone()),
            json: JsonReporter::new(),
            create_missing_dirs: config.charts.create_missing_dirs,
        }
    }

    /// @ai:intent Render both outputs in memory
    /// @ai:effects pure
    pub fn render(
        &self,
        intent: &IntentSummary,
        sentiment: &SentimentSummary,
    ) -> Result<RenderedReports> {
        Ok(RenderedReports {
            markdown: self.markdown.render(intent, sentiment)?,
            json: self.json.render(intent, sentiment)?,
        })
    }

    /// @ai:intent Write already rendered outputs, checking both target directories first
    /// @ai:post on a directory error neither file is written
    /// @ai:effects fs:write
    pub fn write(
        &self,
        rendered: &RenderedReports,
        report_path: &Path,
        summary_path: &Path,
    ) -> Result<()> {
        ensure_dir(parent_dir(report_path), self.create_missing_dirs)?;
        ensure_dir(parent_dir(summary_path), self.create_missing_dirs)?;

        write_atomic(report_path, rendered.markdown.as_bytes())?;
        tracing::info!("Report written to {}", report_path.display());

        write_atomic(summary_path, rendered.json.as_bytes())?;
        tracing::info!("Summary written to {}", summary_path.display());
        Ok(())
    }

    /// @ai:intent Render and write the Markdown report and the JSON summary
    /// @ai:effects fs:write
    pub fn generate_all(
        &self,
        intent: &IntentSummary,
        sentiment: &SentimentSummary,
        report_path: &Path,
        summary_path: &Path,
    ) -> Result<()> {
        let rendered = self.render(intent, sentiment)?;
        self.write(&rendered, report_path, summary_path)
    }
}

/// @ai:intent Directory a file path lives in, "." for bare file names
/// @ai:effects pure
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// @ai:intent Make sure a directory exists, creating it only when allowed
/// @ai:effects fs:write
pub fn ensure_dir(dir: &Path, create_missing: bool) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    if !create_missing {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// @ai:intent Replace a file's contents via a temporary file in the same directory
/// @ai:pre the parent directory exists
/// @ai:post the target holds either its old or its new contents, never a mix
/// @ai:effects fs:write
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = NamedTempFile::new_in(parent_dir(path))?;
    file.write_all(contents)?;
    file.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
