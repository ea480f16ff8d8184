//! @ai:module:intent Dataset insights library: load, summarise, chart and report
//! @ai:module:layer application
//! @ai:module:public_api config, error, table, stats, report, pipeline

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod table;

pub use config::{AnalysisConfig, MissingCategoryPolicy};
pub use error::{Error, ErrorKind, Result};
pub use pipeline::{Pipeline, RunReport};
pub use report::{ChartGenerator, ChartSet, JsonReporter, MarkdownReporter, ReportGenerator};
pub use stats::{StatisticsAggregator, StatisticsAggregatorTrait};
pub use table::{RecordTable, TableLoader, TableSchema};
