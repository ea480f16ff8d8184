//! @ai:module:intent Driver running load, aggregate, render and format in sequence
//! @ai:module:layer application
//! @ai:module:public_api Pipeline, RunReport

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::report::{ChartGenerator, ChartGeneratorTrait, ChartSet, RenderedReports, ReportGenerator};
use crate::stats::{IntentSummary, SentimentSummary, StatisticsAggregator, StatisticsAggregatorTrait};
use crate::table::{RecordTable, TableLoader, TableSchema};
use std::path::PathBuf;

/// @ai:intent What a successful full run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub report_path: PathBuf,
    pub summary_path: PathBuf,
    pub charts: ChartSet,
    pub intent_records: usize,
    pub sentiment_records: usize,
    pub intent_categories: usize,
    pub sentiment_categories: usize,
}

/// @ai:intent Runs the analysis with an explicit configuration
pub struct Pipeline {
    config: AnalysisConfig,
    loader: TableLoader,
    aggregator: StatisticsAggregator,
}

impl Pipeline {
    /// @ai:intent Create a pipeline for the given configuration
    /// @ai:effects pure
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            loader: TableLoader::new(),
            aggregator: StatisticsAggregator::new(),
        }
    }

    /// @ai:intent Load both source tables
    /// @ai:effects fs:read
    fn load_tables(&self) -> Result<(RecordTable, RecordTable)> {
        tracing::info!("Loading datasets...");
        let intent = self
            .loader
            .load(&self.config.paths.intent_csv, &TableSchema::intent())?;
        let sentiment = self
            .loader
            .load(&self.config.paths.sentiment_csv, &TableSchema::sentiment())?;
        Ok((intent, sentiment))
    }

    /// @ai:intent Summarise both tables
    /// @ai:effects pure
    fn summarize(
        &self,
        intent: &RecordTable,
        sentiment: &RecordTable,
    ) -> Result<(IntentSummary, SentimentSummary)> {
        tracing::info!("Analyzing intent data...");
        let intent = self.aggregator.summarize_intent(intent)?;
        tracing::info!("Analyzing sentiment data...");
        let sentiment = self.aggregator.summarize_sentiment(sentiment)?;
        Ok((intent, sentiment))
    }

    fn render_charts(&self, intent: &RecordTable, sentiment: &RecordTable) -> Result<ChartSet> {
        let charts = ChartGenerator::new(self.config.charts.clone()).generate_all(
            intent,
            sentiment,
            &self.config.paths.output_dir,
        )?;
        tracing::info!("All visualizations created successfully!");
        Ok(charts)
    }

    fn render_reports(
        &self,
        intent: &IntentSummary,
        sentiment: &SentimentSummary,
    ) -> Result<RenderedReports> {
        tracing::info!("Generating README...");
        ReportGenerator::new(&self.config).render(intent, sentiment)
    }

    fn write_reports(&self, rendered: &RenderedReports) -> Result<()> {
        ReportGenerator::new(&self.config).write(
            rendered,
            &self.config.paths.report_path,
            &self.config.summary_path(),
        )
    }

    /// @ai:intent Chart sub-step on its own
    /// @ai:effects fs:read, fs:write
    pub fn run_charts(&self) -> Result<ChartSet> {
        let (intent, sentiment) = self.load_tables()?;
        self.render_charts(&intent, &sentiment)
    }

    /// @ai:intent Report sub-step on its own; returns the report path
    /// @ai:effects fs:read, fs:write
    pub fn run_report(&self) -> Result<PathBuf> {
        let (intent, sentiment) = self.load_tables()?;
        let (intent, sentiment) = self.summarize(&intent, &sentiment)?;
        tracing::info!("Generating README...");
        ReportGenerator::new(&self.config).generate_all(
            &intent,
            &sentiment,
            &self.config.paths.report_path,
            &self.config.summary_path(),
        )?;
        Ok(self.config.paths.report_path.clone())
    }

    /// @ai:intent Full run: charts first, then the report
    /// @ai:post report rendering errors surface before any chart is written
    /// @ai:effects fs:read, fs:write
    pub fn run(&self) -> Result<RunReport> {
        let (intent_table, sentiment_table) = self.load_tables()?;
        let (intent, sentiment) = self.summarize(&intent_table, &sentiment_table)?;
        let rendered = self.render_reports(&intent, &sentiment)?;

        let charts = self.render_charts(&intent_table, &sentiment_table)?;
        self.write_reports(&rendered)?;
        tracing::info!("Analysis complete!");

        Ok(RunReport {
            report_path: self.config.paths.report_path.clone(),
            summary_path: self.config.summary_path(),
            charts,
            intent_records: intent.total_records,
            sentiment_records: sentiment.total_records,
            intent_categories: intent.unique_intents,
            sentiment_categories: sentiment.unique_sentiments,
        })
    }
}
