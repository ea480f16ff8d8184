//! @ai:module:intent Statistical aggregation over record tables
//! @ai:module:layer application
//! @ai:module:public_api StatisticsAggregator, category_distribution, length_stats, grouped_length_stats, histogram_bins
//! @ai:module:stateless true

use crate::error::Result;
use crate::stats::types::{
    CategoryDistribution, GroupedLengthStats, HistogramBin, IntentSummary, LengthStats,
    Quartiles, SentimentSummary,
};
use crate::table::{RecordTable, INTENT, QUERY, RESPONSE, SENTIMENT};
use std::collections::{BTreeMap, HashMap};

/// @ai:intent Trait for building dataset summaries
pub trait StatisticsAggregatorTrait: Send + Sync {
    /// @ai:intent Summarise the query/intent/response table
    fn summarize_intent(&self, table: &RecordTable) -> Result<IntentSummary>;

    /// @ai:intent Summarise the query/sentiment table
    fn summarize_sentiment(&self, table: &RecordTable) -> Result<SentimentSummary>;
}

/// @ai:intent Builds summaries from the statistic primitives in this module
pub struct StatisticsAggregator;

impl StatisticsAggregator {
    /// @ai:intent Create a new aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for StatisticsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsAggregatorTrait for StatisticsAggregator {
    /// @ai:effects pure
    fn summarize_intent(&self, table: &RecordTable) -> Result<IntentSummary> {
        let intent_distribution = category_distribution(table, INTENT)?;

        Ok(IntentSummary {
            total_records: table.len(),
            columns: table.columns().to_vec(),
            unique_intents: intent_distribution.len(),
            intent_distribution,
            query_length: length_stats(table, QUERY)?,
            response_length: length_stats(table, RESPONSE)?,
        })
    }

    /// @ai:effects pure
    fn summarize_sentiment(&self, table: &RecordTable) -> Result<SentimentSummary> {
        let sentiment_distribution = category_distribution(table, SENTIMENT)?;

        Ok(SentimentSummary {
            total_records: table.len(),
            columns: table.columns().to_vec(),
            unique_sentiments: sentiment_distribution.len(),
            sentiment_distribution,
            query_length: length_stats(table, QUERY)?,
            query_length_by_sentiment: grouped_length_stats(table, QUERY, SENTIMENT)?,
        })
    }
}

/// @ai:intent Character length of a cell
/// @ai:effects pure
pub fn char_len(cell: &str) -> usize {
    cell.chars().count()
}

/// @ai:intent Count occurrences of each distinct value in a column
/// @ai:effects pure
pub fn category_distribution(table: &RecordTable, column: &str) -> Result<CategoryDistribution> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in table.column(column)? {
        *counts.entry(value).or_insert(0) += 1;
    }

    Ok(CategoryDistribution::from_counts(
        counts.into_iter().map(|(label, count)| (label.to_string(), count)),
    ))
}

/// @ai:intent Character lengths of every cell in a column, in row order
/// @ai:effects pure
pub fn column_lengths(table: &RecordTable, column: &str) -> Result<Vec<usize>> {
    Ok(table.column(column)?.map(char_len).collect())
}

/// @ai:intent Mean/min/max character length of a column; None for an empty table
/// @ai:effects pure
pub fn length_stats(table: &RecordTable, column: &str) -> Result<Option<LengthStats>> {
    let lengths = column_lengths(table, column)?;
    Ok(LengthStats::compute(&lengths))
}

/// @ai:intent Character lengths of a value column split by a group column, ordered by group
/// @ai:effects pure
pub fn grouped_lengths(
    table: &RecordTable,
    value_column: &str,
    group_column: &str,
) -> Result<BTreeMap<String, Vec<usize>>> {
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (group, value) in table.column_pairs(group_column, value_column)? {
        groups
            .entry(group.to_string())
            .or_default()
            .push(char_len(value));
    }
    Ok(groups)
}

/// @ai:intent Mean length of a value column within each group
/// @ai:post groups without rows are absent
/// @ai:effects pure
pub fn grouped_length_stats(
    table: &RecordTable,
    value_column: &str,
    group_column: &str,
) -> Result<GroupedLengthStats> {
    let groups = grouped_lengths(table, value_column, group_column)?
        .into_iter()
        .filter_map(|(label, lengths)| LengthStats::compute(&lengths).map(|s| (label, s.mean)))
        .collect();

    Ok(GroupedLengthStats { groups })
}

/// @ai:intent Smallest and largest value, widened when they coincide
/// @ai:effects pure
pub fn value_range(values: &[usize]) -> Option<(f64, f64)> {
    let min = *values.iter().min()? as f64;
    let max = *values.iter().max()? as f64;

    if max > min {
        Some((min, max))
    } else {
        Some((min, min + 1.0))
    }
}

/// @ai:intent Equal-width bins spanning the values' own range
/// @ai:effects pure
pub fn histogram_bins(values: &[usize], bins: usize) -> Vec<HistogramBin> {
    match value_range(values) {
        Some(range) => histogram_bins_in(values, bins, range),
        None => Vec::new(),
    }
}

/// @ai:intent Equal-width bins over a fixed range; the last bin includes its upper edge
/// @ai:pre range.0 < range.1
/// @ai:effects pure
pub fn histogram_bins_in(values: &[usize], bins: usize, range: (f64, f64)) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let (lower, upper) = range;
    let width = (upper - lower) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lower + width * i as f64,
            upper: lower + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for &value in values {
        let value = value as f64;
        if value < lower || value > upper {
            continue;
        }
        let index = (((value - lower) / width) as usize).min(bins - 1);
        result[index].count += 1;
    }

    result
}

/// @ai:intent Linear-interpolation quantile of sorted values
/// @ai:pre sorted is non-empty and ascending
/// @ai:effects pure
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    let fraction = position - below as f64;

    sorted[below] + (sorted[above] - sorted[below]) * fraction
}

impl Quartiles {
    /// @ai:intent Five-number summary with 1.5 IQR whiskers; None when empty
    /// @ai:effects pure
    pub fn compute(values: &[usize]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted: Vec<f64> = values.iter().map(|v| *v as f64).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let inside = sorted.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
        let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min);
        let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max);

        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(Self {
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{TableLoader, TableSchema};

    fn scenario_table() -> RecordTable {
        TableLoader::new()
            .load_str(
                "intent,query,response\nrefund,abc,ok\nrefund,abcdef,fine\nbilling,x,y\n",
                &TableSchema::intent(),
            )
            .unwrap()
    }

    fn empty_intent_table() -> RecordTable {
        TableLoader::new()
            .load_str("query,intent,response\n", &TableSchema::intent())
            .unwrap()
    }

    #[test]
    fn test_scenario_distribution() {
        let dist = category_distribution(&scenario_table(), "intent").unwrap();
        assert_eq!(dist.get("refund"), Some(2));
        assert_eq!(dist.get("billing"), Some(1));
        assert_eq!(dist.len(), 2);
        assert_eq!(dist.total(), 3);
    }

    #[test]
    fn test_scenario_query_lengths() {
        let stats = length_stats(&scenario_table(), "query").unwrap().unwrap();
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 6);
        assert!((stats.mean - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", stats.mean), "3.33");
    }

    #[test]
    fn test_distribution_sum_matches_row_count() {
        let table = TableLoader::new()
            .load_str(
                "query,sentiment\na,Positive\nb,Negative\nc,\nd,Positive\ne,Neutral\n",
                &TableSchema::sentiment(),
            )
            .unwrap();
        let dist = category_distribution(&table, "sentiment").unwrap();
        assert_eq!(dist.total(), table.len());
        assert_eq!(dist.get(""), Some(1));
    }

    #[test]
    fn test_distribution_is_deterministic() {
        let table = scenario_table();
        let first = category_distribution(&table, "intent").unwrap();
        let second = category_distribution(&table, "intent").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_table() {
        let table = empty_intent_table();
        assert!(category_distribution(&table, "intent").unwrap().is_empty());
        assert!(length_stats(&table, "query").unwrap().is_none());
        assert!(grouped_length_stats(&table, "query", "intent")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_length_stats_missing_column() {
        let err = length_stats(&scenario_table(), "sentiment").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::MissingColumn);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let table = TableLoader::new()
            .load_str("query,sentiment\ncafé,Positive\n", &TableSchema::sentiment())
            .unwrap();
        let stats = length_stats(&table, "query").unwrap().unwrap();
        assert_eq!(stats.max, 4);
    }

    #[test]
    fn test_min_mean_max_ordering() {
        let table = TableLoader::new()
            .load_str(
                "query,sentiment\nhello there,Positive\nhi,Negative\nwhat is going on here,Negative\n",
                &TableSchema::sentiment(),
            )
            .unwrap();
        let stats = length_stats(&table, "query").unwrap().unwrap();
        assert!(stats.min as f64 <= stats.mean);
        assert!(stats.mean <= stats.max as f64);
    }

    #[test]
    fn test_grouped_length_stats() {
        let table = TableLoader::new()
            .load_str(
                "query,sentiment\nabcd,Positive\nab,Positive\nabcdef,Negative\n",
                &TableSchema::sentiment(),
            )
            .unwrap();
        let grouped = grouped_length_stats(&table, "query", "sentiment").unwrap();
        assert_eq!(grouped.len(), 2);
        assert!((grouped.get("Positive").unwrap() - 3.0).abs() < 1e-9);
        assert!((grouped.get("Negative").unwrap() - 6.0).abs() < 1e-9);
        let labels: Vec<_> = grouped.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Negative", "Positive"]);
    }

    #[test]
    fn test_summarize_intent() {
        let summary = StatisticsAggregator::new()
            .summarize_intent(&scenario_table())
            .unwrap();
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.unique_intents, 2);
        assert_eq!(summary.columns, vec!["intent", "query", "response"]);
        assert_eq!(summary.response_length.unwrap().max, 4);
    }

    #[test]
    fn test_histogram_bins_cover_all_values() {
        let values = vec![1, 2, 2, 3, 10, 10];
        let bins = histogram_bins(&values, 3);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].count, 4);
        assert_eq!(bins[2].count, 2);
        assert!((bins[2].upper - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_of_identical_values() {
        let bins = histogram_bins(&[5, 5, 5], 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn test_histogram_of_nothing() {
        assert!(histogram_bins(&[], 30).is_empty());
    }

    #[test]
    fn test_quartiles() {
        let q = Quartiles::compute(&[1, 2, 3, 4, 5, 6, 7, 8, 100]).unwrap();
        assert!((q.median - 5.0).abs() < 1e-9);
        assert!((q.q1 - 3.0).abs() < 1e-9);
        assert!((q.q3 - 7.0).abs() < 1e-9);
        assert_eq!(q.outliers, vec![100.0]);
        assert!((q.upper_whisker - 8.0).abs() < 1e-9);
        assert!((q.lower_whisker - 1.0).abs() < 1e-9);
        assert!((q.max - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_quartiles_empty() {
        assert!(Quartiles::compute(&[]).is_none());
    }
}
