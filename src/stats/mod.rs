//! @ai:module:intent Descriptive statistics over record tables
//! @ai:module:layer application
//! @ai:module:public_api CategoryDistribution, LengthStats, GroupedLengthStats, StatisticsAggregator, IntentSummary, SentimentSummary

pub mod aggregator;
pub mod types;

pub use aggregator::{
    category_distribution, char_len, column_lengths, grouped_length_stats, grouped_lengths,
    histogram_bins, histogram_bins_in, length_stats, value_range, StatisticsAggregator,
    StatisticsAggregatorTrait,
};
pub use types::{
    CategoryCount, CategoryDistribution, GroupedLengthStats, HistogramBin, IntentSummary,
    LengthStats, Quartiles, SentimentSummary,
};
