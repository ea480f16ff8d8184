//! @ai:module:intent Statistic types for dataset summaries
//! @ai:module:layer domain
//! @ai:module:public_api CategoryDistribution, CategoryCount, LengthStats, GroupedLengthStats, HistogramBin, Quartiles, IntentSummary, SentimentSummary
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Occurrence count of one category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// @ai:intent Counts of each distinct value of a categorical column
/// @ai:invariant entries ordered by count desc then label asc; counts sum to total
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    entries: Vec<CategoryCount>,
    total: usize,
}

impl CategoryDistribution {
    /// @ai:intent Build a distribution from unordered label counts
    /// @ai:effects pure
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (String, usize)>,
    {
        let mut entries: Vec<CategoryCount> = counts
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| CategoryCount { label, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        let total = entries.iter().map(|e| e.count).sum();

        Self { entries, total }
    }

    pub fn entries(&self) -> &[CategoryCount] {
        &self.entries
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// @ai:intent Count for a label, if present
    /// @ai:effects pure
    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.count)
    }

    /// @ai:intent Most frequent category; ties go to the smallest label
    /// @ai:effects pure
    pub fn dominant(&self) -> Option<&CategoryCount> {
        self.entries.first()
    }

    /// @ai:intent Share of the total as a percentage in [0, 100]
    /// @ai:effects pure
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }

    /// @ai:intent Keep the top `top_n` entries and fold the rest into "Others"
    /// @ai:effects pure
    pub fn collapse_tail(&self, top_n: usize) -> Vec<CategoryCount> {
        let mut head: Vec<CategoryCount> = self.entries.iter().take(top_n).cloned().collect();
        let others: usize = self.entries.iter().skip(top_n).map(|e| e.count).sum();

        if others > 0 {
            head.push(CategoryCount {
                label: "Others".to_string(),
                count: others,
            });
        }
        head
    }
}

/// @ai:intent Mean, min and max character length of a text column
/// @ai:invariant min <= mean <= max, count > 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub count: usize,
    pub mean: f64,
    pub min: usize,
    pub max: usize,
}

impl LengthStats {
    /// @ai:intent Compute stats over lengths; None when there are no values
    /// @ai:effects pure
    pub fn compute(lengths: &[usize]) -> Option<Self> {
        let min = *lengths.iter().min()?;
        let max = *lengths.iter().max()?;
        let sum: usize = lengths.iter().sum();

        Some(Self {
            count: lengths.len(),
            mean: sum as f64 / lengths.len() as f64,
            min,
            max,
        })
    }
}

/// @ai:intent Mean length of a value column per group label, ordered by label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedLengthStats {
    pub groups: BTreeMap<String, f64>,
}

impl GroupedLengthStats {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.groups.get(label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.groups.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// @ai:intent One equal-width histogram bin, lower bound inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// @ai:intent Five-number summary with box plot whiskers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// @ai:intent Aggregates for the query/intent/response dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentSummary {
    pub total_records: usize,
    pub columns: Vec<String>,
    pub intent_distribution: CategoryDistribution,
    pub unique_intents: usize,
    pub query_length: Option<LengthStats>,
    pub response_length: Option<LengthStats>,
}

/// @ai:intent Aggregates for the query/sentiment dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub total_records: usize,
    pub columns: Vec<String>,
    pub sentiment_distribution: CategoryDistribution,
    pub unique_sentiments: usize,
    pub query_length: Option<LengthStats>,
    pub query_length_by_sentiment: GroupedLengthStats,
}
