//! @ai:module:intent Markdown report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter
//! @ai:module:stateless true

use crate::config::{MissingCategoryPolicy, ReportConfig};
use crate::error::{Error, Result};
use crate::report::charts::{DATASET_OVERVIEW_FILE, INTENT_ANALYSIS_FILE, SENTIMENT_ANALYSIS_FILE};
use crate::report::display_label;
use crate::stats::{CategoryDistribution, IntentSummary, LengthStats, SentimentSummary};
use std::fmt::Write as FmtWrite;

/// @ai:intent Generates the Markdown dataset report
pub struct MarkdownReporter {
    config: ReportConfig,
}

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// @ai:intent Format an integer with comma thousands separators
    /// @ai:effects pure
    pub fn format_count(value: usize) -> String {
        let digits = value.to_string();
        let mut output = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                output.push(',');
            }
            output.push(ch);
        }
        output
    }

    fn format_mean(stats: Option<&LengthStats>) -> String {
        stats
            .map(|s| format!("{:.1}", s.mean))
            .unwrap_or_else(|| "n/a".to_string())
    }

    fn format_extreme(stats: Option<&LengthStats>, pick: fn(&LengthStats) -> usize) -> String {
        stats
            .map(|s| pick(s).to_string())
            .unwrap_or_else(|| "n/a".to_string())
    }

    fn image_link(&self, file: &str) -> String {
        if self.config.image_link_prefix.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", self.config.image_link_prefix.trim_end_matches('/'), file)
        }
    }

    /// @ai:intent One bullet per category with count and percentage
    /// @ai:effects pure
    fn distribution_lines(output: &mut String, distribution: &CategoryDistribution) {
        for entry in distribution.entries() {
            writeln!(
                output,
                "- **{}**: {} queries ({:.1}%)",
                display_label(&entry.label),
                Self::format_count(entry.count),
                distribution.percentage(entry.count)
            )
            .unwrap();
        }
    }

    /// @ai:intent Generate title, overview and dataset description
    /// @ai:effects pure
    fn generate_header(&self) -> String {
        let mut output = String::new();

        writeln!(output, "# Dataset Analysis").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "## Overview").unwrap();
        writeln!(
            output,
            "Analysis of two main datasets focusing on query intent classification and sentiment analysis."
        )
        .unwrap();
        writeln!(output).unwrap();
        writeln!(output, "![Dataset Overview]({})", self.image_link(DATASET_OVERVIEW_FILE)).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "## Dataset Description").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "### Files").unwrap();
        writeln!(
            output,
            "- `query_intent_response.csv`: Contains customer queries with their classified intents and corresponding responses"
        )
        .unwrap();
        writeln!(
            output,
            "- `query_sentiment.csv`: Contains customer queries with their sentiment classifications"
        )
        .unwrap();
        writeln!(output).unwrap();
        writeln!(output, "## Data Analysis Summary").unwrap();
        writeln!(output).unwrap();

        output
    }

    /// @ai:intent Generate the intent dataset section
    /// @ai:effects pure
    fn generate_intent_section(&self, intent: &IntentSummary) -> String {
        let mut output = String::new();
        let query = intent.query_length.as_ref();
        let response = intent.response_length.as_ref();

        writeln!(output, "### Query Intent Response Dataset").unwrap();
        writeln!(output, "- **Total Records**: {}", Self::format_count(intent.total_records)).unwrap();
        writeln!(output, "- **Columns**: {}", intent.columns.join(", ")).unwrap();
        writeln!(output, "- **Unique Intents**: {}", intent.unique_intents).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "#### Intent Distribution").unwrap();
        Self::distribution_lines(&mut output, &intent.intent_distribution);
        writeln!(output).unwrap();

        writeln!(output, "#### Query Statistics").unwrap();
        writeln!(output, "- **Average Query Length**: {} characters", Self::format_mean(query)).unwrap();
        writeln!(output, "- **Shortest Query**: {} characters", Self::format_extreme(query, |s| s.min)).unwrap();
        writeln!(output, "- **Longest Query**: {} characters", Self::format_extreme(query, |s| s.max)).unwrap();
        writeln!(output).unwrap();

        writeln!(output, "#### Response Statistics").unwrap();
        writeln!(output, "- **Average Response Length**: {} characters", Self::format_mean(response)).unwrap();
        writeln!(output, "- **Shortest Response**: {} characters", Self::format_extreme(response, |s| s.min)).unwrap();
        writeln!(output, "- **Longest Response**: {} characters", Self::format_extreme(response, |s| s.max)).unwrap();
        writeln!(output).unwrap();

        writeln!(output, "![Intent Analysis]({})", self.image_link(INTENT_ANALYSIS_FILE)).unwrap();
        writeln!(output).unwrap();

        output
    }

    /// @ai:intent Generate the sentiment dataset section
    /// @ai:effects pure
    fn generate_sentiment_section(&self, sentiment: &SentimentSummary) -> String {
        let mut output = String::new();

        writeln!(output, "### Query Sentiment Dataset").unwrap();
        writeln!(output, "- **Total Records**: {}", Self::format_count(sentiment.total_records)).unwrap();
        writeln!(output, "- **Columns**: {}", sentiment.columns.join(", ")).unwrap();
        writeln!(output, "- **Unique Sentiments**: {}", sentiment.unique_sentiments).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "#### Sentiment Distribution").unwrap();
        Self::distribution_lines(&mut output, &sentiment.sentiment_distribution);
        writeln!(output).unwrap();

        writeln!(output, "#### Query Length by Sentiment").unwrap();
        for (label, mean) in sentiment.query_length_by_sentiment.iter() {
            writeln!(output, "- **{}**: {:.1} characters on average", display_label(label), mean).unwrap();
        }
        writeln!(output).unwrap();

        writeln!(output, "![Sentiment Analysis]({})", self.image_link(SENTIMENT_ANALYSIS_FILE)).unwrap();
        writeln!(output).unwrap();

        output
    }

    /// @ai:intent Compare the configured labels' counts, e.g. "3 positive vs 0 negative queries"
    /// @ai:effects pure
    fn sentiment_balance(&self, distribution: &CategoryDistribution) -> Result<String> {
        let labels: Vec<String> = if self.config.balance_labels.is_empty() {
            distribution.entries().iter().map(|e| e.label.clone()).collect()
        } else {
            self.config.balance_labels.clone()
        };

        let mut parts = Vec::with_capacity(labels.len());
        for label in &labels {
            let count = match (distribution.get(label), self.config.missing_category) {
                (Some(count), _) => count,
                (None, MissingCategoryPolicy::Zero) => 0,
                (None, MissingCategoryPolicy::Error) => {
                    return Err(Error::MissingKey {
                        label: label.clone(),
                    })
                }
            };
            parts.push(format!(
                "{} {}",
                Self::format_count(count),
                display_label(label).to_lowercase()
            ));
        }

        Ok(format!("{} queries", parts.join(" vs ")))
    }

    /// @ai:intent Generate the key insights section
    /// @ai:effects pure
    fn generate_insights(&self, intent: &IntentSummary, sentiment: &SentimentSummary) -> Result<String> {
        let mut output = String::new();
        let (dominant_label, dominant_count) = intent
            .intent_distribution
            .dominant()
            .map(|d| (display_label(&d.label), Self::format_count(d.count)))
            .unwrap_or(("n/a", "0".to_string()));

        writeln!(output, "## Key Insights").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "### Intent Analysis").unwrap();
        writeln!(
            output,
            "1. **Dominant Intent**: The most common intent is \"{}\" with {} queries",
            dominant_label, dominant_count
        )
        .unwrap();
        writeln!(
            output,
            "2. **Query Complexity**: Average query length is {} characters, indicating moderate complexity",
            Self::format_mean(intent.query_length.as_ref())
        )
        .unwrap();
        writeln!(
            output,
            "3. **Response Detail**: Responses are comprehensive with an average length of {} characters",
            Self::format_mean(intent.response_length.as_ref())
        )
        .unwrap();
        writeln!(output).unwrap();

        writeln!(output, "### Sentiment Analysis").unwrap();
        writeln!(
            output,
            "1. **Sentiment Balance**: {}",
            self.sentiment_balance(&sentiment.sentiment_distribution)?
        )
        .unwrap();
        writeln!(
            output,
            "2. **Query Length Patterns**: Different sentiments show varying query lengths, which could indicate different communication patterns"
        )
        .unwrap();
        writeln!(
            output,
            "3. **Vocabulary Differences**: Each sentiment category has distinct commonly used words"
        )
        .unwrap();
        writeln!(output).unwrap();

        Ok(output)
    }

    /// @ai:intent Generate usage and technical details
    /// @ai:effects pure
    fn generate_footer(intent: &IntentSummary, sentiment: &SentimentSummary) -> String {
        let mut output = String::new();

        writeln!(output, "## Usage").unwrap();
        writeln!(output, "This data can be used for:").unwrap();
        for use_case in [
            "Training intent classification models",
            "Sentiment analysis model development",
            "Customer service automation",
            "Understanding customer communication patterns",
            "Response generation systems",
        ] {
            writeln!(output, "- {}", use_case).unwrap();
        }
        writeln!(output).unwrap();

        writeln!(output, "## Technical Details").unwrap();
        writeln!(output, "- **Intent Dataset Size**: {} records", Self::format_count(intent.total_records)).unwrap();
        writeln!(output, "- **Sentiment Dataset Size**: {} records", Self::format_count(sentiment.total_records)).unwrap();
        writeln!(output, "- **File Format**: CSV with UTF-8 encoding").unwrap();
        writeln!(output, "- **Analysis Date**: Generated automatically").unwrap();

        output
    }

    /// @ai:intent Build the full report text
    /// @ai:effects pure
    pub fn render(&self, intent: &IntentSummary, sentiment: &SentimentSummary) -> Result<String> {
        let mut content = String::new();

        content.push_str(&self.generate_header());
        content.push_str(&self.generate_intent_section(intent));
        content.push_str(&self.generate_sentiment_section(sentiment));
        content.push_str(&self.generate_insights(intent, sentiment)?);
        content.push_str(&Self::generate_footer(intent, sentiment));

        Ok(content)
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{CategoryDistribution, GroupedLengthStats};
    use pretty_assertions::assert_eq;

    fn distribution(pairs: &[(&str, usize)]) -> CategoryDistribution {
        CategoryDistribution::from_counts(pairs.iter().map(|(l, c)| (l.to_string(), *c)))
    }

    fn intent_summary() -> IntentSummary {
        let intent_distribution = distribution(&[("refund", 2), ("billing", 1)]);
        IntentSummary {
            total_records: 3,
            columns: vec!["query".into(), "intent".into(), "response".into()],
            unique_intents: intent_distribution.len(),
            intent_distribution,
            query_length: LengthStats::compute(&[3, 6, 1]),
            response_length: LengthStats::compute(&[2, 4, 1]),
        }
    }

    fn sentiment_summary(pairs: &[(&str, usize)]) -> SentimentSummary {
        let sentiment_distribution = distribution(pairs);
        let mut grouped = GroupedLengthStats::default();
        for (label, _) in pairs {
            grouped.groups.insert(label.to_string(), 12.4);
        }
        SentimentSummary {
            total_records: sentiment_distribution.total(),
            columns: vec!["query".into(), "sentiment".into()],
            unique_sentiments: sentiment_distribution.len(),
            sentiment_distribution,
            query_length: LengthStats::compute(&[10, 15]),
            query_length_by_sentiment: grouped,
        }
    }

    fn reporter(policy: MissingCategoryPolicy) -> MarkdownReporter {
        MarkdownReporter::new(ReportConfig {
            missing_category: policy,
            ..ReportConfig::default()
        })
    }

    #[test]
    fn test_format_count() {
        assert_eq!(MarkdownReporter::format_count(0), "0");
        assert_eq!(MarkdownReporter::format_count(999), "999");
        assert_eq!(MarkdownReporter::format_count(1000), "1,000");
        assert_eq!(MarkdownReporter::format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_intent_section_values() {
        let content = MarkdownReporter::default()
            .render(&intent_summary(), &sentiment_summary(&[("Positive", 3), ("Negative", 1)]))
            .unwrap();

        assert!(content.contains("- **Total Records**: 3\n"));
        assert!(content.contains("- **Columns**: query, intent, response\n"));
        assert!(content.contains("- **refund**: 2 queries (66.7%)\n"));
        assert!(content.contains("- **billing**: 1 queries (33.3%)\n"));
        assert!(content.contains("- **Average Query Length**: 3.3 characters\n"));
        assert!(content.contains("- **Shortest Query**: 1 characters\n"));
        assert!(content.contains("- **Longest Response**: 4 characters\n"));
        assert!(content.contains("The most common intent is \"refund\" with 2 queries"));
        assert!(content.contains("![Intent Analysis](data_visualizations/intent_analysis.png)"));
    }

    #[test]
    fn test_sentiment_section_values() {
        let content = MarkdownReporter::default()
            .render(&intent_summary(), &sentiment_summary(&[("Positive", 3), ("Negative", 1)]))
            .unwrap();

        assert!(content.contains("- **Positive**: 3 queries (75.0%)\n"));
        assert!(content.contains("- **Negative**: 12.4 characters on average\n"));
        assert!(content.contains("**Sentiment Balance**: 3 positive vs 1 negative queries"));
    }

    #[test]
    fn test_missing_positive_defaults_to_zero() {
        let content = reporter(MissingCategoryPolicy::Zero)
            .render(&intent_summary(), &sentiment_summary(&[("Negative", 4)]))
            .unwrap();
        assert!(content.contains("**Sentiment Balance**: 0 positive vs 4 negative queries"));
    }

    #[test]
    fn test_missing_positive_fails_under_error_policy() {
        let err = reporter(MissingCategoryPolicy::Error)
            .render(&intent_summary(), &sentiment_summary(&[("Negative", 4)]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingKey { ref label } if label == "Positive"));
    }

    #[test]
    fn test_missing_negative_treated_like_positive() {
        let zero = reporter(MissingCategoryPolicy::Zero)
            .render(&intent_summary(), &sentiment_summary(&[("Positive", 4)]))
            .unwrap();
        assert!(zero.contains("4 positive vs 0 negative queries"));

        let err = reporter(MissingCategoryPolicy::Error)
            .render(&intent_summary(), &sentiment_summary(&[("Positive", 4)]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingKey { ref label } if label == "Negative"));
    }

    #[test]
    fn test_empty_intent_table_prints_placeholders() {
        let empty = IntentSummary {
            total_records: 0,
            columns: vec!["query".into(), "intent".into(), "response".into()],
            intent_distribution: CategoryDistribution::default(),
            unique_intents: 0,
            query_length: None,
            response_length: None,
        };
        let content = MarkdownReporter::default()
            .render(&empty, &sentiment_summary(&[("Positive", 1)]))
            .unwrap();

        assert!(content.contains("- **Average Query Length**: n/a characters\n"));
        assert!(content.contains("The most common intent is \"n/a\" with 0 queries"));
    }

    #[test]
    fn test_blank_category_gets_placeholder_label() {
        let content = MarkdownReporter::new(ReportConfig {
            balance_labels: Vec::new(),
            ..ReportConfig::default()
        })
        .render(&intent_summary(), &sentiment_summary(&[("Positive", 2), ("", 1)]))
        .unwrap();

        assert!(content.contains("- **(empty)**: 1 queries (33.3%)\n"));
        assert!(content.contains("- **(empty)**: 12.4 characters on average\n"));
        assert!(content.contains("**Sentiment Balance**: 2 positive vs 1 (empty) queries"));
        assert!(!content.contains("****"));
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let sentiment = sentiment_summary(&[("Positive", 7), ("Negative", 5), ("Neutral", 3)]);
        let content = MarkdownReporter::default()
            .render(&intent_summary(), &sentiment)
            .unwrap();

        let total: f64 = content
            .lines()
            .filter(|l| l.contains(" queries (") && l.ends_with("%)"))
            .filter(|l| ["Positive", "Negative", "Neutral"].iter().any(|s| l.contains(s)))
            .map(|l| {
                let start = l.rfind('(').unwrap() + 1;
                l[start..l.len() - 2].parse::<f64>().unwrap()
            })
            .sum();
        assert!((total - 100.0).abs() <= 0.1 * 3.0);
    }

    #[test]
    fn test_custom_image_prefix() {
        let reporter = MarkdownReporter::new(ReportConfig {
            image_link_prefix: "docs/img/".to_string(),
            ..ReportConfig::default()
        });
        let content = reporter
            .render(&intent_summary(), &sentiment_summary(&[("Positive", 1), ("Negative", 1)]))
            .unwrap();
        assert!(content.contains("![Dataset Overview](docs/img/dataset_overview.png)"));
    }
}
