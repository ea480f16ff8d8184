//! @ai:module:intent JSON summary generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter
//! @ai:module:stateless true

use crate::error::Result;
use crate::stats::{IntentSummary, SentimentSummary};
use serde::Serialize;

/// @ai:intent Serialized shape of the summary file
#[derive(Serialize)]
struct SummaryDocument<'a> {
    intent: &'a IntentSummary,
    sentiment: &'a SentimentSummary,
}

/// @ai:intent Renders both dataset summaries as pretty JSON
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Serialize both summaries as pretty JSON
    /// @ai:effects pure
    pub fn render(&self, intent: &IntentSummary, sentiment: &SentimentSummary) -> Result<String> {
        Ok(serde_json::to_string_pretty(&SummaryDocument { intent, sentiment })?)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{StatisticsAggregator, StatisticsAggregatorTrait};
    use crate::table::{TableLoader, TableSchema};

    #[test]
    fn test_render_json_summary() {
        let loader = TableLoader::new();
        let intent = loader
            .load_str(
                "query,intent,response\nabc,refund,ok\nx,billing,y\n",
                &TableSchema::intent(),
            )
            .unwrap();
        let sentiment = loader
            .load_str("query,sentiment\n,Positive\n", &TableSchema::sentiment())
            .unwrap();

        let aggregator = StatisticsAggregator::new();
        let intent = aggregator.summarize_intent(&intent).unwrap();
        let sentiment = aggregator.summarize_sentiment(&sentiment).unwrap();

        let json = JsonReporter::new().render(&intent, &sentiment).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["intent"]["total_records"], 2);
        assert_eq!(value["intent"]["intent_distribution"]["total"], 2);
        assert_eq!(value["sentiment"]["query_length"]["max"], 0);
        assert_eq!(
            value["sentiment"]["query_length_by_sentiment"]["groups"]["Positive"],
            0.0
        );
    }
}
