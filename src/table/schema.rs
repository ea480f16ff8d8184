//! @ai:module:intent Column names and schemas for the two source datasets
//! @ai:module:layer domain
//! @ai:module:public_api TableSchema, QUERY, INTENT, RESPONSE, SENTIMENT
//! @ai:module:stateless true

pub const QUERY: &str = "query";
pub const INTENT: &str = "intent";
pub const RESPONSE: &str = "response";
pub const SENTIMENT: &str = "sentiment";

/// @ai:intent Columns a table must provide; extra columns are allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSchema {
    /// @ai:intent Schema of the query/intent/response dataset
    /// @ai:effects pure
    pub fn intent() -> Self {
        Self {
            name: "intent",
            columns: &[QUERY, INTENT, RESPONSE],
        }
    }

    /// @ai:intent Schema of the query/sentiment dataset
    /// @ai:effects pure
    pub fn sentiment() -> Self {
        Self {
            name: "sentiment",
            columns: &[QUERY, SENTIMENT],
        }
    }
}
