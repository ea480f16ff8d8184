//! @ai:module:intent CSV loader producing schema-checked record tables
//! @ai:module:layer infrastructure
//! @ai:module:public_api TableLoader
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::table::{RecordTable, TableSchema};
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;

/// @ai:intent Reads delimited text files with a header row
#[derive(Debug, Clone, Default)]
pub struct TableLoader;

impl TableLoader {
    /// @ai:intent Create a comma-separated loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Load a file and check it against a schema
    /// @ai:effects fs:read
    pub fn load(&self, path: &Path, schema: &TableSchema) -> Result<RecordTable> {
        let file = std::fs::File::open(path).map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        let table = self.read(file, path, schema)?;
        tracing::info!(
            "Loaded {} rows from {} ({} table)",
            table.len(),
            path.display(),
            schema.name
        );
        Ok(table)
    }

    /// @ai:intent Parse in-memory CSV text against a schema
    /// @ai:effects pure
    pub fn load_str(&self, content: &str, schema: &TableSchema) -> Result<RecordTable> {
        self.read(content.as_bytes(), Path::new("<memory>"), schema)
    }

    fn read<R: Read>(&self, source: R, path: &Path, schema: &TableSchema) -> Result<RecordTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(source);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| convert_csv_error(e, path))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        for column in schema.columns {
            if !headers.iter().any(|h| h == *column) {
                return Err(Error::MissingColumn {
                    table: schema.name.to_string(),
                    column: column.to_string(),
                });
            }
        }

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut record = StringRecord::new();
        while reader
            .read_record(&mut record)
            .map_err(|e| convert_csv_error(e, path))?
        {
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(RecordTable::new(schema.name, headers, rows))
    }
}

/// @ai:intent Map a csv crate error onto the analysis error taxonomy
/// @ai:effects pure
fn convert_csv_error(err: csv::Error, path: &Path) -> Error {
    let line = err.position().map(|p| p.line()).unwrap_or(0);

    match err.into_kind() {
        csv::ErrorKind::Io(source) => Error::FileAccess {
            path: path.to_path_buf(),
            source,
        },
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => Error::Parse {
            path: path.to_path_buf(),
            line,
            message: format!("expected {} fields, found {}", expected_len, len),
        },
        other => Error::Parse {
            path: path.to_path_buf(),
            line,
            message: format!("{:?}", other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_intent_file() {
        let temp = TempDir::new().unwrap();
        let path = write_file(
            temp.path(),
            "intent.csv",
            "query,intent,response\n\"where is my order, please\",tracking,Let me check\nrefund?,refund,Sure\n",
        );

        let table = TableLoader::new().load(&path, &TableSchema::intent()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), &["query", "intent", "response"]);
        let queries: Vec<_> = table.column("query").unwrap().collect();
        assert_eq!(queries, vec!["where is my order, please", "refund?"]);
    }

    #[test]
    fn test_extra_columns_are_kept() {
        let table = TableLoader::new()
            .load_str("id,query,sentiment\n1,hi,Positive\n", &TableSchema::sentiment())
            .unwrap();
        assert_eq!(table.columns(), &["id", "query", "sentiment"]);
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let table = TableLoader::new()
            .load_str("\u{feff}query,sentiment\nhi,Positive\n", &TableSchema::sentiment())
            .unwrap();
        assert_eq!(table.columns()[0], "query");
    }

    #[test]
    fn test_header_only_file_is_empty_table() {
        let table = TableLoader::new()
            .load_str("query,sentiment\n", &TableSchema::sentiment())
            .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = TableLoader::new()
            .load(&temp.path().join("absent.csv"), &TableSchema::intent())
            .unwrap_err();
        assert!(matches!(err, Error::FileAccess { .. }));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let err = TableLoader::new()
            .load_str(
                "query,intent,response\nabc,refund,ok\nabc,refund\n",
                &TableSchema::intent(),
            )
            .unwrap_err();
        match err {
            Error::Parse { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("expected 3 fields, found 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_schema_column() {
        let err = TableLoader::new()
            .load_str("query,intent\nabc,refund\n", &TableSchema::intent())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingColumn { ref column, .. } if column == "response"
        ));
    }
}
