use crate::core::validate::validate_row;
use crate::domain::model::{Outcome, RawRow, TransformResult};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;

pub struct CsvPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CsvPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for CsvPipeline<S, C> {
    /// Read the whole input table into raw rows, in file order.
    ///
    /// The reader is flexible: rows with the wrong column count are not
    /// rejected here. A short row yields a partial field map and the
    /// validator reports the missing fields; overflow cells without a
    /// header are dropped.
    fn extract(&self) -> Result<Vec<RawRow>> {
        tracing::debug!("Reading input table: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path())?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_slice());
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let fields = headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            rows.push(RawRow { fields });
        }

        tracing::debug!("Read {} data rows", rows.len());
        Ok(rows)
    }

    /// Validate every row and partition the outcomes, preserving input
    /// order within each partition. Data rows are numbered from 1, the
    /// header excluded. The scan never stops early: every row is checked
    /// even after failures, so the report covers the whole file.
    fn transform(&self, rows: Vec<RawRow>) -> Result<TransformResult> {
        let mut result = TransformResult::default();

        for (index, row) in rows.into_iter().enumerate() {
            match validate_row(&row, index + 1) {
                Outcome::Valid(record) => result.valid.push(record),
                Outcome::Invalid(invalid) => {
                    tracing::debug!(
                        "Row {} failed validation with {} error(s)",
                        invalid.row,
                        invalid.errors.len()
                    );
                    result.invalid.push(invalid);
                }
            }
        }

        Ok(result)
    }

    /// Serialize the valid records as one pretty-printed JSON array and
    /// write it in a single pass. Runs even when some rows were invalid;
    /// partial success is the policy.
    fn load(&self, result: &TransformResult) -> Result<String> {
        let output_path = self.config.output_path().to_string();

        let json = serde_json::to_string_pretty(&result.valid)?;
        tracing::debug!(
            "Writing {} records ({} bytes) to {}",
            result.valid.len(),
            json.len(),
            output_path
        );
        self.storage.write_file(&output_path, json.as_bytes())?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: RefCell::new(HashMap::new()),
            }
        }

        fn with_file(path: &str, data: &str) -> Self {
            let storage = Self::new();
            storage
                .files
                .borrow_mut()
                .insert(path.to_string(), data.as_bytes().to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        output_path: String,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                input_path: "input.csv".to_string(),
                output_path: "output.json".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }
    }

    fn pipeline_with_input(csv: &str) -> CsvPipeline<MockStorage, MockConfig> {
        CsvPipeline::new(MockStorage::with_file("input.csv", csv), MockConfig::new())
    }

    const HEADER: &str = "URL,IP,timeStamp,timeSpent";

    #[test]
    fn test_extract_preserves_order_and_fields() {
        let pipeline = pipeline_with_input(&format!(
            "{}\nhttps://example.com/a,10.0.0.1,2024-01-01T00:00:00Z,100\nhttps://example.com/b,10.0.0.2,2024-01-02T00:00:00Z,200\n",
            HEADER
        ));

        let rows = pipeline.extract().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("URL"), "https://example.com/a");
        assert_eq!(rows[1].get("IP"), "10.0.0.2");
    }

    #[test]
    fn test_extract_header_order_is_irrelevant() {
        let pipeline = pipeline_with_input(
            "timeSpent,URL,IP,timeStamp\n500,https://example.com,10.0.0.1,2024-01-01T00:00:00Z\n",
        );

        let rows = pipeline.extract().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("timeSpent"), "500");
        assert_eq!(rows[0].get("URL"), "https://example.com");
    }

    #[test]
    fn test_extract_quoted_delimiter() {
        let pipeline = pipeline_with_input(&format!(
            "{}\n\"https://example.com/search?a=1,b=2\",10.0.0.1,2024-01-01T00:00:00Z,100\n",
            HEADER
        ));

        let rows = pipeline.extract().unwrap();

        assert_eq!(rows[0].get("URL"), "https://example.com/search?a=1,b=2");
    }

    #[test]
    fn test_extract_short_row_passes_through() {
        let pipeline = pipeline_with_input(&format!(
            "{}\nhttps://example.com,10.0.0.1\n",
            HEADER
        ));

        let rows = pipeline.extract().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("URL"), "https://example.com");
        // Missing columns read as empty, to be reported by the validator.
        assert_eq!(rows[0].get("timeStamp"), "");
        assert_eq!(rows[0].get("timeSpent"), "");
    }

    #[test]
    fn test_extract_missing_input_is_fatal() {
        let pipeline = CsvPipeline::new(MockStorage::new(), MockConfig::new());

        let result = pipeline.extract();

        assert!(matches!(result, Err(EtlError::IoError(_))));
    }

    #[test]
    fn test_transform_partitions_and_counts() {
        let pipeline = pipeline_with_input("");
        let rows = vec![
            raw_row("https://example.com/a", "10.0.0.1", "2024-01-01T00:00:00Z", "100"),
            raw_row("not-a-url", "10.0.0.2", "2024-01-02T00:00:00Z", "200"),
            raw_row("https://example.com/c", "10.0.0.3", "2024-01-03T00:00:00Z", "300"),
        ];

        let result = pipeline.transform(rows).unwrap();

        assert_eq!(result.valid.len(), 2);
        assert_eq!(result.invalid.len(), 1);
        assert_eq!(result.total_rows(), 3);
        // Row numbering is 1-based and survives partitioning.
        assert_eq!(result.invalid[0].row, 2);
        // Order within the valid partition follows input order.
        assert_eq!(result.valid[0].url, "https://example.com/a");
        assert_eq!(result.valid[1].url, "https://example.com/c");
    }

    #[test]
    fn test_transform_error_count_matches_failing_fields() {
        let pipeline = pipeline_with_input("");
        let rows = vec![raw_row(
            "https://example.com/x",
            "999.1.1.1",
            "2024-01-01T00:00:00Z",
            "abc",
        )];

        let result = pipeline.transform(rows).unwrap();

        assert_eq!(result.invalid.len(), 1);
        assert_eq!(result.invalid[0].errors.len(), 2);
    }

    #[test]
    fn test_load_writes_pretty_json_with_schema_keys() {
        let storage = MockStorage::new();
        let pipeline = CsvPipeline::new(storage, MockConfig::new());
        let result = TransformResult {
            valid: vec![crate::domain::model::LogRecord {
                url: "https://example.com".to_string(),
                ip: "10.0.0.1".to_string(),
                time_stamp: "2024-01-01T00:00:00Z".to_string(),
                time_spent: 500,
            }],
            invalid: vec![],
        };

        let output_path = pipeline.load(&result).unwrap();

        assert_eq!(output_path, "output.json");
        let written = pipeline.storage.get_file("output.json").unwrap();
        let json: serde_json::Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(json[0]["URL"], "https://example.com");
        assert_eq!(json[0]["IP"], "10.0.0.1");
        assert_eq!(json[0]["timeStamp"], "2024-01-01T00:00:00Z");
        // timeSpent is an integer in the output, not a string.
        assert_eq!(json[0]["timeSpent"], 500);
    }

    #[test]
    fn test_load_writes_empty_array_when_nothing_valid() {
        let pipeline = CsvPipeline::new(MockStorage::new(), MockConfig::new());

        pipeline.load(&TransformResult::default()).unwrap();

        let written = pipeline.storage.get_file("output.json").unwrap();
        assert_eq!(written, b"[]");
    }

    fn raw_row(url: &str, ip: &str, time_stamp: &str, time_spent: &str) -> RawRow {
        let mut fields = HashMap::new();
        fields.insert("URL".to_string(), url.to_string());
        fields.insert("IP".to_string(), ip.to_string());
        fields.insert("timeStamp".to_string(), time_stamp.to_string());
        fields.insert("timeSpent".to_string(), time_spent.to_string());
        RawRow { fields }
    }
}
