//! Data sources for the initial point set

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pointscape_core::{PointId, RawPoint, SourceError, ValidationError};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Default latency of [`MockSource`], matching a slow API round trip
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1000);

/// Asynchronous provider of the initial point set
///
/// Called once per session. No timeout or retry is applied by the caller.
pub trait DataSource {
    fn fetch_initial_points(&self) -> impl Future<Output = Result<Vec<RawPoint>, SourceError>> + Send;
}

/// The four sample points A-D
pub fn sample_records() -> Vec<RawPoint> {
    let record = |id: u64, position: [f32; 3], size: f32, color: f32, label: &str, kind: &str, height: Option<f32>| {
        RawPoint {
            id: Some(PointId(id)),
            position: Some(position.to_vec()),
            size: Some(size),
            color: Some(color),
            label: Some(label.to_string()),
            kind: Some(kind.to_string()),
            height,
            decode_error: None,
        }
    };

    vec![
        record(1, [1.0, 2.0, 3.0], 0.4, 10.0, "Point A", "sphere", None),
        record(2, [-2.0, 1.0, -1.0], 0.6, 50.0, "Point B", "bar", Some(2.0)),
        record(3, [2.0, -1.0, -2.0], 0.3, 90.0, "Point C", "sphere", None),
        record(4, [3.0, 0.0, -3.0], 0.8, 120.0, "Point D", "bar", Some(3.0)),
    ]
}

/// Keys of a JSON point record, in the order they are checked
const RECORD_FIELDS: [&str; 7] = ["id", "position", "size", "color", "label", "type", "height"];

/// Decode a JSON array of raw point records
///
/// Only a payload that is not a JSON array fails. A record with a field of
/// the wrong type is kept as [`RawPoint::undecodable`] so validation drops
/// it alongside the other malformed records.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<RawPoint>, SourceError> {
    let values: Vec<Value> =
        serde_json::from_slice(bytes).map_err(|e| SourceError::Decode(e.to_string()))?;
    Ok(values.iter().map(decode_record).collect())
}

fn decode_record(value: &Value) -> RawPoint {
    match RawPoint::deserialize(value) {
        Ok(raw) => raw,
        Err(e) => {
            let id = value.get("id").and_then(|id| PointId::deserialize(id).ok());
            let field = match value.as_object() {
                Some(object) => RECORD_FIELDS
                    .into_iter()
                    .find(|&field| !field_decodes(object, field))
                    .unwrap_or("record"),
                None => "record",
            };
            RawPoint::undecodable(
                id,
                ValidationError::InvalidValue {
                    field,
                    reason: e.to_string(),
                },
            )
        }
    }
}

/// Whether `field` of `object` decodes on its own; absent fields do
fn field_decodes(object: &Map<String, Value>, field: &str) -> bool {
    let single: Map<String, Value> = object
        .get(field)
        .map(|v| (field.to_string(), v.clone()))
        .into_iter()
        .collect();
    RawPoint::deserialize(Value::Object(single)).is_ok()
}

/// In-memory source that answers after a fixed delay
#[derive(Debug, Clone)]
pub struct MockSource {
    records: Vec<RawPoint>,
    delay: Duration,
}

impl MockSource {
    /// The sample records after [`DEFAULT_MOCK_DELAY`]
    pub fn new() -> Self {
        Self::with_records(sample_records())
    }

    pub fn with_records(records: Vec<RawPoint>) -> Self {
        Self {
            records,
            delay: DEFAULT_MOCK_DELAY,
        }
    }

    /// Zero answers immediately without touching a timer
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for MockSource {
    async fn fetch_initial_points(&self) -> Result<Vec<RawPoint>, SourceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.records.clone())
    }
}

/// Reads a JSON array of records from disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for JsonFileSource {
    async fn fetch_initial_points(&self) -> Result<Vec<RawPoint>, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let records = decode_records(&bytes)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "read point file");
        Ok(records)
    }
}

/// A source that never delivers
#[derive(Debug, Clone)]
pub struct FailingSource {
    reason: String,
}

impl FailingSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl DataSource for FailingSource {
    async fn fetch_initial_points(&self) -> Result<Vec<RawPoint>, SourceError> {
        Err(SourceError::Unavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_records_validate() {
        let records = sample_records();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.validate().is_ok()));
    }

    #[test]
    fn test_mock_source_without_delay() {
        let source = MockSource::new().with_delay(Duration::ZERO);
        let records = pollster::block_on(source.fetch_initial_points()).unwrap();
        assert_eq!(records, sample_records());
    }

    #[tokio::test]
    async fn test_mock_source_with_delay() {
        let source = MockSource::new().with_delay(Duration::from_millis(5));
        let records = source.fetch_initial_points().await.unwrap();
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_failing_source() {
        let result = pollster::block_on(FailingSource::new("offline").fetch_initial_points());
        assert!(matches!(result, Err(SourceError::Unavailable(reason)) if reason == "offline"));
    }

    #[test]
    fn test_decode_records() {
        let json = br#"[{"id": 1, "position": [1, 2, 3], "size": 0.4, "color": 10,
                         "label": "Point A", "type": "sphere"},
                        {"id": 2, "type": "bar"}]"#;
        let records = decode_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].validate().is_ok());
        assert!(records[1].validate().is_err());

        assert!(matches!(decode_records(b"{not json"), Err(SourceError::Decode(_))));
        assert!(matches!(decode_records(br#"{"id": 1}"#), Err(SourceError::Decode(_))));
    }

    #[test]
    fn test_decode_keeps_good_records_next_to_mistyped_ones() {
        let json = br#"[{"id": 1, "position": [1, 2, 3], "size": 0.4, "color": 10,
                         "label": "Point A", "type": "sphere"},
                        {"id": 2, "position": [-2, 1, -1], "size": "0.6", "color": 50,
                         "label": "Point B", "type": "bar", "height": 2},
                        {"id": "c", "position": [2, -1, -2], "size": 0.3, "color": 90},
                        {"id": 4, "position": [3, null, -3], "size": 0.8, "color": 120},
                        42]"#;
        let records = decode_records(json).unwrap();
        assert_eq!(records.len(), 5);
        assert!(records[0].validate().is_ok());

        let fields: Vec<_> = records[1..]
            .iter()
            .map(|r| r.validate().unwrap_err().field())
            .collect();
        assert_eq!(fields, vec!["size", "id", "position", "record"]);
        assert_eq!(records[1].id, Some(PointId(2)));
        assert_eq!(records[2].id, None);
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let path = std::env::temp_dir().join(format!("pointscape-source-{}.json", std::process::id()));
        let json = serde_json::to_vec(&sample_records()).unwrap();
        tokio::fs::write(&path, json).await.unwrap();

        let records = JsonFileSource::new(&path).fetch_initial_points().await;
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(records.unwrap(), sample_records());
    }

    #[tokio::test]
    async fn test_json_file_source_with_mistyped_record() {
        let path = std::env::temp_dir().join(format!("pointscape-mistyped-{}.json", std::process::id()));
        let json = r#"[{"id": 1, "position": [1, 2, 3], "size": 0.4, "color": 10, "type": "sphere"},
                       {"id": 2, "position": [-2, 1, -1], "size": "0.6", "color": 50, "type": "bar", "height": 2}]"#;
        tokio::fs::write(&path, json).await.unwrap();

        let records = JsonFileSource::new(&path).fetch_initial_points().await;
        tokio::fs::remove_file(&path).await.unwrap();

        let records = records.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].validate().is_ok());
        assert_eq!(records[1].validate().unwrap_err().field(), "size");
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let source = JsonFileSource::new("/nonexistent/pointscape/points.json");
        let result = source.fetch_initial_points().await;
        assert!(matches!(result, Err(SourceError::Io(_))));
    }
}
