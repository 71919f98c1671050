//! Storage layer for peoplebook.
//!
//! This module keeps the record collection in a JSON file. Every mutation
//! rewrites the whole file. A missing file, or one that is not a JSON array
//! of objects, is replaced with the default dataset on load.

pub mod defaults;

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::Record;

pub use defaults::default_records;

/// Indentation used for every file the store writes.
const INDENT: &[u8] = b"    ";

/// Why the people file was regenerated during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery {
    /// The file did not exist.
    Missing,
    /// The file existed but was not a JSON array of objects.
    Corrupt {
        /// Parser message for the rejected content.
        reason: String,
    },
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "file not found"),
            Self::Corrupt { reason } => write!(f, "malformed data: {reason}"),
        }
    }
}

/// Result of [`Store::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    /// The records, in file order.
    pub records: Vec<Record>,
    /// Set when the default dataset had to be written first.
    pub recovery: Option<Recovery>,
}

/// JSON-file storage for the record collection.
#[derive(Debug, Clone)]
pub struct Store {
    /// Path to the people file.
    data_path: PathBuf,
    /// Path to the aggregate result file.
    result_path: PathBuf,
}

impl Store {
    /// Create a store over the given files. Nothing is touched until the
    /// first load or save.
    #[must_use]
    pub fn new(data_path: impl Into<PathBuf>, result_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            result_path: result_path.into(),
        }
    }

    /// Create a store using the paths from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_path(), config.result_path())
    }

    /// Get the path to the people file.
    #[must_use]
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Get the path to the result file.
    #[must_use]
    pub fn result_path(&self) -> &Path {
        &self.result_path
    }

    /// Load the collection.
    ///
    /// If the file is missing or malformed, the default dataset is written
    /// and the file is read once more.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read for a reason other than
    /// not existing, if the default dataset cannot be written, or if the
    /// regenerated file still cannot be loaded.
    pub fn load(&self) -> Result<Loaded> {
        let recovery = match self.read_records()? {
            Ok(records) => {
                debug!(
                    "Loaded {} records from {}",
                    records.len(),
                    self.data_path.display()
                );
                return Ok(Loaded {
                    records,
                    recovery: None,
                });
            }
            Err(recovery) => recovery,
        };

        warn!(
            "Regenerating {} with default data ({})",
            self.data_path.display(),
            recovery
        );
        self.reset()?;

        match self.read_records()? {
            Ok(records) => Ok(Loaded {
                records,
                recovery: Some(recovery),
            }),
            Err(again) => Err(Error::Regeneration {
                path: self.data_path.clone(),
                message: again.to_string(),
            }),
        }
    }

    /// Read and parse the people file once.
    ///
    /// The inner `Err` reports a recoverable problem with the file contents;
    /// the outer one an I/O failure.
    fn read_records(&self) -> Result<std::result::Result<Vec<Record>, Recovery>> {
        let bytes = match std::fs::read(&self.data_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Err(Recovery::Missing)),
            Err(source) => {
                return Err(Error::FileRead {
                    path: self.data_path.clone(),
                    source,
                })
            }
        };

        Ok(parse_records(&bytes))
    }

    /// Overwrite the people file with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, records: &[Record]) -> Result<()> {
        write_json(&self.data_path, &records)?;
        debug!(
            "Saved {} records to {}",
            records.len(),
            self.data_path.display()
        );
        Ok(())
    }

    /// Overwrite the people file with an untyped JSON value.
    ///
    /// The value must be an array of records; anything else is rejected
    /// and the file is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCollection`] if the value is not a sequence of
    /// records, or any error from [`Store::save`].
    pub fn save_value(&self, value: &Value) -> Result<()> {
        if !value.is_array() {
            return Err(Error::invalid_collection(format!(
                "expected a sequence of records, got {}",
                json_kind(value)
            )));
        }

        let records: Vec<Record> = serde_json::from_value(value.clone())
            .map_err(|e| Error::invalid_collection(e.to_string()))?;
        self.save(&records)
    }

    /// Overwrite the people file with the default dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn reset(&self) -> Result<()> {
        self.save(&default_records())?;
        info!("Wrote default data to {}", self.data_path.display());
        Ok(())
    }

    /// Overwrite the result file with `result`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_result<T: Serialize>(&self, result: &T) -> Result<()> {
        write_json(&self.result_path, result)?;
        debug!("Wrote result to {}", self.result_path.display());
        Ok(())
    }
}

/// Serialize `value` with four-space indentation and write it to `path`,
/// creating parent directories if needed.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;

    std::fs::write(path, buf).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse the people file contents.
///
/// Only text that is not JSON, a top-level value that is not an array, or
/// an element that is not an object is rejected. Fields with unexpected
/// values are kept on the record.
fn parse_records(bytes: &[u8]) -> std::result::Result<Vec<Record>, Recovery> {
    let corrupt = |reason: String| Recovery::Corrupt { reason };

    let value: Value = serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;
    if !value.is_array() {
        return Err(corrupt(format!(
            "expected a sequence of records, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| corrupt(e.to_string()))
}

/// Name of a JSON value's type, for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Gender;

    fn create_test_store(dir: &tempfile::TempDir) -> Store {
        Store::new(dir.path().join("people.json"), dir.path().join("result.json"))
    }

    #[test]
    fn test_load_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);

        let loaded = store.load().unwrap();
        assert_eq!(loaded.records, default_records());
        assert_eq!(loaded.recovery, Some(Recovery::Missing));
        assert!(store.data_path().exists());

        let again = store.load().unwrap();
        assert_eq!(again.records.len(), 10);
        assert_eq!(again.recovery, None);
    }

    #[test]
    fn test_load_corrupt_file_matches_missing_case() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);
        std::fs::write(store.data_path(), "{ not json").unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.records, default_records());
        assert!(matches!(loaded.recovery, Some(Recovery::Corrupt { .. })));

        let other = tempfile::tempdir().unwrap();
        let fresh = create_test_store(&other);
        fresh.load().unwrap();
        assert_eq!(
            std::fs::read(store.data_path()).unwrap(),
            std::fs::read(fresh.data_path()).unwrap()
        );
    }

    #[test]
    fn test_load_non_sequence_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);
        std::fs::write(store.data_path(), r#"{"Name": "Ivan Petrenko"}"#).unwrap();

        let loaded = store.load().unwrap();
        assert!(matches!(loaded.recovery, Some(Recovery::Corrupt { .. })));
        assert_eq!(loaded.records.len(), 10);
    }

    #[test]
    fn test_load_keeps_records_with_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);
        std::fs::write(store.data_path(), r#"[{"Name": "Olha Sydorenko"}]"#).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.recovery, None);
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].height(), None);
    }

    #[test]
    fn test_load_keeps_records_with_non_numeric_height() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);
        let text = r#"[{"Name":"Petro Hnatiuk","Gender":"m","Height":178},{"Name":"Olena Bilyk","Gender":"f","Height":"tall"}]"#;
        std::fs::write(store.data_path(), text).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.recovery, None);
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[0].height(), Some(178.0));
        assert_eq!(loaded.records[1].name(), Some("Olena Bilyk"));
        assert_eq!(loaded.records[1].height(), None);
        assert_eq!(std::fs::read_to_string(store.data_path()).unwrap(), text);
    }

    #[test]
    fn test_load_keeps_records_with_unknown_gender() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);
        std::fs::write(
            store.data_path(),
            r#"[{"Name": "Ivan Petrenko", "Gender": "M", "Height": 180}, {"Name": "Anna Ivanova", "Gender": "x"}]"#,
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.recovery, None);
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[0].gender(), None);

        store.save(&loaded.records).unwrap();
        let value: Value =
            serde_json::from_str(&std::fs::read_to_string(store.data_path()).unwrap()).unwrap();
        assert_eq!(value[0]["Gender"], "M");
        assert_eq!(value[1]["Gender"], "x");
    }

    #[test]
    fn test_load_non_object_element_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);
        std::fs::write(store.data_path(), r#"[{"Name": "Ivan Petrenko"}, 7]"#).unwrap();

        let loaded = store.load().unwrap();
        assert!(matches!(loaded.recovery, Some(Recovery::Corrupt { .. })));
        assert_eq!(loaded.records, default_records());
    }

    #[test]
    fn test_load_fails_when_data_path_is_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = Store::new(blocker.join("people.json"), dir.path().join("result.json"));

        assert!(store.load().is_err());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);
        let records = vec![
            Record::new("Ivan Petrenko", Gender::Male, 180.0),
            Record::new("Anna Ivanova", Gender::Female, 165.5),
        ];

        store.save(&records).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.records, records);
        assert_eq!(loaded.recovery, None);
    }

    #[test]
    fn test_save_uses_four_space_indent_and_raw_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);
        store
            .save(&[Record::new("Іван Петренко", Gender::Male, 180.0)])
            .unwrap();

        let text = std::fs::read_to_string(store.data_path()).unwrap();
        assert!(text.contains("\n    {\n        \"Name\": \"Іван Петренко\""));
        assert!(text.contains("\"Height\": 180\n"));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(
            dir.path().join("nested/deeper/people.json"),
            dir.path().join("result.json"),
        );

        store.save(&default_records()).unwrap();
        assert!(store.data_path().exists());
    }

    #[test]
    fn test_save_value_rejects_non_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);
        store.save(&default_records()).unwrap();
        let before = std::fs::read(store.data_path()).unwrap();

        let err = store
            .save_value(&serde_json::json!({"Name": "Ivan Petrenko"}))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCollection { .. }));
        assert!(err.to_string().contains("an object"));
        assert_eq!(std::fs::read(store.data_path()).unwrap(), before);
    }

    #[test]
    fn test_save_value_rejects_malformed_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);

        let err = store
            .save_value(&serde_json::json!([{"Name": "Ivan Petrenko"}, "Anna Ivanova"]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCollection { .. }));
        assert!(!store.data_path().exists());
    }

    #[test]
    fn test_save_value_accepts_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);

        store
            .save_value(&serde_json::json!([
                {"Name": "Ivan Petrenko", "Gender": "m", "Height": 180}
            ]))
            .unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(
            loaded.records,
            vec![Record::new("Ivan Petrenko", Gender::Male, 180.0)]
        );
    }

    #[test]
    fn test_reset_overwrites_existing_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);
        store
            .save(&[Record::new("Ivan Petrenko", Gender::Male, 180.0)])
            .unwrap();

        store.reset().unwrap();
        assert_eq!(store.load().unwrap().records, default_records());
    }

    #[test]
    fn test_write_result() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);

        store
            .write_result(&serde_json::json!({"Average male height (cm)": 180.4}))
            .unwrap();
        let text = std::fs::read_to_string(store.result_path()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["Average male height (cm)"], 180.4);
    }

    #[test]
    fn test_recovery_display() {
        assert_eq!(Recovery::Missing.to_string(), "file not found");
        let corrupt = Recovery::Corrupt {
            reason: "EOF".to_string(),
        };
        assert!(corrupt.to_string().contains("EOF"));
    }
}
