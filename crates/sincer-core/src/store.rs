// crates/sincer-core/src/store.rs - Config document loading, validation and saving
//
// The config is a single YAML document rewritten wholesale on every save:
//
// ```yaml
// records:
//   - name: coffee
//     since: 2024-04-13T10:30:00.000Z
//     color: '#ffffff'
// count: 3
// ```
//
// TWO SHAPES:
// - `ConfigDocument` mirrors the file: plain strings, unknown keys ignored.
// - `Config` is the validated form the manager trusts: parsed timestamps,
//   checked names, bounded length.
//
// Conversion from document to config is the only place validation happens.
// A document that fails it is reported, never patched up.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::record::Record;
use crate::validate::{is_record_name, parse_since};
use crate::{DEFAULT_COLOR, MAX_RECORDS};

/// Errors that can occur while reading or writing the config
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("config is unreadable: {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("bad configuration: {reason}")]
    Invalid { reason: String },

    #[error("manager is virtual: there is no config file to use")]
    Virtual,

    #[error("failed to write config {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl StoreError {
    fn invalid<S: Into<String>>(reason: S) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// The config file as written on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub records: Vec<RecordDocument>,
    pub count: u64,
}

/// One record as written on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDocument {
    pub name: String,
    pub since: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// The validated in-memory config
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    /// Display and reorder order
    pub records: Vec<Record>,
    /// Monotonic counter feeding default names
    pub count: u64,
}

impl Config {
    /// Validate and normalize a document
    ///
    /// VALIDATION RULES:
    /// - at most `MAX_RECORDS` records
    /// - every name passes `is_record_name`
    /// - every `since` parses as a date
    ///
    /// Dates are reparsed (and truncated to milliseconds) so the result is
    /// in canonical form regardless of how the file spelled them.
    pub fn from_document(doc: ConfigDocument) -> StoreResult<Self> {
        if doc.records.len() > MAX_RECORDS {
            return Err(StoreError::invalid(format!(
                "{} records exceed the limit of {}",
                doc.records.len(),
                MAX_RECORDS
            )));
        }

        let mut records = Vec::with_capacity(doc.records.len());
        for (position, raw) in doc.records.into_iter().enumerate() {
            if !is_record_name(&raw.name) {
                return Err(StoreError::invalid(format!(
                    "record #{} has an invalid name '{}'",
                    position + 1,
                    raw.name
                )));
            }
            let Some(since) = parse_since(&raw.since) else {
                return Err(StoreError::invalid(format!(
                    "record '{}' has an invalid date '{}'",
                    raw.name, raw.since
                )));
            };
            records.push(Record::new(raw.name, since, Some(raw.color)));
        }

        Ok(Self {
            records,
            count: doc.count,
        })
    }

    /// The on-disk form of this config
    pub fn to_document(&self) -> ConfigDocument {
        ConfigDocument {
            records: self
                .records
                .iter()
                .map(|record| RecordDocument {
                    name: record.name.clone(),
                    since: record.since_string(),
                    color: record.color.clone(),
                })
                .collect(),
            count: self.count,
        }
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> StoreResult<String> {
        Ok(serde_yaml::to_string(&self.to_document())?)
    }

    /// Parse and validate YAML text
    pub fn from_yaml(text: &str) -> StoreResult<Self> {
        let doc: ConfigDocument =
            serde_yaml::from_str(text).map_err(|e| StoreError::invalid(e.to_string()))?;
        Self::from_document(doc)
    }
}

/// Reads and writes the config file at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the config; `Ok(None)` when the file does not exist
    pub fn load(&self) -> StoreResult<Option<Config>> {
        if !self.exists() {
            debug!(path = %self.path.display(), "config file does not exist");
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::Unreadable {
            path: self.path.display().to_string(),
            source,
        })?;

        let config = Config::from_yaml(&text)?;
        debug!(
            path = %self.path.display(),
            records = config.records.len(),
            count = config.count,
            "config loaded"
        );
        Ok(Some(config))
    }

    /// Whether the file exists and holds a valid config
    pub fn is_valid(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }

    /// Overwrite the file with `config`, creating parent directories
    pub fn save(&self, config: &Config) -> StoreResult<()> {
        let text = config.to_yaml()?;
        let write_error = |source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&self.path, text).map_err(write_error)?;

        debug!(
            path = %self.path.display(),
            records = config.records.len(),
            "config saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn document(records: Vec<(&str, &str)>) -> ConfigDocument {
        ConfigDocument {
            records: records
                .into_iter()
                .map(|(name, since)| RecordDocument {
                    name: name.to_string(),
                    since: since.to_string(),
                    color: default_color(),
                })
                .collect(),
            count: 0,
        }
    }

    #[test]
    fn test_valid_document() {
        let config =
            Config::from_document(document(vec![("normal", "2024-04-13T10:30:00.000Z")])).unwrap();
        assert_eq!(config.records.len(), 1);
        assert_eq!(config.records[0].name, "normal");
        assert_eq!(config.records[0].color, "#ffffff");
    }

    #[test]
    fn test_invalid_documents_are_rejected() {
        let now = "2024-04-13T10:30:00.000Z";
        assert!(Config::from_document(document(vec![("", now)])).is_err());
        assert!(Config::from_document(document(vec![("normal", "")])).is_err());
        assert!(Config::from_document(document(vec![("umax", now)])).is_err());
        // `now` would restamp the record on every load
        assert!(Config::from_document(document(vec![("normal", "now")])).is_err());

        let too_many: Vec<_> = (0..=MAX_RECORDS).map(|_| ("r", now)).collect();
        assert!(matches!(
            Config::from_document(document(too_many)),
            Err(StoreError::Invalid { .. })
        ));
    }

    #[test]
    fn test_yaml_shape_errors() {
        assert!(Config::from_yaml("").is_err());
        assert!(Config::from_yaml("count: 0\nrecords: 1\n").is_err());
        assert!(Config::from_yaml("records: []\n").is_err());
        assert!(Config::from_yaml("records: []\ncount: -1\n").is_err());
        assert!(Config::from_yaml("records:\n  - name: 1\n    since: ''\ncount: 0\n").is_err());
        assert!(Config::from_yaml("- just\n- a list\n").is_err());
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let text = "\
records:
  - name: walk
    since: 2024-04-13T10:30:00Z
    locale: whatever
version: 9
count: 4
";
        let config = Config::from_yaml(text).unwrap();
        assert_eq!(config.count, 4);
        let yaml = config.to_yaml().unwrap();
        assert!(!yaml.contains("locale"));
        assert!(!yaml.contains("version"));
        assert!(yaml.contains("2024-04-13T10:30:00.000Z"));
    }

    #[test]
    fn test_missing_file_loads_as_none() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("absent.yaml"));
        assert!(store.load().unwrap().is_none());
        assert!(!store.is_valid());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("nested").join("sincer.yaml"));

        let mut config = Config::default();
        config.records.push(Record::new(
            "coffee",
            parse_since("2024-04-13T10:30:00.250Z").unwrap(),
            Some("#ff8800".to_string()),
        ));
        config.records.push(Record::starting_now("walk"));
        config.count = 2;

        store.save(&config).unwrap();
        assert!(store.is_valid());
        assert_eq!(store.load().unwrap(), Some(config));
    }

    #[test]
    fn test_corrupt_file_is_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sincer.yaml");
        fs::write(&path, "records: [\n").unwrap();

        let store = ConfigStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Invalid { .. })));
        assert!(!store.is_valid());
    }

    fn record_strategy() -> impl Strategy<Value = Record> {
        (
            "[ -~äöé€日本]{1,12}".prop_filter("valid record name", |n| is_record_name(n)),
            -2_208_988_800_000i64..4_102_444_800_000,
            "#[0-9a-f]{6}",
        )
            .prop_map(|(name, millis, color)| {
                let since = DateTime::from_timestamp_millis(millis).unwrap();
                Record::new(name, since, Some(color))
            })
    }

    proptest! {
        #[test]
        fn prop_save_then_load_round_trips(
            records in prop::collection::vec(record_strategy(), 0..8),
            count in any::<u64>(),
        ) {
            let temp = TempDir::new().unwrap();
            let store = ConfigStore::new(temp.path().join("sincer.yaml"));
            let config = Config { records, count };

            store.save(&config).unwrap();
            prop_assert_eq!(store.load().unwrap(), Some(config));
        }
    }
}
