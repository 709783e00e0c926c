//! Optional YAML configuration
//!
//! Looks for `timetable.yml` in the working directory. Every key has a default
//! so a missing file, or a file naming only a few keys, is fine.

use crate::codec::{self, DEFAULT_DELIMITER};
use crate::collection::EntityKind;
use crate::error::{Result, TimetableError};
use crate::store::FlatFileStore;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "timetable.yml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    log: LogConfig,
    storage: StorageConfig,
    report: ReportConfig,
}

impl Config {
    pub fn log(&self) -> &LogConfig {
        &self.log
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn report(&self) -> &ReportConfig {
        &self.report
    }

    /// Load `timetable.yml` if present, defaults otherwise
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate a configuration file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| TimetableError::Config(format!("{}: {}", path.display(), e)))?;
        let config = serde_yaml::from_reader::<_, Config>(file)
            .map_err(|e| TimetableError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config = serde_yaml::from_str::<Config>(text)
            .map_err(|e| TimetableError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.storage.delimiter()?;
        Ok(())
    }

    /// Store for one entity kind's data file
    pub fn entity_store(&self, kind: EntityKind) -> Result<FlatFileStore> {
        let path = self.storage.data_dir.join(self.storage.file_name(kind));
        Ok(FlatFileStore::with_delimiter(path, self.storage.delimiter()?))
    }

    /// Store for the generated timetable
    pub fn report_store(&self) -> Result<FlatFileStore> {
        let path = self.storage.data_dir.join(&self.report.output_file);
        Ok(FlatFileStore::with_delimiter(path, self.storage.delimiter()?))
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    display_level: bool,
    level_filter: String,
}

impl LogConfig {
    pub fn display_level(&self) -> &bool {
        &self.display_level
    }

    pub fn level_filter(&self) -> &str {
        &self.level_filter
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            display_level: false,
            level_filter: "warn".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    data_dir: PathBuf,
    delimiter: String,
    courses_file: String,
    instructors_file: String,
    classes_file: String,
    compensatory_classes_file: String,
}

impl StorageConfig {
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The configured delimiter, which must be a single usable character
    pub fn delimiter(&self) -> Result<char> {
        let mut chars = self.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if codec::is_valid_delimiter(c) => Ok(c),
            _ => Err(TimetableError::Config(format!(
                "delimiter must be a single character other than a quote or line break, got {:?}",
                self.delimiter
            ))),
        }
    }

    pub fn file_name(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Course => &self.courses_file,
            EntityKind::Instructor => &self.instructors_file,
            EntityKind::Class => &self.classes_file,
            EntityKind::CompensatoryClass => &self.compensatory_classes_file,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            delimiter: DEFAULT_DELIMITER.to_string(),
            courses_file: EntityKind::Course.default_file().to_string(),
            instructors_file: EntityKind::Instructor.default_file().to_string(),
            classes_file: EntityKind::Class.default_file().to_string(),
            compensatory_classes_file: EntityKind::CompensatoryClass.default_file().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    output_file: String,
}

impl ReportConfig {
    pub fn output_file(&self) -> &str {
        &self.output_file
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_file: "timetable.csv".to_string(),
        }
    }
}
