//! Flat-file storage for record rows
//!
//! Each store owns one delimited text file. Reads create the file on first
//! access, writes always replace the whole file.

use crate::codec::{self, Row, DEFAULT_DELIMITER};
use crate::error::{Result, TimetableError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A delimited text file holding one row per line
#[derive(Debug, Clone, PartialEq)]
pub struct FlatFileStore {
    path: PathBuf,
    delimiter: char,
}

impl FlatFileStore {
    /// Create a comma-delimited store for the given path
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_delimiter(path, DEFAULT_DELIMITER)
    }

    /// Create a store using a custom field delimiter
    pub fn with_delimiter<P: Into<PathBuf>>(path: P, delimiter: char) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Read every row in the file
    ///
    /// A missing file is first created holding a single empty row, so a fresh
    /// store reads back as `[[]]`.
    pub fn read(&self) -> Result<Vec<Row>> {
        if !self.path.exists() {
            let empty: Vec<Vec<String>> = vec![Vec::new()];
            self.write(&empty)?;
            info!(path = %self.path.display(), "created data file");
        }

        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let rows = codec::decode(&text, self.delimiter).map_err(|e| TimetableError::Malformed {
            path: self.path.display().to_string(),
            line: e.line,
            message: e.message,
        })?;

        debug!(path = %self.path.display(), rows = rows.len(), "read rows");
        Ok(rows)
    }

    /// Replace the file contents with the given rows
    pub fn write<S: AsRef<str>>(&self, rows: &[Vec<S>]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let text = codec::encode(rows, self.delimiter);
        fs::write(&self.path, text).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), rows = rows.len(), "wrote rows");
        Ok(())
    }

    fn io_error(&self, err: std::io::Error) -> TimetableError {
        TimetableError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }
}
