//! Timetable report
//!
//! Merges regular and compensatory classes into one tagged list and writes it
//! to the timetable file.

use crate::collection::{Record, RecordCollection};
use crate::error::Result;
use crate::store::FlatFileStore;
use std::io::Write;
use tracing::info;

/// Header row of the generated timetable
pub const TIMETABLE_HEADER: [&str; 4] = ["Type", "Course Code", "Class Day", "Class Time"];

pub const CLASS_TAG: &str = "Class";
pub const COMPENSATORY_TAG: &str = "Compensatory Class";

/// Generator writing the combined timetable to its output file
#[derive(Debug, Clone)]
pub struct TimetableReport {
    output: FlatFileStore,
}

impl TimetableReport {
    pub fn new(output: FlatFileStore) -> Self {
        Self { output }
    }

    pub fn output(&self) -> &FlatFileStore {
        &self.output
    }

    /// Display and save the timetable, returning its rows without the header
    ///
    /// Source records are copied as they are; a source with a different
    /// arity yields rows that do not line up with the header.
    pub fn generate<W: Write>(
        &self,
        classes: &RecordCollection,
        compensatory_classes: &RecordCollection,
        out: &mut W,
    ) -> Result<Vec<Record>> {
        let mut rows = Vec::with_capacity(classes.len() + compensatory_classes.len());

        writeln!(out, "\nGenerated Timetable:")?;
        writeln!(out, "Regular Classes:")?;
        for class in classes.records() {
            writeln!(out, "  {}", class.join(", "))?;
            rows.push(tagged(CLASS_TAG, class));
        }

        writeln!(out, "\nCompensatory Classes:")?;
        for class in compensatory_classes.records() {
            writeln!(out, "  {}", class.join(", "))?;
            rows.push(tagged(COMPENSATORY_TAG, class));
        }

        let mut file_rows = Vec::with_capacity(rows.len() + 1);
        file_rows.push(TIMETABLE_HEADER.iter().map(|h| h.to_string()).collect::<Record>());
        file_rows.extend(rows.iter().cloned());
        self.output.write(&file_rows)?;

        info!(
            rows = rows.len(),
            path = %self.output.path().display(),
            "timetable written"
        );
        writeln!(out, "\nTimetable saved to {}", self.output.path().display())?;
        Ok(rows)
    }
}

fn tagged(tag: &str, record: &[String]) -> Record {
    let mut row = Vec::with_capacity(record.len() + 1);
    row.push(tag.to_string());
    row.extend(record.iter().cloned());
    row
}
