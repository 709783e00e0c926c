//! Record collections for each entity kind
//!
//! A collection holds the in-memory rows for one kind of entity together with
//! the schema that fixes their arity. Records are addressed by position only;
//! any insertion or removal shifts the positions after it.

use crate::error::{Result, TimetableError};
use crate::store::FlatFileStore;
use std::io::Write;
use tracing::{debug, info};

/// A record is an ordered list of text fields
pub type Record = Vec<String>;

/// Label and field names for one entity kind
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    label: String,
    fields: Vec<String>,
}

impl EntitySchema {
    /// Create a schema from a label and its field names
    pub fn new<S: Into<String>>(label: S, fields: &[&str]) -> Self {
        Self {
            label: label.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields every record must carry
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Field names as shown in prompts and listings
    pub fn field_list(&self) -> String {
        self.fields.join(", ")
    }

    fn check_arity(&self, record: &[String]) -> Result<()> {
        if record.len() != self.arity() {
            return Err(TimetableError::FieldCountMismatch {
                entity: self.label.clone(),
                fields: self.fields.clone(),
            });
        }
        Ok(())
    }

    fn invalid_index(&self) -> TimetableError {
        TimetableError::InvalidIndex {
            entity: self.label.clone(),
        }
    }
}

/// The four kinds of records the system manages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Course,
    Instructor,
    Class,
    CompensatoryClass,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Course,
        EntityKind::Instructor,
        EntityKind::Class,
        EntityKind::CompensatoryClass,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Course => "Course",
            EntityKind::Instructor => "Instructor",
            EntityKind::Class => "Class",
            EntityKind::CompensatoryClass => "Compensatory Class",
        }
    }

    pub fn fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::Course => &["Course Code", "Course Name"],
            EntityKind::Instructor => &["Instructor Name", "Course Code"],
            EntityKind::Class | EntityKind::CompensatoryClass => {
                &["Course Code", "Class Day", "Class Time"]
            }
        }
    }

    /// File name used when the configuration does not override it
    pub fn default_file(self) -> &'static str {
        match self {
            EntityKind::Course => "courses.csv",
            EntityKind::Instructor => "instructors.csv",
            EntityKind::Class => "classes.csv",
            EntityKind::CompensatoryClass => "compensatory_classes.csv",
        }
    }

    pub fn schema(self) -> EntitySchema {
        EntitySchema::new(self.label(), self.fields())
    }
}

/// In-memory records for one entity kind, backed by a flat file
#[derive(Debug, Clone)]
pub struct RecordCollection {
    schema: EntitySchema,
    store: FlatFileStore,
    records: Vec<Record>,
}

impl RecordCollection {
    /// Create an empty collection without touching the backing file
    pub fn new(schema: EntitySchema, store: FlatFileStore) -> Self {
        Self {
            schema,
            store,
            records: Vec::new(),
        }
    }

    /// Create a collection and load its backing file
    pub fn open(schema: EntitySchema, store: FlatFileStore) -> Result<Self> {
        let mut collection = Self::new(schema, store);
        collection.load()?;
        Ok(collection)
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    pub fn label(&self) -> &str {
        self.schema.label()
    }

    pub fn store(&self) -> &FlatFileStore {
        &self.store
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the in-memory records with the file contents
    ///
    /// Rows are taken as they are; arity is only enforced on add and update.
    pub fn load(&mut self) -> Result<()> {
        self.records = self.store.read()?;
        debug!(entity = self.label(), records = self.records.len(), "loaded");
        Ok(())
    }

    /// Write every in-memory record to the backing file
    pub fn save(&self) -> Result<()> {
        self.store.write(&self.records)?;
        info!(
            entity = self.label(),
            records = self.records.len(),
            path = %self.store.path().display(),
            "saved"
        );
        Ok(())
    }

    /// Append a record
    pub fn add(&mut self, record: Record) -> Result<()> {
        self.schema.check_arity(&record)?;
        self.records.push(record);
        debug!(entity = self.label(), position = self.records.len(), "added");
        Ok(())
    }

    /// Write a numbered listing of all records
    pub fn view<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.records.is_empty() {
            writeln!(out, "No {}s available.", self.label())?;
            return Ok(());
        }

        writeln!(out, "\nList of {}s:", self.label())?;
        writeln!(out, "{}", self.schema.field_list())?;
        for (i, record) in self.records.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, record.join(", "))?;
        }
        Ok(())
    }

    /// Replace the record at a 0-based position
    pub fn update(&mut self, index: usize, record: Record) -> Result<()> {
        if index >= self.records.len() {
            return Err(self.schema.invalid_index());
        }
        self.schema.check_arity(&record)?;
        self.records[index] = record;
        debug!(entity = self.label(), index, "updated");
        Ok(())
    }

    /// Remove the record at a 0-based position and return it
    pub fn delete(&mut self, index: usize) -> Result<Record> {
        if index >= self.records.len() {
            return Err(self.schema.invalid_index());
        }
        let removed = self.records.remove(index);
        debug!(entity = self.label(), index, "deleted");
        Ok(removed)
    }
}
