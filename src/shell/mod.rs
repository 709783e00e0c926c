//! Interactive menu shell
//!
//! Two menu levels: a top menu picking an entity kind or the timetable
//! report, and a per-entity menu for add/view/update/delete. The shell reads
//! from any buffered reader and writes to any writer, so whole sessions can be
//! scripted.

use crate::collection::{EntityKind, Record, RecordCollection};
use crate::config::Config;
use crate::error::{Result, TimetableError};
use crate::report::TimetableReport;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// What the caller should do after a submenu returns
#[derive(Debug, Clone, Copy, PartialEq)]
enum Flow {
    /// Back to the top menu
    Back,
    /// Input is exhausted, stop the program
    Quit,
}

/// The application shell owning every collection
pub struct TimetableSystem<R, W> {
    courses: RecordCollection,
    instructors: RecordCollection,
    classes: RecordCollection,
    compensatory_classes: RecordCollection,
    report: TimetableReport,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TimetableSystem<R, W> {
    /// Open every collection named by the configuration
    pub fn from_config(config: &Config, input: R, output: W) -> Result<Self> {
        let open = |kind: EntityKind| RecordCollection::open(kind.schema(), config.entity_store(kind)?);

        Ok(Self {
            courses: open(EntityKind::Course)?,
            instructors: open(EntityKind::Instructor)?,
            classes: open(EntityKind::Class)?,
            compensatory_classes: open(EntityKind::CompensatoryClass)?,
            report: TimetableReport::new(config.report_store()?),
            input,
            output,
        })
    }

    pub fn collection(&self, kind: EntityKind) -> &RecordCollection {
        match kind {
            EntityKind::Course => &self.courses,
            EntityKind::Instructor => &self.instructors,
            EntityKind::Class => &self.classes,
            EntityKind::CompensatoryClass => &self.compensatory_classes,
        }
    }

    /// The collection for a kind together with the output writer
    fn parts(&mut self, kind: EntityKind) -> (&mut RecordCollection, &mut W) {
        let collection = match kind {
            EntityKind::Course => &mut self.courses,
            EntityKind::Instructor => &mut self.instructors,
            EntityKind::Class => &mut self.classes,
            EntityKind::CompensatoryClass => &mut self.compensatory_classes,
        };
        (collection, &mut self.output)
    }

    /// Consume the shell and hand back its writer
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the top-level menu until Exit or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\nUniversity Timetable System")?;
            writeln!(self.output, "1. Manage Courses")?;
            writeln!(self.output, "2. Manage Instructors")?;
            writeln!(self.output, "3. Manage Classes")?;
            writeln!(self.output, "4. Manage Compensatory Classes")?;
            writeln!(self.output, "5. Generate Timetable")?;
            writeln!(self.output, "6. Exit")?;

            let choice = match self.prompt("Enter your choice: ")? {
                Some(choice) => choice,
                None => break,
            };
            debug!(choice = choice.as_str(), "top menu");

            let flow = match choice.as_str() {
                "1" => self.manage_entity(EntityKind::Course)?,
                "2" => self.manage_entity(EntityKind::Instructor)?,
                "3" => self.manage_entity(EntityKind::Class)?,
                "4" => self.manage_entity(EntityKind::CompensatoryClass)?,
                "5" => {
                    self.generate_timetable()?;
                    Flow::Back
                }
                "6" => break,
                _ => {
                    writeln!(self.output, "Invalid choice, try again.")?;
                    Flow::Back
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        writeln!(self.output, "Thank you for using the system. Goodbye!")?;
        self.output.flush()?;
        info!("session finished");
        Ok(())
    }

    /// Per-entity menu; leaving it saves the collection
    fn manage_entity(&mut self, kind: EntityKind) -> Result<Flow> {
        let label = kind.label();
        let fields = kind.schema().field_list();

        let flow = loop {
            writeln!(self.output, "\n{} Management", label)?;
            writeln!(self.output, "1. Add")?;
            writeln!(self.output, "2. View")?;
            writeln!(self.output, "3. Update")?;
            writeln!(self.output, "4. Delete")?;
            writeln!(self.output, "5. Exit")?;

            let choice = match self.prompt("Enter your choice: ")? {
                Some(choice) => choice,
                None => break Flow::Quit,
            };
            debug!(entity = label, choice = choice.as_str(), "entity menu");

            match choice.as_str() {
                "1" => {
                    let text = format!("Enter {} details (comma-separated: {}): ", label, fields);
                    let Some(details) = self.prompt(&text)? else {
                        break Flow::Quit;
                    };
                    let (collection, _) = self.parts(kind);
                    let result = collection.add(split_details(&details));
                    self.report_outcome(result, label, "added")?;
                }
                "2" => {
                    let (collection, output) = self.parts(kind);
                    collection.view(output)?;
                }
                "3" => {
                    let (collection, output) = self.parts(kind);
                    collection.view(output)?;

                    let text = format!("Enter the index of the {} to update: ", label);
                    let Some(index) = self.prompt(&text)? else {
                        break Flow::Quit;
                    };
                    let number = parse_index(&index)?;

                    let text = format!("Enter new details (comma-separated: {}): ", fields);
                    let Some(details) = self.prompt(&text)? else {
                        break Flow::Quit;
                    };

                    let result = match to_position(kind, number) {
                        Ok(position) => {
                            let (collection, _) = self.parts(kind);
                            collection.update(position, split_details(&details))
                        }
                        Err(e) => Err(e),
                    };
                    self.report_outcome(result, label, "updated")?;
                }
                "4" => {
                    let (collection, output) = self.parts(kind);
                    collection.view(output)?;

                    let text = format!("Enter the index of the {} to delete: ", label);
                    let Some(index) = self.prompt(&text)? else {
                        break Flow::Quit;
                    };
                    let number = parse_index(&index)?;

                    let result = match to_position(kind, number) {
                        Ok(position) => {
                            let (collection, _) = self.parts(kind);
                            collection.delete(position).map(|_| ())
                        }
                        Err(e) => Err(e),
                    };
                    self.report_outcome(result, label, "deleted")?;
                }
                "5" => break Flow::Back,
                _ => writeln!(self.output, "Invalid choice, try again.")?,
            }
        };

        self.collection(kind).save()?;
        Ok(flow)
    }

    fn generate_timetable(&mut self) -> Result<()> {
        self.report
            .generate(&self.classes, &self.compensatory_classes, &mut self.output)?;
        Ok(())
    }

    /// Print a success line, or the message of a recoverable error
    fn report_outcome(&mut self, result: Result<()>, label: &str, action: &str) -> Result<()> {
        match result {
            Ok(()) => writeln!(self.output, "{} {} successfully.", label, action)?,
            Err(e) if e.is_recoverable() => {
                debug!(error = %e, "rejected");
                writeln!(self.output, "{}", e)?
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Show a prompt and read one line; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.strip_suffix('\n').unwrap_or(&line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(line.to_string()))
    }
}

/// Split a comma-separated answer into fields, keeping their whitespace
pub fn split_details(details: &str) -> Record {
    details.split(',').map(str::to_string).collect()
}

/// Parse a 1-based index typed by the user
pub fn parse_index(input: &str) -> Result<i64> {
    let input = input.trim();
    input
        .parse::<i64>()
        .map_err(|_| TimetableError::InvalidNumber(input.to_string()))
}

/// Convert a 1-based number into a 0-based position
fn to_position(kind: EntityKind, number: i64) -> Result<usize> {
    number
        .checked_sub(1)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| TimetableError::InvalidIndex {
            entity: kind.label().to_string(),
        })
}
