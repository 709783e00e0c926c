//! Delimited text codec
//!
//! Converts rows of text fields to and from comma-separated text. Quoting is
//! minimal: only fields holding the delimiter, a double quote or a line break
//! are wrapped in quotes, with embedded quotes doubled.

use std::fmt;

/// A single decoded row of fields
pub type Row = Vec<String>;

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

const QUOTE: char = '"';

/// Decode failure with the 1-based line it was detected on
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for DecodeError {}

/// Check whether a character may be used as a field delimiter
pub fn is_valid_delimiter(delimiter: char) -> bool {
    !matches!(delimiter, QUOTE | '\r' | '\n')
}

fn needs_quoting(field: &str, delimiter: char) -> bool {
    field
        .chars()
        .any(|c| c == delimiter || c == QUOTE || c == '\r' || c == '\n')
}

fn encode_field(field: &str, delimiter: char, out: &mut String) {
    if needs_quoting(field, delimiter) {
        out.push(QUOTE);
        for c in field.chars() {
            if c == QUOTE {
                out.push(QUOTE);
            }
            out.push(c);
        }
        out.push(QUOTE);
    } else {
        out.push_str(field);
    }
}

/// Encode one row without a line terminator
pub fn encode_row<S: AsRef<str>>(row: &[S], delimiter: char) -> String {
    // A lone empty field would otherwise read back as an empty row
    if let [only] = row {
        if only.as_ref().is_empty() {
            return "\"\"".to_string();
        }
    }

    let mut line = String::new();
    for (i, field) in row.iter().enumerate() {
        if i > 0 {
            line.push(delimiter);
        }
        encode_field(field.as_ref(), delimiter, &mut line);
    }
    line
}

/// Encode rows, each terminated by a newline
pub fn encode<S: AsRef<str>>(rows: &[Vec<S>], delimiter: char) -> String {
    let mut text = String::new();
    for row in rows {
        text.push_str(&encode_row(row, delimiter));
        text.push('\n');
    }
    text
}

/// Incremental decoder state for one pass over the text
struct Decoder {
    rows: Vec<Row>,
    row: Row,
    field: String,
    // Current row has seen at least one field or character
    row_started: bool,
    // Current field opened with a quote
    quoted_field: bool,
    in_quotes: bool,
    line: usize,
    quote_line: usize,
}

impl Decoder {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            row: Vec::new(),
            field: String::new(),
            row_started: false,
            quoted_field: false,
            in_quotes: false,
            line: 1,
            quote_line: 1,
        }
    }

    fn end_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
        self.quoted_field = false;
    }

    fn end_row(&mut self) {
        if self.row_started {
            self.end_field();
        }
        self.rows.push(std::mem::take(&mut self.row));
        self.row_started = false;
        self.quoted_field = false;
    }

    fn finish(mut self) -> Result<Vec<Row>, DecodeError> {
        if self.in_quotes {
            return Err(DecodeError {
                line: self.quote_line,
                message: "unterminated quoted field".to_string(),
            });
        }
        if self.row_started {
            self.end_row();
        }
        Ok(self.rows)
    }
}

/// Decode delimited text into rows
///
/// Accepts `\n` and `\r\n` line endings and quoted fields spanning lines. An
/// empty line decodes to an empty row.
pub fn decode(text: &str, delimiter: char) -> Result<Vec<Row>, DecodeError> {
    let mut decoder = Decoder::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if decoder.in_quotes {
            if c == QUOTE {
                if chars.peek() == Some(&QUOTE) {
                    chars.next();
                    decoder.field.push(QUOTE);
                } else {
                    decoder.in_quotes = false;
                }
            } else {
                if c == '\n' {
                    decoder.line += 1;
                }
                decoder.field.push(c);
            }
            continue;
        }

        match c {
            QUOTE if decoder.field.is_empty() && !decoder.quoted_field => {
                decoder.in_quotes = true;
                decoder.quoted_field = true;
                decoder.row_started = true;
                decoder.quote_line = decoder.line;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' | '\n' => {
                decoder.end_row();
                decoder.line += 1;
            }
            c if c == delimiter => {
                decoder.row_started = true;
                decoder.end_field();
            }
            _ => {
                decoder.row_started = true;
                decoder.field.push(c);
            }
        }
    }

    decoder.finish()
}
