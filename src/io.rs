/* Collaborators around the engine: loading the automaton description, reading delimited test
 * records and writing delimited results. */

use color_eyre::eyre::{Report, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use crate::batch::{BatchError, TestResult};
use crate::fa::AutomatonDescription;

#[derive(Debug)]
pub enum LoadError {
    FileOpenError(String),
    ParseError(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::FileOpenError(reason) => {
                write!(f, "Error: Failed to open the automaton file! {}", reason)
            }
            LoadError::ParseError(reason) => {
                write!(f, "Error: Invalid automaton description! {}", reason)
            }
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug)]
pub enum OutputError {
    WriteError(String),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::WriteError(reason) => {
                write!(f, "Error: Failed to write the results! {}", reason)
            }
        }
    }
}

impl std::error::Error for OutputError {}

/// Load an automaton description from a JSON file
pub fn load_automaton(file_path: &Path) -> Result<AutomatonDescription> {
    let file = match File::open(file_path) {
        Ok(file) => file,
        Err(error) => {
            let reason = format!("{}: {}", file_path.display(), error);
            return Err(Report::new(LoadError::FileOpenError(reason)));
        }
    };

    let buf_reader = BufReader::new(file);

    match serde_json::from_reader(buf_reader) {
        Ok(automaton) => Ok(automaton),
        Err(error) => {
            let reason = format!("{}: {}", file_path.display(), error);
            Err(Report::new(LoadError::ParseError(reason)))
        }
    }
}

/// Parse an automaton description held in memory
pub fn parse_automaton(json: &str) -> Result<AutomatonDescription> {
    serde_json::from_str(json)
        .map_err(|error| Report::new(LoadError::ParseError(error.to_string())))
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        return Ok(delimiter as u8);
    }
    let reason = format!("delimiter {:?} must be an ASCII character", delimiter);
    Err(Report::new(BatchError::ReadError(reason)))
}

/// Stream the CSV records of any reader. Fields may be quoted, blank lines yield no record and
/// records may have any number of fields.
pub fn records<R: Read>(
    reader: R,
    delimiter: char,
) -> Result<impl Iterator<Item = Result<Vec<String>>>> {
    let csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte(delimiter)?)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    Ok(csv_reader.into_records().map(|record| match record {
        Ok(record) => Ok(record.iter().map(String::from).collect()),
        Err(error) => Err(Report::new(BatchError::ReadError(error.to_string()))),
    }))
}

/// Open a test case file and stream its records
pub fn read_test_records(
    file_path: &Path,
    delimiter: char,
) -> Result<impl Iterator<Item = Result<Vec<String>>>> {
    let file = match File::open(file_path) {
        Ok(file) => file,
        Err(error) => {
            let reason = format!("{}: {}", file_path.display(), error);
            return Err(Report::new(BatchError::ReadError(reason)));
        }
    };

    records(file, delimiter)
}

/// Writes results as `input;expected;observed;seconds` CSV records, quoting fields only when
/// they contain the delimiter or quotes.
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(writer: W, delimiter: char) -> Result<Self> {
        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter_byte(delimiter)?)
            .has_headers(false)
            .flexible(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        Ok(ResultWriter { writer })
    }

    pub fn write_result(&mut self, result: &TestResult) -> Result<()> {
        let record = [
            result.case.input.clone(),
            result.case.expected.to_string(),
            result.observed.to_string(),
            format!("{:.6}", result.elapsed_seconds()),
        ];
        if let Err(error) = self.writer.write_record(&record) {
            return Err(Report::new(OutputError::WriteError(error.to_string())));
        }
        Ok(())
    }

    pub fn finish(self) -> Result<W> {
        match self.writer.into_inner() {
            Ok(writer) => Ok(writer),
            Err(error) => Err(Report::new(OutputError::WriteError(error.to_string()))),
        }
    }
}

/// Create the output file for results
pub fn create_result_file(file_path: &Path, delimiter: char) -> Result<ResultWriter<File>> {
    match File::create(file_path) {
        Ok(file) => ResultWriter::new(file, delimiter),
        Err(error) => {
            let reason = format!("{}: {}", file_path.display(), error);
            Err(Report::new(OutputError::WriteError(reason)))
        }
    }
}
