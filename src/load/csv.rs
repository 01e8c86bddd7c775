use super::*;

use std::fs::File;
use std::io::Read;
use std::path::Path;
use ::csv::{ Reader, ReaderBuilder, StringRecord };

/// Reads a trace from CSV where the first column holds the time in seconds
/// and every further column one signal.
///
/// The column names only matter for the signal names. Rows are read lazily,
/// so only the current row is held in memory.
pub struct CsvTrace<R: Read> {
    reader: Reader<R>,
    time_column: String,
    signals: Vec<String>,
    record: StringRecord,
}

impl CsvTrace<File> {
    pub fn open(filename: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(filename.as_ref())?;
        Self::from_reader(file)
    }
}

impl<R: Read> CsvTrace<R> {
    pub fn from_reader(rdr: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(rdr);

        let header = reader.headers()?;
        if header.len() < 2 {
            return Err(Error::NoSignals(header.len()));
        }

        let time_column = header[0].to_string();
        let signals = header.iter()
            .skip(1)
            .map(String::from)
            .collect();

        Ok(Self {
            reader,
            time_column,
            signals,
            record: StringRecord::new(),
        })
    }

    /// Name of the time column.
    pub fn time_column(&self) -> &str {
        &self.time_column
    }
}

impl<R: Read> TraceSource for CsvTrace<R> {
    fn signals(&self) -> &[String] {
        &self.signals
    }

    fn next_row(&mut self) -> Option<Result<Row>> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                let line = self.record.position()
                    .map(|p| p.line())
                    .unwrap_or_default();

                Some(Ok(Row::new(line, self.record.clone())))
            }

            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}
