use crate::error::*;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use csv::{ReaderBuilder, StringRecord, Writer};
use tracing::info;

/// Shifts the first column of the CSV at `input` so the first row starts at
/// zero and writes the result to `output`.
///
/// Fails with [`Error::NoData`] if there are no rows. The output file is only
/// created once the first row has been read.
pub fn normalize_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<u64> {
    let (input, output) = (input.as_ref(), output.as_ref());
    info!(input = %input.display(), output = %output.display(), "normalizing");

    let rows = normalize_with(File::open(input)?, || Ok(File::create(output)?))?;

    info!(rows, "normalizing done");
    Ok(rows)
}


/// Like [`normalize_file`] on readers and writers. Returns the number of rows.
pub fn normalize<R: Read, W: Write>(rdr: R, out: W) -> Result<u64> {
    normalize_with(rdr, || Ok(out))
}


fn normalize_with<R, W, F>(rdr: R, open_out: F) -> Result<u64>
    where
        R: Read,
        W: Write,
        F: FnOnce() -> Result<W>,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(rdr);
    let header = reader.headers()?.clone();

    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Err(Error::NoData);
    }
    let offset = parse_time(&record)?;

    let mut writer = Writer::from_writer(open_out()?);
    writer.write_record(&header)?;

    let mut rows = 0;
    loop {
        let time = parse_time(&record)? - offset;
        let shifted = format!("{:.9}", time);

        writer.write_record(
            std::iter::once(shifted.as_str())
                .chain(record.iter().skip(1))
        )?;
        rows += 1;

        if !reader.read_record(&mut record)? {
            break;
        }
    }

    writer.flush()?;
    Ok(rows)
}


fn parse_time(record: &StringRecord) -> Result<f64> {
    let line = record.position()
        .map(|p| p.line())
        .unwrap_or_default();
    let text = record.get(0).unwrap_or_default();

    text.trim().parse()
        .map_err(|_| Error::InvalidTime(line, text.to_string()))
}
