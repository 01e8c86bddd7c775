use crate::config::ConvertConfig;
use crate::data::{Row, Timescale};
use crate::dump::VcdHeader;
use crate::error::*;
use crate::ident::IdTable;
use crate::load::{csv::CsvTrace, TraceSource};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, trace, warn};
use vcd::Value;

/// What a conversion wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertStats {
    pub signals: usize,
    pub rows: u64,
}


/// Converts the CSV trace at `input` into a VCD file at `output`.
///
/// The timescale and the identifiers are checked before the output file is
/// created. A bad row aborts the conversion and leaves whatever was written
/// up to that point in place.
pub fn csv_to_vcd(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConvertConfig
) -> Result<ConvertStats> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let timescale = parse_timescale(config)?;

    let mut source = CsvTrace::open(input)?;
    let table = IdTable::allocate(source.signals().iter().cloned(), config.id_policy())?;

    info!(input = %input.display(), output = %output.display(), signals = table.len(), "converting");

    let mut out = BufWriter::new(File::create(output)?);
    let res = dump_trace(&mut source, &mut out, &timescale, &table, config);
    out.flush()?;

    let stats = res?;
    info!(rows = stats.rows, "conversion done");

    Ok(stats)
}


/// Converts any trace source, writing VCD to `out`.
pub fn convert<S, W>(source: &mut S, out: W, config: &ConvertConfig) -> Result<ConvertStats>
    where
        S: TraceSource,
        W: Write,
{
    let timescale = parse_timescale(config)?;
    let table = IdTable::allocate(source.signals().iter().cloned(), config.id_policy())?;

    dump_trace(source, out, &timescale, &table, config)
}


fn parse_timescale(config: &ConvertConfig) -> Result<Timescale> {
    let timescale = config.parse_timescale()?;

    if timescale.is_fallback() {
        warn!(timescale = %config.timescale, "unknown timescale unit, converting times as 1 us");
    } else {
        debug!(timescale = %timescale, "parsed timescale");
    }

    Ok(timescale)
}


fn dump_trace<S, W>(
    source: &mut S,
    out: W,
    timescale: &Timescale,
    table: &IdTable,
    config: &ConvertConfig
) -> Result<ConvertStats>
    where
        S: TraceSource,
        W: Write,
{
    for signal in table.iter() {
        debug!(name = %signal.name, id = %signal.code, "declare");
    }

    let header = VcdHeader::new(out, timescale, &config.date, &config.comment)?;
    let mut dumper = header.declare(table, &config.scope, config.only_changes)?;

    let signals = source.signals().to_vec();
    let mut values = Vec::with_capacity(signals.len());
    let mut rows = 0;

    while let Some(row) = source.next_row() {
        let row = row?;
        let tick = row_tick(&row, timescale)?;

        values.clear();
        for (name, field) in signals.iter().zip(row.values()) {
            values.push(parse_value(field).ok_or_else(|| Error::InvalidValue {
                line: row.line(),
                signal: name.clone(),
                value: field.to_string(),
            })?);
        }

        trace!(line = row.line(), tick, "dump");
        dumper.dump(tick, &values)?;
        rows += 1;
    }

    Ok(ConvertStats {
        signals: table.len(),
        rows,
    })
}


/// Time of a row in ticks of `timescale`.
pub fn row_tick(row: &Row, timescale: &Timescale) -> Result<u64> {
    let text = row.time().unwrap_or_default();
    let seconds: f64 = text.trim().parse()
        .map_err(|_| Error::InvalidTime(row.line(), text.to_string()))?;

    timescale.ticks(seconds)
        .ok_or(Error::TickOutOfRange(row.line(), seconds))
}


/// Reads a signal field as an integer that must be 0 or 1.
pub fn parse_value(field: &str) -> Option<Value> {
    match field.trim().parse::<i64>() {
        Ok(0) => Some(Value::V0),
        Ok(1) => Some(Value::V1),
        _ => None,
    }
}
