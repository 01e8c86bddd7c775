use crate::config::MergeConfig;
use crate::error::*;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use csv::{ReaderBuilder, Writer};
use tracing::{debug, info};

/// Time rounded to whole nanoseconds, used as join key.
type Key = i64;

const KEY_PER_SECOND: f64 = 1e9;

/// One input row reduced to the configured columns. `None` marks an empty
/// cell.
#[derive(Debug, Clone, PartialEq)]
struct Sample {
    key: Key,
    values: Vec<Option<i64>>,
}


/// Merges two traces sampled at different times onto one timeline.
///
/// Both inputs are held in memory, sorted by time.
pub fn merge_files(
    first: impl AsRef<Path>,
    second: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &MergeConfig
) -> Result<u64> {
    let (first, second, output) = (first.as_ref(), second.as_ref(), output.as_ref());
    info!(first = %first.display(), second = %second.display(), "merging");

    let a = load_samples(File::open(first)?, config)?;
    let b = load_samples(File::open(second)?, config)?;
    let rows = write_merged(&a, &b, File::create(output)?, config)?;

    info!(rows, "Merged file saved to {}", output.display());
    Ok(rows)
}


/// Like [`merge_files`] on readers and writers. Returns the number of rows.
pub fn merge<R1, R2, W>(first: R1, second: R2, out: W, config: &MergeConfig) -> Result<u64>
    where
        R1: Read,
        R2: Read,
        W: Write,
{
    let a = load_samples(first, config)?;
    let b = load_samples(second, config)?;

    write_merged(&a, &b, out, config)
}


fn load_samples<R: Read>(rdr: R, config: &MergeConfig) -> Result<Vec<Sample>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(rdr);
    let header = reader.headers()?.clone();

    let column_index = |name: &str| {
        header.iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    };

    let time_index = column_index(config.time_column.as_str())?;
    let indices = config.columns.iter()
        .map(|c| column_index(c.as_str()))
        .collect::<Result<Vec<_>>>()?;

    let mut rv = vec![];
    for record in reader.records() {
        let record = record?;
        let line = record.position()
            .map(|p| p.line())
            .unwrap_or_default();

        let text = record.get(time_index).unwrap_or_default();
        let key = parse_key(text)
            .ok_or_else(|| Error::InvalidTime(line, text.to_string()))?;

        let mut values = Vec::with_capacity(indices.len());
        for (name, &i) in config.columns.iter().zip(&indices) {
            let field = record.get(i).unwrap_or_default().trim();

            if field.is_empty() {
                values.push(None);
            } else {
                let v = parse_int(field).ok_or_else(|| Error::InvalidValue {
                    line,
                    signal: name.clone(),
                    value: field.to_string(),
                })?;
                values.push(Some(v));
            }
        }

        rv.push(Sample { key, values });
    }

    // stable, rows with equal time keep their order
    rv.sort_by_key(|s| s.key);
    debug!(rows = rv.len(), "loaded");

    Ok(rv)
}


fn parse_key(text: &str) -> Option<Key> {
    let seconds: f64 = text.trim().parse().ok()?;
    let key = (seconds * KEY_PER_SECOND).round_ties_even();

    if key.is_finite() && key.abs() < i64::MAX as f64 {
        Some(key as Key)
    } else {
        None
    }
}


/// Integers, or floats without fractional part such as `1.0`.
fn parse_int(text: &str) -> Option<i64> {
    if let Ok(v) = text.parse::<i64>() {
        return Some(v);
    }

    let v: f64 = text.parse().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}


/// Length of the run of samples starting at `start` that share its key.
fn group_len(samples: &[Sample], start: usize) -> usize {
    samples[start..].iter()
        .take_while(|s| s.key == samples[start].key)
        .count()
}


/// Outer join of `a` and `b` on the key with forward-filled values.
///
/// Equal keys pair every sample of `a` with every sample of `b`. Missing
/// values repeat the last value of their column, or 0 before the first one.
fn write_merged<W: Write>(a: &[Sample], b: &[Sample], out: W, config: &MergeConfig) -> Result<u64> {
    let width = config.columns.len();
    let empty = vec![None; width];

    let mut writer = Writer::from_writer(out);
    writer.write_record(config.output_header())?;

    let mut last = vec![0i64; 2 * width];
    let mut rows = 0;
    let mut emit = |key: Key, left: &[Option<i64>], right: &[Option<i64>]| -> Result<()> {
        for (slot, value) in last.iter_mut().zip(left.iter().chain(right)) {
            if let Some(v) = value {
                *slot = *v;
            }
        }

        let mut record = Vec::with_capacity(1 + last.len());
        record.push(format!("{:.9}", key as f64 / KEY_PER_SECOND));
        record.extend(last.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;

        rows += 1;
        Ok(())
    };

    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        let key = match (a.get(i), b.get(j)) {
            (Some(x), Some(y)) => x.key.min(y.key),
            (Some(x), None) => x.key,
            (None, Some(y)) => y.key,
            (None, None) => break,
        };

        let n_a = if a.get(i).map(|s| s.key) == Some(key) { group_len(a, i) } else { 0 };
        let n_b = if b.get(j).map(|s| s.key) == Some(key) { group_len(b, j) } else { 0 };

        match (n_a, n_b) {
            (0, _) => {
                for y in &b[j..j + n_b] {
                    emit(key, &empty[..], &y.values[..])?;
                }
            }

            (_, 0) => {
                for x in &a[i..i + n_a] {
                    emit(key, &x.values[..], &empty[..])?;
                }
            }

            _ => {
                for x in &a[i..i + n_a] {
                    for y in &b[j..j + n_b] {
                        emit(key, &x.values[..], &y.values[..])?;
                    }
                }
            }
        }

        i += n_a;
        j += n_b;
    }

    writer.flush()?;
    Ok(rows)
}
