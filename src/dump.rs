use crate::data::Timescale;
use crate::error::*;
use crate::ident::IdTable;

use std::io::Write;
use ::vcd::{ self, IdCode, Value, VarType };

/// VCD output while the header is written.
///
/// Declarations are only possible here. [`VcdHeader::declare`] consumes the
/// header and hands out the [`VcdDumper`] for the value changes.
pub struct VcdHeader<W: Write> {
    writer: vcd::Writer<W>,
}

impl<W: Write> VcdHeader<W> {
    /// Writes `$timescale`, `$date` and `$comment`.
    ///
    /// The timescale text is written as given by [`Timescale::header`], even
    /// if the unit fell back to `1 us`.
    pub fn new(mut out: W, timescale: &Timescale, date: &str, comment: &str) -> Result<Self> {
        writeln!(out, "$timescale {} $end", timescale.header())?;

        let mut writer = vcd::Writer::new(out);
        writer.date(date)?;
        writer.comment(comment)?;

        Ok(Self { writer })
    }

    /// Declares one 1-bit wire per signal in a single scope and ends the
    /// definitions.
    pub fn declare(mut self, table: &IdTable, scope: &str, only_changes: bool) -> Result<VcdDumper<W>> {
        self.writer.add_module(scope)?;
        for signal in table.iter() {
            self.writer.var_def(VarType::Wire, 1, signal.code, &signal.name, None)?;
        }
        self.writer.upscope()?;
        self.writer.enddefinitions()?;

        let codes: Vec<IdCode> = table.iter()
            .map(|s| s.code)
            .collect();
        let last = vec![None; codes.len()];

        Ok(VcdDumper {
            writer: self.writer,
            codes,
            last,
            only_changes,
        })
    }
}


/// VCD output after the definitions: one group of value changes per sample.
pub struct VcdDumper<W: Write> {
    writer: vcd::Writer<W>,
    codes: Vec<IdCode>,
    last: Vec<Option<Value>>,
    only_changes: bool,
}

impl<W: Write> VcdDumper<W> {
    /// Writes `#tick` followed by one change per value, in declaration order.
    ///
    /// Ticks are written in call order, whether they increase or not. With
    /// `only_changes`, values equal to the previous one for the same signal
    /// are left out, and so is the timestamp if nothing is left.
    pub fn dump(&mut self, tick: u64, values: &[Value]) -> Result<()> {
        let mut changes = Vec::with_capacity(values.len());

        for (i, (value, code)) in values.iter().zip(&self.codes).enumerate() {
            if self.only_changes && self.last[i] == Some(*value) {
                continue;
            }

            self.last[i] = Some(*value);
            changes.push((*code, *value));
        }

        if self.only_changes && changes.is_empty() {
            return Ok(());
        }

        self.writer.timestamp(tick)?;
        for (code, value) in changes {
            self.writer.change_scalar(code, value)?;
        }

        Ok(())
    }
}
