mod timescale;

pub use timescale::*;

use csv::StringRecord;

//
// Types
//

/// One sample of a trace: the time field followed by one field per signal.
///
/// Fields are kept as read. Interpreting them is up to the consumer.
#[derive(Debug, Clone)]
pub struct Row {
    line: u64,
    record: StringRecord,
}

impl Row {
    pub fn new(line: u64, record: StringRecord) -> Self {
        Self {
            line,
            record,
        }
    }

    /// Line in the input this row was read from, for error messages.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn time(&self) -> Option<&str> {
        self.record.get(0)
    }

    /// Values after the time column, in header order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.record.iter().skip(1)
    }
}
