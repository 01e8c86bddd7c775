pub mod csv;

use crate::data::Row;
use crate::error::*;

/// A trace that can be read once, front to back.
pub trait TraceSource {
    /// Signal names in column order, without the time column.
    fn signals(&self) -> &[String];

    /// Next sample, or `None` once the trace is exhausted.
    fn next_row(&mut self) -> Option<Result<Row>>;
}
