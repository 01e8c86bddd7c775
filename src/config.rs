use crate::data::Timescale;
use crate::error::*;
use crate::ident::IdPolicy;


/// Settings for converting a CSV trace to VCD.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Timescale text, e.g. `10ps` or `1 us`.
    pub timescale: String,

    /// Reject unknown timescale units and more than 94 signals instead of
    /// silently working around them.
    pub strict: bool,

    /// Only dump values that differ from the previous sample.
    pub only_changes: bool,

    /// Name of the module all signals are declared in.
    pub scope: String,

    pub date: String,
    pub comment: String,
}

impl ConvertConfig {
    pub fn new(timescale: impl Into<String>) -> Self {
        Self {
            timescale: timescale.into(),
            ..Self::default()
        }
    }

    pub fn parse_timescale(&self) -> Result<Timescale> {
        if self.strict {
            Timescale::parse_strict(&self.timescale)
        } else {
            Timescale::parse(&self.timescale)
        }
    }

    pub fn id_policy(&self) -> IdPolicy {
        if self.strict {
            IdPolicy::SingleChar
        } else {
            IdPolicy::Extended
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            timescale: Timescale::DEFAULT.to_string(),
            strict: false,
            only_changes: false,
            scope: "top".to_string(),
            date: "today".to_string(),
            comment: "CSV to VCD conversion".to_string(),
        }
    }
}


/// Settings for merging two traces on a common timeline.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Column holding the time in seconds, in both inputs.
    pub time_column: String,

    /// Signal columns taken from both inputs.
    pub columns: Vec<String>,

    /// Appended to the signal column names of the first and second input.
    pub suffixes: (String, String),
}

impl MergeConfig {
    pub fn new(time_column: impl Into<String>, columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::MissingArgument("columns".into(), "At least one signal column is needed".into()));
        }

        Ok(Self {
            time_column: time_column.into(),
            columns,
            ..Self::default()
        })
    }

    /// Output column names: time, the first input's signals, then the second's.
    pub fn output_header(&self) -> Vec<String> {
        let (a, b) = &self.suffixes;

        std::iter::once(self.time_column.clone())
            .chain(self.columns.iter().map(|c| format!("{}{}", c, a)))
            .chain(self.columns.iter().map(|c| format!("{}{}", c, b)))
            .collect()
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            time_column: "Time [s]".to_string(),
            columns: vec!["CSYNC".to_string(), "VSYNC".to_string()],
            suffixes: ("_A".to_string(), "_B".to_string()),
        }
    }
}
