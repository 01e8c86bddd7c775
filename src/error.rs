use thiserror::Error;

/// Broad class of an [`Error`], deciding how the command line reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed command line.
    Usage,
    /// Malformed input data.
    Format,
    /// Unusable conversion settings.
    Config,
    /// Reading or writing a file failed.
    Io,
}

#[derive(Error,Debug)]
pub enum Error {
    #[error("IO error")]
    IoError(#[from] std::io::Error),

    #[error("CSV error")]
    CsvError(#[from] csv::Error),

    #[error("Missing argument '{0:}': {1:}")]
    MissingArgument(String, String),

    #[error("Header has {0} column(s), expected a time column and at least one signal.")]
    NoSignals(usize),

    #[error("Named column '{0:}' not found")]
    NotFound(String),

    #[error("No data in the file.")]
    NoData,

    #[error("Line {0}: the given text '{1:}' can not be interpreted as time.")]
    InvalidTime(u64, String),

    #[error("Line {0}: time {1} s has no representation as a tick count.")]
    TickOutOfRange(u64, f64),

    #[error("Line {line}: value '{value}' of signal '{signal}' is not 0 or 1.")]
    InvalidValue {
        line: u64,
        signal: String,
        value: String,
    },

    #[error("Timescale '{0:}' does not start with a valid multiplier.")]
    InvalidMultiplier(String),

    #[error("Timescale unit '{0:}' is not one of ps, ns, us, ms.")]
    UnknownUnit(String),

    #[error("{0} signals exceed the {1} available identifiers.")]
    IdentifiersExhausted(usize, usize),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;

        match self {
            IoError(_) => ErrorKind::Io,
            CsvError(e) if e.is_io_error() => ErrorKind::Io,
            CsvError(_) => ErrorKind::Format,
            MissingArgument(..) => ErrorKind::Usage,
            NoSignals(_)
            | NotFound(_)
            | NoData
            | InvalidTime(..)
            | TickOutOfRange(..)
            | InvalidValue { .. } => ErrorKind::Format,
            InvalidMultiplier(_)
            | UnknownUnit(_)
            | IdentifiersExhausted(..) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
