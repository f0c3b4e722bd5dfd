//! Error types shared by every chart.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems found while validating the command line, before any input is
/// read.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Malformed column range `{0}`: more than one `-` in a single piece")]
    MalformedRange(String),

    #[error("Invalid column `{0}`: columns are 1-based positive integers")]
    InvalidColumn(String),

    #[error("Descending column range `{0}`")]
    DescendingRange(String),

    #[error("Number of error columns ({errors}) must match number of data columns ({fields})")]
    ErrorColumnsMismatch { fields: usize, errors: usize },

    #[error("Options --bins and --bin-size are mutually exclusive")]
    BinsAndBinSize,

    #[error("Number of bins must be greater than zero")]
    ZeroBins,

    #[error("Number of bins must be at most {max}, got {got}")]
    TooManyBins { got: usize, max: usize },

    #[error("Bin size must be a positive number, got {0}")]
    InvalidBinSize(f64),

    #[error("Running in quiet mode and no save destination was provided")]
    QuietWithoutSave,

    #[error("The expected number of inputs is between {min} and {max}, got {got}")]
    InputCount { min: usize, max: String, got: usize },

    #[error("Cannot convert `{value}` for option --{option}: {reason}")]
    StyleValue {
        option: String,
        value: String,
        reason: String,
    },

    #[error("Option --{0} needs at least one value")]
    EmptyCycle(String),

    #[error("Unsupported save format `{0}` (supported: txt, ansi)")]
    SaveFormat(String),

    #[error("Invalid value `{value}` for option --{option}")]
    InvalidValue { option: String, value: String },

    #[error("Minimum should be smaller than maximum on the {0} axis")]
    InvalidRange(&'static str),

    #[error("Failed to parse regex {0}")]
    Regex(String),
}

/// Problems found in the data itself.  Every variant carries the input name
/// and the (1-based) line number of the offending record.
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("{input}:{line}: column {column} requested, but line only has {available} fields")]
    FieldOutOfRange {
        input: String,
        line: usize,
        column: usize,
        available: usize,
    },

    #[error("{input}:{line}: cannot parse `{value}` (column {column}) as a number")]
    NotANumber {
        input: String,
        line: usize,
        column: usize,
        value: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Bin size {width} is too small for data between {min} and {max}")]
    TooManyBins { width: f64, min: f64, max: f64 },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
