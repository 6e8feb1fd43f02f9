use std::{io, path::PathBuf};

use thiserror::Error;

/// Why a single telemetry record could not be corrected.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("no [altitude: ...] field found")]
    MissingAltitude,
    #[error("altitude value {0:?} is not a decimal number")]
    InvalidAltitude(String),
}

#[derive(Debug, Error)]
pub enum FixError {
    #[error("You must specify at least one SRT file. Type --help for usage. Exiting...")]
    MissingInput,

    #[error("{}: no telemetry records found (expected blocks separated by a blank line)", .file.display())]
    EmptyInput { file: PathBuf },

    /// `index` is 0-based; the message shows it 1-based like the SRT counters.
    #[error("{}: record {} is not a valid telemetry record: {source}\n{record}", .file.display(), .index + 1)]
    Parse {
        file: PathBuf,
        index: usize,
        record: String,
        #[source]
        source: RecordError,
    },

    #[error("failed reading {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed writing {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
