use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::error::{FixError, RecordError};

/// Blank line between two SRT blocks.
pub const RECORD_SEPARATOR: &str = "\n\n";

static ALTITUDE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[altitude: ([^\]\n]*)\]").unwrap());

// plain decimals only, "1e3", "inf" and "1,5" are rejected.
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)$").unwrap());

/// Location of the altitude field inside a record, plus its parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct AltitudeField {
    pub value: f64,
    /// Byte range of the whole `[altitude: ...]` token.
    pub span: std::ops::Range<usize>,
}

pub fn find_altitude(record: &str) -> Result<AltitudeField, RecordError> {
    let caps = ALTITUDE_FIELD
        .captures(record)
        .ok_or(RecordError::MissingAltitude)?;

    // group 0 and 1 always exist on a match
    let whole = caps.get(0).ok_or(RecordError::MissingAltitude)?;
    let raw = caps.get(1).map_or("", |m| m.as_str());

    let trimmed = raw.trim();
    if !DECIMAL.is_match(trimmed) {
        return Err(RecordError::InvalidAltitude(raw.to_string()));
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| RecordError::InvalidAltitude(raw.to_string()))?;

    Ok(AltitudeField {
        value,
        span: whole.range(),
    })
}

/// Splits raw SRT content into its blank-line separated records.
///
/// Content without any separator, or with nothing but whitespace, holds no
/// records. A trailing empty segment (file ending on the separator) is
/// dropped; a non-empty last segment is kept as a record.
pub fn split_records(content: &str) -> Option<Vec<&str>> {
    if content.trim().is_empty() || !content.contains(RECORD_SEPARATOR) {
        return None;
    }

    let mut records: Vec<&str> = content.split(RECORD_SEPARATOR).collect();
    if records.last().is_some_and(|r| r.is_empty()) {
        records.pop();
    }

    if records.is_empty() {
        None
    } else {
        Some(records)
    }
}

/// Whole-file buffer of one telemetry file.
pub struct SrtReader {
    path: PathBuf,
    content: String,
}

impl SrtReader {
    pub fn open(path: &Path) -> Result<Self, FixError> {
        let content = fs::read_to_string(path)
            .map_err(|source| FixError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .replace("\r\n", "\n");

        tracing::debug!("read {} bytes from {}", content.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> Result<Vec<&str>, FixError> {
        split_records(&self.content).ok_or_else(|| FixError::EmptyInput {
            file: self.path.clone(),
        })
    }

    pub(crate) fn parse_error(&self, index: usize, record: &str, source: RecordError) -> FixError {
        FixError::Parse {
            file: self.path.clone(),
            index,
            record: record.to_string(),
            source,
        }
    }
}

/// Altitude of the first record in `path`, nothing else is parsed.
pub fn peek_first_altitude(path: &Path) -> Result<f64, FixError> {
    let reader = SrtReader::open(path)?;
    let records = reader.records()?;

    // split_records never returns an empty list
    let first = records.first().copied().unwrap_or_default();

    find_altitude(first)
        .map(|field| field.value)
        .map_err(|e| reader.parse_error(0, first, e))
}
