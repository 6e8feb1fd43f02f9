use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    error::FixError,
    reader::{SrtReader, RECORD_SEPARATOR},
    transformers::{AltitudeCorrection, CorrectedRecord},
};

pub const CORRECTED_SUFFIX: &str = "_CORRECTED";

/// `DJI_0015.SRT` becomes `DJI_0015_CORRECTED.SRT`, in the same directory.
///
/// Only the last dot splits base from extension. A name without any dot keeps
/// the whole name as base and gets an empty extension, so `flight` turns into
/// `flight_CORRECTED.`.
pub fn corrected_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (base, ext) = name.rsplit_once('.').unwrap_or((name.as_str(), ""));

    input.with_file_name(format!("{base}{CORRECTED_SUFFIX}.{ext}"))
}

#[derive(Debug)]
pub struct CorrectedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub records: Vec<CorrectedRecord>,
}

impl CorrectedFile {
    pub fn first(&self) -> Option<&CorrectedRecord> {
        self.records.first()
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&record.corrected_text);
            out.push_str(RECORD_SEPARATOR);
        }
        out
    }

    pub fn report(&self, correction: &AltitudeCorrection) -> FileReport {
        FileReport {
            input: self.input.display().to_string(),
            output: self.output.display().to_string(),
            records: self.records.len(),
            shift: correction.shift,
            first_original_altitude: self.first().map(|r| r.original_altitude),
            first_corrected_altitude: self.first().map(|r| r.corrected_altitude),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileReport {
    pub input: String,
    pub output: String,
    pub records: usize,
    pub shift: f64,
    pub first_original_altitude: Option<f64>,
    pub first_corrected_altitude: Option<f64>,
}

/// Corrects every record of `path` in memory. Nothing is written.
pub fn correct_srt_file(
    path: &Path,
    correction: &AltitudeCorrection,
) -> Result<CorrectedFile, FixError> {
    let reader = SrtReader::open(path)?;
    let raw_records = reader.records()?;

    let records = raw_records
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            correction
                .transform(raw)
                .map_err(|e| reader.parse_error(index, raw, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "corrected {} records of {} with shift {}",
        records.len(),
        reader.path().display(),
        correction.shift
    );

    Ok(CorrectedFile {
        input: path.to_path_buf(),
        output: corrected_output_path(path),
        records,
    })
}

/// Reads, corrects and writes one file. The output is only created once every
/// record has been corrected, and an existing one is overwritten.
pub fn process_srt_file(
    path: &Path,
    correction: &AltitudeCorrection,
) -> Result<CorrectedFile, FixError> {
    let corrected = correct_srt_file(path, correction)?;

    fs::write(&corrected.output, corrected.serialize()).map_err(|source| FixError::Write {
        path: corrected.output.clone(),
        source,
    })?;

    tracing::info!(
        "wrote {} records to {}",
        corrected.records.len(),
        corrected.output.display()
    );

    Ok(corrected)
}
