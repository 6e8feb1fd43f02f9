use std::{fmt, path::PathBuf};

use crate::{error::FixError, reader::peek_first_altitude, transformers::AltitudeCorrection};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShiftSource {
    /// Amount given by the user; the data moves by exactly this much.
    Explicit(f64),
    /// Raw altitude of the first record of the first file.
    Detected(f64),
}

/// Shift chosen once for the whole batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedShift {
    pub source: ShiftSource,
    pub effective: f64,
}

impl ResolvedShift {
    pub fn correction(&self) -> AltitudeCorrection {
        AltitudeCorrection::new(self.effective)
    }

    /// How far the data set moves, i.e. the negated effective shift.
    pub fn offset(&self) -> f64 {
        0.0 - self.effective
    }
}

impl fmt::Display for ResolvedShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            ShiftSource::Explicit(amount) => {
                writeln!(f, "Altitude shift amount provided: {:+.6}", amount)?;
            }
            ShiftSource::Detected(altitude) => {
                writeln!(
                    f,
                    "No altitude shift amount provided, detected starting altitude of {:+.6}",
                    altitude
                )?;
            }
        }
        write!(f, "Data set will be shifted by {:+.6}", self.offset())
    }
}

/// Picks the shift for every file of the batch.
///
/// An explicit amount `S` is applied as `-S`. Without one, the first record of
/// the first file is probed and its altitude becomes the shift, bringing the
/// start of the flight to zero.
pub fn resolve_shift(explicit: Option<f64>, files: &[PathBuf]) -> Result<ResolvedShift, FixError> {
    let first_file = files.first().ok_or(FixError::MissingInput)?;

    let resolved = match explicit {
        Some(amount) => ResolvedShift {
            source: ShiftSource::Explicit(amount),
            effective: 0.0 - amount,
        },
        None => {
            let detected = peek_first_altitude(first_file)?;
            ResolvedShift {
                source: ShiftSource::Detected(detected),
                effective: detected,
            }
        }
    };

    tracing::info!(
        "resolved shift {:?}, effective {}",
        resolved.source,
        resolved.effective
    );

    Ok(resolved)
}
