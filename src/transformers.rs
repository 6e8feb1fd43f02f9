use crate::{error::RecordError, reader::find_altitude};

/// The goggles show the right altitude, but the SRT files carry 1/10 of it.
pub const ALTITUDE_SCALE: f64 = 10.0;

/// Correction applied to every altitude of a batch: shift first, then scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeCorrection {
    pub shift: f64,
}

impl AltitudeCorrection {
    pub fn new(shift: f64) -> Self {
        Self { shift }
    }

    pub fn apply(&self, altitude: f64) -> f64 {
        let shifted = altitude - self.shift;
        shifted * ALTITUDE_SCALE
    }

    /// Rewrites the altitude field of one record, leaving every other byte alone.
    pub fn transform(&self, record: &str) -> Result<CorrectedRecord, RecordError> {
        let field = find_altitude(record)?;
        let corrected_altitude = self.apply(field.value);

        let mut corrected_text = String::with_capacity(record.len() + 8);
        corrected_text.push_str(&record[..field.span.start]);
        corrected_text.push_str(&format!("[altitude: {:.6}]", corrected_altitude));
        corrected_text.push_str(&record[field.span.end..]);

        Ok(CorrectedRecord {
            original_altitude: field.value,
            corrected_altitude,
            corrected_text,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedRecord {
    pub original_altitude: f64,
    pub corrected_altitude: f64,
    pub corrected_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RECORD: &str = "12\n00:00:00,396 --> 00:00:00,429\n<font size=\"28\">FrameCnt: 12, DiffTime: 33ms\n[iso: 110] [shutter: 1/100.0] [fnum: 280] [ev: 0] [latitude: 44.123456] [longitude: -122.654321] [altitude: -8.398028] </font>";

    #[test]
    fn test_apply_shifts_then_scales() {
        let correction = AltitudeCorrection::new(2.5);
        assert_relative_eq!(correction.apply(3.0), 5.0);
        assert_relative_eq!(correction.apply(-1.0), -35.0);
    }

    #[test]
    fn test_zero_shift_scales_only() {
        let corrected = AltitudeCorrection::new(0.0)
            .transform("[altitude: 12.5]")
            .unwrap();

        assert_relative_eq!(corrected.original_altitude, 12.5);
        assert_relative_eq!(corrected.corrected_altitude, 125.0);
        assert_eq!(corrected.corrected_text, "[altitude: 125.000000]");
    }

    #[test]
    fn test_starting_altitude_shifted_to_zero() {
        let corrected = AltitudeCorrection::new(-8.398028).transform(RECORD).unwrap();

        assert_relative_eq!(corrected.corrected_altitude, 0.0);
        assert!(corrected.corrected_text.contains("[altitude: 0.000000]"));
    }

    #[test]
    fn test_other_fields_preserved() {
        let corrected = AltitudeCorrection::new(-8.398028).transform(RECORD).unwrap();
        let expected = RECORD.replace("[altitude: -8.398028]", "[altitude: 0.000000]");

        assert_eq!(corrected.corrected_text, expected);
    }

    #[test]
    fn test_corrected_text_parses_back() {
        let corrected = AltitudeCorrection::new(1.25).transform(RECORD).unwrap();
        let reparsed = find_altitude(&corrected.corrected_text).unwrap().value;

        assert_relative_eq!(reparsed, corrected.corrected_altitude, epsilon = 1e-6);
        assert_eq!(format!("{:.6}", reparsed), "-96.480280");
    }

    #[test]
    fn test_only_first_altitude_rewritten() {
        let corrected = AltitudeCorrection::new(0.0)
            .transform("[altitude: 1.0] [altitude: 2.0]")
            .unwrap();

        assert_eq!(corrected.corrected_text, "[altitude: 10.000000] [altitude: 2.0]");
    }

    #[test]
    fn test_rounding_to_six_digits() {
        let corrected = AltitudeCorrection::new(0.0)
            .transform("x [altitude: 0.12345678] y")
            .unwrap();

        assert_eq!(corrected.corrected_text, "x [altitude: 1.234568] y");
    }

    #[test]
    fn test_missing_altitude_is_rejected() {
        let err = AltitudeCorrection::new(0.0)
            .transform("[latitude: 1.0]")
            .unwrap_err();

        assert_eq!(err, RecordError::MissingAltitude);
    }
}
