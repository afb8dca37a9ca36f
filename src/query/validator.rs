use thiserror::Error;

use crate::constants::{
    DecimalYear, Degree, Kilometers, MAX_ALTITUDE_KM, MIN_ALTITUDE_KM, MODEL_VALIDITY_YEARS,
};
use crate::literals::ReferenceFrame;
use crate::query::assembler::{ParsedRecord, RawRecord};

/// Which rules apply to a record: file mode is strict (decimal angles only, no
/// date ranges), single-record mode accepts every literal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Interactive,
    File,
}

/// Decimal-year window a field model supports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochWindow {
    pub min_year: DecimalYear,
    pub max_year: DecimalYear,
}

impl EpochWindow {
    pub fn from_epoch(epoch: DecimalYear) -> Self {
        EpochWindow {
            min_year: epoch,
            max_year: epoch + MODEL_VALIDITY_YEARS,
        }
    }

    pub fn contains(&self, year: DecimalYear) -> bool {
        year >= self.min_year && year <= self.max_year
    }
}

/// A fully resolved query: every literal collapsed to plain decimal fields in
/// canonical units, ready for a field model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedQuery {
    pub year: DecimalYear,
    pub latitude: Degree,
    pub longitude: Degree,
    pub altitude_km: Kilometers,
    pub frame: ReferenceFrame,
}

/// One reason a record cannot (or should not) be evaluated. Each carries the
/// field concerned and the offending raw text; the driver attaches the line
/// number.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryRejection {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("unrecognized date {0}")]
    UnrecognizedDate(String),

    #[error("date range {0} not allowed in file mode")]
    RangeNotAllowed(String),

    #[error("date {year:.1} outside model range {min:.1} to {max:.1}")]
    DateOutOfRange { year: f64, min: f64, max: f64 },

    #[error("unrecognized height reference {0}")]
    UnrecognizedFrame(String),

    #[error("altitude {raw} outside model range {min:.1} to {max:.1} {unit}")]
    AltitudeOutOfRange {
        raw: String,
        min: f64,
        max: f64,
        unit: &'static str,
    },

    #[error("latitude {lat} and longitude {lon} use different formats")]
    MixedAngleForms { lat: String, lon: String },

    #[error("non-decimal {field} {raw} not allowed in file mode")]
    NonDecimalAngle { field: &'static str, raw: String },
}

/// Outcome of validating one record: accepted with a normalized query, or
/// rejected with every reason found. An out-of-window date only warns: the
/// model extrapolates a few years past its window, the user just gets told.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Accepted {
        query: NormalizedQuery,
        warnings: Vec<QueryRejection>,
    },
    Rejected {
        errors: Vec<QueryRejection>,
        warnings: Vec<QueryRejection>,
    },
}

/// Check an assembled record against the model's domain constraints.
///
/// Rejections accumulate rather than short-circuit, so one pass reports every
/// problem a record has. Nothing here touches the field model; a rejected
/// record never reaches it.
pub fn validate(
    raw: &RawRecord,
    parsed: &ParsedRecord,
    window: EpochWindow,
    mode: QueryMode,
) -> ValidationOutcome {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let raw_text = |position: usize| raw.token(position).unwrap_or("").to_string();

    // date
    let mut year = None;
    match &parsed.date {
        None => errors.push(QueryRejection::MissingField("date")),
        Some(date) => {
            if date.is_range() && mode == QueryMode::File {
                errors.push(QueryRejection::RangeNotAllowed(raw_text(0)));
            }
            let start = date.start_year();
            if start == 0.0 {
                errors.push(QueryRejection::UnrecognizedDate(raw_text(0)));
            } else {
                if !window.contains(start) {
                    warnings.push(QueryRejection::DateOutOfRange {
                        year: start,
                        min: window.min_year,
                        max: window.max_year,
                    });
                }
                year = Some(start);
            }
        }
    }

    // reference frame
    if parsed.frame.is_none() {
        if raw.arity() >= 2 {
            errors.push(QueryRejection::UnrecognizedFrame(raw_text(1)));
        } else {
            errors.push(QueryRejection::MissingField("coordinate system"));
        }
    }

    // altitude, checked against the window scaled into its own unit
    let mut altitude_km = None;
    match &parsed.altitude {
        None => errors.push(QueryRejection::MissingField("altitude")),
        Some(altitude) => {
            let scale = altitude.unit.scale_from_kilometers();
            let min = MIN_ALTITUDE_KM * scale;
            let max = MAX_ALTITUDE_KM * scale;
            if altitude.magnitude < min || altitude.magnitude > max {
                errors.push(QueryRejection::AltitudeOutOfRange {
                    raw: raw_text(2),
                    min,
                    max,
                    unit: altitude.unit.label(),
                });
            } else {
                altitude_km = Some(altitude.to_kilometers());
            }
        }
    }

    // angles
    if parsed.latitude.is_none() {
        errors.push(QueryRejection::MissingField("latitude"));
    }
    if parsed.longitude.is_none() {
        errors.push(QueryRejection::MissingField("longitude"));
    }
    if let (Some(lat), Some(lon)) = (&parsed.latitude, &parsed.longitude) {
        if lat.is_decimal() != lon.is_decimal() {
            errors.push(QueryRejection::MixedAngleForms {
                lat: raw_text(3),
                lon: raw_text(4),
            });
        }
        if mode == QueryMode::File {
            if !lat.is_decimal() {
                errors.push(QueryRejection::NonDecimalAngle {
                    field: "latitude",
                    raw: raw_text(3),
                });
            }
            if !lon.is_decimal() {
                errors.push(QueryRejection::NonDecimalAngle {
                    field: "longitude",
                    raw: raw_text(4),
                });
            }
        }
    }

    if !errors.is_empty() {
        return ValidationOutcome::Rejected { errors, warnings };
    }

    let query = NormalizedQuery {
        year: year.expect("validated above"),
        latitude: parsed.latitude.as_ref().expect("validated above").to_decimal(),
        longitude: parsed.longitude.as_ref().expect("validated above").to_decimal(),
        altitude_km: altitude_km.expect("validated above"),
        frame: parsed.frame.expect("validated above"),
    };

    ValidationOutcome::Accepted { query, warnings }
}
