use crate::constants::{Kilometers, FEET_PER_KILOMETER, METERS_PER_KILOMETER};
use crate::literals::ParseContext;
use crate::lodestone_errors::LodestoneError;

/// Unit of an altitude magnitude, selected by the token's leading letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltitudeUnit {
    Kilometers,
    Meters,
    Feet,
}

impl AltitudeUnit {
    /// Multiplier taking a value in kilometers into this unit.
    pub fn scale_from_kilometers(self) -> f64 {
        match self {
            AltitudeUnit::Kilometers => 1.0,
            AltitudeUnit::Meters => METERS_PER_KILOMETER,
            AltitudeUnit::Feet => FEET_PER_KILOMETER,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AltitudeUnit::Kilometers => "km",
            AltitudeUnit::Meters => "m",
            AltitudeUnit::Feet => "ft",
        }
    }
}

/// An altitude magnitude with the unit it was supplied in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeSpec {
    pub unit: AltitudeUnit,
    pub magnitude: f64,
}

impl AltitudeSpec {
    /// Canonical altitude in kilometers.
    pub fn to_kilometers(&self) -> Kilometers {
        self.magnitude / self.unit.scale_from_kilometers()
    }
}

/// Whether a height counts from mean sea level or from the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFrame {
    AboveMeanSeaLevel,
    AboveEllipsoid,
}

/// Recognize the reference-frame token.
///
/// Only the first character is significant, case-insensitively: `M` selects
/// mean sea level, `E` the WGS84 ellipsoid. Anything else yields `None` and is
/// reported by the validator, which still has the raw text.
pub fn parse_frame(text: &str) -> Option<ReferenceFrame> {
    match text.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('M') => Some(ReferenceFrame::AboveMeanSeaLevel),
        Some('E') => Some(ReferenceFrame::AboveEllipsoid),
        _ => None,
    }
}

/// Parse one altitude token.
///
/// The first character (case-insensitive) selects the unit: `K`, `M` or `F`.
/// When it matches none of these the character is still consumed and the
/// context's current unit is retained, so a bare magnitude keeps the default of
/// kilometers. The remainder must be a numeric magnitude; an empty remainder is
/// an error.
///
/// Arguments
/// ---------------
/// * `text`: the raw altitude token
/// * `ctx`: per-record recognizer state carrying the unit default
///
/// Return
/// ----------
/// * the recognized [`AltitudeSpec`], or an error naming the offending text
pub fn parse_altitude(
    text: &str,
    ctx: &mut ParseContext,
) -> Result<AltitudeSpec, LodestoneError> {
    let mut chars = text.chars();
    match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some('K') => ctx.unit = AltitudeUnit::Kilometers,
        Some('M') => ctx.unit = AltitudeUnit::Meters,
        Some('F') => ctx.unit = AltitudeUnit::Feet,
        _ => {}
    }

    let magnitude = chars.as_str();
    if magnitude.is_empty() {
        return Err(LodestoneError::InvalidAltitudeLiteral(text.to_string()));
    }

    let magnitude = magnitude
        .parse::<f64>()
        .map_err(|_| LodestoneError::InvalidAltitudeLiteral(text.to_string()))?;

    Ok(AltitudeSpec {
        unit: ctx.unit,
        magnitude,
    })
}

#[cfg(test)]
mod altitude_test {
    use super::*;

    #[test]
    fn test_unit_letters() {
        let mut ctx = ParseContext::default();
        assert_eq!(
            parse_altitude("K1000.13", &mut ctx).unwrap(),
            AltitudeSpec { unit: AltitudeUnit::Kilometers, magnitude: 1000.13 }
        );
        assert_eq!(
            parse_altitude("m1389.24", &mut ctx).unwrap(),
            AltitudeSpec { unit: AltitudeUnit::Meters, magnitude: 1389.24 }
        );
        assert_eq!(
            parse_altitude("F192133.73", &mut ctx).unwrap(),
            AltitudeSpec { unit: AltitudeUnit::Feet, magnitude: 192133.73 }
        );
        // the letter sticks in the context for the rest of the record
        assert_eq!(ctx.unit, AltitudeUnit::Feet);
    }

    #[test]
    fn test_feet_resolve_to_kilometers() {
        let mut ctx = ParseContext::default();
        let spec = parse_altitude("F30000", &mut ctx).unwrap();
        assert!((spec.to_kilometers() - 9.144).abs() < 1e-6);
    }

    #[test]
    fn test_unrecognized_letter_keeps_previous_unit() {
        let mut ctx = ParseContext::default();
        // the first character is consumed either way
        let spec = parse_altitude("X100", &mut ctx).unwrap();
        assert_eq!(spec, AltitudeSpec { unit: AltitudeUnit::Kilometers, magnitude: 100.0 });

        ctx.unit = AltitudeUnit::Feet;
        let spec = parse_altitude("X100", &mut ctx).unwrap();
        assert_eq!(spec.unit, AltitudeUnit::Feet);
    }

    #[test]
    fn test_missing_magnitude() {
        let mut ctx = ParseContext::default();
        assert!(parse_altitude("K", &mut ctx).is_err());
        assert!(parse_altitude("Kxyz", &mut ctx).is_err());
    }

    #[test]
    fn test_frame_letter() {
        assert_eq!(parse_frame("M"), Some(ReferenceFrame::AboveMeanSeaLevel));
        assert_eq!(parse_frame("e"), Some(ReferenceFrame::AboveEllipsoid));
        assert_eq!(parse_frame("Ellipsoid"), Some(ReferenceFrame::AboveEllipsoid));
        assert_eq!(parse_frame("G"), None);
        assert_eq!(parse_frame(""), None);
    }
}
