use crate::constants::Degree;
use crate::conversion::degrees_minutes_seconds_to_decimal;
use crate::lodestone_errors::LodestoneError;

/// A latitude or longitude literal, tagged with the sub-syntax that supplied it.
///
/// Latitude and longitude of one record must carry the same tag; the validator
/// rejects mixed records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleSpec {
    /// Signed decimal degrees, e.g. `-70.3`
    Decimal(Degree),
    /// Whole degrees, arcminutes and arcseconds, e.g. `-70,18,0`
    DegMinSec { deg: i32, min: i32, sec: i32 },
}

impl AngleSpec {
    pub fn is_decimal(&self) -> bool {
        matches!(self, AngleSpec::Decimal(_))
    }

    /// Resolve to decimal degrees, whatever the input syntax was.
    pub fn to_decimal(&self) -> Degree {
        match *self {
            AngleSpec::Decimal(value) => value,
            AngleSpec::DegMinSec { deg, min, sec } => {
                degrees_minutes_seconds_to_decimal(deg, min, sec)
            }
        }
    }
}

/// Parse one angle token.
///
/// A comma selects the `deg[,min[,sec]]` triplet form, where missing or empty
/// minute and second components default to 0. Anything else is parsed as
/// signed decimal degrees.
///
/// Arguments
/// ---------------
/// * `text`: the raw angle token
///
/// Return
/// ----------
/// * the recognized [`AngleSpec`], or an error naming the offending text
pub fn parse_angle(text: &str) -> Result<AngleSpec, LodestoneError> {
    if text.contains(',') {
        let mut parts = text.splitn(3, ',');
        let deg = int_component(parts.next(), text)?;
        let min = int_component(parts.next(), text)?;
        let sec = int_component(parts.next(), text)?;
        Ok(AngleSpec::DegMinSec { deg, min, sec })
    } else {
        text.parse::<f64>()
            .map(AngleSpec::Decimal)
            .map_err(|_| LodestoneError::InvalidAngleLiteral(text.to_string()))
    }
}

/// A missing or empty triplet component counts as 0, so `10,30` reads as
/// 10 degrees 30 minutes 0 seconds.
fn int_component(part: Option<&str>, raw: &str) -> Result<i32, LodestoneError> {
    match part {
        None | Some("") => Ok(0),
        Some(text) => text
            .parse::<i32>()
            .map_err(|_| LodestoneError::InvalidAngleLiteral(raw.to_string())),
    }
}

#[cfg(test)]
mod angle_test {
    use super::*;

    #[test]
    fn test_decimal_angle() {
        assert_eq!(parse_angle("-70.3").unwrap(), AngleSpec::Decimal(-70.3));
        assert_eq!(parse_angle("12.45").unwrap(), AngleSpec::Decimal(12.45));
        assert_eq!(parse_angle("0.0").unwrap(), AngleSpec::Decimal(0.0));
    }

    #[test]
    fn test_decimal_angle_round_trips_at_input_precision() {
        let AngleSpec::Decimal(value) = parse_angle("-70.3").unwrap() else {
            panic!("expected decimal form");
        };
        assert_eq!(format!("{value:.1}"), "-70.3");

        let AngleSpec::Decimal(value) = parse_angle("12.45").unwrap() else {
            panic!("expected decimal form");
        };
        assert_eq!(format!("{value:.2}"), "12.45");
    }

    #[test]
    fn test_triplet_angle() {
        assert_eq!(
            parse_angle("-70,18,0").unwrap(),
            AngleSpec::DegMinSec { deg: -70, min: 18, sec: 0 }
        );
        // missing minute and second components default to 0
        assert_eq!(
            parse_angle("10,30").unwrap(),
            AngleSpec::DegMinSec { deg: 10, min: 30, sec: 0 }
        );
        assert_eq!(
            parse_angle("10,").unwrap(),
            AngleSpec::DegMinSec { deg: 10, min: 0, sec: 0 }
        );
    }

    #[test]
    fn test_triplet_resolves_through_dms_rule() {
        assert_eq!(parse_angle("-70,18,0").unwrap().to_decimal(), -(70.0 + 18.0 / 60.0));
        assert_eq!(parse_angle("0,-30").unwrap().to_decimal(), -0.5);
    }

    #[test]
    fn test_malformed_angles() {
        assert!(parse_angle("north").is_err());
        assert!(parse_angle("12.4.5").is_err());
        assert!(parse_angle("10,3x,0").is_err());
        assert!(parse_angle("").is_err());
    }
}
