use crate::constants::DecimalYear;
use crate::lodestone_errors::LodestoneError;
use crate::time::julian_decimal_year;

/// A calendar date as supplied in a `Y,M,D` literal. Month and day stay 0 when
/// not supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn to_decimal_year(&self) -> DecimalYear {
        julian_decimal_year(self.year, self.month, self.day)
    }
}

/// A date literal, tagged with the sub-syntax that supplied it.
///
/// Ranges keep their step as supplied; an unset step, like equal endpoints,
/// makes the range resolve to its start date alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateSpec {
    /// A single decimal year, e.g. `2013.7`
    Decimal(DecimalYear),
    /// Two decimal years and an optional step, e.g. `2010.0-2012.0-0.5`
    DecimalRange {
        start: DecimalYear,
        end: DecimalYear,
        step: Option<f64>,
    },
    /// A single calendar date, e.g. `2013,7,1`
    Calendar(CalendarDate),
    /// Two calendar dates and an optional step, e.g. `2010,1,1-2012,6,15`
    CalendarRange {
        start: CalendarDate,
        end: CalendarDate,
        step: Option<f64>,
    },
}

impl DateSpec {
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            DateSpec::DecimalRange { .. } | DateSpec::CalendarRange { .. }
        )
    }

    /// Decimal year of the (start) date.
    pub fn start_year(&self) -> DecimalYear {
        match *self {
            DateSpec::Decimal(year) => year,
            DateSpec::DecimalRange { start, .. } => start,
            DateSpec::Calendar(date) => date.to_decimal_year(),
            DateSpec::CalendarRange { start, .. } => start.to_decimal_year(),
        }
    }

    /// Every decimal year this spec evaluates at.
    ///
    /// Single dates yield themselves. A range walks from start to end inclusive
    /// by its step; without a positive step, or with equal endpoints, it
    /// degenerates to the start date alone.
    pub fn resolve_years(&self) -> Vec<DecimalYear> {
        let (start, end, step) = match *self {
            DateSpec::Decimal(year) => (year, year, None),
            DateSpec::Calendar(date) => {
                let year = date.to_decimal_year();
                (year, year, None)
            }
            DateSpec::DecimalRange { start, end, step } => (start, end, step),
            DateSpec::CalendarRange { start, end, step } => {
                (start.to_decimal_year(), end.to_decimal_year(), step)
            }
        };

        match step {
            Some(step) if step > 0.0 && end > start => {
                let mut years = Vec::new();
                let mut year = start;
                // tolerance keeps the endpoint when the step lands on it
                while year <= end + 1e-9 {
                    years.push(year);
                    year += step;
                }
                years
            }
            _ => vec![start],
        }
    }
}

/// Parse one date token.
///
/// A dash splits a range (a second dash separates the step), and within each
/// side a comma selects the calendar `Y,M,D` form over decimal years. Both
/// sides of a range must use the same form.
///
/// Arguments
/// ---------------
/// * `text`: the raw date token
///
/// Return
/// ----------
/// * the recognized [`DateSpec`], or an error naming the offending text
pub fn parse_date(text: &str) -> Result<DateSpec, LodestoneError> {
    match text.split_once('-') {
        Some((start_text, tail)) => {
            let (end_text, step) = match tail.split_once('-') {
                Some((end_text, step_text)) => {
                    let step = step_text.parse::<f64>().map_err(|_| {
                        LodestoneError::InvalidDateLiteral(text.to_string())
                    })?;
                    (end_text, Some(step))
                }
                None => (tail, None),
            };

            match (parse_side(start_text, text)?, parse_side(end_text, text)?) {
                (Side::Decimal(start), Side::Decimal(end)) => {
                    Ok(DateSpec::DecimalRange { start, end, step })
                }
                (Side::Calendar(start), Side::Calendar(end)) => {
                    Ok(DateSpec::CalendarRange { start, end, step })
                }
                _ => Err(LodestoneError::MixedDateForms(text.to_string())),
            }
        }
        None => Ok(match parse_side(text, text)? {
            Side::Decimal(year) => DateSpec::Decimal(year),
            Side::Calendar(date) => DateSpec::Calendar(date),
        }),
    }
}

enum Side {
    Decimal(DecimalYear),
    Calendar(CalendarDate),
}

fn parse_side(text: &str, raw: &str) -> Result<Side, LodestoneError> {
    if text.contains(',') {
        let mut parts = text.splitn(3, ',');
        let year = parts
            .next()
            .unwrap_or("")
            .parse::<i32>()
            .map_err(|_| LodestoneError::InvalidDateLiteral(raw.to_string()))?;
        let month = uint_component(parts.next(), raw)?;
        let day = uint_component(parts.next(), raw)?;

        if month > 12 {
            return Err(LodestoneError::InvalidDateLiteral(raw.to_string()));
        }

        Ok(Side::Calendar(CalendarDate { year, month, day }))
    } else {
        text.parse::<f64>()
            .map(Side::Decimal)
            .map_err(|_| LodestoneError::InvalidDateLiteral(raw.to_string()))
    }
}

fn uint_component(part: Option<&str>, raw: &str) -> Result<u32, LodestoneError> {
    match part {
        None | Some("") => Ok(0),
        Some(text) => text
            .parse::<u32>()
            .map_err(|_| LodestoneError::InvalidDateLiteral(raw.to_string())),
    }
}

#[cfg(test)]
mod date_test {
    use super::*;

    #[test]
    fn test_decimal_date() {
        assert_eq!(parse_date("2013.7").unwrap(), DateSpec::Decimal(2013.7));
        assert_eq!(parse_date("0").unwrap(), DateSpec::Decimal(0.0));
    }

    #[test]
    fn test_calendar_date() {
        assert_eq!(
            parse_date("2013,7,1").unwrap(),
            DateSpec::Calendar(CalendarDate { year: 2013, month: 7, day: 1 })
        );
        // missing month and day default to 0
        assert_eq!(
            parse_date("2013,7").unwrap(),
            DateSpec::Calendar(CalendarDate { year: 2013, month: 7, day: 0 })
        );
    }

    #[test]
    fn test_decimal_range() {
        assert_eq!(
            parse_date("2010.0-2012.0").unwrap(),
            DateSpec::DecimalRange { start: 2010.0, end: 2012.0, step: None }
        );
        assert_eq!(
            parse_date("2010.0-2012.0-0.5").unwrap(),
            DateSpec::DecimalRange { start: 2010.0, end: 2012.0, step: Some(0.5) }
        );
    }

    #[test]
    fn test_calendar_range() {
        assert_eq!(
            parse_date("2010,1,1-2012,6,15").unwrap(),
            DateSpec::CalendarRange {
                start: CalendarDate { year: 2010, month: 1, day: 1 },
                end: CalendarDate { year: 2012, month: 6, day: 15 },
                step: None,
            }
        );
    }

    #[test]
    fn test_mixed_range_forms_rejected() {
        assert!(matches!(
            parse_date("2010.0-2012,6,15"),
            Err(LodestoneError::MixedDateForms(_))
        ));
    }

    #[test]
    fn test_malformed_dates() {
        assert!(parse_date("navidad").is_err());
        assert!(parse_date("2010,13,1").is_err());
        assert!(parse_date("2010,x").is_err());
        assert!(parse_date("2010.0-2012.0-fast").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_range_resolution() {
        let years = parse_date("2010.0-2012.0-1.0").unwrap().resolve_years();
        assert_eq!(years, vec![2010.0, 2011.0, 2012.0]);

        // no step: the range degenerates to its start date
        let years = parse_date("2010.0-2012.0").unwrap().resolve_years();
        assert_eq!(years, vec![2010.0]);

        let years = parse_date("2013.7").unwrap().resolve_years();
        assert_eq!(years, vec![2013.7]);
    }
}
