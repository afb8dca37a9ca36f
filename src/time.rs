use crate::constants::DecimalYear;

/// Day-of-year of the first day of each month in a non-leap year, indexed by
/// month number. Index 0 backs the "month not supplied" case and stays 0.
const AGGREGATE_FIRST_DAY_OF_MONTH: [u32; 13] =
    [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Convert a calendar date to a decimal year.
///
/// The day of year comes from the fixed non-leap cumulative table above. A leap
/// day is added only for dates past February, and only when the year is
/// divisible by 4; the century years 1900 and 2100 are explicitly not leap
/// years. Downstream consumers expect dates computed with exactly this rule,
/// not the proleptic Gregorian calendar.
///
/// Arguments
/// ---------------
/// * `year`: calendar year
/// * `month`: month number, at most 12 (0 when not supplied)
/// * `day`: day of month (0 when not supplied)
///
/// Return
/// ----------
/// * the date as a year plus a fractional-year offset
pub fn julian_decimal_year(year: i32, month: u32, day: u32) -> DecimalYear {
    let leap = year % 4 == 0 && year != 1900 && year != 2100 && month > 2;

    let day_of_year = AGGREGATE_FIRST_DAY_OF_MONTH[month as usize] as f64 + day as f64 - 1.0
        + if leap { 1.0 } else { 0.0 };

    let days_in_year = if leap { 366.0 } else { 365.0 };

    year as f64 + day_of_year / days_in_year
}
