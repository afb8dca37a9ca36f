use crate::constants::Degree;

/// Convert a degrees, minutes, seconds triplet to decimal degrees.
///
/// The magnitude is `|sec|/3600 + |min|/60 + |deg|`. The sign follows the first
/// non-zero component in the order degrees, minutes, seconds, so `(0, -30, 0)`
/// and `(0, 0, -15)` both come out negative.
///
/// Arguments
/// ---------------
/// * `degrees`: whole degrees, sign authoritative when non-zero
/// * `minutes`: whole arcminutes, sign authoritative when degrees are zero
/// * `seconds`: whole arcseconds, sign authoritative when degrees and minutes are zero
///
/// Return
/// ----------
/// * the angle in decimal degrees
pub fn degrees_minutes_seconds_to_decimal(degrees: i32, minutes: i32, seconds: i32) -> Degree {
    let deg = degrees as f64;
    let min = minutes as f64 / 60.0;
    let sec = seconds as f64 / 3600.0;

    let decimal = sec.abs() + min.abs() + deg.abs();

    let negative = deg < 0.0 || (deg == 0.0 && (min < 0.0 || (min == 0.0 && sec < 0.0)));

    if negative {
        -decimal
    } else {
        decimal
    }
}
