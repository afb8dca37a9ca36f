//! # Fixed-column result rendering
//!
//! Renders computed [`FieldElements`] into the fixed-column text rows of the
//! output file. External tooling consumes these rows, so column widths, the
//! minutes-sign convention and the `NaN` marker are all fixed.
//!
//! ## Overview
//!
//! - Declination and inclination print as truncated whole degrees plus decimal
//!   minutes.
//! - Declination rates print in arcminutes per year (the stored rates are in
//!   degrees per year).
//! - An undefined declination (or declination rate) prints the literal `NaN`
//!   marker in place of its degree/minute pair, and X/Y (or their rates)
//!   cascade to the same marker when they are undefined too; every field that
//!   stays defined still prints.
//!
//! File rows repeat the five input fields verbatim before the computed
//! columns.

use itertools::Itertools;

use crate::constants::Degree;
use crate::model::FieldElements;

/// Header row naming every output column.
pub const OUTPUT_HEADER: &str = "Date Coord-System Altitude Latitude Longitude D_deg D_min \
I_deg I_min H_nT X_nT Y_nT Z_nT F_nT dD_min dI_min dH_nT dX_nT dY_nT dZ_nT dF_nT";

/// Split an angle into truncated whole degrees and decimal minutes.
///
/// Minutes take their absolute value once the degrees truncate to anything
/// non-zero; when the degrees truncate to exactly 0 the minutes keep their own
/// sign, so `-0.5` degrees prints as `0d -30m`. Downstream consumers of the
/// output rely on this asymmetry.
pub fn truncated_degrees_minutes(angle: Degree) -> (i32, f64) {
    let degrees = angle as i32;
    let mut minutes = (angle - degrees as f64) * 60.0;
    if degrees != 0 {
        minutes = minutes.abs();
    }
    (degrees, minutes)
}

/// Render the computed columns of one result row, main field then secular
/// variation, with the leading space of each group included.
pub fn format_elements(e: &FieldElements) -> String {
    let mut row = String::new();

    let (i_deg, i_min) = truncated_degrees_minutes(e.incl);
    if e.decl.is_nan() {
        if e.x.is_nan() {
            row.push_str(&format!(
                " NaN        {:4}d {:2.0}m  {:8.1}      NaN      NaN {:8.1} {:8.1}",
                i_deg, i_min, e.h, e.z, e.f
            ));
        } else {
            row.push_str(&format!(
                " NaN        {:4}d {:2.0}m  {:8.1} {:8.1} {:8.1} {:8.1} {:8.1}",
                i_deg, i_min, e.h, e.x, e.y, e.z, e.f
            ));
        }
    } else {
        let (d_deg, d_min) = truncated_degrees_minutes(e.decl);
        row.push_str(&format!(
            " {:4}d {:2.0}m  {:4}d {:2.0}m  {:8.1} {:8.1} {:8.1} {:8.1} {:8.1}",
            d_deg, d_min, i_deg, i_min, e.h, e.x, e.y, e.z, e.f
        ));
    }

    // rates of the angular elements are reported in arcminutes per year
    let d_dot = 60.0 * e.decl_dot;
    let i_dot = 60.0 * e.incl_dot;
    if d_dot.is_nan() {
        if e.x_dot.is_nan() {
            row.push_str(&format!(
                "      NaN  {:7.1}     {:8.1}      NaN      NaN {:8.1} {:8.1}",
                i_dot, e.h_dot, e.z_dot, e.f_dot
            ));
        } else {
            row.push_str(&format!(
                "      NaN  {:7.1}     {:8.1} {:8.1} {:8.1} {:8.1} {:8.1}",
                i_dot, e.h_dot, e.x_dot, e.y_dot, e.z_dot, e.f_dot
            ));
        }
    } else {
        row.push_str(&format!(
            " {:7.1}   {:7.1}     {:8.1} {:8.1} {:8.1} {:8.1} {:8.1}",
            d_dot, i_dot, e.h_dot, e.x_dot, e.y_dot, e.z_dot, e.f_dot
        ));
    }

    row
}

/// Render one file-mode row: the five input fields echoed verbatim, then the
/// computed columns.
pub fn format_row(tokens: &[String], elements: &FieldElements) -> String {
    let mut line = tokens.iter().join(" ");
    line.push(' ');
    line.push_str(&format_elements(elements));
    line
}
