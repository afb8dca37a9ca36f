//! # Batch driver
//!
//! Owns the record loop: read one line, parse it, validate it, hand it to the
//! field model, format the result, repeat until end of file.
//!
//! ## Overview
//!
//! Every record walks the same stations (parsing, validation, computation,
//! formatting) and the driver resets all per-record state between lines; the
//! only state that survives an iteration is the [`BatchState`] counters. A
//! malformed record is reported with its line number and skipped, unless the
//! run is configured to fail fast, in which case the whole run aborts. A
//! partially read final line is never processed past end of file.
//!
//! Single-record evaluation reuses the same stations for the 1–5 tokens given
//! on the command line, with the relaxed interactive rules (sexagesimal angles
//! and date ranges allowed).

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use camino::Utf8Path;
use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::constants::RECORD_FIELDS;
use crate::display;
use crate::lodestone_errors::LodestoneError;
use crate::model::FieldModel;
use crate::query::{
    assemble, validate, EpochWindow, NormalizedQuery, QueryMode, RawRecord, ValidationOutcome,
};

/// How the driver reacts to malformed records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchConfig {
    /// Abort the whole run on the first malformed record instead of skipping it.
    pub fail_fast: bool,
}

/// Per-run counters, owned and mutated only by the driver loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchState {
    pub line: usize,
    pub eof: bool,
    pub error: bool,
}

/// What a completed batch run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Non-blank lines read from the input file.
    pub lines_read: usize,
    /// Result rows written to the output file.
    pub rows_written: usize,
    /// Records reported and skipped.
    pub skipped: usize,
}

/// Process a coordinate file: one query per line, one result row per valid
/// query.
///
/// The output starts with the fixed header row; each result row echoes the
/// five input fields verbatim before the computed columns. File handles are
/// scoped to this call and released on every exit path.
///
/// Arguments
/// ---------------
/// * `model`: the field model consulted for every valid record
/// * `input`: path of the coordinate file, one record per line
/// * `output`: path of the result file, created or truncated
/// * `config`: skip-or-abort policy for malformed records
///
/// Return
/// ----------
/// * the run's [`BatchSummary`], or the error that aborted it
pub fn run_file(
    model: &dyn FieldModel,
    input: &Utf8Path,
    output: &Utf8Path,
    config: BatchConfig,
) -> Result<BatchSummary, LodestoneError> {
    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(output)?);
    writeln!(writer, "{}", display::OUTPUT_HEADER)?;

    let window = EpochWindow::from_epoch(model.epoch());
    let mut state = BatchState::default();
    let mut summary = BatchSummary::default();

    for line in reader.lines() {
        let line = line?;
        state.line += 1;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            debug!(line = state.line, "blank line skipped");
            continue;
        }
        summary.lines_read += 1;

        match process_line(model, window, &tokens, state.line) {
            Ok(row) => {
                writeln!(writer, "{row}")?;
                summary.rows_written += 1;
            }
            Err(reason) => {
                state.error = true;
                warn!(line = state.line, %reason, "record skipped");
                if config.fail_fast {
                    return Err(LodestoneError::BatchAborted {
                        line: state.line,
                        reason: reason.to_string(),
                    });
                }
                summary.skipped += 1;
            }
        }
    }
    state.eof = true;
    writer.flush()?;

    info!(
        lines = summary.lines_read,
        written = summary.rows_written,
        skipped = summary.skipped,
        "batch complete"
    );
    Ok(summary)
}

/// One record through all stations: parse, validate, compute, format.
fn process_line(
    model: &dyn FieldModel,
    window: EpochWindow,
    tokens: &[&str],
    line: usize,
) -> Result<String, LodestoneError> {
    if tokens.len() < RECORD_FIELDS {
        return Err(LodestoneError::ShortRecord {
            line,
            found: tokens.len(),
        });
    }

    // content past the fifth field is ignored
    let record = RawRecord::new(tokens[..RECORD_FIELDS].iter().copied())?;
    let parsed = assemble(&record)?;

    match validate(&record, &parsed, window, QueryMode::File) {
        ValidationOutcome::Accepted { query, warnings } => {
            for warning in &warnings {
                warn!(line, %warning, "validation warning");
            }
            let elements = model.field_at(&query);
            Ok(display::format_row(record.tokens(), &elements))
        }
        ValidationOutcome::Rejected { errors, warnings } => {
            for warning in &warnings {
                warn!(line, %warning, "validation warning");
            }
            Err(LodestoneError::RecordRejected {
                line,
                reasons: errors.iter().join("; "),
            })
        }
    }
}

/// Evaluate a single record given as command-line tokens.
///
/// Runs the same stations as file mode under the relaxed interactive rules. A
/// date range with a positive step expands to one row per step from start to
/// end inclusive; otherwise the start date alone is evaluated. Returns the
/// header plus one row per evaluated date, ready to print.
pub fn evaluate(
    model: &dyn FieldModel,
    tokens: &[String],
) -> Result<Vec<String>, LodestoneError> {
    let record = RawRecord::new(tokens.iter().cloned())?;
    let parsed = assemble(&record)?;
    let window = EpochWindow::from_epoch(model.epoch());

    match validate(&record, &parsed, window, QueryMode::Interactive) {
        ValidationOutcome::Accepted { query, warnings } => {
            for warning in &warnings {
                warn!(%warning, "validation warning");
            }

            let date = parsed.date.as_ref().expect("accepted queries carry a date");
            let mut rows = vec![display::OUTPUT_HEADER.to_string()];
            for year in date.resolve_years() {
                let stepped = NormalizedQuery { year, ..query };
                let elements = model.field_at(&stepped);
                rows.push(display::format_row(&echo_tokens(&record, date.is_range(), year), &elements));
            }
            Ok(rows)
        }
        ValidationOutcome::Rejected { errors, warnings } => {
            for warning in &warnings {
                warn!(%warning, "validation warning");
            }
            Err(LodestoneError::RecordRejected {
                line: 1,
                reasons: errors.iter().join("; "),
            })
        }
    }
}

/// Echo fields for a single-record row. Ranges substitute the stepped year for
/// the date field so every row names the date it was computed for.
fn echo_tokens(record: &RawRecord, is_range: bool, year: f64) -> Vec<String> {
    let mut tokens: Vec<String> = record.tokens().to_vec();
    if is_range {
        tokens[0] = format!("{year:.3}");
    }
    tokens
}
