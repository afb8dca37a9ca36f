use thiserror::Error;

#[derive(Error, Debug)]
pub enum LodestoneError {
    #[error("Invalid date literal: {0}")]
    InvalidDateLiteral(String),

    #[error("Date range mixes decimal and calendar forms: {0}")]
    MixedDateForms(String),

    #[error("Invalid altitude literal: {0}")]
    InvalidAltitudeLiteral(String),

    #[error("Invalid angle literal: {0}")]
    InvalidAngleLiteral(String),

    #[error("Token exceeds {limit} bytes: {token}")]
    TokenTooLong { token: String, limit: usize },

    #[error("A record must contain between 1 and 5 fields, got {0}")]
    WrongFieldCount(usize),

    #[error("Malformed {field} field: {source}")]
    FieldFormat {
        field: &'static str,
        #[source]
        source: Box<LodestoneError>,
    },

    #[error("Line {line}: expected 5 fields, found {found}")]
    ShortRecord { line: usize, found: usize },

    #[error("Line {line}: {reasons}")]
    RecordRejected { line: usize, reasons: String },

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Batch run aborted at line {line}: {reason}")]
    BatchAborted { line: usize, reason: String },
}

impl LodestoneError {
    /// Tag a recognizer failure with the positional field it came from.
    pub(crate) fn for_field(field: &'static str) -> impl FnOnce(LodestoneError) -> LodestoneError {
        move |source| LodestoneError::FieldFormat {
            field,
            source: Box::new(source),
        }
    }
}
