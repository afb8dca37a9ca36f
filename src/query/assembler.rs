use crate::constants::{RawTokens, MAX_TOKEN_LEN, RECORD_FIELDS};
use crate::literals::{
    parse_altitude, parse_angle, parse_date, parse_frame, AltitudeSpec, AngleSpec, DateSpec,
    ParseContext, ReferenceFrame,
};
use crate::lodestone_errors::LodestoneError;

/// The raw tokens of one query record, in positional order: date, reference
/// frame, altitude, latitude, longitude.
///
/// Missing trailing tokens are permitted; missing leading ones are not, so a
/// token is only meaningful when all tokens before it are present. Each record
/// is owned by one driver iteration and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    tokens: RawTokens,
}

impl RawRecord {
    /// Build a record from raw tokens, enforcing the 1–5 arity and the
    /// per-token length bound. Over-long tokens are an explicit error, never
    /// silently truncated.
    pub fn new<I>(tokens: I) -> Result<Self, LodestoneError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let tokens: RawTokens = tokens.into_iter().map(Into::into).collect();

        if tokens.is_empty() || tokens.len() > RECORD_FIELDS {
            return Err(LodestoneError::WrongFieldCount(tokens.len()));
        }
        if let Some(token) = tokens.iter().find(|t| t.len() > MAX_TOKEN_LEN) {
            return Err(LodestoneError::TokenTooLong {
                token: token.clone(),
                limit: MAX_TOKEN_LEN,
            });
        }

        Ok(RawRecord { tokens })
    }

    pub fn arity(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Raw text of the field at `position` (0-based), when supplied.
    pub fn token(&self, position: usize) -> Option<&str> {
        self.tokens.get(position).map(String::as_str)
    }
}

/// One record after literal recognition. Fields whose token was not supplied
/// stay `None`; the validator turns absence into a field-specific rejection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRecord {
    pub date: Option<DateSpec>,
    pub frame: Option<ReferenceFrame>,
    pub altitude: Option<AltitudeSpec>,
    pub latitude: Option<AngleSpec>,
    pub longitude: Option<AngleSpec>,
}

/// Run the literal recognizers over a record.
///
/// Dispatches on the record's arity: exactly the recognizers whose position is
/// covered run, from the last supplied field back to the date. A fresh
/// [`ParseContext`] carries the altitude-unit state for this one record.
///
/// An unrecognized reference-frame letter is not a parse error; the field stays
/// `None` and the validator reports it with the raw text. Every other malformed
/// token aborts assembly with an error naming its field.
pub fn assemble(record: &RawRecord) -> Result<ParsedRecord, LodestoneError> {
    let mut ctx = ParseContext::default();
    let mut parsed = ParsedRecord::default();
    let tokens = record.tokens();

    if tokens.len() >= 5 {
        parsed.longitude =
            Some(parse_angle(&tokens[4]).map_err(LodestoneError::for_field("longitude"))?);
    }
    if tokens.len() >= 4 {
        parsed.latitude =
            Some(parse_angle(&tokens[3]).map_err(LodestoneError::for_field("latitude"))?);
    }
    if tokens.len() >= 3 {
        parsed.altitude = Some(
            parse_altitude(&tokens[2], &mut ctx)
                .map_err(LodestoneError::for_field("altitude"))?,
        );
    }
    if tokens.len() >= 2 {
        parsed.frame = parse_frame(&tokens[1]);
    }
    parsed.date = Some(parse_date(&tokens[0]).map_err(LodestoneError::for_field("date"))?);

    Ok(parsed)
}
