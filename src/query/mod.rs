//! # Query assembly and validation
//!
//! Turns the 1–5 raw tokens of a record into a [`NormalizedQuery`], or into a
//! structured list of reasons why not.
//!
//! The [`assembler`] decides, from how many tokens were supplied, which literal
//! recognizers to run; the [`validator`] checks the assembled record against
//! the model's domain constraints and resolves every literal to plain decimal
//! fields.

pub mod assembler;
pub mod validator;

pub use assembler::{assemble, ParsedRecord, RawRecord};
pub use validator::{
    validate, EpochWindow, NormalizedQuery, QueryMode, QueryRejection, ValidationOutcome,
};
