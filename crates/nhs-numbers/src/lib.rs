//! # NHS Numbers
//!
//! Generates NHS number source files for GP2GP test runs.
//!
//! The caller describes how often each NHS number should appear with a literal mapping, for
//! example `{'9000000009': 2, '9000000017': 1}`. The generator repeats every NHS number by its
//! count, shuffles the whole list and writes it to a file, one NHS number per line:
//!
//! ```text
//! 9000000009
//! 9000000017
//! 9000000009
//! ```
//!
//! The mapping is read by a restricted literal parser ([`parse_literal`]) that only accepts
//! literal data (mappings, sequences, numbers, strings, booleans and `None`). Nothing in the
//! input is ever evaluated.
//!
//! All validation completes before the destination file is opened, so invalid input never
//! truncates an existing file.

mod constants;
mod counts;
mod generator;
mod literal;

pub use constants::SEED_ENV_VAR;
pub use counts::NhsNumberCounts;
pub use generator::{
    generate_file, seed_from_env_value, shuffle, write_nhs_numbers, GeneratedFile,
    GeneratorConfig,
};
pub use literal::{parse_literal, Literal};

/// Errors raised by the restricted literal parser.
///
/// Offsets are byte offsets into the parsed text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),

    #[error("bytes literal at offset {0} may only contain ASCII characters")]
    NonAsciiBytes(usize),

    #[error("cannot mix bytes and text literals at offset {0}")]
    MixedStringKinds(usize),

    #[error("invalid number literal '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("unknown name '{name}' at offset {offset} (only True, False and None are allowed)")]
    UnknownName { name: String, offset: usize },

    #[error("unhashable {kind} at offset {offset} cannot be a mapping key or set element")]
    Unhashable { kind: &'static str, offset: usize },

    #[error("unexpected trailing input at offset {0}")]
    TrailingInput(usize),

    #[error("literal nesting exceeds maximum depth of {0}")]
    TooDeep(usize),
}

/// Type alias for Results that can fail with a [`LiteralError`].
pub type LiteralResult<T> = Result<T, LiteralError>;

/// Errors raised while generating an NHS number source file.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Missing file name")]
    MissingFileName,

    #[error("Missing input data")]
    MissingInputData,

    #[error("invalid input data literal: {0}")]
    Literal(#[from] LiteralError),

    #[error("Input data is not a valid mapping")]
    NotAMapping,

    #[error("Input data dictionary must have positive integer numbers as values")]
    InvalidCount,

    #[error("Input data dictionary must have text identifiers as keys")]
    NonTextKey,

    #[error("requested {0} NHS numbers, which is more than can be held in memory")]
    TooManyNhsNumbers(u128),

    #[error("invalid shuffle seed '{0}': expected an unsigned integer")]
    InvalidSeed(String),

    #[error("failed to create source file: {0}")]
    FileCreate(std::io::Error),

    #[error("failed to write source file: {0}")]
    FileWrite(std::io::Error),
}

/// Type alias for Results that can fail with a [`GeneratorError`].
pub type GeneratorResult<T> = Result<T, GeneratorError>;
