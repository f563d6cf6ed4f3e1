//! Error types for the suuji-core library.

use thiserror::Error;

/// Main error type for the suuji library.
#[derive(Error, Debug)]
pub enum SuujiError {
    /// Numeral conversion error.
    #[error("numeral error: {0}")]
    Numeral(#[from] NumeralError),

    /// Entity extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while converting a numeral string to an integer.
///
/// Every variant carries the offending input so callers can report it verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumeralError {
    /// Nothing left to convert.
    #[error("empty numeral input")]
    Empty,

    /// A character outside the numeral alphabet and the decimal digits.
    #[error("unrecognized character {character:?} in {input:?}")]
    UnrecognizedCharacter { character: char, input: String },

    /// A zero inside a traditional fragment longer than one character.
    #[error("unexpected zero in {0:?}")]
    StrayZero(String),

    /// Two digits in a row without a unit between them.
    #[error("consecutive digits without a unit in {0:?}")]
    RepeatedRegular(String),

    /// A unit that is not smaller than the unit before it (十百, 千千).
    #[error("units out of descending order in {0:?}")]
    UnitOutOfOrder(String),

    /// A scale multiplier (万, 億, ...) where only values below ten thousand are allowed.
    #[error("multiplier above ten thousand in {0:?}")]
    MultipleNotAllowed(String),

    /// A positional unit or multiplier in a digit-by-digit numeral.
    #[error("unit or multiplier in western style numeral {0:?}")]
    UnitNotAllowed(String),

    /// A negative literal.
    #[error("negative value in {0:?}")]
    Negative(String),

    /// A value of ten thousand or more where a smaller one is required.
    #[error("value of {0:?} is not below ten thousand")]
    AboveTenThousand(String),

    /// A plain decimal string passed to the traditional parser.
    #[error("{0:?} is a plain decimal number, not a traditional numeral")]
    NotTraditional(String),

    /// Splitting on multipliers left nothing to convert.
    #[error("no parsable token in {0:?}")]
    NoParsableToken(String),

    /// The value does not fit in a signed 64-bit integer.
    #[error("value of {0:?} overflows")]
    Overflow(String),
}

/// Errors related to entity extraction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// A converted value violates its domain rules.
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// A literal token not found in its fixed vocabulary.
    #[error("unknown {field} token {value:?}")]
    UnknownToken { field: String, value: String },

    /// Numeral conversion of a captured field failed.
    #[error("failed to convert {field}: {source}")]
    Numeral {
        field: String,
        #[source]
        source: NumeralError,
    },

    /// A field required by a post-processor is missing.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A composite date lacks the components needed for resolution.
    #[error("cannot resolve date: {0}")]
    Unresolvable(String),

    /// A pattern template failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ExtractionError {
    pub(crate) fn invalid(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn numeral(field: impl Into<String>, source: NumeralError) -> Self {
        Self::Numeral {
            field: field.into(),
            source,
        }
    }
}

/// Result type for the suuji library.
pub type Result<T> = std::result::Result<T, SuujiError>;
