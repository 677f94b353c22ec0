//! Parse failure taxonomy for the command-line surface.

use thiserror::Error;

/// Errors produced while translating the argument vector.
///
/// Every variant is fatal: parsing is all-or-nothing and no partially
/// populated [`Cmdline`](crate::cli::Cmdline) escapes a failed parse.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A `-token` that matches no registered option.
    #[error("unknown option `{0}'")]
    UnknownOption(String),

    /// A value-bearing option at the end of the argument vector.
    #[error("option `{option}' requires a value")]
    MissingValue { option: &'static str },

    /// A value that does not parse as the option's declared type.
    #[error("bad value `{value}' for option `{option}' (expected {expected})")]
    TypeMismatch {
        option: &'static str,
        value: String,
        expected: &'static str,
    },

    /// More than one of the mutually exclusive raw-data formats.
    #[error("conflicting raw-data formats {supplied}: choose one of -pkmb, -bcpm, -wapp")]
    ConflictingFormats { supplied: String },

    /// Empty argument vector, not even a program name.
    #[error("empty argument vector")]
    MissingProgramName,
}

/// Result type alias for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;
