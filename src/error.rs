//! Error types for corpus reading and conversion.

use thiserror::Error;

/// Errors that can occur while reading or converting a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A line does not have the shape the format requires.
    #[error("malformed line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    /// A field name is not part of the active schema.
    #[error("unknown field: {name}")]
    UnknownField { name: String },

    /// A word record does not carry the requested column.
    #[error("missing column: {field}")]
    MissingColumn { field: String },

    /// A token id field did not parse as a number.
    #[error("bad token id: {value:?}")]
    BadTokenId { value: String },

    /// The companion stream ran out while the primary chunk still had lines.
    #[error("companion stream exhausted at line {line}")]
    CompanionMismatch { line: usize },

    /// A column batch does not line up with the sentence it is applied to.
    #[error("column batch has {actual} rows, sentence has {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A multiword placeholder run starts at the first token, so there is
    /// no preceding real token to merge into.
    #[error("placeholder run at the first token has no merge target")]
    LeadingPlaceholderRun,

    /// A read from an input stream failed.
    #[error("read error at line {line}: {message}")]
    Read { line: usize, message: String },

    /// Opening or reading a corpus file failed.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

/// Result type for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;
