use thiserror::Error;

/// A line of input that cannot be turned into a token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("line {line}: malformed attribute segment {segment:?} (expected key=value)")]
    MalformedAttribute { line: usize, segment: String },
}
