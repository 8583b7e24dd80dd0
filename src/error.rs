use thiserror::Error;

/// Errors raised while scanning, decoding or splicing markers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    /// An opening delimiter with no closing delimiter before end of input
    #[error("unterminated marker at offset {position}: missing closing `{close}`")]
    UnterminatedMarker { position: usize, close: String },

    /// The text between the delimiters does not follow the marker grammar.
    /// `offset` is the absolute byte offset of the offending character.
    #[error("malformed marker `{raw}` at offset {offset}: {reason}")]
    MalformedBody {
        raw: String,
        position: usize,
        offset: usize,
        reason: String,
    },

    #[error("invalid delimiters: {0}")]
    InvalidDelimiters(&'static str),

    #[error("cannot splice marker at offset {position}: {reason}")]
    Splice { position: usize, reason: &'static str },
}

impl MarkerError {
    /// Byte offset in the scanned buffer this error points at, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            MarkerError::UnterminatedMarker { position, .. }
            | MarkerError::Splice { position, .. } => Some(*position),
            MarkerError::MalformedBody { offset, .. } => Some(*offset),
            MarkerError::InvalidDelimiters(_) => None,
        }
    }
}
