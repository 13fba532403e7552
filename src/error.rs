use font_types::Tag;
use thiserror::Error;

/// Errors that abort a WOFF to sfnt conversion.
///
/// There is no partial-success mode: any of these ends the whole
/// conversion, and output already written belongs to the caller to
/// discard.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input does not start with the `wOFF` signature.
    #[error("input is not a WOFF 1.0 font")]
    NotWoff,
    /// The header, table directory, or a table payload is truncated.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A directory entry points past the end of the input.
    #[error("table `{0}` extends past the end of the input")]
    OutOfBounds(Tag),
    /// The zlib stream for a table failed to inflate.
    #[error("failed to inflate table `{0}`: {1}")]
    Decompress(Tag, String),
    /// A table inflated to a size other than its declared original length.
    #[error("table `{tag}` inflated to {actual} bytes, expected {expected}")]
    LengthMismatch { tag: Tag, expected: u32, actual: u32 },
    /// A table is too short for the structure it declares.
    #[error("malformed `{0}` table")]
    MalformedTable(Tag),
    /// A read or write on a caller-supplied stream failed.
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}

impl From<bytes::TryGetError> for ConvertError {
    fn from(_value: bytes::TryGetError) -> Self {
        Self::UnexpectedEof
    }
}
