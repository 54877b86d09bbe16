//! Parse error taxonomy shared by every format reader.

use thiserror::Error;

/// Errors surfaced by the format readers.
///
/// The first error aborts the whole `parse` call; partially decoded records
/// are never returned. Two cases are deliberately *not* errors: unknown PNG
/// chunk names (preserved with no decoded fields) and unknown ICC tag
/// signatures (skipped).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A read would run past the end of the input buffer.
    #[error("unexpected end of input")]
    EndOfInput,

    /// `expect_byte`/`expect_bytes` saw something else.
    #[error("expected byte 0x{expected:02X}, found 0x{found:02X}")]
    UnexpectedByte { expected: u8, found: u8 },

    /// Top-level magic did not match the format being parsed.
    #[error("bad {format} signature")]
    BadSignature { format: &'static str },

    /// ICC-specific structural failure.
    #[error("invalid ICC profile: {0}")]
    InvalidIcc(&'static str),

    /// Color table byte count is not a multiple of the entry width
    /// (3 for GIF, 4 for BMP palettes).
    #[error("invalid color table length {len}")]
    InvalidColorTableLength { len: usize },

    /// EXIF field type outside the set {1, 2, 3, 4, 5, 7, 9, 10}.
    #[error("unknown EXIF field type {type_code}")]
    UnknownExifType { type_code: u16 },

    /// A known PNG chunk's payload did not match its declared schema.
    #[error("chunk {chunk_name} does not match its schema")]
    SchemaMismatch { chunk_name: String },

    /// GIF extension label outside the set {0x01, 0xF9, 0xFE, 0xFF}.
    #[error("unexpected GIF extension label 0x{label:02X}")]
    UnexpectedExtension { label: u8 },

    /// An LZW code that is neither in the table nor the next free slot,
    /// or a data code before any clear code.
    #[error("unexpected LZW code {code}")]
    UnexpectedLzwCode { code: u16 },

    /// Non-zero bits remain after the LZW end-of-information code.
    #[error("non-zero bits after LZW end code")]
    UnexpectedTrailingBits,

    /// Bytes remain after the format's declared terminator.
    #[error("trailing bytes after end of stream")]
    TrailingBytes,

    /// No ZIP end-of-central-directory signature anywhere in the buffer.
    #[error("ZIP end-of-central-directory record not found")]
    MissingCentralDirectory,

    /// A bit-level read went past the end of the buffer.
    #[error("bit read out of bounds")]
    BitCursorOutOfBounds,

    /// BMP DIB header size other than the supported 40 and 124.
    #[error("unsupported DIB header size {size}")]
    UnsupportedDibHeader { size: u32 },
}
