//! Error types for the MiniPack codec

use crate::value::ValueKind;

/// Errors that can occur during MessagePack encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A fixed-width or length-prefixed read would run past the end of the buffer
    #[error("unexpected end of input buffer")]
    UnexpectedEof,
    /// The tag byte does not encode a value of the expected kind
    ///
    /// The decoder restores its cursor to the tag byte before returning this,
    /// so the same bytes can be retried against another kind.
    #[error("bad type: expected {0}")]
    BadType(ValueKind),
    /// Rollback requested without a read to undo
    #[error("no read history to roll back")]
    NoHistory,
    /// Extension payloads must carry at least one byte
    #[error("extension data must not be empty")]
    InvalidExtensionLength,
    /// String payload is not valid UTF-8
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
    /// Length does not fit the widest (32-bit) length field
    #[error("length exceeds the 32-bit wire limit")]
    Overflow,
}

impl Error {
    /// Returns true for speculative-decode mismatches that left the input untouched
    #[inline]
    pub const fn is_bad_type(&self) -> bool {
        matches!(self, Error::BadType(_))
    }
}

/// Result type alias for MiniPack operations
pub type Result<T> = core::result::Result<T, Error>;
