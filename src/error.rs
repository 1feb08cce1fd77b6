use core::fmt::{Display, Formatter};

/// Textual encodings a [`BitMap`](crate::BitMap) can be decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// A string of `'0'` and `'1'` characters, most significant bit first.
    Binary,
    /// A string of hexadecimal digits, most significant nibble first.
    Hex,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Format::Binary => write!(f, "binary"),
            Format::Hex => write!(f, "hex"),
        }
    }
}

/// Errors returned by [`BitMap`](crate::BitMap) operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A bit index was at or past [`BitMap::size`](crate::BitMap::size).
    #[error("bit index {idx} out of bounds for bitmap of size {size}")]
    OutOfRange {
        /// The offending index.
        idx: usize,
        /// The number of addressable bits.
        size: usize,
    },

    /// An argument was rejected, e.g. a zero step or a value slice whose
    /// length does not match the addressed range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A string could not be decoded.
    #[error("invalid {format} string: unexpected {found:?} at position {position}")]
    InvalidFormat {
        /// The encoding that was being decoded.
        format: Format,
        /// Byte offset of the bad character in the input.
        position: usize,
        /// The bad character.
        found: char,
    },

    /// A file held fewer bytes than the requested capacity needs.
    #[error("truncated input: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes needed.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
