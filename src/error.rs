use alloc::string::String;
use core::fmt;

/// Errors raised while building or copying a [`FixedInt64`](crate::FixedInt64).
///
/// Every variant carries the offending input so the message can name it.
#[derive(Clone, Debug, PartialEq)]
pub enum Int64Error {
    /// The number cannot be split into two 32-bit halves without truncation
    /// or wrapping into the sign bit.
    Range(f64),
    /// NaN or an infinity was supplied where a finite number is required.
    InvalidNumber(f64),
    /// The string is not 1 to 16 hex digits with an optional `0x` prefix.
    InvalidHex(String),
    /// Radix outside `2..=36`.
    InvalidRadix(u32),
    /// The buffer cannot hold 8 bytes starting at `offset`.
    BufferTooSmall { offset: usize, len: usize },
}

impl fmt::Display for Int64Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Int64Error::Range(value) => write!(f, "{value} is outside Int64 range"),
            Int64Error::InvalidNumber(value) => write!(f, "{value} must be a finite number"),
            Int64Error::InvalidHex(value) => {
                write!(f, "{value:?} is not a hexadecimal int64 string")
            }
            Int64Error::InvalidRadix(radix) => write!(f, "radix {radix} must be between 2 and 36"),
            Int64Error::BufferTooSmall { offset, len } => {
                write!(f, "buffer underflow: need 8 bytes at offset {offset}, buffer holds {len}")
            }
        }
    }
}

impl core::error::Error for Int64Error {}
