use alloc::string::ToString;
use core::hash::Hash;
use core::hash::Hasher;
use core::str::FromStr;

use bytes::Buf;
use bytes::Bytes;

use crate::OCTETS;
use crate::Result;
use crate::error::Int64Error;
use crate::octets::Octets64;
use crate::octets::from_halves;
use crate::octets::impl_octets_traits;
use crate::octets::negate;
use crate::octets::window;

const TWO_POW_32: f64 = 4_294_967_296.0;
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// The accepted shapes of a value assignment.
///
/// Each variant selects one construction path explicitly:
///
/// * `Halves` writes two unsigned 32-bit words, high word first.
/// * `Number` splits a signed `f64` and applies two's complement when negative.
/// * `Hex` parses up to 16 hex digits with an optional `0x` prefix; the digits
///   already are the bit pattern, so no negation happens.
/// * `Buffer` takes 8 bytes from a slice starting at the given offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Int64Input<'a> {
    Halves { hi: u32, lo: u32 },
    Number(f64),
    Hex(&'a str),
    Buffer(&'a [u8], usize),
}

impl Int64Input<'_> {
    /// Builds the 8-byte encoding without touching any destination.
    pub fn encode(self) -> Result<[u8; OCTETS]> {
        match self {
            Int64Input::Halves { hi, lo } => Ok(from_halves(hi, lo)),
            Int64Input::Number(value) => encode_number(value),
            Int64Input::Hex(src) => {
                parse_hex(src.as_bytes()).ok_or_else(|| Int64Error::InvalidHex(src.to_string()))
            }
            Int64Input::Buffer(buf, offset) => window(buf, offset).copied(),
        }
    }
}

impl From<(u32, u32)> for Int64Input<'_> {
    fn from((hi, lo): (u32, u32)) -> Self {
        Int64Input::Halves { hi, lo }
    }
}

impl From<f64> for Int64Input<'_> {
    fn from(value: f64) -> Self {
        Int64Input::Number(value)
    }
}

impl<'a> From<&'a str> for Int64Input<'a> {
    fn from(src: &'a str) -> Self {
        Int64Input::Hex(src)
    }
}

impl<'a> From<&'a [u8]> for Int64Input<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Int64Input::Buffer(buf, 0)
    }
}

/// Sign and magnitude split of a finite integral `f64`.
///
/// Anything that would lose bits is rejected: fractions, and magnitudes
/// outside `[-2^63, 2^63)` whose high word would overflow or reach the sign bit.
fn encode_number(value: f64) -> Result<[u8; OCTETS]> {
    if !value.is_finite() {
        return Err(Int64Error::InvalidNumber(value));
    }
    if value % 1.0 != 0.0 || !(-TWO_POW_63..TWO_POW_63).contains(&value) {
        return Err(Int64Error::Range(value));
    }
    let negative = value < 0.0;
    let magnitude = if negative { -value } else { value };
    let lo = magnitude % TWO_POW_32;
    let hi = (magnitude - lo) / TWO_POW_32;
    if hi > f64::from(u32::MAX) {
        return Err(Int64Error::Range(value));
    }

    let mut octets = from_halves(hi as u32, lo as u32);
    if negative {
        negate(&mut octets);
    }
    Ok(octets)
}

/// Strips an optional `0x`, then reads the last 8 digits as the low word and
/// whatever precedes them as the high word.
const fn parse_hex(src: &[u8]) -> Option<[u8; OCTETS]> {
    let digits = match src {
        [b'0', b'x' | b'X', rest @ ..] => rest,
        _ => src,
    };
    if digits.is_empty() || digits.len() > 2 * OCTETS {
        return None;
    }
    let split = digits.len().saturating_sub(OCTETS);
    let (high, low) = digits.split_at(split);
    match (parse_word(high), parse_word(low)) {
        (Some(hi), Some(lo)) => Some(from_halves(hi, lo)),
        _ => None,
    }
}

const fn parse_word(digits: &[u8]) -> Option<u32> {
    let mut word = 0u32;
    let mut i = 0;
    while i < digits.len() {
        let nibble = match digits[i] {
            d @ b'0'..=b'9' => d - b'0',
            d @ b'a'..=b'f' => d - b'a' + 10,
            d @ b'A'..=b'F' => d - b'A' + 10,
            _ => return None,
        };
        word = (word << 4) | nibble as u32;
        i += 1;
    }
    Some(word)
}

/// A signed 64-bit integer held as 8 big-endian two's-complement octets.
///
/// The value owns its storage and always sits at offset 0. Use
/// [`Int64View`](crate::Int64View) or [`Int64ViewMut`](crate::Int64ViewMut)
/// to work over a window of a larger buffer without copying.
///
/// ```
/// use fixed_int64::{FixedInt64, Octets64};
///
/// let v = FixedInt64::from_halves(0xfffa_ffff, 0xffff_f700);
/// assert_eq!(v.to_octet_string(""), "fffafffffffff700");
/// assert_eq!(v.to_number(true), -0x5000000000900_i64 as f64);
/// ```
#[derive(Clone, Copy, Default)]
pub struct FixedInt64 {
    octets: [u8; OCTETS],
}

impl FixedInt64 {
    pub const ZERO: Self = Self::from_hex_const("0");
    pub const ONE: Self = Self::from_hex_const("1");
    pub const NEG_ONE: Self = Self::from_hex_const("ffffffffffffffff");
    pub const MIN: Self = Self::from_hex_const("8000000000000000");
    pub const MAX: Self = Self::from_hex_const("7fffffffffffffff");

    /// Assigns from any [`Int64Input`] shape.
    pub fn new<'a>(input: impl Into<Int64Input<'a>>) -> Result<Self> {
        input.into().encode().map(Self::from_octets)
    }

    #[inline(always)]
    pub const fn from_octets(octets: [u8; OCTETS]) -> Self {
        Self { octets }
    }

    #[inline(always)]
    pub const fn from_halves(hi: u32, lo: u32) -> Self {
        Self::from_octets(from_halves(hi, lo))
    }

    /// Splits `value` into two 32-bit halves, negating afterwards when it is
    /// negative.
    ///
    /// Returns [`Int64Error::Range`] for fractional values and for values
    /// outside `[-2^63, 2^63)`, and [`Int64Error::InvalidNumber`] for NaN or
    /// infinities.
    pub fn from_number(value: f64) -> Result<Self> {
        encode_number(value).map(Self::from_octets)
    }

    pub fn from_hex(src: &str) -> Result<Self> {
        Int64Input::Hex(src).encode().map(Self::from_octets)
    }

    /// Compile-time hex literal.
    ///
    /// # Panics
    /// On malformed input; in a `const` item this is a build error.
    pub const fn from_hex_const(literal: &str) -> Self {
        if let Some(octets) = parse_hex(literal.as_bytes()) {
            Self::from_octets(octets)
        } else {
            const_panic::concat_panic!("invalid int64 hex literal: ", literal)
        }
    }

    /// Copies `buf[offset..offset + 8]`.
    pub fn from_slice(buf: &[u8], offset: usize) -> Result<Self> {
        window(buf, offset).copied().map(Self::from_octets)
    }

    /// Reads 8 big-endian bytes from `buf`, leaving it untouched on underflow.
    pub fn get(buf: &mut impl Buf) -> Result<Self> {
        let remaining = buf.remaining();
        if remaining < OCTETS {
            return Err(Int64Error::BufferTooSmall { offset: 0, len: remaining });
        }
        let mut octets = [0u8; OCTETS];
        buf.copy_to_slice(&mut octets);
        Ok(Self::from_octets(octets))
    }

    /// Replaces the value. On error the previous octets are kept.
    pub fn set_value<'a>(&mut self, input: impl Into<Int64Input<'a>>) -> Result<()> {
        self.octets = input.into().encode()?;
        Ok(())
    }

    #[inline(always)]
    pub const fn into_octets(self) -> [u8; OCTETS] {
        self.octets
    }

    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.octets)
    }
}

impl Octets64 for FixedInt64 {
    #[inline(always)]
    fn octets(&self) -> &[u8; OCTETS] {
        &self.octets
    }
}

impl_octets_traits!("FixedInt64", FixedInt64; crate::Int64View<'_>, crate::Int64ViewMut<'_>);

impl Hash for FixedInt64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.octets.hash(state);
    }
}

impl From<[u8; OCTETS]> for FixedInt64 {
    fn from(octets: [u8; OCTETS]) -> Self {
        Self::from_octets(octets)
    }
}

impl From<FixedInt64> for [u8; OCTETS] {
    fn from(value: FixedInt64) -> Self {
        value.octets
    }
}

impl From<i64> for FixedInt64 {
    fn from(value: i64) -> Self {
        Self::from_octets(value.to_be_bytes())
    }
}

impl From<FixedInt64> for i64 {
    fn from(value: FixedInt64) -> Self {
        value.to_i64()
    }
}

impl TryFrom<f64> for FixedInt64 {
    type Error = Int64Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_number(value)
    }
}

impl FromStr for FixedInt64 {
    type Err = Int64Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
