//! Byte-level algorithms over an 8-byte big-endian two's-complement word.
//!
//! Nothing here relies on native 64-bit arithmetic for the signed encoding:
//! negation and magnitude recovery ripple a carry through the octets one byte
//! at a time, and the numeric conversion accumulates in `f64`.

use alloc::borrow::Cow;
use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use core::fmt::Write as _;

use bytes::BufMut;

use crate::OCTETS;
use crate::Result;
use crate::error::Int64Error;

/// Smallest magnitude at which `f64` stops representing every integer exactly.
pub const MAX_SAFE: f64 = 9_007_199_254_740_992.0;
/// Negative counterpart of [`MAX_SAFE`].
pub const MIN_SAFE: f64 = -MAX_SAFE;

const SIGN_MASK: u8 = 0x80;
const RADIX_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Writes `hi` into bytes 0..4 and `lo` into bytes 4..8, most significant first.
#[inline(always)]
pub(crate) const fn from_halves(hi: u32, lo: u32) -> [u8; OCTETS] {
    let hi = hi.to_be_bytes();
    let lo = lo.to_be_bytes();
    [hi[0], hi[1], hi[2], hi[3], lo[0], lo[1], lo[2], lo[3]]
}

/// Two's-complement negation in place: complement every byte and add one,
/// rippling the carry from the least significant byte upward.
#[inline]
pub(crate) const fn negate(octets: &mut [u8; OCTETS]) {
    let mut carry = 1u16;
    let mut i = OCTETS;
    while i > 0 {
        i -= 1;
        let v = (octets[i] ^ 0xff) as u16 + carry;
        octets[i] = (v & 0xff) as u8;
        carry = v >> 8;
    }
}

/// Sign flag and absolute value of the word, accumulated in floating point.
///
/// Exact below [`MAX_SAFE`]; above it the low bits are rounded away.
pub(crate) fn magnitude(octets: [u8; OCTETS]) -> (bool, f64) {
    let negative = octets[0] & SIGN_MASK != 0;
    let mut x = 0.0;
    let mut m = 1.0;
    let mut carry = 1u16;
    for &byte in octets.iter().rev() {
        let mut v = u16::from(byte);
        if negative {
            v = (v ^ 0xff) + carry;
            carry = v >> 8;
            v &= 0xff;
        }
        x += f64::from(v) * m;
        m *= 256.0;
    }
    (negative, x)
}

pub(crate) fn to_number(octets: [u8; OCTETS], allow_imprecise: bool) -> f64 {
    let (negative, x) = magnitude(octets);
    if !allow_imprecise && x >= MAX_SAFE {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }
    if negative { -x } else { x }
}

/// Sign bits first, then unsigned big-endian byte order.
pub(crate) fn compare(a: [u8; OCTETS], b: [u8; OCTETS]) -> Ordering {
    let (sign_a, sign_b) = (a[0] & SIGN_MASK, b[0] & SIGN_MASK);
    if sign_a != sign_b {
        // the cleared sign bit is the larger value
        return sign_b.cmp(&sign_a);
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.cmp(y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Renders an integral `f64` (or an infinity) in `radix`.
///
/// Callers pass values produced by [`to_number`] with `allow_imprecise` unset,
/// so every finite input is below [`MAX_SAFE`] and fits a `u64` exactly.
pub(crate) fn write_radix(value: f64, radix: u32, out: &mut impl fmt::Write) -> fmt::Result {
    debug_assert!((2..=36).contains(&radix));
    if value.is_infinite() {
        return out.write_str(if value < 0.0 { "-Infinity" } else { "Infinity" });
    }
    let negative = value < 0.0;
    let mut rest = (if negative { -value } else { value }) as u64;
    let radix = u64::from(radix);
    let mut digits = [0u8; 64];
    let mut pos = digits.len();
    loop {
        pos -= 1;
        digits[pos] = RADIX_DIGITS[(rest % radix) as usize];
        rest /= radix;
        if rest == 0 {
            break;
        }
    }
    if negative {
        out.write_char('-')?;
    }
    digits[pos..].iter().try_for_each(|&d| out.write_char(char::from(d)))
}

#[inline]
pub(crate) fn window(buf: &[u8], offset: usize) -> Result<&[u8; OCTETS]> {
    buf.get(offset..)
        .and_then(<[u8]>::first_chunk)
        .ok_or(Int64Error::BufferTooSmall { offset, len: buf.len() })
}

#[inline]
pub(crate) fn window_mut(buf: &mut [u8], offset: usize) -> Result<&mut [u8; OCTETS]> {
    let len = buf.len();
    buf.get_mut(offset..)
        .and_then(<[u8]>::first_chunk_mut)
        .ok_or(Int64Error::BufferTooSmall { offset, len })
}

/// Octets joined by a separator, formatted without allocating.
pub struct OctetString<'a> {
    octets: &'a [u8; OCTETS],
    sep: &'a str,
}

impl fmt::Display for OctetString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &byte) in self.octets.iter().enumerate() {
            if i > 0 {
                f.write_str(self.sep)?;
            }
            f.write_char(char::from(HEX_DIGITS[usize::from(byte >> 4)]))?;
            f.write_char(char::from(HEX_DIGITS[usize::from(byte & 0x0f)]))?;
        }
        Ok(())
    }
}

/// Read side shared by owned values and borrowed windows.
///
/// Implementors only expose their 8 octets and their offset into the backing
/// buffer; every conversion and comparison is provided on top of that.
pub trait Octets64 {
    fn octets(&self) -> &[u8; OCTETS];

    /// Byte offset of the window inside its backing buffer. Owned values are
    /// always at offset 0.
    fn offset(&self) -> usize {
        0
    }

    /// Bit 7 of byte 0.
    #[inline]
    fn sign_bit(&self) -> bool {
        self.octets()[0] & SIGN_MASK != 0
    }

    #[inline]
    fn is_negative(&self) -> bool {
        self.sign_bit()
    }

    /// Approximate value as `f64`.
    ///
    /// Exact for magnitudes below 2^53. At or above that boundary the result
    /// is `±INFINITY` unless `allow_imprecise` is set, in which case it is the
    /// nearest value the accumulation can produce. Use [`Octets64::to_i64`] or
    /// the octets when exactness matters.
    #[inline]
    fn to_number(&self, allow_imprecise: bool) -> f64 {
        to_number(*self.octets(), allow_imprecise)
    }

    /// Exact native value.
    #[inline]
    fn to_i64(&self) -> i64 {
        i64::from_be_bytes(*self.octets())
    }

    /// Two lowercase hex digits per byte, joined with `sep`.
    ///
    /// This is the only lossless textual form.
    fn to_octet_string(&self, sep: &str) -> String {
        let mut out = String::with_capacity(2 * OCTETS + sep.len() * (OCTETS - 1));
        // writing into a String never fails
        let _ = write!(out, "{}", self.octet_string(sep));
        out
    }

    /// Lazy variant of [`Octets64::to_octet_string`] for use in `format!`.
    fn octet_string<'a>(&'a self, sep: &'a str) -> OctetString<'a> {
        OctetString { octets: self.octets(), sep }
    }

    /// `to_number(false)` rendered in `radix`; inherits its infinity behaviour.
    fn to_decimal_string(&self, radix: u32) -> Result<String> {
        if !(2..=36).contains(&radix) {
            return Err(Int64Error::InvalidRadix(radix));
        }
        let mut out = String::new();
        let _ = write_radix(self.to_number(false), radix, &mut out);
        Ok(out)
    }

    /// The 8 big-endian octets.
    ///
    /// Borrows the storage only when `allow_aliasing` is set and the window
    /// sits at offset 0; every other call returns an independent copy.
    fn to_buffer(&self, allow_aliasing: bool) -> Cow<'_, [u8; OCTETS]> {
        if allow_aliasing && self.offset() == 0 {
            Cow::Borrowed(self.octets())
        } else {
            Cow::Owned(*self.octets())
        }
    }

    /// Copies the octets into `target[offset..offset + 8]`.
    ///
    /// Fails without writing anything when the target is too short.
    fn copy_into(&self, target: &mut [u8], offset: usize) -> Result<()> {
        window_mut(target, offset)?.copy_from_slice(self.octets());
        Ok(())
    }

    /// Appends the octets to a [`BufMut`].
    #[inline]
    fn put<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(self.octets());
    }

    #[inline]
    fn compare<O: Octets64 + ?Sized>(&self, other: &O) -> Ordering {
        compare(*self.octets(), *other.octets())
    }

    #[inline]
    fn equals<O: Octets64 + ?Sized>(&self, other: &O) -> bool {
        self.compare(other).is_eq()
    }
}

/// Emits the formatting impls, `Eq`/`Ord`, and the comparisons against the
/// other [`Octets64`] implementors listed after the `;`.
macro_rules! impl_octets_traits {
    ($name:literal, $ty:ty; $($other:ty),+) => {
        impl core::fmt::Display for $ty {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                $crate::octets::write_radix($crate::Octets64::to_number(self, false), 10, f)
            }
        }

        impl core::fmt::LowerHex for $ty {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&$crate::Octets64::octet_string(self, ""), f)
            }
        }

        impl core::fmt::Debug for $ty {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct($name)
                    .field("value", &format_args!("{self}"))
                    .field(
                        "octets",
                        &format_args!("\"{}\"", $crate::Octets64::octet_string(self, " ")),
                    )
                    .finish()
            }
        }

        impl PartialEq for $ty {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                $crate::Octets64::equals(self, other)
            }
        }

        impl Eq for $ty {}

        impl PartialOrd for $ty {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            #[inline]
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                $crate::Octets64::compare(self, other)
            }
        }

        $(impl_octets_traits!(@cmp $ty, $other);)+
    };
    (@cmp $ty:ty, $other:ty) => {
        impl PartialEq<$other> for $ty {
            #[inline]
            fn eq(&self, other: &$other) -> bool {
                $crate::Octets64::equals(self, other)
            }
        }

        impl PartialOrd<$other> for $ty {
            #[inline]
            fn partial_cmp(&self, other: &$other) -> Option<core::cmp::Ordering> {
                Some($crate::Octets64::compare(self, other))
            }
        }
    };
}
pub(crate) use impl_octets_traits;
