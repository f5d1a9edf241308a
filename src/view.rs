//! Windows over externally owned buffers.
//!
//! A view borrows exactly bytes `[offset, offset + 8)` of the caller's slice and
//! never reads or writes outside them. [`Int64View`] is read-only.
//! [`Int64ViewMut`] writes assignments straight into the caller's memory,
//! which is the only way this crate mutates a borrowed buffer.

use crate::FixedInt64;
use crate::OCTETS;
use crate::Result;
use crate::octets::Octets64;
use crate::octets::impl_octets_traits;
use crate::octets::window;
use crate::octets::window_mut;
use crate::value::Int64Input;

#[derive(Clone, Copy)]
pub struct Int64View<'a> {
    octets: &'a [u8; OCTETS],
    offset: usize,
}

impl<'a> Int64View<'a> {
    /// Borrows `buf[offset..offset + 8]`.
    pub fn new(buf: &'a [u8], offset: usize) -> Result<Self> {
        Ok(Self {
            octets: window(buf, offset)?,
            offset,
        })
    }

    /// Detaches the octets into an owned value.
    #[inline]
    pub const fn to_value(&self) -> FixedInt64 {
        FixedInt64::from_octets(*self.octets)
    }
}

impl Octets64 for Int64View<'_> {
    #[inline(always)]
    fn octets(&self) -> &[u8; OCTETS] {
        self.octets
    }

    #[inline(always)]
    fn offset(&self) -> usize {
        self.offset
    }
}

pub struct Int64ViewMut<'a> {
    octets: &'a mut [u8; OCTETS],
    offset: usize,
}

impl<'a> Int64ViewMut<'a> {
    /// Mutably borrows `buf[offset..offset + 8]`.
    pub fn new(buf: &'a mut [u8], offset: usize) -> Result<Self> {
        Ok(Self {
            octets: window_mut(buf, offset)?,
            offset,
        })
    }

    /// Writes a new value into the borrowed window.
    ///
    /// The caller's buffer is modified. The encoding (including any
    /// two's-complement negation) is computed first and committed in one
    /// copy, so on error the window keeps its previous bytes.
    pub fn set_value<'i>(&mut self, input: impl Into<Int64Input<'i>>) -> Result<()> {
        *self.octets = input.into().encode()?;
        Ok(())
    }

    #[inline]
    pub fn as_view(&self) -> Int64View<'_> {
        Int64View {
            octets: &*self.octets,
            offset: self.offset,
        }
    }

    #[inline]
    pub const fn to_value(&self) -> FixedInt64 {
        FixedInt64::from_octets(*self.octets)
    }
}

impl Octets64 for Int64ViewMut<'_> {
    #[inline(always)]
    fn octets(&self) -> &[u8; OCTETS] {
        &*self.octets
    }

    #[inline(always)]
    fn offset(&self) -> usize {
        self.offset
    }
}

impl_octets_traits!("Int64View", Int64View<'_>; FixedInt64, Int64ViewMut<'_>);
impl_octets_traits!("Int64ViewMut", Int64ViewMut<'_>; FixedInt64, Int64View<'_>);

impl From<Int64View<'_>> for FixedInt64 {
    fn from(view: Int64View<'_>) -> Self {
        view.to_value()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use alloc::borrow::Cow;
    use alloc::vec::Vec;
    use core::cmp::Ordering;

    use super::*;
    use crate::error::Int64Error;

    fn sample_buffer() -> [u8; 16] {
        let mut buf = [0u8; 16];
        buf[2..10].copy_from_slice(&[0xff, 0xfa, 0xff, 0xff, 0xff, 0xff, 0xf7, 0x00]);
        buf
    }

    #[test]
    fn view_reads_at_offset() {
        let buf = sample_buffer();
        let view = Int64View::new(&buf, 2).unwrap();
        assert_eq!(view.to_octet_string(""), "fffafffffffff700");
        assert_eq!(view.offset(), 2);
        assert_eq!(view, FixedInt64::from_halves(0xfffa_ffff, 0xffff_f700));
        assert_eq!(FixedInt64::from(view), FixedInt64::from_halves(0xfffa_ffff, 0xffff_f700));
        assert_eq!(FixedInt64::from(view).octets(), &buf[2..10]);
    }

    #[test]
    fn view_rejects_short_window() {
        let buf = sample_buffer();
        assert_eq!(
            Int64View::new(&buf, 9).err(),
            Some(Int64Error::BufferTooSmall { offset: 9, len: 16 })
        );
        assert!(Int64View::new(&buf, 8).is_ok());
    }

    #[test]
    fn to_buffer_copies_when_offset_is_nonzero() {
        let buf = sample_buffer();
        let shifted = Int64View::new(&buf, 2).unwrap();
        assert!(matches!(shifted.to_buffer(true), Cow::Owned(_)));

        let aligned = Int64View::new(&buf[2..], 0).unwrap();
        assert!(matches!(aligned.to_buffer(true), Cow::Borrowed(_)));
        assert_eq!(aligned.to_buffer(true), shifted.to_buffer(false));
    }

    #[test]
    fn negative_assignment_stays_inside_window() {
        let mut buf = [0xaau8; 12];
        {
            let mut view = Int64ViewMut::new(&mut buf, 2).unwrap();
            view.set_value(-1.0).unwrap();
            assert_eq!(view.to_number(false), -1.0_f64);
            assert!(view.set_value("not hex").is_err());
            assert_eq!(view.to_value(), FixedInt64::NEG_ONE);
        }
        assert_eq!(buf[..2], [0xaa, 0xaa]);
        assert_eq!(buf[2..10], [0xff; 8]);
        assert_eq!(buf[10..], [0xaa, 0xaa]);
    }

    #[test]
    fn mutable_view_compares_with_owned() {
        let mut buf = [0u8; 8];
        let mut view = Int64ViewMut::new(&mut buf, 0).unwrap();
        view.set_value((0x8000_0000_u32, 0_u32)).unwrap();
        assert_eq!(view, FixedInt64::MIN);
        assert!(view < FixedInt64::ZERO);
        assert!(view.as_view() < FixedInt64::ONE);
    }

    #[test]
    fn views_sort_as_signed_values() {
        let mut wire = [0u8; 32];
        for (chunk, v) in wire.chunks_exact_mut(8).zip([5_i64, -1, i64::MIN, 0]) {
            chunk.copy_from_slice(&v.to_be_bytes());
        }
        let mut views: Vec<Int64View<'_>> =
            (0..4).map(|i| Int64View::new(&wire, i * 8).unwrap()).collect();
        views.sort();
        let sorted: Vec<i64> = views.iter().map(Octets64::to_i64).collect();
        assert_eq!(sorted, [i64::MIN, -1, 0, 5]);

        let (a, b) = (views[1], views[3]);
        assert_eq!(a.partial_cmp(&b), Some(a.cmp(&b)));
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn mutable_views_are_totally_ordered() {
        let (mut lo, mut hi) = ([0u8; 8], [0u8; 8]);
        let mut x = Int64ViewMut::new(&mut lo, 0).unwrap();
        let mut y = Int64ViewMut::new(&mut hi, 0).unwrap();
        x.set_value(-2.0).unwrap();
        y.set_value(-1.0).unwrap();
        assert_eq!(x.cmp(&y), Ordering::Less);
        assert_eq!(y.partial_cmp(&x), Some(Ordering::Greater));
        assert_eq!(x.cmp(&x), Ordering::Equal);
    }
}
