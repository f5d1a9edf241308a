//! A fixed-width signed 64-bit integer stored as 8 big-endian octets.
//!
//! [`FixedInt64`] keeps the exact two's-complement bit pattern of an `int64`
//! around for hosts and wire formats whose native number is a double and can
//! only hold integers up to 2^53 exactly. Values are built from two 32-bit
//! halves, an `f64`, a hex string or a byte window; they are read back as an
//! exact octet/hex form or as an approximate `f64` that turns into `±INFINITY`
//! past the safe boundary unless imprecision is explicitly allowed.
//!
//! ```
//! use fixed_int64::{FixedInt64, Int64View, Octets64};
//!
//! let v: FixedInt64 = "0x0000123450654321".parse()?;
//! assert_eq!(v.to_number(false), 0x1234_5065_4321_i64 as f64);
//!
//! let wire = [0u8, 0, 0xff, 0xfa, 0xff, 0xff, 0xff, 0xff, 0xf7, 0x00];
//! let view = Int64View::new(&wire, 2)?;
//! assert_eq!(view.to_octet_string(" "), "ff fa ff ff ff ff f7 00");
//! assert!(view < v);
//! # Ok::<(), fixed_int64::Int64Error>(())
//! ```

#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::inline_always)]
#![cfg_attr(not(feature = "std"), no_std)]

#[doc(hidden)]
pub extern crate alloc;

// Re-export the bytes crate for callers plumbing values through Buf/BufMut.
pub use bytes;

mod error;
mod octets;
#[cfg(feature = "serde")]
mod serde_impl;
mod value;
mod view;

pub use crate::error::Int64Error;
pub use crate::octets::MAX_SAFE;
pub use crate::octets::MIN_SAFE;
pub use crate::octets::OctetString;
pub use crate::octets::Octets64;
pub use crate::value::FixedInt64;
pub use crate::value::Int64Input;
pub use crate::view::Int64View;
pub use crate::view::Int64ViewMut;

/// Width of the encoding in bytes.
pub const OCTETS: usize = 8;

pub type Result<T> = core::result::Result<T, Int64Error>;
