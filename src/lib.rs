//! # twirl
//!
//! *Turn your pixels around.*
//!
//! Geometric transforms over raw, strided 8-bit pixel buffers: lossless
//! quarter turns, EXIF orientation, and arbitrary-angle rotation with Q16
//! fixed-point bilinear sampling. Around that engine sit the small helpers an
//! image pipeline needs next to it: format conversion, premultiply and matte,
//! mean color, rectangle outlines and clipped rectangle copies.
//!
//! ## Buffers
//!
//! Every operation takes `&[u8]` / `&mut [u8]` plus `width`, `height` and a
//! byte `stride`. Row `y` starts at `y * stride`; pixel `x` at
//! `y * stride + x * channels`. Padding bytes are never read or written, and
//! the byte-level API never allocates. All inputs are validated before the
//! first write, so an `Err` means the destination is untouched.
//!
//! ```rust
//! use twirl::{rotate, Rotation};
//!
//! let src = [10u8, 20, 30, 40]; // 2×2 gray
//! let mut dst = [0u8; 4];
//! rotate(Rotation::Deg90, &src, &mut dst, 2, 2, 1, 2, 2).unwrap();
//! assert_eq!(dst, [30, 10, 40, 20]);
//! ```
//!
//! ## Dispatch
//!
//! Kernels are written once, generic over the channel count, and dispatched
//! per call through archmage to x86-64 AVX2, ARM NEON, WASM SIMD128 or scalar
//! wrappers. Output is bit-identical across tiers.
//!
//! ## Feature flags
//!
//! - **`std`** (default): enables the `bilinear` rotator, which needs
//!   `sin`/`cos`/`round` from the standard library.
//! - **`rgb`**: `typed` helpers over `rgb` crate pixel types.
//! - **`imgref`**: whole-image wrappers over `imgref` types. Implies `rgb`.
//! - **`tracing`**: emit `tracing` events at operation entry and on rejected
//!   input.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

macro_rules! trace_op {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)+);
    };
}

mod error;
mod layout;

pub mod composite;
pub mod convert;
pub mod copy;
pub mod draw;
pub mod exif;
pub mod rotate;
pub mod stats;

#[cfg(feature = "std")]
pub mod bilinear;

#[cfg(feature = "rgb")]
pub mod typed;

#[cfg(feature = "imgref")]
pub mod imgref;

pub use error::PixelError;
pub use layout::{Channels, required_len};

pub use composite::{ChannelOrder, matte, premultiply};
pub use copy::{Rect, copy_rect};
pub use draw::draw_rect;
pub use exif::{Orientation, apply_exif_orientation, oriented_size};
pub use rotate::{Rotation, rotate, rotate_180, rotate_270, rotate_90, rotate_degrees};
pub use stats::avg_color;

#[cfg(feature = "std")]
pub use bilinear::{RotateFilter, RotateParams, rotate_bilinear, rotated_bounds};

/// Log a rejected call and hand the error back.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
#[inline]
pub(crate) fn rejected(op: &'static str, err: PixelError) -> PixelError {
    #[cfg(feature = "tracing")]
    tracing::debug!(op, error = %err, "rejected");
    err
}
